//! HTTP implementation of [`Store`] backed by the device's web server.

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

use super::Store;

/// Talks to the display over its HTTP API.
///
/// Holds one [`reqwest::Client`] so keep-alive connections are reused
/// across the panel's frequent small requests.
pub struct HttpStore {
    client: reqwest::Client,
    /// Base URL without a trailing slash, e.g. `http://192.168.1.50`.
    base: String,
}

impl HttpStore {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Store for HttpStore {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<String> {
        let response = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn post_empty(&self, path: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
