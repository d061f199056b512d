//! In-memory [`Store`] double for protocol tests.
//!
//! Keeps one JSON value per resource path, records every POST in arrival
//! order, and can be told to fail specific paths. Each call yields to the
//! scheduler exactly once before touching shared state — the same
//! suspension point a real network request has — so tests can overlap two
//! operations and observe their interleaving deterministically.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::Store;
use crate::model::Feed;

#[derive(Default)]
pub struct MemoryStore {
    resources: Mutex<HashMap<String, Value>>,
    /// Every POST body in arrival order, keyed by path.
    posts: Mutex<Vec<(String, Value)>>,
    replies: Mutex<HashMap<String, String>>,
    failing_gets: Mutex<HashSet<String>>,
    failing_posts: Mutex<HashSet<String>>,
    /// Roster restored by `POST /feeds/reset`.
    default_feeds: Mutex<Option<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the given roster at `/feeds`.
    pub fn with_feeds(feeds: &[Feed]) -> Self {
        let store = Self::new();
        store.set("/feeds", serde_json::to_value(feeds).unwrap());
        store
    }

    pub fn set(&self, path: &str, value: Value) {
        self.resources.lock().unwrap().insert(path.to_string(), value);
    }

    /// Text the store replies with on POSTs to `path` (default `OK`).
    pub fn set_reply(&self, path: &str, text: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(path.to_string(), text.to_string());
    }

    /// Roster that `POST /feeds/reset` restores.
    pub fn set_default_feeds(&self, feeds: &[Feed]) {
        *self.default_feeds.lock().unwrap() = Some(serde_json::to_value(feeds).unwrap());
    }

    pub fn fail_gets_to(&self, path: &str) {
        self.failing_gets.lock().unwrap().insert(path.to_string());
    }

    pub fn fail_posts_to(&self, path: &str) {
        self.failing_posts.lock().unwrap().insert(path.to_string());
    }

    /// The roster currently stored at `/feeds`.
    pub fn feeds(&self) -> Vec<Feed> {
        let resources = self.resources.lock().unwrap();
        resources
            .get("/feeds")
            .map(|value| serde_json::from_value(value.clone()).unwrap())
            .unwrap_or_default()
    }

    /// Raw JSON currently stored at `path`.
    pub fn resource(&self, path: &str) -> Option<Value> {
        self.resources.lock().unwrap().get(path).cloned()
    }

    /// Bodies of every POST made to `path`, in order.
    pub fn posts_to(&self, path: &str) -> Vec<Value> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn last_post_to(&self, path: &str) -> Option<Value> {
        self.posts_to(path).pop()
    }

    fn reply_for(&self, path: &str) -> String {
        self.replies
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| "OK".to_string())
    }

    fn record_post(&self, path: &str, body: Value) {
        self.posts.lock().unwrap().push((path.to_string(), body));
    }
}

impl Store for MemoryStore {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tokio::task::yield_now().await;
        if self.failing_gets.lock().unwrap().contains(path) {
            bail!("injected failure: GET {path}");
        }
        let value = self
            .resources
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .with_context(|| format!("no resource at {path}"))?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String> {
        tokio::task::yield_now().await;
        if self.failing_posts.lock().unwrap().contains(path) {
            bail!("injected failure: POST {path}");
        }
        let value = serde_json::to_value(body)?;
        self.record_post(path, value.clone());
        self.resources.lock().unwrap().insert(path.to_string(), value);
        Ok(self.reply_for(path))
    }

    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<String> {
        tokio::task::yield_now().await;
        if self.failing_posts.lock().unwrap().contains(path) {
            bail!("injected failure: POST {path}");
        }
        let body = Value::Object(
            fields
                .iter()
                .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                .collect(),
        );
        self.record_post(path, body);
        Ok(self.reply_for(path))
    }

    async fn post_empty(&self, path: &str) -> Result<String> {
        tokio::task::yield_now().await;
        if self.failing_posts.lock().unwrap().contains(path) {
            bail!("injected failure: POST {path}");
        }
        self.record_post(path, Value::Null);
        if path == "/feeds/reset" {
            if let Some(defaults) = self.default_feeds.lock().unwrap().clone() {
                self.resources
                    .lock()
                    .unwrap()
                    .insert("/feeds".to_string(), defaults);
            }
        }
        Ok(self.reply_for(path))
    }
}
