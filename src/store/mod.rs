//! Remote store abstraction layer.
//!
//! The device's REST API is the sole source of truth for every setting
//! and for the feed roster; the panel holds no authoritative state
//! between operations. This module defines the [`Store`] trait — the
//! thin contract the rest of the crate talks to — and the concrete
//! [`HttpStore`] that speaks to the device. Tests swap in the in-memory
//! double from [`memory`].
//!
//! The contract is deliberately minimal: `GET <resource>` yields JSON,
//! `POST <resource>` yields the device's plain-text status string, shown
//! to the user verbatim. Anything non-2xx, unreachable, or unparseable
//! surfaces as an error for the operation boundary to report.

mod http;

#[cfg(test)]
pub mod memory;

pub use http::HttpStore;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

/// Thin async contract over the device's REST API.
///
/// Every call is a suspension point: between any read and any write an
/// arbitrary amount of time passes, during which other operations may
/// run. Implementations perform no locking — see the roster module for
/// the consequences.
#[allow(async_fn_in_trait)]
pub trait Store {
    /// `GET` a JSON resource.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T>;

    /// `POST` a JSON body; returns the device's text reply.
    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String>;

    /// `POST` form-encoded fields; returns the device's text reply.
    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<String>;

    /// `POST` with an empty body; returns the device's text reply.
    async fn post_empty(&self, path: &str) -> Result<String>;
}
