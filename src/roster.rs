//! Feed roster management.
//!
//! The device holds an ordered list of feed subscriptions and accepts
//! only whole-array replacement: there is no per-feed endpoint, no
//! stable feed identifier, and no write versioning. Every mutation here
//! is therefore a read-modify-write sequence — fetch the full roster,
//! apply one change by positional index, post the full roster back.
//!
//! Two overlapping mutations can read the same snapshot and the later
//! write-back silently discards the earlier one (a lost update). The
//! panel does not serialise mutations; the race is inherent to the
//! device protocol and is pinned by
//! [`tests::overlapping_mutations_lose_first_write`]. Row indices are
//! likewise only meaningful against the snapshot the user was shown —
//! a concurrent edit can shift what a given index addresses.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::debug;

use crate::model::Feed;
use crate::store::Store;

pub struct RosterManager<S> {
    store: Arc<S>,
}

impl<S> Clone for RosterManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: Store> RosterManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetch the authoritative roster for rendering.
    pub async fn load(&self) -> Result<Vec<Feed>> {
        self.store.get_json("/feeds").await
    }

    /// Enable or disable the feed at `index`.
    pub async fn toggle(&self, index: usize, enabled: bool) -> Result<String> {
        let mut feeds: Vec<Feed> = self.store.get_json("/feeds").await?;
        let feed = feeds
            .get_mut(index)
            .ok_or_else(|| anyhow!("feed index {index} out of range"))?;
        feed.enabled = enabled;
        debug!("toggle feed {index} -> enabled={enabled}");
        self.store.post_json("/feeds", &feeds).await?;
        Ok(if enabled { "Feed enabled" } else { "Feed disabled" }.to_string())
    }

    /// Replace the URL of the feed at `index`.
    pub async fn set_url(&self, index: usize, url: &str) -> Result<String> {
        let mut feeds: Vec<Feed> = self.store.get_json("/feeds").await?;
        let feed = feeds
            .get_mut(index)
            .ok_or_else(|| anyhow!("feed index {index} out of range"))?;
        feed.url = url.to_string();
        debug!("set url of feed {index}");
        self.store.post_json("/feeds", &feeds).await?;
        Ok("Feed URL updated".to_string())
    }

    /// Append a new feed, enabled by default.
    pub async fn add(&self, name: &str, url: &str) -> Result<String> {
        let mut feeds: Vec<Feed> = self.store.get_json("/feeds").await?;
        feeds.push(Feed {
            name: name.to_string(),
            url: url.to_string(),
            enabled: true,
        });
        debug!("add feed {name:?}");
        self.store.post_json("/feeds", &feeds).await?;
        Ok("Feed added successfully".to_string())
    }

    /// Delete the feed at `index`; subsequent feeds shift down.
    pub async fn remove(&self, index: usize) -> Result<String> {
        let mut feeds: Vec<Feed> = self.store.get_json("/feeds").await?;
        if index >= feeds.len() {
            return Err(anyhow!("feed index {index} out of range"));
        }
        feeds.remove(index);
        debug!("remove feed {index}");
        self.store.post_json("/feeds", &feeds).await?;
        Ok("Feed removed".to_string())
    }

    /// Discard all custom feeds and restore the device default set.
    ///
    /// Irreversible; callers must confirm with the user first.
    pub async fn reset(&self) -> Result<String> {
        self.store.post_empty("/feeds/reset").await
    }

    /// Ask the device to poll all enabled feeds right now.
    ///
    /// Changes feed *content* on the device, not the roster, so callers
    /// need not re-render the list afterwards.
    pub async fn fetch_now(&self) -> Result<String> {
        let reply = self.store.post_empty("/feeds/fetch").await?;
        Ok(format!("RSS fetch completed: {reply}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
