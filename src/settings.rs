//! Settings sync and one-shot device actions.
//!
//! Both settings records are flat key/value objects and every save
//! transmits the complete record, even when a single field changed — the
//! firmware has no per-field endpoints. The one exception is
//! [`set_timezone`](SettingsClient::set_timezone): the timezone field
//! lives in the RSS settings panel but updates shared device settings
//! through a partial `{tzRegion}` write that the firmware merges. That
//! asymmetry is the device's, not ours, and is kept as-is.

use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::model::{ContentFlags, DisplaySettings, RssSettings, TimezonePatch};
use crate::store::Store;

pub struct SettingsClient<S> {
    store: Arc<S>,
}

impl<S> Clone for SettingsClient<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: Store> SettingsClient<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn load_display(&self) -> Result<DisplaySettings> {
        self.store.get_json("/display/settings").await
    }

    /// Save the complete display record; returns the device's reply.
    pub async fn save_display(&self, settings: &DisplaySettings) -> Result<String> {
        debug!("save display settings");
        self.store.post_json("/display/settings", settings).await
    }

    /// Save the scroll-content toggles; returns the device's reply.
    pub async fn save_content(&self, flags: &ContentFlags) -> Result<String> {
        debug!("save content flags");
        self.store.post_json("/display/content", flags).await
    }

    pub async fn load_rss(&self) -> Result<RssSettings> {
        self.store.get_json("/settings").await
    }

    /// Save the complete RSS record. The device's reply is discarded in
    /// favour of a fixed confirmation.
    pub async fn save_rss(&self, settings: &RssSettings) -> Result<String> {
        debug!("save rss settings");
        self.store.post_json("/settings", settings).await?;
        Ok("RSS settings updated successfully".to_string())
    }

    /// Partial write of `{tzRegion}` alone.
    pub async fn set_timezone(&self, tz: &str) -> Result<String> {
        debug!("set timezone to {tz}");
        let patch = TimezonePatch {
            tz_region: tz.to_string(),
        };
        self.store.post_json("/settings", &patch).await?;
        Ok(format!("Timezone updated to {tz}"))
    }

    /// Set the device clock manually; `datetime` is an ISO-like string.
    pub async fn set_manual_time(&self, datetime: &str) -> Result<String> {
        debug!("set manual time");
        self.store
            .post_form("/settime", &[("datetime", datetime)])
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
