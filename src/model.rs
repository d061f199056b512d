//! Wire types for the device's JSON API.
//!
//! The firmware serialises every record with camelCase keys
//! (`freeMemory`, `tzRegion`, `fetchInterval`, …), so multi-word fields
//! carry `#[serde(rename_all = "camelCase")]`. Integer enums
//! (`scrollDirection`, `panelType`, `fontType`, `animationType`) are
//! device-defined and opaque to the panel; they stay plain integers here.

use serde::{Deserialize, Serialize};

/// One subscribed RSS source as known to the device.
///
/// Disabled feeds are retained on the device and merely excluded from
/// fetching. A feed has no durable identifier: every mutation addresses
/// it by its position in the roster at the time of the last read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// Display label. Non-empty, not guaranteed unique.
    pub name: String,
    /// Feed address, treated as an opaque string.
    pub url: String,
    pub enabled: bool,
}

/// Display/animation settings record. Always read and written whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub brightness: u32,
    pub scroll_speed: u32,
    pub scroll_direction: u32,
    pub panel_type: u32,
    pub font_type: u32,
    pub animation_type: u32,
    pub animation_enabled: bool,
}

/// RSS fetch settings record, including the device timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RssSettings {
    /// Seconds between device-side feed fetches.
    pub fetch_interval: u32,
    pub max_news_age_hours: u32,
    pub max_headlines_per_feed: u32,
    /// IANA-style timezone identifier, e.g. `Europe/Berlin`.
    pub tz_region: String,
}

/// Which content categories scroll on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFlags {
    pub time: bool,
    pub date: bool,
    pub rss: bool,
    pub quotes: bool,
    pub facts: bool,
}

impl Default for ContentFlags {
    fn default() -> Self {
        // The device's stock content set; there is no GET endpoint for
        // these flags, so the form starts here until the user edits it.
        Self {
            time: true,
            date: true,
            rss: true,
            quotes: false,
            facts: false,
        }
    }
}

/// Current device time, preformatted by the firmware.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeInfo {
    pub time: String,
    pub date: String,
}

/// Free heap and WiFi connectivity, as reported by `/status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub free_memory: u64,
    /// Human-readable, e.g. `Connected (192.168.1.7)`.
    pub wifi: String,
}

/// Partial `/settings` write carrying only the timezone.
///
/// The only sanctioned partial write-back in the whole API: the firmware
/// merges absent keys, and the panel relies on that for the timezone
/// field alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezonePatch {
    pub tz_region: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
