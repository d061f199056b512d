//! Periodic device refresh.
//!
//! Two background tasks poll the device on independent fixed intervals —
//! the clock every 30 seconds, system status every 60 — and send results
//! to the event loop over an [`mpsc`] channel. Both fire immediately on
//! startup (`tokio::time::interval` completes its first tick at once)
//! and run until the process exits; there is no stop handle. A failed
//! fetch degrades to an inline error marker in the affected region and
//! the task simply waits for its next tick.
//!
//! The tasks touch only the time and status resources, so they cannot
//! race with roster mutations.

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::model::{DisplaySettings, Feed, RssSettings, SystemStatus, TimeInfo};
use crate::notify::Kind;
use crate::store::{HttpStore, Store};

/// Messages sent from background tasks to the event loop.
pub enum Msg {
    /// Fresh device time.
    Time(TimeInfo),
    /// The clock region degrades to an inline error.
    TimeError,
    /// Fresh free-memory / WiFi status.
    Status(SystemStatus),
    /// The status regions degrade to inline errors.
    StatusError,
    /// Bootstrap load of the display settings form.
    DisplayLoaded(DisplaySettings),
    /// Bootstrap load of the RSS settings form.
    RssLoaded(RssSettings),
    /// A fresh roster snapshot to render.
    Roster(Vec<Feed>),
    /// A transient status message for the notification region.
    Notify(String, Kind),
}

pub const TIME_REFRESH: Duration = Duration::from_secs(30);
pub const STATUS_REFRESH: Duration = Duration::from_secs(60);

/// Spawn the two refresh tasks.
///
/// Each task stops silently once the receiver is gone — that only
/// happens when the event loop has exited.
pub fn spawn(store: Arc<HttpStore>, tx: mpsc::Sender<Msg>) {
    let time_store = store.clone();
    let time_tx = tx.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(TIME_REFRESH);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            let msg = match time_store.get_json::<TimeInfo>("/time").await {
                Ok(info) => Msg::Time(info),
                Err(e) => {
                    warn!("time refresh failed: {e:#}");
                    Msg::TimeError
                }
            };
            if time_tx.send(msg).await.is_err() {
                return;
            }
        }
    });

    tokio::spawn(async move {
        let mut tick = tokio::time::interval(STATUS_REFRESH);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            let msg = match store.get_json::<SystemStatus>("/status").await {
                Ok(status) => Msg::Status(status),
                Err(e) => {
                    warn!("status refresh failed: {e:#}");
                    Msg::StatusError
                }
            };
            if tx.send(msg).await.is_err() {
                return;
            }
        }
    });
}

/// One-shot clock refresh, used after a manual time set or timezone
/// change rather than waiting out the current interval.
pub fn refresh_time_once(store: Arc<HttpStore>, tx: mpsc::Sender<Msg>) {
    tokio::spawn(async move {
        let msg = match store.get_json::<TimeInfo>("/time").await {
            Ok(info) => Msg::Time(info),
            Err(e) => {
                warn!("time refresh failed: {e:#}");
                Msg::TimeError
            }
        };
        let _ = tx.send(msg).await;
    });
}
