//! Transient status notifications.
//!
//! A single status region shows the outcome of the most recent operation
//! and clears itself three seconds later. There is no queue: a new call
//! overwrites whatever is visible.
//!
//! Every call registers its own clear deadline, and *any* expiring
//! deadline clears the region. A fast-following message can therefore be
//! erased early by the deadline of the message it replaced. That is a
//! known, user-visible quirk, pinned by
//! [`tests::stale_deadline_clears_newer_message`] — do not fix it
//! silently.

use std::time::{Duration, Instant};

/// How long a message stays visible.
pub const CLEAR_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: Kind,
}

/// Owns the status region's current message and the pending clear
/// deadlines. Expiry is driven by [`tick`](Notifier::tick) so the event
/// loop decides the clock and tests can pass arbitrary instants.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notice>,
    deadlines: Vec<Instant>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visible message and register a fresh clear deadline.
    pub fn notify(&mut self, now: Instant, text: impl Into<String>, kind: Kind) {
        self.current = Some(Notice {
            text: text.into(),
            kind,
        });
        self.deadlines.push(now + CLEAR_AFTER);
    }

    pub fn success(&mut self, now: Instant, text: impl Into<String>) {
        self.notify(now, text, Kind::Success);
    }

    pub fn error(&mut self, now: Instant, text: impl Into<String>) {
        self.notify(now, text, Kind::Error);
    }

    /// Expire deadlines; clears the region if any deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        let before = self.deadlines.len();
        self.deadlines.retain(|deadline| *deadline > now);
        if self.deadlines.len() < before {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
