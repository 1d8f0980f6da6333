//! The bell: a lightweight unread/total counter polled independently of
//! the panel, plus the open/closed state that gates the panel's lazy
//! list fetch. Watch mode owns the poll cadence; this type owns the
//! state transitions.

use tracing::warn;

use crate::api::client::NotificationApi;
use crate::models::notification::NotificationStats;

/// Badge text for an unread count: the literal count up to 99, "99+"
/// beyond.
pub fn badge_text(unread: u64) -> String {
    if unread > 99 {
        "99+".into()
    } else {
        unread.to_string()
    }
}

pub struct NotificationIndicator {
    api: NotificationApi,
    stats: NotificationStats,
    loading: bool,
    is_open: bool,
}

impl NotificationIndicator {
    pub fn new(api: NotificationApi) -> Self {
        Self {
            api,
            stats: NotificationStats::default(),
            loading: false,
            is_open: false,
        }
    }

    /// Fetch the counters. Failures only log; the next poll retries.
    pub async fn refresh_stats(&mut self) {
        self.loading = true;
        match self.api.stats().await {
            Ok(stats) => self.stats = stats,
            Err(e) => warn!(error = %e, "failed to fetch notification stats"),
        }
        self.loading = false;
    }

    /// Flip the panel open or closed. Returns the new state; a transition
    /// to open is the only trigger for the panel's list fetch.
    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn stats(&self) -> &NotificationStats {
        &self.stats
    }

    /// Badge to draw on the bell, or `None` when there is nothing unread.
    pub fn badge(&self) -> Option<String> {
        (self.stats.unread > 0).then(|| badge_text(self.stats.unread))
    }
}

// ── Tests ─────────────────────────────────────────────────────
