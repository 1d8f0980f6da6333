//! The panel: owns the notification list for the current session, the
//! unread filter, and the loading/generating flags.
//!
//! Mutations are optimistic: local state changes before the request is
//! issued. On failure the local change is kept (the next fetch corrects
//! it) and an alert is queued for the user. The stats-refresh signal to
//! the indicator fires only after a mutation succeeds, never before.

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::client::NotificationApi;
use crate::models::notification::Notification;

pub struct NotificationPanel {
    api: NotificationApi,
    /// Tells the indicator to re-fetch its independently-sourced badge
    /// after a mutation.
    refresh_tx: mpsc::UnboundedSender<()>,
    notifications: Vec<Notification>,
    show_unread_only: bool,
    loading: bool,
    generating: bool,
    alerts: VecDeque<String>,
}

impl NotificationPanel {
    pub fn new(api: NotificationApi, refresh_tx: mpsc::UnboundedSender<()>) -> Self {
        Self {
            api,
            refresh_tx,
            notifications: Vec::new(),
            show_unread_only: false,
            loading: false,
            generating: false,
            alerts: VecDeque::new(),
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn notification(&self, id: i64) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn show_unread_only(&self) -> bool {
        self.show_unread_only
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Header count, computed from the loaded list — deliberately
    /// independent of the separately-polled badge.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Queued user-facing failure messages, oldest first.
    pub fn take_alerts(&mut self) -> Vec<String> {
        self.alerts.drain(..).collect()
    }

    /// Opening the panel is the only trigger for the list fetch — the
    /// list is not loaded while the panel is closed.
    pub async fn open(&mut self) {
        self.refresh_list().await;
    }

    /// Toggling the filter re-fetches with the new server-side flag.
    pub async fn set_filter(&mut self, unread_only: bool) {
        self.show_unread_only = unread_only;
        self.refresh_list().await;
    }

    async fn refresh_list(&mut self) {
        self.loading = true;
        match self.api.list(self.show_unread_only).await {
            Ok(list) => self.notifications = list,
            // Fetch failures stay quiet: polling or the next open retries.
            Err(e) => warn!(error = %e, "failed to fetch notifications"),
        }
        self.loading = false;
    }

    pub async fn mark_read(&mut self, id: i64) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            n.is_read = true;
        }
        match self.api.mark_read(id).await {
            Ok(_) => self.signal_stats_refresh(),
            Err(e) => self.alert(format!("Failed to mark notification #{id} as read: {e}")),
        }
    }

    pub async fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.is_read = true;
        }
        match self.api.mark_all_read().await {
            Ok(count) => {
                debug!(count, "marked all notifications read");
                self.signal_stats_refresh();
            }
            Err(e) => self.alert(format!("Failed to mark all notifications as read: {e}")),
        }
    }

    pub async fn delete(&mut self, id: i64) {
        self.notifications.retain(|n| n.id != id);
        match self.api.delete(id).await {
            Ok(()) => self.signal_stats_refresh(),
            Err(e) => self.alert(format!("Failed to delete notification #{id}: {e}")),
        }
    }

    /// Request a personalized health tip, then re-fetch the list: the
    /// authoritative entry (server-assigned id and timestamp) comes from
    /// the re-fetch, never a locally synthesized copy. Returns whether a
    /// tip was generated. Refuses re-entry while one is in flight.
    pub async fn generate(&mut self, language: &str) -> bool {
        if self.generating {
            self.alert("A health tip is already being generated".into());
            return false;
        }
        self.generating = true;
        match self.api.generate(language).await {
            Ok(n) => {
                debug!(id = n.id, "generated personalized notification");
                self.refresh_list().await;
                self.generating = false;
                self.signal_stats_refresh();
                true
            }
            Err(e) => {
                self.generating = false;
                self.alert(format!("Failed to generate a health tip: {e}"));
                false
            }
        }
    }

    fn signal_stats_refresh(&self) {
        // Nobody listening (one-shot commands) is fine.
        let _ = self.refresh_tx.send(());
    }

    fn alert(&mut self, message: String) {
        warn!("{message}");
        self.alerts.push_back(message);
    }
}

// ── Tests ─────────────────────────────────────────────────────
