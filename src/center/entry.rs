//! Entry rendering: pure given one notification. The stateful pieces
//! (panel, indicator) decide what to do with the actions this module
//! derives.

use chrono::{DateTime, Utc};

use crate::models::notification::{Notification, NotificationKind};

/// What interacting with an entry's body should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    MarkRead,
}

/// Clicking an entry marks it read only while it is unread; clicking an
/// already-read entry is a no-op.
pub fn click_action(n: &Notification) -> Option<EntryAction> {
    if n.is_read {
        None
    } else {
        Some(EntryAction::MarkRead)
    }
}

pub fn icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Personalized => "🤖",
        NotificationKind::Announcement => "📢",
        NotificationKind::Direct => "📩",
    }
}

pub fn kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Personalized => "AI Health Tip",
        NotificationKind::Announcement => "Announcement",
        NotificationKind::Direct => "Direct Message",
    }
}

/// Coarse relative-age buckets, computed against an explicit `now` so
/// rendering stays deterministic under test.
pub fn relative_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(at).num_seconds();
    if secs < 45 {
        // Includes small negative skew between backend and local clocks.
        return "just now".into();
    }
    if secs < 90 {
        return "a minute ago".into();
    }
    let mins = (secs + 30) / 60;
    if mins < 45 {
        return format!("{mins} minutes ago");
    }
    if mins < 90 {
        return "an hour ago".into();
    }
    let hours = (mins + 30) / 60;
    if hours < 22 {
        return format!("{hours} hours ago");
    }
    if hours < 36 {
        return "a day ago".into();
    }
    let days = (hours + 12) / 24;
    if days < 26 {
        return format!("{days} days ago");
    }
    if days < 46 {
        return "a month ago".into();
    }
    if days < 320 {
        return format!("{} months ago", (days + 15) / 30);
    }
    if days < 548 {
        return "a year ago".into();
    }
    format!("{} years ago", (days + 182) / 365)
}

/// Relative age for a notification, falling back to the raw wire value
/// when the timestamp does not parse.
pub fn format_age(n: &Notification, now: DateTime<Utc>) -> String {
    match n.created_at_utc() {
        Some(at) => relative_age(at, now),
        None => n.created_at.clone(),
    }
}

/// Render one entry as terminal lines: unread marker, icon, title and
/// label, indented body, age footer. The delete affordance appears only
/// for owned notifications — broadcasts cannot be deleted by a recipient.
pub fn render(n: &Notification, now: DateTime<Utc>) -> String {
    let marker = if n.is_read { "  " } else { "● " };
    let mut out = format!(
        "{}{} {}  [{}] #{}\n",
        marker,
        icon(n.kind),
        n.title,
        kind_label(n.kind),
        n.id
    );
    for line in n.message.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("    ");
    out.push_str(&format_age(n, now));
    if n.is_deletable() {
        out.push_str(&format!("  ·  delete: d {}", n.id));
    }
    out.push('\n');
    out
}

// ── Tests ─────────────────────────────────────────────────────
