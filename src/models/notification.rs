use serde::{Deserialize, Serialize};

/// Closed set of notification classes. Selects icon and label only;
/// nothing branches on it beyond presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// AI-generated, addressed to one user, created on demand.
    Personalized,
    /// Admin broadcast visible to every user (`user_id` is null).
    Announcement,
    /// Sent by an administrator to exactly one user.
    Direct,
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personalized" => Ok(Self::Personalized),
            "announcement" => Ok(Self::Announcement),
            "direct" => Ok(Self::Direct),
            other => Err(format!(
                "unknown notification type '{other}' (expected personalized, announcement or direct)"
            )),
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Personalized => "personalized",
            Self::Announcement => "announcement",
            Self::Direct => "direct",
        };
        f.write_str(s)
    }
}

/// One message directed at zero or one specific user.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Notification {
    /// Backend-assigned, stable for the notification's lifetime.
    pub id: i64,
    /// `None` means addressed to all users (broadcast). This value, not a
    /// separate flag, decides whether delete is offered.
    pub user_id: Option<i64>,
    // 'type' is a reserved keyword
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    /// Body text, may contain newlines.
    pub message: String,
    /// Wire value; may lack a zone designator. Use [`Self::created_at_utc`].
    pub created_at: String,
    /// Monotonic from this client's perspective: false → true only.
    pub is_read: bool,
}

impl Notification {
    /// `created_at` normalized to UTC. Zoneless wire values are UTC.
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        super::timestamp::parse_utc(&self.created_at)
    }

    /// Broadcasts are not deletable by an individual recipient.
    pub fn is_deletable(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Independently-polled total/unread counters for the bell badge.
/// Not guaranteed to match the currently displayed list — the badge and
/// the list reconcile on the next poll or explicit refresh.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationStats {
    pub total: u64,
    pub unread: u64,
}

/// Admin request body for `POST /api/notifications/admin/create`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminNotificationCreate {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub user_id: Option<i64>,
}

impl AdminNotificationCreate {
    /// Shape check mirroring the backend's 400s: announcements are
    /// broadcast (no user_id), direct sends need a recipient.
    pub fn validate(&self) -> Result<(), String> {
        match self.kind {
            NotificationKind::Announcement if self.user_id.is_some() => {
                Err("announcements are broadcast: leave user_id unset".into())
            }
            NotificationKind::Direct if self.user_id.is_none() => {
                Err("direct notifications need a user_id".into())
            }
            NotificationKind::Personalized => {
                Err("personalized notifications are AI-generated, not admin-created".into())
            }
            _ => Ok(()),
        }
    }
}

/// One row of the admin recipient listing; the backend's feedback
/// summary is free-form and carried through untyped.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipientSummary {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub created_at: String,
    #[serde(default)]
    pub feedback_summary: serde_json::Value,
}

/// Reply of the admin broadcast-ai endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BroadcastOutcome {
    pub message: String,
    pub total_users: u64,
}

// ── Tests ─────────────────────────────────────────────────────
