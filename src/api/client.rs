//! Notification access layer.
//!
//! Thin typed wrapper over the backend's `/api/notifications` endpoints:
//! pure request/response mapping with a bearer token on every call. No
//! error is swallowed here — callers decide whether a failure is logged
//! (fetch paths) or surfaced to the user (mutations).

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::notification::{
    AdminNotificationCreate, BroadcastOutcome, Notification, NotificationStats, RecipientSummary,
};

/// Languages the personalization endpoints accept.
const SUPPORTED_LANGUAGES: &[&str] = &["en", "hi"];

/// Client for the notification endpoints of the backend.
#[derive(Clone)]
pub struct NotificationApi {
    http: Client,
    base_url: String,
    token: String,
}

impl NotificationApi {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("HealthBell/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.api_url, &cfg.token)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("x-request-id", uuid::Uuid::new_v4().to_string())
    }

    /// Send a request, enforce 2xx, decode the JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(method, path, "notification API call");
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                path: path.to_string(),
                status,
                body: snippet(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// Fetch the caller's visible notifications, newest first. The unread
    /// filter is applied server-side via a query parameter.
    pub async fn list(&self, unread_only: bool) -> Result<Vec<Notification>, ApiError> {
        self.list_page(unread_only, None, None).await
    }

    /// `list` with explicit paging. The backend caps `limit` at 100.
    pub async fn list_page(
        &self,
        unread_only: bool,
        skip: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<Notification>, ApiError> {
        let path = "/api/notifications";
        let mut req = self
            .request(Method::GET, path)
            .query(&[("unread_only", unread_only)]);
        if let Some(skip) = skip {
            req = req.query(&[("skip", skip)]);
        }
        if let Some(limit) = limit {
            req = req.query(&[("limit", limit)]);
        }
        self.execute("GET", path, req).await
    }

    pub async fn stats(&self) -> Result<NotificationStats, ApiError> {
        let path = "/api/notifications/stats";
        let req = self.request(Method::GET, path);
        self.execute("GET", path, req).await
    }

    /// Idempotent from the caller's perspective: marking an already-read
    /// notification succeeds again with the same result.
    pub async fn mark_read(&self, id: i64) -> Result<Notification, ApiError> {
        let path = format!("/api/notifications/{id}/read");
        let req = self.request(Method::PATCH, &path);
        self.execute("PATCH", &path, req).await
    }

    /// Mark every currently-unread notification as read in one call.
    /// Returns how many the backend reports flipping.
    pub async fn mark_all_read(&self) -> Result<u64, ApiError> {
        let path = "/api/notifications/read-all";
        let req = self.request(Method::PATCH, path);
        let reply: ServerMessage = self.execute("PATCH", path, req).await?;
        Ok(reply.leading_count())
    }

    /// Fails (propagated) when the notification is not the caller's own
    /// or does not exist — broadcasts land here as a 404.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/api/notifications/{id}");
        let req = self.request(Method::DELETE, &path);
        let _: ServerMessage = self.execute("DELETE", &path, req).await?;
        Ok(())
    }

    /// Ask the backend to generate a personalized health tip. Slow —
    /// multiple seconds while the backend talks to its LLM. Callers track
    /// it under a dedicated `generating` flag, never the list `loading`.
    pub async fn generate(&self, language: &str) -> Result<Notification, ApiError> {
        validate_language(language)?;
        let path = "/api/notifications/personalized";
        let req = self
            .request(Method::POST, path)
            .query(&[("language", language)]);
        self.execute("POST", path, req).await
    }

    /// Admin: create an announcement (broadcast) or a direct notification.
    pub async fn admin_create(
        &self,
        create: &AdminNotificationCreate,
    ) -> Result<Notification, ApiError> {
        create.validate().map_err(ApiError::InvalidRequest)?;
        let path = "/api/notifications/admin/create";
        let req = self.request(Method::POST, path).json(create);
        self.execute("POST", path, req).await
    }

    /// Admin: list recipients with their feedback summaries.
    pub async fn admin_users(
        &self,
        skip: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<RecipientSummary>, ApiError> {
        let path = "/api/notifications/admin/users";
        let mut req = self.request(Method::GET, path);
        if let Some(skip) = skip {
            req = req.query(&[("skip", skip)]);
        }
        if let Some(limit) = limit {
            req = req.query(&[("limit", limit)]);
        }
        self.execute("GET", path, req).await
    }

    /// Admin: generate personalized notifications for every user.
    pub async fn admin_broadcast_ai(&self, language: &str) -> Result<BroadcastOutcome, ApiError> {
        validate_language(language)?;
        let path = "/api/notifications/admin/broadcast-ai";
        let req = self
            .request(Method::POST, path)
            .query(&[("language", language)]);
        self.execute("POST", path, req).await
    }
}

fn validate_language(language: &str) -> Result<(), ApiError> {
    if SUPPORTED_LANGUAGES.contains(&language) {
        Ok(())
    } else {
        Err(ApiError::InvalidRequest(format!(
            "unsupported language '{language}' (expected one of: {})",
            SUPPORTED_LANGUAGES.join(", ")
        )))
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

/// Prose replies like `{"message": "Marked 7 notifications as read"}`.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: String,
}

impl ServerMessage {
    /// First integer in the message, 0 when absent or unparsable.
    fn leading_count(&self) -> u64 {
        self.message
            .split_whitespace()
            .find_map(|word| word.parse().ok())
            .unwrap_or(0)
    }
}

// ── Tests ─────────────────────────────────────────────────────
