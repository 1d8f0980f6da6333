use reqwest::StatusCode;
use thiserror::Error;

/// The single "operation failed" signal at the access-layer boundary.
///
/// Transport failures, non-2xx responses and malformed bodies all land
/// here; callers decide whether a failure is logged or shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: &'static str,
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("malformed response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// 401 is surfaced to the caller; this client never auto-refreshes
    /// tokens or retries notification calls.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode) -> ApiError {
        ApiError::Status {
            method: "GET",
            path: "/api/notifications".into(),
            status,
            body: "nope".into(),
        }
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(status_error(StatusCode::UNAUTHORIZED).is_unauthorized());
        assert!(!status_error(StatusCode::FORBIDDEN).is_unauthorized());
    }

    #[test]
    fn test_not_found_detection() {
        assert!(status_error(StatusCode::NOT_FOUND).is_not_found());
        assert!(!status_error(StatusCode::INTERNAL_SERVER_ERROR).is_not_found());
    }

    #[test]
    fn test_display_carries_status_and_body() {
        let msg = status_error(StatusCode::NOT_FOUND).to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("/api/notifications"));
        assert!(msg.contains("nope"));
    }
}
