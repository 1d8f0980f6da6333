//! Access-layer tests against a mock backend.
//!
//! These verify:
//! 1. Every call carries the bearer token and a correlation id
//! 2. Query flags (unread filter, paging, language) reach the wire
//! 3. Failures propagate — 401/404 surface, nothing is retried
//! 4. Malformed bodies become decode errors instead of panics

use healthbell::api::client::NotificationApi;
use healthbell::errors::ApiError;
use healthbell::models::notification::{AdminNotificationCreate, NotificationKind};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn notif_json(id: i64, user_id: Option<i64>, kind: &str, is_read: bool) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": user_id,
        "type": kind,
        "title": format!("notification {id}"),
        "message": "body text",
        "created_at": "2025-01-01 10:00:00",
        "is_read": is_read,
    })
}

#[tokio::test]
async fn test_list_sends_bearer_token_and_parses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .and(query_param("unread_only", "false"))
        .and(header("authorization", "Bearer test-token"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            notif_json(1, None, "announcement", false),
            notif_json(2, Some(7), "personalized", true),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "test-token");
    let list = api.list(false).await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].kind, NotificationKind::Announcement);
    assert_eq!(list[0].user_id, None);
    assert_eq!(list[1].kind, NotificationKind::Personalized);
    assert!(list[1].is_read);
}

#[tokio::test]
async fn test_list_unread_only_sets_query_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .and(query_param("unread_only", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([notif_json(3, Some(7), "direct", false)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let list = api.list(true).await.unwrap();

    assert!(list.iter().all(|n| !n.is_read));
}

#[tokio::test]
async fn test_list_page_forwards_paging_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .and(query_param("unread_only", "false"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let list = api.list_page(false, Some(10), Some(25)).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_stats_parses_counters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 5,
            "unread": 3,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let stats = api.stats().await.unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.unread, 3);
}

#[tokio::test]
async fn test_mark_read_is_idempotent_for_the_caller() {
    let server = MockServer::start().await;

    // The backend answers the same way for a second mark of an
    // already-read notification; neither call may error.
    Mock::given(method("PATCH"))
        .and(path("/api/notifications/4/read"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(notif_json(4, Some(7), "direct", true)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let first = api.mark_read(4).await.unwrap();
    let second = api.mark_read(4).await.unwrap();
    assert!(first.is_read);
    assert!(second.is_read);
}

#[tokio::test]
async fn test_mark_all_read_parses_count_from_message() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/notifications/read-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Marked 7 notifications as read",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    assert_eq!(api.mark_all_read().await.unwrap(), 7);
}

#[tokio::test]
async fn test_delete_not_found_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/notifications/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Notification not found or cannot be deleted",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let err = api.delete(99).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_unauthorized_surfaces_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications/stats"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "expired");
    let err = api.stats().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let err = api.list(false).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_generate_passes_language() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/notifications/personalized"))
        .and(query_param("language", "hi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(notif_json(10, Some(7), "personalized", false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let n = api.generate("hi").await.unwrap();
    assert_eq!(n.kind, NotificationKind::Personalized);
}

#[tokio::test]
async fn test_generate_rejects_unsupported_language_before_the_wire() {
    // Unroutable address: a request would fail with a network error, an
    // InvalidRequest proves validation ran first.
    let api = NotificationApi::new("http://127.0.0.1:9", "t");
    let err = api.generate("fr").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_admin_create_sends_body() {
    let server = MockServer::start().await;

    let create = AdminNotificationCreate {
        title: "Clinic closed".into(),
        message: "Back on Monday.".into(),
        kind: NotificationKind::Announcement,
        user_id: None,
    };

    Mock::given(method("POST"))
        .and(path("/api/notifications/admin/create"))
        .and(body_json(&create))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(notif_json(11, None, "announcement", false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let n = api.admin_create(&create).await.unwrap();
    assert_eq!(n.id, 11);
    assert!(!n.is_deletable());
}

#[tokio::test]
async fn test_admin_create_rejects_bad_shapes_before_the_wire() {
    let api = NotificationApi::new("http://127.0.0.1:9", "t");

    let direct_without_recipient = AdminNotificationCreate {
        title: "t".into(),
        message: "m".into(),
        kind: NotificationKind::Direct,
        user_id: None,
    };
    let err = api.admin_create(&direct_without_recipient).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));

    let announcement_with_recipient = AdminNotificationCreate {
        title: "t".into(),
        message: "m".into(),
        kind: NotificationKind::Announcement,
        user_id: Some(3),
    };
    let err = api
        .admin_create(&announcement_with_recipient)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_admin_broadcast_parses_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/notifications/admin/broadcast-ai"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Generated 4 personalized notifications",
            "total_users": 4,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let outcome = api.admin_broadcast_ai("en").await.unwrap();
    assert_eq!(outcome.total_users, 4);
}

#[tokio::test]
async fn test_admin_users_parses_summaries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 7,
                "email": "pat@example.com",
                "full_name": "Pat Example",
                "created_at": "2024-11-02T08:00:00Z",
                "feedback_summary": { "predictions": 12, "last_symptom": "headache" },
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = NotificationApi::new(server.uri(), "t");
    let users = api.admin_users(None, None).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "pat@example.com");
    assert_eq!(users[0].feedback_summary["predictions"], 12);
}
