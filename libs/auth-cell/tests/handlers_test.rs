use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_cell::router::auth_routes;
use shared_database::{collections, DocumentStore};
use shared_utils::jwt::validate_token;
use shared_utils::test_utils::TestHarness;

fn create_test_app(harness: &TestHarness) -> Router {
    auth_routes(harness.state.clone())
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn get_admin(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn test_issue_token_signs_payload() {
    let harness = TestHarness::new();
    let app = create_test_app(&harness);

    let request = Request::builder()
        .method("POST")
        .uri("/jwt")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "uid": "user-1", "email": "a@x.com" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap();
    let claims = validate_token(token, &harness.config.access_token_secret).unwrap();

    assert_eq!(claims.uid(), Some("user-1"));
    assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 30 * 24 * 60 * 60);
}

#[tokio::test]
async fn test_issue_token_rejects_non_object_payload() {
    let harness = TestHarness::new();
    let app = create_test_app(&harness);

    let request = Request::builder()
        .method("POST")
        .uri("/jwt")
        .header("content-type", "application/json")
        .body(Body::from("[1, 2, 3]"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_granted_for_admin_role() {
    let harness = TestHarness::new();
    harness
        .store
        .insert_one(collections::USERS, json!({ "userUid": "admin-1", "role": "admin" }))
        .await
        .unwrap();

    let (status, body) = get_admin(create_test_app(&harness), "/admin?uid=admin-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "role": "admin" }));
}

#[tokio::test]
async fn test_admin_denied_echoes_stored_role() {
    let harness = TestHarness::new();
    harness
        .store
        .insert_one(collections::USERS, json!({ "userUid": "user-1", "role": "user" }))
        .await
        .unwrap();

    let (status, body) = get_admin(create_test_app(&harness), "/admin?uid=user-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "role": "user" }));
}

#[tokio::test]
async fn test_admin_denied_without_role_returns_empty_object() {
    let harness = TestHarness::new();
    harness
        .store
        .insert_one(collections::USERS, json!({ "userUid": "user-2" }))
        .await
        .unwrap();

    let (status, body) = get_admin(create_test_app(&harness), "/admin?uid=user-2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = get_admin(create_test_app(&harness), "/admin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}
