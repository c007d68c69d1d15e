use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use doc_house_api::router::{create_router, BANNER};
use shared_utils::test_utils::TestHarness;

#[tokio::test]
async fn test_root_banner() {
    let harness = TestHarness::new();
    let app = create_router(harness.state.clone());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], BANNER.as_bytes());
}

#[tokio::test]
async fn test_cells_share_one_store() {
    let harness = TestHarness::new();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "userEmail": "root@x.com", "userUid": "root-1", "role": "admin" }).to_string()))
        .unwrap();
    let response = create_router(harness.state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder().uri("/admin?uid=root-1").body(Body::empty()).unwrap();
    let response = create_router(harness.state.clone()).oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body, json!({ "role": "admin" }));
}

#[tokio::test]
async fn test_promoted_user_passes_admin_gate() {
    let harness = TestHarness::new();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "userEmail": "ann@x.com", "userUid": "ann-1", "role": "user" }).to_string()))
        .unwrap();
    let response = create_router(harness.state.clone()).oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Value = serde_json::from_slice(&body).unwrap();
    let id = created["insertedId"].as_str().unwrap().to_string();

    let admin_check = || Request::builder().uri("/admin?uid=ann-1").body(Body::empty()).unwrap();
    let response = create_router(harness.state.clone()).oneshot(admin_check()).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({ "role": "user" }));

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/users/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = create_router(harness.state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = create_router(harness.state.clone()).oneshot(admin_check()).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({ "role": "admin" }));
}
