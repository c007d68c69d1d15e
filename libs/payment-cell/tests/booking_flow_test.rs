use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use appointment_cell::router::appointment_routes;
use payment_cell::router::payment_routes;
use shared_database::{collections, Filter};
use shared_utils::test_utils::TestHarness;

fn create_test_app(harness: &TestHarness) -> Router {
    appointment_routes(harness.state.clone()).merge(payment_routes(harness.state.clone()))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

#[tokio::test]
async fn test_booking_to_payment_lifecycle() {
    let harness = TestHarness::new();
    let slot_uri = "/booked?date=2024-01-01&slot=10am&name=Checkup";

    let (_, body) = send(create_test_app(&harness), "GET", slot_uri, None).await;
    assert_eq!(body, json!({ "message": true }));

    let booking = json!({
        "email": "a@x.com",
        "serviceName": "Checkup",
        "bookingDate": "2024-01-01",
        "bookingSlot": "10am",
        "fees": 50
    });
    let (status, created) = send(create_test_app(&harness), "POST", "/bookingList", Some(booking.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let booking_id = created["insertedId"].as_str().unwrap().to_string();

    let (_, pending) = send(create_test_app(&harness), "GET", "/bookingList?email=a@x.com", None).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (_, intent) = send(
        create_test_app(&harness),
        "POST",
        "/create-payment-intent",
        Some(json!({ "fees": 50 })),
    )
    .await;
    assert_eq!(intent["clientSecret"], "pi_test_secret_5000");

    let mut payment = booking;
    payment["bookingID"] = json!(booking_id);
    payment["transactionId"] = json!("pi_test");
    let (status, receipt) = send(create_test_app(&harness), "POST", "/payments", Some(payment)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["result"]["acknowledged"], true);
    assert_eq!(receipt["deleteResult"]["deletedCount"], 1);

    let (_, pending) = send(create_test_app(&harness), "GET", "/bookingList?email=a@x.com", None).await;
    assert_eq!(pending, json!([]));

    let (_, paid) = send(create_test_app(&harness), "GET", "/payments?email=a@x.com", None).await;
    assert_eq!(paid.as_array().unwrap().len(), 1);
    assert_eq!(paid[0]["bookingID"], booking_id);

    let (_, body) = send(create_test_app(&harness), "GET", slot_uri, None).await;
    assert_eq!(body, json!({ "message": false }));
}

#[tokio::test]
async fn test_pending_booking_does_not_block_slot() {
    let harness = TestHarness::new();
    let booking = json!({
        "email": "a@x.com",
        "serviceName": "Checkup",
        "bookingDate": "2024-01-01",
        "bookingSlot": "10am"
    });

    send(create_test_app(&harness), "POST", "/bookingList", Some(booking.clone())).await;
    send(create_test_app(&harness), "POST", "/bookingList", Some(booking)).await;

    assert_eq!(harness.store.count(collections::BOOKINGS, &Filter::new()).await, 2);
    let (_, body) = send(create_test_app(&harness), "GET", "/booked?date=2024-01-01&slot=10am&name=Checkup", None).await;
    assert_eq!(body, json!({ "message": true }));
}
