use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use payment_cell::handlers;
use payment_cell::models::PaymentRequest;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreRows, TestConfig};

fn config_with(store: &MockServer, mail: Option<&MockServer>) -> AppConfig {
    let mut config = TestConfig::default().to_app_config();
    config.store_url = store.uri();
    if let Some(mail) = mail {
        config.mail_api_url = mail.uri();
    }
    config
}

fn payment_body(body: serde_json::Value) -> PaymentRequest {
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_payment_against_scheduled_appointment_succeeds() {
    let store = MockServer::start().await;
    let mail = MockServer::start().await;
    let config = config_with(&store, Some(&mail));

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", "eq.7"))
        .and(query_param("status", "eq.scheduled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::appointment(7, 10, 20, "2026-08-07T10:00:00Z", "scheduled")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::user(10, "Amira", "amira@example.com", "user")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/payments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::payment(3, 10, 7, 85.0)
        ])))
        .mount(&store)
        .await;

    // The receipt goes to the payer, exactly once.
    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "mail-1"})))
        .expect(1)
        .mount(&mail)
        .await;

    let request = payment_body(json!({
        "amount": 85.0,
        "userId": 10,
        "appointmentId": 7,
        "paymentMethod": "card"
    }));

    let (status, Json(body)) = handlers::process_payment(State(Arc::new(config)), Json(request))
        .await
        .expect("payment should succeed");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment processed successfully!");
    assert_eq!(body["data"]["paymentStatus"], "Completed");
    assert_eq!(body["data"]["appointmentId"], 7);

    let mail_requests = mail.received_requests().await.unwrap();
    let sent: serde_json::Value = mail_requests[0].body_json().unwrap();
    assert_eq!(sent["to"], json!(["amira@example.com"]));
    assert_eq!(sent["subject"], "Payment Receipt");
}

#[tokio::test]
async fn test_payment_against_unscheduled_appointment_writes_nothing() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    // The appointment exists but is completed, so the status filter finds
    // nothing.
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", "eq.7"))
        .and(query_param("status", "eq.scheduled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/payments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&store)
        .await;

    let request = payment_body(json!({
        "amount": 85.0,
        "userId": 10,
        "appointmentId": 7,
        "paymentMethod": "card"
    }));

    let result = handlers::process_payment(State(Arc::new(config)), Json(request)).await;
    assert_matches!(result, Err(AppError::NotFound(msg)) => {
        assert_eq!(msg, "Appointment not found or not scheduled");
    });
}

#[tokio::test]
async fn test_payment_requires_every_field() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    let request = payment_body(json!({
        "amount": 85.0,
        "userId": 10
    }));

    let result = handlers::process_payment(State(Arc::new(config)), Json(request)).await;
    assert_matches!(result, Err(AppError::BadRequest(msg)) => {
        assert_eq!(msg, "Missing required fields");
    });
    assert!(store.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_payment_for_unknown_payer_is_not_found() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::appointment(7, 10, 20, "2026-08-07T10:00:00Z", "scheduled")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&store)
        .await;

    let request = payment_body(json!({
        "amount": 85.0,
        "userId": 10,
        "appointmentId": 7,
        "paymentMethod": "card"
    }));

    let result = handlers::process_payment(State(Arc::new(config)), Json(request)).await;
    assert_matches!(result, Err(AppError::NotFound(msg)) => {
        assert_eq!(msg, "User not found");
    });
}

#[tokio::test]
async fn test_mailer_outage_does_not_fail_the_payment() {
    let store = MockServer::start().await;
    let mail = MockServer::start().await;
    let config = config_with(&store, Some(&mail));

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::appointment(7, 10, 20, "2026-08-07T10:00:00Z", "scheduled")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::user(10, "Amira", "amira@example.com", "user")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/payments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::payment(3, 10, 7, 85.0)
        ])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mail)
        .await;

    let request = payment_body(json!({
        "amount": 85.0,
        "userId": 10,
        "appointmentId": 7,
        "paymentMethod": "card"
    }));

    let (status, Json(body)) = handlers::process_payment(State(Arc::new(config)), Json(request))
        .await
        .expect("mutation already succeeded; mail is fire-and-forget");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}
