use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use discussion_cell::handlers;
use discussion_cell::models::{CreateDiscussionRequest, PostDiscussionMessageRequest};
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

#[tokio::test]
async fn test_create_discussion_stores_an_encrypted_flagged_row() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::user(10, "Amira", "amira@example.com", "user")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/group_discussions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::group_discussion(5, 10, "Managing hypertension")
        ])))
        .mount(&store)
        .await;

    let request: CreateDiscussionRequest = serde_json::from_value(json!({
        "topic": "Managing hypertension",
        "userId": 10,
        "content": "Opening post"
    }))
    .unwrap();

    let (status, Json(body)) = handlers::create_discussion(State(Arc::new(config)), Json(request))
        .await
        .expect("creation should succeed");

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Group discussion created successfully!");
    assert_eq!(body["data"]["topic"], "Managing hypertension");
    assert_eq!(body["data"]["isEncrypted"], true);
}

#[tokio::test]
async fn test_create_discussion_requires_all_fields() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    let request: CreateDiscussionRequest = serde_json::from_value(json!({
        "topic": "No content or user"
    }))
    .unwrap();

    let result = handlers::create_discussion(State(Arc::new(config)), Json(request)).await;
    assert_matches!(result, Err(AppError::BadRequest(msg)) => {
        assert_eq!(msg, "Missing required fields");
    });
    assert!(store.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_discussion_for_unknown_user_is_not_found() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&store)
        .await;

    let request: CreateDiscussionRequest = serde_json::from_value(json!({
        "topic": "t",
        "userId": 99,
        "content": "c"
    }))
    .unwrap();

    let result = handlers::create_discussion(State(Arc::new(config)), Json(request)).await;
    assert_matches!(result, Err(AppError::NotFound(msg)) => {
        assert_eq!(msg, "User not found");
    });
}

#[tokio::test]
async fn test_listing_requires_an_authenticated_caller() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    let result = handlers::list_discussions(State(Arc::new(config)), HeaderMap::new()).await;
    assert_matches!(result, Err(AppError::Auth(msg)) => {
        assert_eq!(msg, "User not authenticated");
    });
    assert!(store.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_returns_the_callers_discussions() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    Mock::given(method("GET"))
        .and(path("/rest/v1/group_discussions"))
        .and(query_param("user_id", "eq.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::group_discussion(5, 10, "Managing hypertension"),
            MockStoreRows::group_discussion(6, 10, "Sleep routines"),
        ])))
        .mount(&store)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("userId", HeaderValue::from_static("10"));

    let (status, Json(body)) = handlers::list_discussions(State(Arc::new(config)), headers)
        .await
        .expect("listing should succeed");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][1]["topic"], "Sleep routines");
}

#[tokio::test]
async fn test_fetching_a_missing_discussion_is_not_found() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    Mock::given(method("GET"))
        .and(path("/rest/v1/group_discussions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&store)
        .await;

    let result = handlers::get_discussion(State(Arc::new(config)), Path("5".to_string())).await;
    assert_matches!(result, Err(AppError::NotFound(msg)) => {
        assert_eq!(msg, "Group discussion not found");
    });
}

#[tokio::test]
async fn test_posting_notifies_every_linked_user() {
    let store = MockServer::start().await;
    let mail = MockServer::start().await;
    let config = config_with(&store, Some(&mail));

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::user(10, "Amira", "amira@example.com", "user")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/group_discussions"))
        .and(query_param("id", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::group_discussion(5, 30, "Managing hypertension")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/messages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::message(7, 10, 30, "Has anyone tried the new plan?")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.30"))
        .and(query_param("select", "email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"email": "owner@example.com"}
        ])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "mail-1"})))
        .expect(1)
        .mount(&mail)
        .await;

    let request: PostDiscussionMessageRequest = serde_json::from_value(json!({
        "userId": 10,
        "content": "Has anyone tried the new plan?"
    }))
    .unwrap();

    let (status, Json(body)) = handlers::post_discussion_message(
        State(Arc::new(config)),
        Path("5".to_string()),
        Json(request),
    )
    .await
    .expect("posting should succeed");

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Message posted successfully!");
    assert_eq!(body["data"]["userId"], 10);
    assert_eq!(body["data"]["isEncrypted"], true);
    // The receiver stays an implementation detail of the row.
    assert!(body["data"].get("receiverId").is_none());
}

#[tokio::test]
async fn test_posting_with_no_linked_users_skips_mail_but_keeps_the_message() {
    let store = MockServer::start().await;
    let mail = MockServer::start().await;
    let config = config_with(&store, Some(&mail));

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::user(10, "Amira", "amira@example.com", "user")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/group_discussions"))
        .and(query_param("id", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::group_discussion(5, 30, "Managing hypertension")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/messages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::message(7, 10, 30, "anyone here?")
        ])))
        .expect(1)
        .mount(&store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.30"))
        .and(query_param("select", "email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mail)
        .await;

    let request: PostDiscussionMessageRequest = serde_json::from_value(json!({
        "userId": 10,
        "content": "anyone here?"
    }))
    .unwrap();

    let result = handlers::post_discussion_message(
        State(Arc::new(config)),
        Path("5".to_string()),
        Json(request),
    )
    .await;

    let (status, Json(body)) = result.expect("message row must still be created");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_posting_to_a_missing_discussion_is_not_found() {
    let store = MockServer::start().await;
    let config = config_with(&store, None);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::user(10, "Amira", "amira@example.com", "user")
        ])))
        .mount(&store)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/group_discussions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&store)
        .await;

    let request: PostDiscussionMessageRequest = serde_json::from_value(json!({
        "userId": 10,
        "content": "hello?"
    }))
    .unwrap();

    let result = handlers::post_discussion_message(
        State(Arc::new(config)),
        Path("5".to_string()),
        Json(request),
    )
    .await;

    assert_matches!(result, Err(AppError::NotFound(msg)) => {
        assert_eq!(msg, "Group discussion not found");
    });
}
