// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use quizgenius::config::Config;
use quizgenius::routes::create_router;
use quizgenius::services::{GeneratorClient, IdentityClient};
use quizgenius::session::SessionService;
use quizgenius::store::{LocalStore, QuizDataStore};
use quizgenius::AppState;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// A well-formed two-question generator blob.
#[allow(dead_code)]
pub const SAMPLE_BLOB: &str = r#"{"question1":"What is the capital of France?","answer1_1":"London","answer1_2":"Paris","answer1_3":"Berlin","correct_answer1":"Paris","question2":"What is 2 + 2?","answer2_1":"3","answer2_2":"4","answer2_3":"5","correct_answer2":"4"}"#;

/// Create a test app with a disposable data dir and offline mock
/// collaborators. Keep the returned TempDir alive for the test's duration.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, TempDir) {
    create_test_app_with_generator(GeneratorClient::new_mock(SAMPLE_BLOB))
}

/// Same, with a specific generator mock.
#[allow(dead_code)]
pub fn create_test_app_with_generator(
    generator: GeneratorClient,
) -> (axum::Router, Arc<AppState>, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp data dir");

    let mut config = Config::test_default();
    config.data_dir = tmp.path().to_path_buf();

    let store = LocalStore::new(config.data_dir.clone());
    let quiz_data = QuizDataStore::new(store.clone());
    let sessions =
        SessionService::new(store.clone(), quiz_data.clone(), IdentityClient::new_mock());

    let state = Arc::new(AppState {
        config,
        store,
        quiz_data,
        sessions,
        generator,
    });

    (create_router(state.clone()), state, tmp)
}

/// Create a session JWT directly (mirrors the auth flow).
#[allow(dead_code)]
pub fn create_test_jwt(email: &str, signing_key: &[u8]) -> String {
    quizgenius::middleware::auth::create_jwt(email, signing_key).expect("Failed to create JWT")
}

/// Send a JSON request and return (status, parsed body).
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, value)
}

/// Sign up a regular (non-guest) user and return their session token.
#[allow(dead_code)]
pub async fn signup(app: &axum::Router, email: &str, name: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/auth/signup",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": "hunter2!",
            "name": name,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {}", body);
    body["token"].as_str().expect("signup token").to_string()
}

/// Enter as a guest and return the session token.
#[allow(dead_code)]
pub async fn login_guest(app: &axum::Router) -> String {
    let (status, body) = send_json(app, "POST", "/auth/guest", None, None).await;
    assert_eq!(status, StatusCode::OK, "guest login failed: {}", body);
    body["token"].as_str().expect("guest token").to_string()
}
