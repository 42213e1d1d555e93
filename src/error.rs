// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::parser::ParseError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired session token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Missing capability: {0}")]
    MissingCapability(String),

    #[error("Identity provider error: {0}")]
    IdentityApi(String),

    #[error("Quiz generator error: {0}")]
    GeneratorApi(String),

    #[error("Generated quiz was unusable: {0}")]
    QuizParse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::MissingCapability(msg) => {
                (StatusCode::FORBIDDEN, "missing_capability", Some(msg.clone()))
            }
            AppError::IdentityApi(msg) => {
                tracing::warn!(error = %msg, "Identity provider error");
                (StatusCode::UNAUTHORIZED, "identity_error", None)
            }
            AppError::GeneratorApi(msg) => {
                tracing::warn!(error = %msg, "Quiz generator error");
                (StatusCode::BAD_GATEWAY, "generator_error", None)
            }
            AppError::QuizParse(err) => {
                tracing::warn!(error = %err, "Generated quiz failed to parse");
                (StatusCode::BAD_GATEWAY, "generation_failed", None)
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
