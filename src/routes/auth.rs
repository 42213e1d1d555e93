// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication routes: login, signup, guest entry, logout.

use axum::{
    extract::State,
    http::header,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, decode_session_token, SESSION_COOKIE};
use crate::routes::api::ProfileResponse;
use crate::session::EstablishedSession;
use crate::store::LocalStore;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/guest", post(guest))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    name: String,
}

/// Session response: the token is also set as an HttpOnly cookie.
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub profile: ProfileResponse,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Log in with email and password.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let session = state.sessions.login(req.email.trim(), &req.password).await?;
    establish(&state, jar, session)
}

/// Create an account and log in.
async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password are required".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let session = state
        .sessions
        .signup(req.email.trim(), &req.password, req.name.trim())
        .await?;
    establish(&state, jar, session)
}

/// Enter as a guest.
async fn guest(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let session = state.sessions.login_as_guest().await?;
    establish(&state, jar, session)
}

/// Log out: clears the profile and cascades to the quiz and result
/// collections, then drops the session cookie.
///
/// Best-effort when the token is already missing or invalid - the cookie
/// is removed either way.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: axum::extract::Request,
) -> Result<(CookieJar, Json<LogoutResponse>)> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(|t| t.to_string())
        });

    if let Some(email) = token.and_then(|t| decode_session_token(&t, &state.config.jwt_signing_key))
    {
        let scope = LocalStore::scope_for_email(&email);
        state.sessions.logout(&scope).await?;
    }

    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    Ok((jar, Json(LogoutResponse { success: true })))
}

/// Mint the session token and cookie for an established session.
fn establish(
    state: &Arc<AppState>,
    jar: CookieJar,
    session: EstablishedSession,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let token = create_jwt(&session.profile.email, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            token,
            profile: ProfileResponse::from(session.profile),
        }),
    ))
}
