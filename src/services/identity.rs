// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client.
//!
//! Speaks the Identity Toolkit REST surface (sign in with password, sign
//! up, anonymous sign in). The application treats the provider as an
//! opaque capability: all it needs back is success/failure plus an
//! email/display-name pair.

use crate::error::AppError;
use serde::Deserialize;
use uuid::Uuid;

/// Identity provider client.
#[derive(Clone)]
pub struct IdentityClient {
    mode: IdentityMode,
}

#[derive(Clone)]
enum IdentityMode {
    Remote {
        http: reqwest::Client,
        base_url: String,
        api_key: String,
    },
    /// Offline mode for tests: accepts any credentials.
    Mock,
}

/// Verified identity returned by the provider.
#[derive(Debug, Clone)]
pub struct IdentityUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Identity Toolkit account response.
#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

impl IdentityClient {
    /// Create a client against the given provider base URL.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            mode: IdentityMode::Remote {
                http: reqwest::Client::new(),
                base_url,
                api_key,
            },
        }
    }

    /// Create an offline client for testing.
    ///
    /// Any credentials are accepted; the uid is derived from the email so
    /// repeated sign-ins are stable.
    pub fn new_mock() -> Self {
        Self {
            mode: IdentityMode::Mock,
        }
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, AppError> {
        if let IdentityMode::Mock = self.mode {
            return Ok(mock_user(email));
        }

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.post_account("accounts:signInWithPassword", &body).await
    }

    /// Create a new account with email and password.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, AppError> {
        if let IdentityMode::Mock = self.mode {
            return Ok(mock_user(email));
        }

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.post_account("accounts:signUp", &body).await
    }

    /// Anonymous (guest) sign in.
    pub async fn sign_in_anonymous(&self) -> Result<IdentityUser, AppError> {
        if let IdentityMode::Mock = self.mode {
            return Ok(IdentityUser {
                uid: Uuid::new_v4().simple().to_string(),
                email: None,
                display_name: None,
            });
        }

        let body = serde_json::json!({ "returnSecureToken": true });
        self.post_account("accounts:signUp", &body).await
    }

    /// POST an account operation and parse the response.
    async fn post_account(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<IdentityUser, AppError> {
        let (http, base_url, api_key) = match &self.mode {
            IdentityMode::Remote {
                http,
                base_url,
                api_key,
            } => (http, base_url, api_key),
            IdentityMode::Mock => {
                return Err(AppError::IdentityApi(
                    "mock client has no remote endpoint".to_string(),
                ))
            }
        };

        let url = format!("{}/v1/{}?key={}", base_url, endpoint, api_key);

        let response = http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::IdentityApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::IdentityApi(format!("HTTP {}: {}", status, body)));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| AppError::IdentityApi(format!("JSON parse error: {}", e)))?;

        Ok(IdentityUser {
            uid: account.local_id,
            email: account.email,
            display_name: account.display_name,
        })
    }
}

fn mock_user(email: &str) -> IdentityUser {
    let mut uid = hex::encode(email.trim().to_lowercase());
    uid.truncate(28);
    IdentityUser {
        uid,
        email: Some(email.to_string()),
        display_name: None,
    }
}
