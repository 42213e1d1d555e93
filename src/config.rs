//! Application configuration loaded from environment variables.
//!
//! All values are read once at startup. Secrets (the JWT signing key and
//! the identity provider API key) come from the environment as well; in
//! production they are injected by the deployment platform.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Directory holding per-profile storage scopes
    pub data_dir: PathBuf,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Identity provider base URL
    pub identity_base_url: String,
    /// Text generator base URL
    pub generator_base_url: String,
    /// Text generator model name
    pub generator_model: String,

    // --- Secrets ---
    /// Identity provider API key (project web key)
    pub identity_api_key: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            data_dir: env::var("QUIZGENIUS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com".to_string()),
            generator_base_url: env::var("GENERATOR_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            generator_model: env::var("GENERATOR_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),

            identity_api_key: env::var("IDENTITY_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("IDENTITY_API_KEY"))?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            identity_base_url: "http://localhost:9099".to_string(),
            generator_base_url: "http://localhost:9098".to_string(),
            generator_model: "test-model".to_string(),
            identity_api_key: "test_identity_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("IDENTITY_API_KEY", "test_key");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!!");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.identity_api_key, "test_key");
        assert_eq!(config.port, 8080);
        assert_eq!(config.generator_model, "gemini-2.0-flash");
    }
}
