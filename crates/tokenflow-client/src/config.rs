//! # Client Configuration
//!
//! Configuration for the store and vault API clients.
//! All values load from environment variables.

use std::env;
use tokenflow_core::{TokenizeError, TokenizeResult};

/// Store and vault API configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store API base URL
    pub store_api_url: String,

    /// Public store key (pk_...), sent as the bearer token
    pub public_key: String,

    /// Vault API base URL; defaults to `<store_api_url>/vault`
    pub vault_api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STORE_API_URL`
    /// - `STORE_PUBLIC_KEY`
    ///
    /// Optional:
    /// - `VAULT_API_URL` (defaults to `<STORE_API_URL>/vault`)
    pub fn from_env() -> TokenizeResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_api_url = env::var("STORE_API_URL")
            .map_err(|_| TokenizeError::Configuration("STORE_API_URL not set".to_string()))?;

        let public_key = env::var("STORE_PUBLIC_KEY")
            .map_err(|_| TokenizeError::Configuration("STORE_PUBLIC_KEY not set".to_string()))?;

        if !public_key.starts_with("pk_") {
            return Err(TokenizeError::Configuration(
                "STORE_PUBLIC_KEY must start with pk_".to_string(),
            ));
        }

        let vault_api_url = env::var("VAULT_API_URL")
            .unwrap_or_else(|_| format!("{}/vault", store_api_url.trim_end_matches('/')));

        Ok(Self {
            store_api_url,
            public_key,
            vault_api_url,
            timeout_secs: 30,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(store_api_url: impl Into<String>, public_key: impl Into<String>) -> Self {
        let store_api_url = store_api_url.into();
        let vault_api_url = format!("{}/vault", store_api_url.trim_end_matches('/'));
        Self {
            store_api_url,
            public_key: public_key.into(),
            vault_api_url,
            timeout_secs: 30,
        }
    }

    /// Check if using a test key
    pub fn is_test_mode(&self) -> bool {
        self.public_key.starts_with("pk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.public_key)
    }

    /// Builder: set a custom vault API base URL
    pub fn with_vault_api_url(mut self, url: impl Into<String>) -> Self {
        self.vault_api_url = url.into();
        self
    }
}
