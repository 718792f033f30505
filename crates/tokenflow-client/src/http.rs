//! # Store & Vault HTTP Clients
//!
//! Reqwest-backed implementations of the collaborator contracts. The
//! store client reads the cart and merchant settings and submits billing
//! patches; the vault client drives intent and authorization requests
//! with per-call idempotency keys.

use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use tokenflow_core::{
    BillingPatch, Cart, CartService, HttpBackend, PaymentMethodsConfig, SettingsService,
    StoreSettings, TokenizeError, TokenizeResult, VaultService,
};
use tracing::{debug, instrument};
use uuid::Uuid;

fn build_client(timeout_secs: u64) -> TokenizeResult<Client> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| TokenizeError::Configuration(format!("failed to build HTTP client: {e}")))
}

fn parse_method(method: &str) -> TokenizeResult<Method> {
    method
        .to_uppercase()
        .parse::<Method>()
        .map_err(|_| TokenizeError::Internal(format!("invalid HTTP method '{method}'")))
}

async fn read_json(response: reqwest::Response) -> TokenizeResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TokenizeError::Network(format!(
            "request failed with status {status}: {body}"
        )));
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| TokenizeError::Serialization(e.to_string()))
}

/// Authenticated client for the store API (cart, settings, methods)
pub struct StoreClient {
    config: ClientConfig,
    client: Client,
}

impl StoreClient {
    pub fn new(config: ClientConfig) -> TokenizeResult<Self> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> TokenizeResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> TokenizeResult<Value> {
        let url = format!(
            "{}/{}",
            self.config.store_api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        debug!("store request: {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", self.config.auth_header());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TokenizeError::Network(e.to_string()))?;
        read_json(response).await
    }
}

#[async_trait]
impl CartService for StoreClient {
    #[instrument(skip(self))]
    async fn get(&self) -> TokenizeResult<Option<Cart>> {
        let raw = self.send(Method::GET, "/cart", None).await?;
        if raw.is_null() {
            return Ok(None);
        }
        serde_json::from_value(raw)
            .map(Some)
            .map_err(|e| TokenizeError::Serialization(e.to_string()))
    }

    #[instrument(skip_all)]
    async fn update_billing(&self, patch: &BillingPatch) -> TokenizeResult<Cart> {
        let body = json!({ "billing": patch });
        let raw = self.send(Method::PUT, "/cart", Some(&body)).await?;
        serde_json::from_value(raw).map_err(|e| TokenizeError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl SettingsService for StoreClient {
    async fn payments(&self) -> TokenizeResult<PaymentMethodsConfig> {
        let raw = self.send(Method::GET, "/settings/payments", None).await?;

        // The settings collaborator reports merchant misconfiguration
        // inline rather than with an HTTP error status
        if let Some(message) = raw.get("error").and_then(Value::as_str) {
            return Err(TokenizeError::MethodsConfig(message.to_string()));
        }

        serde_json::from_value(raw).map_err(|e| TokenizeError::Serialization(e.to_string()))
    }

    async fn store(&self) -> TokenizeResult<StoreSettings> {
        let raw = self.send(Method::GET, "/settings", None).await?;
        let store = raw.get("store").cloned().unwrap_or(Value::Null);
        if store.is_null() {
            return Ok(StoreSettings::default());
        }
        serde_json::from_value(store).map_err(|e| TokenizeError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl HttpBackend for StoreClient {
    async fn request(&self, method: &str, path: &str) -> TokenizeResult<Value> {
        self.send(parse_method(method)?, path, None).await
    }
}

/// Client for the vault collaborator (intents, gateway authorizations)
pub struct VaultClient {
    config: ClientConfig,
    client: Client,
}

impl VaultClient {
    pub fn new(config: ClientConfig) -> TokenizeResult<Self> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> TokenizeResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

#[async_trait]
impl VaultService for VaultClient {
    #[instrument(skip(self, body))]
    async fn request(&self, method: &str, path: &str, body: &Value) -> TokenizeResult<Value> {
        let method = parse_method(method)?;
        let url = format!(
            "{}/{}",
            self.config.vault_api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        debug!("vault request: {} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Authorization", self.config.auth_header())
            .json(body);

        // The key lets the vault deduplicate an accidentally repeated
        // create
        if method == Method::POST {
            request = request.header("Idempotency-Key", Uuid::new_v4().to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| TokenizeError::Network(e.to_string()))?;
        read_json(response).await
    }
}
