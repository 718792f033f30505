//! # Intent Lifecycle
//!
//! Creates and updates payment intents through the vault collaborator and
//! interprets the resulting status. Intents are never persisted locally
//! beyond the current call stack.

use crate::error::{TokenizeError, TokenizeResult};
use crate::services::VaultService;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Server-tracked status of an in-progress payment attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntentStatus {
    RequiresConfirmation,
    RequiresAction,
    RequiresSourceAction,
    Succeeded,
    Canceled,
    /// Gateway-specific status (passthrough)
    Other(String),
}

impl IntentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            IntentStatus::RequiresConfirmation => "requires_confirmation",
            IntentStatus::RequiresAction => "requires_action",
            IntentStatus::RequiresSourceAction => "requires_source_action",
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::Canceled => "canceled",
            IntentStatus::Other(status) => status,
        }
    }

    /// Whether the gateway demands a hosted action step-up
    pub fn requires_action(&self) -> bool {
        matches!(
            self,
            IntentStatus::RequiresAction | IntentStatus::RequiresSourceAction
        )
    }
}

impl From<String> for IntentStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "requires_confirmation" => IntentStatus::RequiresConfirmation,
            "requires_action" => IntentStatus::RequiresAction,
            "requires_source_action" => IntentStatus::RequiresSourceAction,
            "succeeded" => IntentStatus::Succeeded,
            "canceled" => IntentStatus::Canceled,
            _ => IntentStatus::Other(status),
        }
    }
}

impl From<IntentStatus> for String {
    fn from(status: IntentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Default for IntentStatus {
    fn default() -> Self {
        IntentStatus::Other("unknown".to_string())
    }
}

/// A payment intent as returned by the vault collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub id: String,

    #[serde(default)]
    pub status: IntentStatus,

    /// Secret the gateway SDK needs for in-page confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Hosted-page token (Saferpay)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Gateway-hosted page to navigate to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,

    /// Gateway-specific fields we keep but do not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Drives intent create/update against the vault collaborator
pub struct IntentLifecycle {
    vault: Arc<dyn VaultService>,
}

impl IntentLifecycle {
    pub fn new(vault: Arc<dyn VaultService>) -> Self {
        Self { vault }
    }

    /// Create an intent (`POST /intent`)
    pub async fn create(&self, payload: &Value) -> TokenizeResult<Intent> {
        self.round_trip("post", payload).await
    }

    /// Update an intent (`PUT /intent`)
    pub async fn update(&self, payload: &Value) -> TokenizeResult<Intent> {
        self.round_trip("put", payload).await
    }

    async fn round_trip(&self, method: &str, payload: &Value) -> TokenizeResult<Intent> {
        let raw = self.vault.request(method, "/intent", payload).await?;

        // Field-keyed validation failure; only the first failing field is
        // surfaced (the vault returns a single primary error in practice)
        if let Some(errors) = raw.get("errors").and_then(Value::as_object) {
            if let Some((param, detail)) = errors.iter().next() {
                let message = detail
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string();
                return Err(TokenizeError::Vault {
                    param: param.clone(),
                    message,
                });
            }
        }

        let intent: Intent = serde_json::from_value(raw).map_err(|e| {
            TokenizeError::Serialization(format!("failed to parse intent: {}", e))
        })?;
        debug!("intent {}: id={}, status={}", method, intent.id, intent.status.as_str());
        Ok(intent)
    }
}
