//! # Payment Outcomes
//!
//! Explicit result types returned up the call chain instead of scattered
//! callbacks. Hook invocation happens as a final normalization step in
//! [`crate::normalize`].

use crate::error::TokenizeError;
use crate::methods::MethodKind;
use serde::Serialize;

/// Terminal result of a tokenize call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum PaymentOutcome {
    /// The payment instrument was committed onto the cart billing
    Success {
        method: MethodKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        intent_id: Option<String>,
    },

    /// Control is leaving the page for a gateway-hosted step; terminal
    Redirect { url: String },

    /// A non-fatal error was delivered to the caller's `on_error` hook
    /// and is considered handled; nothing propagates further
    Handled(NormalizedError),
}

impl PaymentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PaymentOutcome::Success { .. })
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, PaymentOutcome::Redirect { .. })
    }

    /// Redirect target, when this outcome leaves the page
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            PaymentOutcome::Redirect { url } => Some(url),
            _ => None,
        }
    }
}

/// Single error shape handed to caller hooks, regardless of which
/// gateway or collaborator produced the original signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedError {
    /// Machine-readable code (e.g. "vault_error", "gateway_error")
    pub code: String,

    /// HTTP-style status classifying the failure
    pub status: u16,

    /// First failing field for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,

    /// Human-readable message
    pub message: String,
}

impl From<&TokenizeError> for NormalizedError {
    fn from(err: &TokenizeError) -> Self {
        Self {
            code: err.code().to_string(),
            status: err.status_code(),
            param: err.param().map(String::from),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
