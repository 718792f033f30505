//! # Tokenization Error Types
//!
//! Typed error handling for the tokenflow engine.
//! All tokenization operations return `Result<T, TokenizeError>`.

use crate::methods::{Gateway, MethodKind};
use thiserror::Error;

/// Core error type for all tokenization operations
#[derive(Debug, Error)]
pub enum TokenizeError {
    /// No active cart exists; fatal to the current call
    #[error("Cart not found")]
    CartNotFound,

    /// The settings collaborator reported a payment configuration error;
    /// fatal to the current call
    #[error("Payment settings error: {0}")]
    MethodsConfig(String),

    /// Field-level validation failure from intent creation/update
    #[error("Vault rejected field '{param}': {message}")]
    Vault { param: String, message: String },

    /// Native error from a third-party payment SDK
    #[error("Gateway error [{gateway}]: {message}")]
    Gateway { gateway: Gateway, message: String },

    /// Tokenization attempted before the required element was mounted
    #[error("No {gateway} payment element mounted")]
    ElementNotMounted { gateway: Gateway },

    /// The requested (method, gateway) pair has no registered strategy
    #[error("No tokenization strategy for payment method '{method}'")]
    UnsupportedCombination {
        method: MethodKind,
        gateway: Option<Gateway>,
    },

    /// Tokenization parameters not passed
    #[error("Tokenization parameters not passed")]
    MissingParams,

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// SDK script failed to load
    #[error("Script load error: {0}")]
    Script(String),

    /// Network/HTTP error communicating with a collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TokenizeError {
    /// Returns true if this error may never be intercepted by a caller's
    /// `on_error` hook; it always surfaces as a rejection.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TokenizeError::CartNotFound | TokenizeError::MethodsConfig(_)
        )
    }

    /// Short machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            TokenizeError::CartNotFound => "cart_not_found",
            TokenizeError::MethodsConfig(_) => "methods_config_error",
            TokenizeError::Vault { .. } => "vault_error",
            TokenizeError::Gateway { .. } => "gateway_error",
            TokenizeError::ElementNotMounted { .. } => "element_not_mounted",
            TokenizeError::UnsupportedCombination { .. } => "unsupported_combination",
            TokenizeError::MissingParams => "missing_params",
            TokenizeError::Configuration(_) => "configuration_error",
            TokenizeError::Script(_) => "script_error",
            TokenizeError::Network(_) => "network_error",
            TokenizeError::Serialization(_) => "serialization_error",
            TokenizeError::Internal(_) => "internal_error",
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TokenizeError::CartNotFound => 404,
            TokenizeError::MethodsConfig(_) => 500,
            TokenizeError::Vault { .. } => 402,
            TokenizeError::Gateway { .. } => 402,
            TokenizeError::ElementNotMounted { .. } => 409,
            TokenizeError::UnsupportedCombination { .. } => 400,
            TokenizeError::MissingParams => 400,
            TokenizeError::Configuration(_) => 500,
            TokenizeError::Script(_) => 503,
            TokenizeError::Network(_) => 503,
            TokenizeError::Serialization(_) => 500,
            TokenizeError::Internal(_) => 500,
        }
    }

    /// The first failing field for vault validation errors
    pub fn param(&self) -> Option<&str> {
        match self {
            TokenizeError::Vault { param, .. } => Some(param),
            _ => None,
        }
    }
}

/// Result type alias for tokenization operations
pub type TokenizeResult<T> = Result<T, TokenizeError>;
