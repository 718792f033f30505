//! # Collaborator Contracts
//!
//! External services this engine talks to, specified only at their
//! interface boundary. Concrete reqwest-backed implementations live in
//! `tokenflow-client`; tests substitute in-memory mocks.

use crate::cart::{BillingPatch, Cart, StoreSettings};
use crate::error::TokenizeResult;
use crate::methods::PaymentMethodsConfig;
use async_trait::async_trait;

/// The cart service owns and mutates the cart; this engine only reads
/// fields and submits whole-object billing patches.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Fetch the active cart, if one exists
    async fn get(&self) -> TokenizeResult<Option<Cart>>;

    /// Apply a partial billing update and return the updated cart
    async fn update_billing(&self, patch: &BillingPatch) -> TokenizeResult<Cart>;
}

/// Merchant settings service
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// The enabled payment methods snapshot. A configuration error
    /// reported by the collaborator surfaces as
    /// [`crate::TokenizeError::MethodsConfig`].
    async fn payments(&self) -> TokenizeResult<PaymentMethodsConfig>;

    /// General store settings (name, URL, locale, country)
    async fn store(&self) -> TokenizeResult<StoreSettings>;
}

/// The vault collaborator creates/updates payment intents and issues
/// gateway authorizations. Single attempt, caller-visible failure.
#[async_trait]
pub trait VaultService: Send + Sync {
    async fn request(
        &self,
        method: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> TokenizeResult<serde_json::Value>;
}

/// Generic authenticated HTTP client for the store API
/// (e.g. `GET /payment/methods`)
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn request(&self, method: &str, path: &str) -> TokenizeResult<serde_json::Value>;
}
