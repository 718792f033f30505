//! # Stripe SDK Boundary
//!
//! The hosted Stripe.js SDK at its interface boundary. Card data never
//! leaves the hosted iframe; this engine only sees opaque tokens. The
//! real implementation binds to the loaded SDK global in the embedding
//! runtime; tests substitute in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokenflow_core::{Billing, Cart, ElementEvents, ElementHandle, MountKind, TokenizeResult};

/// Script id under which the SDK is loaded, at most once per page
pub const STRIPE_SCRIPT_ID: &str = "stripe-js";

/// Fixed SDK source URL
pub const STRIPE_SCRIPT_URL: &str = "https://js.stripe.com/v3/";

/// Element to create and mount
#[derive(Debug, Clone)]
pub struct ElementSpec {
    pub kind: MountKind,
    /// DOM selector to mount into
    pub target: String,
    /// SDK-native element options, passed through untouched
    pub options: Value,
}

impl ElementSpec {
    pub fn new(kind: MountKind, target: impl Into<String>, options: Value) -> Self {
        Self {
            kind,
            target: target.into(),
            options,
        }
    }
}

/// Opaque card token built from a mounted element. Carries whatever
/// display fields the SDK returned (brand, last4, ...) untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardToken {
    pub token: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A non-card payment method created by the SDK (iDEAL)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
}

/// Result of an in-page confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub payment_intent_id: String,
}

/// Request for a redirect source (Klarna, Bancontact)
#[derive(Debug, Clone, Serialize)]
pub struct SourceRequest {
    /// "klarna" or "bancontact"
    #[serde(rename = "type")]
    pub source_type: String,

    /// Minor-unit amount
    pub amount: i64,

    /// Lowercase currency code
    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,

    /// Page the gateway sends the customer back to
    pub return_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub klarna: Option<KlarnaDetails>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SourceItem>,
}

/// Klarna-specific source fields derived from store settings
#[derive(Debug, Clone, Serialize)]
pub struct KlarnaDetails {
    pub product: String,
    pub purchase_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Line-item summary for redirect sources
#[derive(Debug, Clone, Serialize)]
pub struct SourceItem {
    pub description: String,
    pub amount: i64,
    pub currency: String,
    pub quantity: u32,
}

/// A created redirect source
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Source {
    pub id: String,
    pub redirect_url: String,
}

/// Stripe.js at its interface boundary
#[async_trait]
pub trait StripeSdk: Send + Sync {
    /// Bind the SDK global to the merchant's publishable key
    /// (`window.Stripe(publishableKey)` in the original runtime)
    fn init(&self, publishable_key: &str) -> TokenizeResult<()>;

    /// Create an element and mount it; wires the caller's event hooks.
    /// Synchronous by SDK contract.
    fn mount_element(
        &self,
        spec: &ElementSpec,
        events: &ElementEvents,
    ) -> TokenizeResult<ElementHandle>;

    /// Build an opaque card payment method from the mounted element
    async fn create_payment_method(
        &self,
        element: &ElementHandle,
        cart: &Cart,
    ) -> TokenizeResult<CardToken>;

    /// Build an iDEAL payment method from the mounted bank element and
    /// the cart's billing details
    async fn create_ideal_payment_method(
        &self,
        element: &ElementHandle,
        billing: Option<&Billing>,
    ) -> TokenizeResult<PaymentMethod>;

    /// Confirm a card intent in-page
    async fn confirm_card_payment(&self, client_secret: &str) -> TokenizeResult<Confirmation>;

    /// Run the hosted action step-up (3-D-secure style)
    async fn handle_card_action(&self, client_secret: &str) -> TokenizeResult<()>;

    /// Create a redirect source
    async fn create_source(&self, request: &SourceRequest) -> TokenizeResult<Source>;
}
