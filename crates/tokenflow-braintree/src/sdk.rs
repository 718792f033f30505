//! # Braintree SDK Boundary
//!
//! Three hosted scripts cooperate to render a vaulting PayPal button:
//! the Braintree client, its PayPal checkout bridge, and the PayPal
//! smart-button SDK. Button rendering is push-based: approval, cancel
//! and failure arrive later through a [`PaypalFlow`] the caller hands
//! in at render time.

use async_trait::async_trait;
use serde_json::Value;
use tokenflow_core::{NormalizedError, TokenizeResult};

/// Braintree client script
pub const BRAINTREE_SCRIPT_ID: &str = "braintree-web";
pub const BRAINTREE_SCRIPT_URL: &str =
    "https://js.braintreegateway.com/web/3.57.0/js/client.min.js";

/// Braintree's PayPal checkout bridge
pub const BRAINTREE_PAYPAL_SCRIPT_ID: &str = "braintree-web-paypal-checkout";
pub const BRAINTREE_PAYPAL_SCRIPT_URL: &str =
    "https://js.braintreegateway.com/web/3.57.0/js/paypal-checkout.min.js";

/// PayPal smart-button SDK (merchant-parameterized, see [`paypal_script_url`])
pub const PAYPAL_SCRIPT_ID: &str = "paypal-sdk";

/// The PayPal SDK URL is parameterized per merchant; `vault=true`
/// requests a re-billable agreement rather than a one-shot payment.
pub fn paypal_script_url(client_id: &str, merchant_id: &str) -> String {
    format!(
        "https://www.paypal.com/sdk/js?client-id={client_id}&merchant-id={merchant_id}&vault=true"
    )
}

/// Button placement and presentation
#[derive(Debug, Clone)]
pub struct PaypalButtonOptions {
    /// DOM selector to render into
    pub target: String,
    /// Caller-supplied style, passed through untouched
    pub style: Value,
    /// Uppercase ISO currency code
    pub currency: String,
    /// Decimal amount (PayPal takes major units)
    pub amount: f64,
}

/// A completed button approval
#[derive(Debug, Clone, PartialEq)]
pub struct PaypalApproval {
    /// Vaulted payment nonce to store on the cart billing
    pub nonce: String,
}

/// Receives button lifecycle events after rendering
#[async_trait]
pub trait PaypalFlow: Send + Sync {
    /// The shopper approved the payment in the PayPal popup
    async fn approved(&self, approval: PaypalApproval);

    /// The shopper dismissed the popup
    async fn cancelled(&self);

    /// The button or popup failed
    async fn failed(&self, error: NormalizedError);
}

/// Braintree at its interface boundary
#[async_trait]
pub trait BraintreeSdk: Send + Sync {
    /// Create the Braintree client from a tokenization authorization and
    /// render the PayPal button; `flow` receives everything that happens
    /// after this call returns.
    async fn render_paypal_button(
        &self,
        authorization: &str,
        options: &PaypalButtonOptions,
        flow: std::sync::Arc<dyn PaypalFlow>,
    ) -> TokenizeResult<()>;
}
