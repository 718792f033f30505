//! # Cart & Billing Types
//!
//! The cart is owned and mutated exclusively by the cart collaborator.
//! This engine only reads cart fields and submits whole-object billing
//! patches through [`crate::services::CartService`].

use crate::methods::MethodKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of the active cart, as returned by the cart collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,

    /// ISO 4217 currency code
    pub currency: String,

    /// Decimal grand total (converted to minor units for intent payloads)
    pub grand_total: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Billing>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// The gateway customer reference stored on the cart's account, if any
    pub fn stripe_customer(&self) -> Option<&str> {
        self.account
            .as_ref()
            .and_then(|account| account.stripe_customer.as_deref())
    }
}

/// Account attached to the cart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Existing gateway customer id for off-session reuse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_customer: Option<String>,
}

/// A purchasable line in the cart (used for redirect-source summaries)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub price: f64,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Billing state on the cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Billing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Opaque card token object exactly as the gateway SDK returned it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal: Option<IdealBilling>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal: Option<PaypalBilling>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentRefs>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealBilling {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaypalBilling {
    pub nonce: String,
}

/// Gateway intent references stored on the cart billing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentRefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe: Option<StripeIntentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saferpay: Option<SaferpayIntentRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripeIntentRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaferpayIntentRef {
    pub token: String,
}

/// Partial billing update submitted to the cart collaborator.
///
/// Each strategy builds exactly one patch; the cart service owns the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BillingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal: Option<IdealBilling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paypal: Option<PaypalBilling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentRefs>,
}

impl BillingPatch {
    /// Card tokenized via Stripe: card token object + confirmed intent id
    pub fn card(card: Value, intent_id: impl Into<String>) -> Self {
        Self {
            method: Some("card".to_string()),
            card: Some(card),
            intent: Some(IntentRefs {
                stripe: Some(StripeIntentRef {
                    id: intent_id.into(),
                }),
                saferpay: None,
            }),
            ..Self::default()
        }
    }

    /// iDEAL payment method token + intent id
    pub fn ideal(token: impl Into<String>, intent_id: impl Into<String>) -> Self {
        Self {
            method: Some("ideal".to_string()),
            ideal: Some(IdealBilling {
                token: token.into(),
            }),
            intent: Some(IntentRefs {
                stripe: Some(StripeIntentRef {
                    id: intent_id.into(),
                }),
                saferpay: None,
            }),
            ..Self::default()
        }
    }

    /// Redirect methods (Klarna, Bancontact) only record the method;
    /// the gateway completes the payment after redirect.
    pub fn redirect_method(kind: MethodKind) -> Self {
        Self {
            method: Some(kind.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Saferpay hosted-page intent token
    pub fn saferpay(token: impl Into<String>) -> Self {
        Self {
            intent: Some(IntentRefs {
                stripe: None,
                saferpay: Some(SaferpayIntentRef {
                    token: token.into(),
                }),
            }),
            ..Self::default()
        }
    }

    /// PayPal nonce from a completed button approval
    pub fn paypal(nonce: impl Into<String>) -> Self {
        Self {
            paypal: Some(PaypalBilling {
                nonce: nonce.into(),
            }),
            ..Self::default()
        }
    }

    /// Stripe intent id recorded on this patch, if any
    pub fn stripe_intent_id(&self) -> Option<&str> {
        self.intent
            .as_ref()
            .and_then(|refs| refs.stripe.as_ref())
            .map(|r| r.id.as_str())
    }
}

/// Store settings consumed by redirect-source strategies (Klarna)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}
