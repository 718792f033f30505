//! # Payment Method Configuration
//!
//! The merchant's enabled payment methods, fetched once per orchestration
//! session as an immutable snapshot. Each method kind maps to the gateway
//! that processes it plus gateway-specific credentials.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Payment method kinds this engine can tokenize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Card,
    Ideal,
    Paypal,
    Klarna,
    Bancontact,
}

impl MethodKind {
    /// Dispatch precedence for `tokenize`; first match wins, so a params
    /// object carrying both `card` and `ideal` tokenizes only as a card.
    pub const TOKENIZE_PRECEDENCE: [MethodKind; 4] = [
        MethodKind::Card,
        MethodKind::Ideal,
        MethodKind::Klarna,
        MethodKind::Bancontact,
    ];

    /// Kinds that have a visible mount step. Klarna, Bancontact and
    /// Saferpay cards redirect instead.
    pub const MOUNTABLE: [MethodKind; 3] =
        [MethodKind::Card, MethodKind::Ideal, MethodKind::Paypal];

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Card => "card",
            MethodKind::Ideal => "ideal",
            MethodKind::Paypal => "paypal",
            MethodKind::Klarna => "klarna",
            MethodKind::Bancontact => "bancontact",
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Third-party payment processors that perform token issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gateway {
    Stripe,
    Braintree,
    Saferpay,
}

impl Gateway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gateway::Stripe => "stripe",
            Gateway::Braintree => "braintree",
            Gateway::Saferpay => "saferpay",
        }
    }
}

impl std::fmt::Display for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a single enabled payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    /// Gateway that processes this method
    pub gateway: Gateway,

    /// Gateway publishable key (Stripe)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishable_key: Option<String>,

    /// Merchant client id (PayPal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Merchant account id (PayPal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,

    /// Gateway-specific settings we pass through untouched
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MethodConfig {
    /// Create a minimal config for a gateway
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            publishable_key: None,
            client_id: None,
            merchant_id: None,
            extra: HashMap::new(),
        }
    }

    /// Builder: set the publishable key
    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = Some(key.into());
        self
    }

    /// Builder: set PayPal merchant identifiers
    pub fn with_paypal_ids(
        mut self,
        client_id: impl Into<String>,
        merchant_id: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.merchant_id = Some(merchant_id.into());
        self
    }
}

/// Snapshot of the merchant's enabled payment methods.
///
/// An absent entry means the method is disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<MethodConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal: Option<MethodConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal: Option<MethodConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub klarna: Option<MethodConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bancontact: Option<MethodConfig>,
}

impl PaymentMethodsConfig {
    /// Get the config for a method kind, if enabled
    pub fn get(&self, kind: MethodKind) -> Option<&MethodConfig> {
        match kind {
            MethodKind::Card => self.card.as_ref(),
            MethodKind::Ideal => self.ideal.as_ref(),
            MethodKind::Paypal => self.paypal.as_ref(),
            MethodKind::Klarna => self.klarna.as_ref(),
            MethodKind::Bancontact => self.bancontact.as_ref(),
        }
    }

    /// Check whether a method kind is enabled
    pub fn enabled(&self, kind: MethodKind) -> bool {
        self.get(kind).is_some()
    }

    /// The gateway handling a method kind, if enabled
    pub fn gateway(&self, kind: MethodKind) -> Option<Gateway> {
        self.get(kind).map(|cfg| cfg.gateway)
    }

    /// Publishable key for a method kind, falling back to the card config.
    ///
    /// Redirect methods (iDEAL, Klarna, Bancontact) ride on the card
    /// gateway's publishable key.
    pub fn publishable_key_for(&self, kind: MethodKind) -> Option<&str> {
        self.get(kind)
            .and_then(|cfg| cfg.publishable_key.as_deref())
            .or_else(|| {
                self.card
                    .as_ref()
                    .and_then(|cfg| cfg.publishable_key.as_deref())
            })
    }

    /// Builder: enable a method kind
    pub fn with_method(mut self, kind: MethodKind, config: MethodConfig) -> Self {
        match kind {
            MethodKind::Card => self.card = Some(config),
            MethodKind::Ideal => self.ideal = Some(config),
            MethodKind::Paypal => self.paypal = Some(config),
            MethodKind::Klarna => self.klarna = Some(config),
            MethodKind::Bancontact => self.bancontact = Some(config),
        }
        self
    }
}
