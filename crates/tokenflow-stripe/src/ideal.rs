//! # Stripe iDEAL Strategy
//!
//! iDEAL confirms server-side at intent creation (`confirm: true`) and
//! redirects the shopper to their bank. The billing patch is written
//! before the redirect so the token survives the round trip.

use crate::elements::mount_elements;
use crate::sdk::{StripeSdk, STRIPE_SCRIPT_ID, STRIPE_SCRIPT_URL};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tokenflow_core::{
    amount_by_currency, lowercase_code, BillingPatch, Cart, CartService, ElementHandle, ElementRegistry,
    Gateway, IntentLifecycle, MethodKind, PaymentMethodsConfig, PaymentOutcome, ScriptLoader,
    TokenizationParams, TokenizeError, TokenizeResult, TokenizeStrategy, WebHost,
};
use tracing::{info, instrument};

/// iDEAL payments through a Stripe bank-selector element
pub struct StripeIdealStrategy {
    sdk: Arc<dyn StripeSdk>,
    loader: Arc<ScriptLoader>,
    elements: Arc<ElementRegistry>,
    intents: Arc<IntentLifecycle>,
    cart: Arc<dyn CartService>,
    host: Arc<dyn WebHost>,
}

impl StripeIdealStrategy {
    pub fn new(
        sdk: Arc<dyn StripeSdk>,
        loader: Arc<ScriptLoader>,
        elements: Arc<ElementRegistry>,
        intents: Arc<IntentLifecycle>,
        cart: Arc<dyn CartService>,
        host: Arc<dyn WebHost>,
    ) -> Self {
        Self {
            sdk,
            loader,
            elements,
            intents,
            cart,
            host,
        }
    }
}

#[async_trait]
impl TokenizeStrategy for StripeIdealStrategy {
    fn method(&self) -> MethodKind {
        MethodKind::Ideal
    }

    fn gateway(&self) -> Gateway {
        Gateway::Stripe
    }

    async fn mount(
        &self,
        params: &TokenizationParams,
        _cart: &Cart,
        methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<Option<ElementHandle>> {
        let Some(ideal_params) = params.get(MethodKind::Ideal) else {
            return Ok(None);
        };

        self.loader.ensure(STRIPE_SCRIPT_ID, STRIPE_SCRIPT_URL).await?;

        let key = methods.publishable_key_for(MethodKind::Ideal).ok_or_else(|| {
            TokenizeError::Configuration("stripe publishable key not configured".to_string())
        })?;
        self.sdk.init(key)?;

        mount_elements(&self.sdk, &self.elements, ideal_params, true)
    }

    #[instrument(skip_all, fields(cart_id = %cart.id))]
    async fn tokenize(
        &self,
        _params: &TokenizationParams,
        cart: &Cart,
        _methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<PaymentOutcome> {
        let element = self
            .elements
            .get(Gateway::Stripe)
            .ok_or(TokenizeError::ElementNotMounted {
                gateway: Gateway::Stripe,
            })?;

        let method = self
            .sdk
            .create_ideal_payment_method(&element, cart.billing.as_ref())
            .await?;

        let intent = self
            .intents
            .create(&json!({
                "gateway": "stripe",
                "intent": {
                    "payment_method": method.id,
                    "amount": amount_by_currency(&cart.currency, cart.grand_total),
                    "currency": lowercase_code(&cart.currency),
                    "payment_method_types": "ideal",
                    "confirmation_method": "manual",
                    "confirm": true,
                    "return_url": self.host.current_url(),
                },
            }))
            .await?;

        let patch = BillingPatch::ideal(&method.id, &intent.id);
        self.cart.update_billing(&patch).await?;

        info!("ideal intent {} created, status={}", intent.id, intent.status.as_str());

        if intent.status.requires_action() {
            let client_secret = intent.client_secret.as_deref().ok_or_else(|| {
                TokenizeError::Gateway {
                    gateway: Gateway::Stripe,
                    message: "intent missing client_secret".to_string(),
                }
            })?;
            // hands control to the bank redirect; the shopper leaves the page
            self.sdk.handle_card_action(client_secret).await?;
        }

        Ok(PaymentOutcome::Success {
            method: MethodKind::Ideal,
            intent_id: Some(intent.id),
        })
    }
}
