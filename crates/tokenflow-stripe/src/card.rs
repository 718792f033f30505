//! # Stripe Card Strategy
//!
//! Tokenize flow: payment method from the mounted element → intent with
//! manual capture and off-session future usage → in-page confirmation →
//! billing patch with the card token and confirmed intent id.

use crate::elements::mount_elements;
use crate::sdk::{StripeSdk, STRIPE_SCRIPT_ID, STRIPE_SCRIPT_URL};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tokenflow_core::{
    amount_by_currency, lowercase_code, BillingPatch, Cart, CartService, ElementHandle, ElementRegistry,
    Gateway, IntentLifecycle, IntentStatus, MethodKind, PaymentMethodsConfig, PaymentOutcome,
    ScriptLoader, TokenizationParams, TokenizeError, TokenizeResult, TokenizeStrategy,
};
use tracing::{info, instrument};

/// Card payments through Stripe elements
pub struct StripeCardStrategy {
    sdk: Arc<dyn StripeSdk>,
    loader: Arc<ScriptLoader>,
    elements: Arc<ElementRegistry>,
    intents: Arc<IntentLifecycle>,
    cart: Arc<dyn CartService>,
}

impl StripeCardStrategy {
    pub fn new(
        sdk: Arc<dyn StripeSdk>,
        loader: Arc<ScriptLoader>,
        elements: Arc<ElementRegistry>,
        intents: Arc<IntentLifecycle>,
        cart: Arc<dyn CartService>,
    ) -> Self {
        Self {
            sdk,
            loader,
            elements,
            intents,
            cart,
        }
    }
}

#[async_trait]
impl TokenizeStrategy for StripeCardStrategy {
    fn method(&self) -> MethodKind {
        MethodKind::Card
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
        let Some(card_params) = params.get(MethodKind::Card) else {
            return Ok(None);
        };

        self.loader.ensure(STRIPE_SCRIPT_ID, STRIPE_SCRIPT_URL).await?;

        let key = methods.publishable_key_for(MethodKind::Card).ok_or_else(|| {
            TokenizeError::Configuration("stripe publishable key not configured".to_string())
        })?;
        self.sdk.init(key)?;

        mount_elements(&self.sdk, &self.elements, card_params, false)
    }

    #[instrument(skip_all, fields(cart_id = %cart.id))]
    async fn tokenize(
        &self,
        params: &TokenizationParams,
        cart: &Cart,
        _methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<PaymentOutcome> {
        let element = self
            .elements
            .get(Gateway::Stripe)
            .ok_or(TokenizeError::ElementNotMounted {
                gateway: Gateway::Stripe,
            })?;

        let card = self.sdk.create_payment_method(&element, cart).await?;

        let amount = amount_by_currency(&cart.currency, cart.grand_total);
        let mut intent_body = json!({
            "payment_method": card.token,
            "amount": amount,
            "currency": lowercase_code(&cart.currency),
            "capture_method": "manual",
            "setup_future_usage": "off_session",
        });
        if let Some(customer) = cart.stripe_customer() {
            intent_body["customer"] = json!(customer);
        }

        let intent = self
            .intents
            .create(&json!({"gateway": "stripe", "intent": intent_body}))
            .await?;

        if intent.status != IntentStatus::RequiresConfirmation {
            return Err(TokenizeError::Gateway {
                gateway: Gateway::Stripe,
                message: format!("unexpected intent status '{}'", intent.status.as_str()),
            });
        }

        let client_secret = intent.client_secret.as_deref().ok_or_else(|| {
            TokenizeError::Gateway {
                gateway: Gateway::Stripe,
                message: "intent missing client_secret".to_string(),
            }
        })?;
        let confirmation = self.sdk.confirm_card_payment(client_secret).await?;

        let card_value = serde_json::to_value(&card)
            .map_err(|e| TokenizeError::Serialization(e.to_string()))?;
        let patch = BillingPatch::card(card_value, &confirmation.payment_intent_id);
        self.cart.update_billing(&patch).await?;

        info!(
            "card tokenized: intent={}, amount={}",
            confirmation.payment_intent_id, amount
        );

        if let Some(hook) = params
            .get(MethodKind::Card)
            .and_then(|p| p.on_success.as_ref())
        {
            hook();
        }

        Ok(PaymentOutcome::Success {
            method: MethodKind::Card,
            intent_id: Some(confirmation.payment_intent_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{cart_fixture, stripe_methods, MockCartService, MockStripeSdk, MockVault, MockWebHost};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokenflow_core::{MethodParams, VaultService};

    fn strategy(
        sdk: Arc<MockStripeSdk>,
        vault: Arc<MockVault>,
        cart: Arc<MockCartService>,
    ) -> StripeCardStrategy {
        let host = Arc::new(MockWebHost::new());
        let elements = Arc::new(ElementRegistry::new());
        StripeCardStrategy::new(
            sdk,
            Arc::new(ScriptLoader::new(host)),
            elements,
            Arc::new(IntentLifecycle::new(vault as Arc<dyn VaultService>)),
            cart,
        )
    }

    #[tokio::test]
    async fn test_happy_path_patches_cart_and_fires_success_once() {
        let sdk = Arc::new(MockStripeSdk::new());
        let vault = Arc::new(MockVault::new(json!({
            "id": "pi_1",
            "status": "requires_confirmation",
            "client_secret": "cs_1"
        })));
        let cart_service = Arc::new(MockCartService::with_cart(cart_fixture("EUR", 10.5)));

        let strategy = strategy(sdk.clone(), vault.clone(), cart_service.clone());
        let methods = stripe_methods();
        let cart = cart_fixture("EUR", 10.5);

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let params = TokenizationParams::new().with(
            MethodKind::Card,
            MethodParams::new().on_success(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        strategy.mount(&params, &cart, &methods).await.unwrap();
        assert_eq!(sdk.init_keys(), vec!["pk_test_123".to_string()]);

        let outcome = strategy.tokenize(&params, &cart, &methods).await.unwrap();

        assert_eq!(
            outcome,
            PaymentOutcome::Success {
                method: MethodKind::Card,
                intent_id: Some("pi_1".into()),
            }
        );
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // exactly one cart update, carrying the confirmed intent id
        let patches = cart_service.patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].stripe_intent_id(), Some("pi_1"));
        assert_eq!(patches[0].method.as_deref(), Some("card"));

        // minor-unit conversion and lowercase currency on the wire
        let intent_bodies = vault.bodies();
        assert_eq!(intent_bodies[0]["intent"]["amount"], 1050);
        assert_eq!(intent_bodies[0]["intent"]["currency"], "eur");
        assert_eq!(intent_bodies[0]["intent"]["capture_method"], "manual");
    }

    #[tokio::test]
    async fn test_tokenize_before_mount_fails() {
        let sdk = Arc::new(MockStripeSdk::new());
        let vault = Arc::new(MockVault::new(json!({})));
        let cart_service = Arc::new(MockCartService::with_cart(cart_fixture("USD", 5.0)));

        let strategy = strategy(sdk, vault, cart_service);
        let err = strategy
            .tokenize(&TokenizationParams::new(), &cart_fixture("USD", 5.0), &stripe_methods())
            .await
            .unwrap_err();

        assert!(matches!(err, TokenizeError::ElementNotMounted { .. }));
    }

    #[tokio::test]
    async fn test_customer_forwarded_when_present() {
        let sdk = Arc::new(MockStripeSdk::new());
        let vault = Arc::new(MockVault::new(json!({
            "id": "pi_2",
            "status": "requires_confirmation",
            "client_secret": "cs_2"
        })));
        let mut cart = cart_fixture("USD", 20.0);
        cart.account = Some(tokenflow_core::Account {
            email: None,
            stripe_customer: Some("cus_9".into()),
        });
        let cart_service = Arc::new(MockCartService::with_cart(cart.clone()));

        let strategy = strategy(sdk, vault.clone(), cart_service);
        let params = TokenizationParams::new().with(MethodKind::Card, MethodParams::new());
        strategy.mount(&params, &cart, &stripe_methods()).await.unwrap();
        strategy.tokenize(&params, &cart, &stripe_methods()).await.unwrap();

        assert_eq!(vault.bodies()[0]["intent"]["customer"], "cus_9");
    }

    #[tokio::test]
    async fn test_unexpected_status_is_gateway_error() {
        let sdk = Arc::new(MockStripeSdk::new());
        let vault = Arc::new(MockVault::new(json!({"id": "pi_3", "status": "succeeded"})));
        let cart_service = Arc::new(MockCartService::with_cart(cart_fixture("USD", 5.0)));

        let strategy = strategy(sdk, vault, cart_service.clone());
        let cart = cart_fixture("USD", 5.0);
        let params = TokenizationParams::new().with(MethodKind::Card, MethodParams::new());
        strategy.mount(&params, &cart, &stripe_methods()).await.unwrap();

        let err = strategy.tokenize(&params, &cart, &stripe_methods()).await.unwrap_err();
        assert!(matches!(err, TokenizeError::Gateway { .. }));
        assert!(cart_service.patches().is_empty());
    }
}
