//! # Saferpay Card Strategy
//!
//! Card payments through the Saferpay hosted page. Tokenize creates a
//! hosted-page intent through the vault (from the caller's payload or
//! derived page data), records its token on the cart billing, then
//! navigates away. The intent token comes back with the shopper
//! and is captured server-side; no method is written to the billing
//! patch because the hosted page owns the instrument choice.

use crate::payment_page::payment_page_data;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tokenflow_core::{
    BillingPatch, Cart, CartService, Gateway, Intent, IntentLifecycle, MethodKind,
    PaymentMethodsConfig, PaymentOutcome, TokenizationParams, TokenizeError, TokenizeResult,
    TokenizeStrategy, WebHost,
};
use tracing::{info, instrument};

/// Card payments through the Saferpay hosted payment page
pub struct SaferpayCardStrategy {
    intents: Arc<IntentLifecycle>,
    cart: Arc<dyn CartService>,
    host: Arc<dyn WebHost>,
}

impl SaferpayCardStrategy {
    pub fn new(
        intents: Arc<IntentLifecycle>,
        cart: Arc<dyn CartService>,
        host: Arc<dyn WebHost>,
    ) -> Self {
        Self {
            intents,
            cart,
            host,
        }
    }

    async fn resolve_intent(
        &self,
        params: &TokenizationParams,
        cart: &Cart,
    ) -> TokenizeResult<Intent> {
        // A creation payload in the caller's params wins over the derived
        // page data; either way the vault creates the hosted-page intent
        let payload = params
            .get(MethodKind::Card)
            .and_then(|p| p.intent.clone())
            .unwrap_or_else(|| payment_page_data(cart, &self.host.current_url()));

        self.intents
            .create(&json!({
                "gateway": "saferpay",
                "intent": payload,
            }))
            .await
    }
}

#[async_trait]
impl TokenizeStrategy for SaferpayCardStrategy {
    fn method(&self) -> MethodKind {
        MethodKind::Card
    }

    fn gateway(&self) -> Gateway {
        Gateway::Saferpay
    }

    #[instrument(skip_all, fields(cart_id = %cart.id))]
    async fn tokenize(
        &self,
        params: &TokenizationParams,
        cart: &Cart,
        _methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<PaymentOutcome> {
        let intent = self.resolve_intent(params, cart).await?;

        let token = intent.token.as_deref().ok_or_else(|| TokenizeError::Gateway {
            gateway: Gateway::Saferpay,
            message: "hosted page intent missing token".to_string(),
        })?;
        let redirect_url = intent
            .redirect_url
            .clone()
            .ok_or_else(|| TokenizeError::Gateway {
                gateway: Gateway::Saferpay,
                message: "hosted page intent missing redirect_url".to_string(),
            })?;

        // Token written before navigation so it survives the round trip
        self.cart
            .update_billing(&BillingPatch::saferpay(token))
            .await?;

        info!("saferpay hosted page {} ready, redirecting", intent.id);
        self.host.navigate(&redirect_url);

        Ok(PaymentOutcome::Redirect { url: redirect_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::Mutex;
    use tokenflow_core::{MethodParams, VaultService};

    struct MockVault {
        response: Value,
        bodies: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl VaultService for MockVault {
        async fn request(&self, _method: &str, _path: &str, body: &Value) -> TokenizeResult<Value> {
            self.bodies.lock().unwrap().push(body.clone());
            Ok(self.response.clone())
        }
    }

    struct MockCart {
        patches: Mutex<Vec<BillingPatch>>,
    }

    #[async_trait]
    impl CartService for MockCart {
        async fn get(&self) -> TokenizeResult<Option<Cart>> {
            Ok(Some(cart_fixture()))
        }

        async fn update_billing(&self, patch: &BillingPatch) -> TokenizeResult<Cart> {
            self.patches.lock().unwrap().push(patch.clone());
            Ok(cart_fixture())
        }
    }

    struct MockHost {
        navigations: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WebHost for MockHost {
        fn script_present(&self, _id: &str) -> bool {
            false
        }

        async fn inject_script(&self, _id: &str, _src: &str) -> TokenizeResult<()> {
            Ok(())
        }

        fn current_url(&self) -> String {
            "https://shop.example/checkout".to_string()
        }

        fn navigate(&self, url: &str) {
            self.navigations.lock().unwrap().push(url.to_string());
        }
    }

    fn cart_fixture() -> Cart {
        Cart {
            id: "cart_1".to_string(),
            currency: "CHF".to_string(),
            grand_total: 25.0,
            billing: None,
            account: None,
            items: Vec::new(),
        }
    }

    fn harness(vault_response: Value) -> (SaferpayCardStrategy, Arc<MockVault>, Arc<MockCart>, Arc<MockHost>) {
        let vault = Arc::new(MockVault {
            response: vault_response,
            bodies: Mutex::new(Vec::new()),
        });
        let cart = Arc::new(MockCart {
            patches: Mutex::new(Vec::new()),
        });
        let host = Arc::new(MockHost {
            navigations: Mutex::new(Vec::new()),
        });
        let strategy = SaferpayCardStrategy::new(
            Arc::new(IntentLifecycle::new(vault.clone() as Arc<dyn VaultService>)),
            cart.clone(),
            host.clone(),
        );
        (strategy, vault, cart, host)
    }

    #[tokio::test]
    async fn test_creates_intent_and_redirects() {
        let (strategy, vault, cart, host) = harness(json!({
            "id": "sp_1",
            "token": "sp_tok_1",
            "redirect_url": "https://saferpay.example/page"
        }));

        let outcome = strategy
            .tokenize(&TokenizationParams::new(), &cart_fixture(), &PaymentMethodsConfig::default())
            .await
            .unwrap();

        assert_eq!(outcome.redirect_url(), Some("https://saferpay.example/page"));
        assert_eq!(host.navigations.lock().unwrap().clone(), vec![
            "https://saferpay.example/page".to_string()
        ]);

        let bodies = vault.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["gateway"], "saferpay");
        assert_eq!(bodies[0]["intent"]["amount"]["value"], "2500");

        let patches = cart.patches.lock().unwrap();
        let serialized = serde_json::to_value(&patches[0]).unwrap();
        assert_eq!(serialized, json!({"intent": {"saferpay": {"token": "sp_tok_1"}}}));
    }

    #[tokio::test]
    async fn test_supplied_payload_replaces_derived_page_data() {
        let (strategy, vault, _cart, host) = harness(json!({
            "id": "sp_pre",
            "token": "sp_tok_pre",
            "redirect_url": "https://saferpay.example/pre"
        }));

        let supplied = json!({
            "amount": {"value": "9900", "currency_code": "CHF"},
            "return_urls": {"success": "https://shop.example/done"}
        });
        let params = TokenizationParams::new().with(
            MethodKind::Card,
            MethodParams::new().with_intent(supplied.clone()),
        );

        let outcome = strategy
            .tokenize(&params, &cart_fixture(), &PaymentMethodsConfig::default())
            .await
            .unwrap();

        // The caller's payload goes to the vault verbatim; token and
        // redirect target still come from the vault response
        let bodies = vault.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["intent"], supplied);
        assert_eq!(outcome.redirect_url(), Some("https://saferpay.example/pre"));
        assert_eq!(host.navigations.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_token_is_gateway_error() {
        let (strategy, _vault, cart, host) = harness(json!({
            "id": "sp_2",
            "redirect_url": "https://saferpay.example/page"
        }));

        let err = strategy
            .tokenize(&TokenizationParams::new(), &cart_fixture(), &PaymentMethodsConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TokenizeError::Gateway { gateway: Gateway::Saferpay, .. }));
        assert!(cart.patches.lock().unwrap().is_empty());
        assert!(host.navigations.lock().unwrap().is_empty());
    }
}
