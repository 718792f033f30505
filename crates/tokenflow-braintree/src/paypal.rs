//! # Braintree PayPal Strategy
//!
//! PayPal tokenizes inside the button approval flow, not in a tokenize
//! call: mount loads the three SDK scripts, fetches a Braintree client
//! authorization from the vault, and renders the button; the approval
//! callback writes the vaulted nonce onto the cart billing. A tokenize
//! call against this strategy is therefore rejected outright.

use crate::sdk::{
    paypal_script_url, BraintreeSdk, PaypalApproval, PaypalButtonOptions, PaypalFlow,
    BRAINTREE_PAYPAL_SCRIPT_ID, BRAINTREE_PAYPAL_SCRIPT_URL, BRAINTREE_SCRIPT_ID,
    BRAINTREE_SCRIPT_URL, PAYPAL_SCRIPT_ID,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokenflow_core::{
    BillingPatch, Cart, CartService, CancelHook, ElementHandle, ElementRegistry, ErrorHook,
    Gateway, MethodKind, MountKind, NormalizedError, PaymentMethodsConfig, PaymentOutcome,
    ScriptLoader, SuccessHook, TokenizationParams, TokenizeError, TokenizeResult,
    TokenizeStrategy, VaultService,
};
use tracing::{error, info, instrument};

/// PayPal smart button backed by a Braintree vault-flow client
pub struct BraintreePaypalStrategy {
    sdk: Arc<dyn BraintreeSdk>,
    loader: Arc<ScriptLoader>,
    elements: Arc<ElementRegistry>,
    vault: Arc<dyn VaultService>,
    cart: Arc<dyn CartService>,
}

impl BraintreePaypalStrategy {
    pub fn new(
        sdk: Arc<dyn BraintreeSdk>,
        loader: Arc<ScriptLoader>,
        elements: Arc<ElementRegistry>,
        vault: Arc<dyn VaultService>,
        cart: Arc<dyn CartService>,
    ) -> Self {
        Self {
            sdk,
            loader,
            elements,
            vault,
            cart,
        }
    }

    /// Braintree client authorization from the vault collaborator. The
    /// response is either a bare token string or an error envelope.
    async fn authorization(&self) -> TokenizeResult<String> {
        let raw = self
            .vault
            .request("post", "/authorization", &json!({"gateway": "braintree"}))
            .await?;

        match raw {
            Value::String(token) => Ok(token),
            other => {
                let message = other
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or("authorization failed")
                    .to_string();
                Err(TokenizeError::Gateway {
                    gateway: Gateway::Braintree,
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl TokenizeStrategy for BraintreePaypalStrategy {
    fn method(&self) -> MethodKind {
        MethodKind::Paypal
    }

    fn gateway(&self) -> Gateway {
        Gateway::Braintree
    }

    #[instrument(skip_all, fields(cart_id = %cart.id))]
    async fn mount(
        &self,
        params: &TokenizationParams,
        cart: &Cart,
        methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<Option<ElementHandle>> {
        let Some(paypal_params) = params.get(MethodKind::Paypal) else {
            return Ok(None);
        };

        let config = methods.get(MethodKind::Paypal).ok_or_else(|| {
            TokenizeError::Configuration("paypal method not configured".to_string())
        })?;
        let (client_id, merchant_id) = match (&config.client_id, &config.merchant_id) {
            (Some(c), Some(m)) => (c.as_str(), m.as_str()),
            _ => {
                return Err(TokenizeError::Configuration(
                    "paypal client_id and merchant_id required".to_string(),
                ))
            }
        };

        self.loader
            .ensure(BRAINTREE_SCRIPT_ID, BRAINTREE_SCRIPT_URL)
            .await?;
        self.loader
            .ensure(BRAINTREE_PAYPAL_SCRIPT_ID, BRAINTREE_PAYPAL_SCRIPT_URL)
            .await?;
        self.loader
            .ensure(PAYPAL_SCRIPT_ID, &paypal_script_url(client_id, merchant_id))
            .await?;

        let authorization = self.authorization().await?;

        let target = paypal_params
            .element_id
            .clone()
            .unwrap_or_else(|| MountKind::PaypalButton.default_target());
        let options = PaypalButtonOptions {
            target: target.clone(),
            style: paypal_params.style.clone(),
            currency: cart.currency.to_uppercase(),
            amount: cart.grand_total,
        };

        let flow = Arc::new(ButtonFlow {
            cart: self.cart.clone(),
            on_success: paypal_params.on_success.clone(),
            on_error: paypal_params.on_error.clone(),
            on_cancel: paypal_params.on_cancel.clone(),
        });
        self.sdk
            .render_paypal_button(&authorization, &options, flow)
            .await?;

        info!("paypal button rendered at {}", target);
        let handle = ElementHandle::new(target, MountKind::PaypalButton);
        Ok(self.elements.register(Gateway::Braintree, handle))
    }

    async fn tokenize(
        &self,
        _params: &TokenizationParams,
        _cart: &Cart,
        _methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<PaymentOutcome> {
        // The nonce is vaulted in the approval callback; there is nothing
        // for a tokenize call to do
        Err(TokenizeError::UnsupportedCombination {
            method: MethodKind::Paypal,
            gateway: Some(Gateway::Braintree),
        })
    }
}

/// Bridges button events to the cart service and the caller's hooks
struct ButtonFlow {
    cart: Arc<dyn CartService>,
    on_success: Option<SuccessHook>,
    on_error: Option<ErrorHook>,
    on_cancel: Option<CancelHook>,
}

impl ButtonFlow {
    fn deliver_error(&self, normalized: NormalizedError) {
        match &self.on_error {
            Some(hook) => hook(&normalized),
            None => error!("paypal button error: {}", normalized),
        }
    }
}

#[async_trait]
impl PaypalFlow for ButtonFlow {
    async fn approved(&self, approval: PaypalApproval) {
        let patch = BillingPatch::paypal(approval.nonce);
        match self.cart.update_billing(&patch).await {
            Ok(_) => {
                info!("paypal nonce vaulted onto cart billing");
                if let Some(hook) = &self.on_success {
                    hook();
                }
            }
            Err(err) => self.deliver_error(NormalizedError::from(&err)),
        }
    }

    async fn cancelled(&self) {
        match &self.on_cancel {
            Some(hook) => hook(),
            None => info!("PayPal payment cancelled"),
        }
    }

    async fn failed(&self, error: NormalizedError) {
        self.deliver_error(error);
    }
}
