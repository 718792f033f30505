//! In-memory fakes shared across this crate's unit tests.

use crate::sdk::{
    CardToken, Confirmation, ElementSpec, PaymentMethod, Source, SourceRequest, StripeSdk,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Mutex;
use tokenflow_core::{
    Billing, BillingPatch, Cart, CartService, ElementEvents, ElementHandle, Gateway,
    MethodConfig, MethodKind, MountKind, PaymentMethodsConfig, SettingsService, StoreSettings,
    TokenizeResult, VaultService, WebHost,
};

/// Methods config with card enabled on Stripe; redirect methods ride on
/// the card publishable key.
pub(crate) fn stripe_methods() -> PaymentMethodsConfig {
    PaymentMethodsConfig::default()
        .with_method(
            MethodKind::Card,
            MethodConfig::new(Gateway::Stripe).with_publishable_key("pk_test_123"),
        )
        .with_method(MethodKind::Ideal, MethodConfig::new(Gateway::Stripe))
        .with_method(MethodKind::Klarna, MethodConfig::new(Gateway::Stripe))
        .with_method(MethodKind::Bancontact, MethodConfig::new(Gateway::Stripe))
}

pub(crate) fn cart_fixture(currency: &str, grand_total: f64) -> Cart {
    Cart {
        id: "cart_1".to_string(),
        currency: currency.to_string(),
        grand_total,
        billing: None,
        account: None,
        items: Vec::new(),
    }
}

#[derive(Default)]
pub(crate) struct MockStripeSdk {
    init_keys: Mutex<Vec<String>>,
    mounts: Mutex<Vec<(MountKind, String)>>,
    confirmed: Mutex<Vec<String>>,
    actions: Mutex<Vec<String>>,
    sources: Mutex<Vec<SourceRequest>>,
}

impl MockStripeSdk {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mounted_kinds(&self) -> Vec<MountKind> {
        self.mounts.lock().unwrap().iter().map(|(k, _)| *k).collect()
    }

    pub(crate) fn mounted_targets(&self) -> Vec<String> {
        self.mounts.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }

    pub(crate) fn init_keys(&self) -> Vec<String> {
        self.init_keys.lock().unwrap().clone()
    }

    pub(crate) fn handled_actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }

    pub(crate) fn source_requests(&self) -> Vec<SourceRequest> {
        self.sources.lock().unwrap().clone()
    }
}

#[async_trait]
impl StripeSdk for MockStripeSdk {
    fn init(&self, publishable_key: &str) -> TokenizeResult<()> {
        self.init_keys.lock().unwrap().push(publishable_key.to_string());
        Ok(())
    }

    fn mount_element(
        &self,
        spec: &ElementSpec,
        _events: &ElementEvents,
    ) -> TokenizeResult<ElementHandle> {
        self.mounts.lock().unwrap().push((spec.kind, spec.target.clone()));
        Ok(ElementHandle::new(spec.target.clone(), spec.kind))
    }

    async fn create_payment_method(
        &self,
        _element: &ElementHandle,
        _cart: &Cart,
    ) -> TokenizeResult<CardToken> {
        let mut details = Map::new();
        details.insert("brand".to_string(), Value::from("Visa"));
        details.insert("last4".to_string(), Value::from("4242"));
        Ok(CardToken {
            token: "pm_card_1".to_string(),
            details,
        })
    }

    async fn create_ideal_payment_method(
        &self,
        _element: &ElementHandle,
        _billing: Option<&Billing>,
    ) -> TokenizeResult<PaymentMethod> {
        Ok(PaymentMethod {
            id: "pm_ideal_1".to_string(),
        })
    }

    async fn confirm_card_payment(&self, client_secret: &str) -> TokenizeResult<Confirmation> {
        self.confirmed.lock().unwrap().push(client_secret.to_string());
        // "cs_N" confirms intent "pi_N"
        Ok(Confirmation {
            payment_intent_id: client_secret.replacen("cs_", "pi_", 1),
        })
    }

    async fn handle_card_action(&self, client_secret: &str) -> TokenizeResult<()> {
        self.actions.lock().unwrap().push(client_secret.to_string());
        Ok(())
    }

    async fn create_source(&self, request: &SourceRequest) -> TokenizeResult<Source> {
        self.sources.lock().unwrap().push(request.clone());
        Ok(Source {
            id: "src_1".to_string(),
            redirect_url: "https://stripe.example/redirect".to_string(),
        })
    }
}

pub(crate) struct MockWebHost {
    url: String,
    injected: Mutex<HashSet<String>>,
    navigations: Mutex<Vec<String>>,
}

impl MockWebHost {
    pub(crate) fn new() -> Self {
        Self::at("https://shop.example/")
    }

    pub(crate) fn at(url: &str) -> Self {
        Self {
            url: url.to_string(),
            injected: Mutex::new(HashSet::new()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebHost for MockWebHost {
    fn script_present(&self, id: &str) -> bool {
        self.injected.lock().unwrap().contains(id)
    }

    async fn inject_script(&self, id: &str, _src: &str) -> TokenizeResult<()> {
        self.injected.lock().unwrap().insert(id.to_string());
        Ok(())
    }

    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn navigate(&self, url: &str) {
        self.navigations.lock().unwrap().push(url.to_string());
    }
}

pub(crate) struct MockCartService {
    cart: Option<Cart>,
    patches: Mutex<Vec<BillingPatch>>,
}

impl MockCartService {
    pub(crate) fn with_cart(cart: Cart) -> Self {
        Self {
            cart: Some(cart),
            patches: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn patches(&self) -> Vec<BillingPatch> {
        self.patches.lock().unwrap().clone()
    }
}

#[async_trait]
impl CartService for MockCartService {
    async fn get(&self) -> TokenizeResult<Option<Cart>> {
        Ok(self.cart.clone())
    }

    async fn update_billing(&self, patch: &BillingPatch) -> TokenizeResult<Cart> {
        self.patches.lock().unwrap().push(patch.clone());
        Ok(self.cart.clone().unwrap_or_else(|| cart_fixture("USD", 0.0)))
    }
}

pub(crate) struct MockVault {
    response: Value,
    requests: Mutex<Vec<(String, String, Value)>>,
}

impl MockVault {
    pub(crate) fn new(response: Value) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Request bodies in call order
    pub(crate) fn bodies(&self) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, body)| body.clone())
            .collect()
    }
}

#[async_trait]
impl VaultService for MockVault {
    async fn request(&self, method: &str, path: &str, body: &Value) -> TokenizeResult<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string(), body.clone()));
        Ok(self.response.clone())
    }
}

pub(crate) struct MockSettings {
    store: StoreSettings,
}

impl MockSettings {
    pub(crate) fn with_store(store: StoreSettings) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsService for MockSettings {
    async fn payments(&self) -> TokenizeResult<PaymentMethodsConfig> {
        Ok(stripe_methods())
    }

    async fn store(&self) -> TokenizeResult<StoreSettings> {
        Ok(self.store.clone())
    }
}
