//! In-memory collaborators and strategies for this crate's unit tests.

use crate::session::{Session, SessionBuilder};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokenflow_braintree::{BraintreeSdk, PaypalButtonOptions, PaypalFlow};
use tokenflow_core::{
    Billing, BillingPatch, Cart, CartService, ElementEvents, ElementHandle, Gateway,
    HttpBackend, MethodKind, PaymentMethodsConfig, PaymentOutcome, SettingsService,
    StoreSettings, TokenizationParams, TokenizeError, TokenizeResult, TokenizeStrategy,
    VaultService, WebHost,
};
use tokenflow_stripe::{
    CardToken, Confirmation, ElementSpec, PaymentMethod, Source, SourceRequest, StripeSdk,
};

pub(crate) fn cart_fixture() -> Cart {
    Cart {
        id: "cart_1".to_string(),
        currency: "USD".to_string(),
        grand_total: 25.0,
        billing: None,
        account: None,
        items: Vec::new(),
    }
}

pub(crate) struct NoopHost;

#[async_trait]
impl WebHost for NoopHost {
    fn script_present(&self, _id: &str) -> bool {
        true
    }

    async fn inject_script(&self, _id: &str, _src: &str) -> TokenizeResult<()> {
        Ok(())
    }

    fn current_url(&self) -> String {
        "https://shop.example/".to_string()
    }

    fn navigate(&self, _url: &str) {}
}

pub(crate) struct NoopStripe;

#[async_trait]
impl StripeSdk for NoopStripe {
    fn init(&self, _publishable_key: &str) -> TokenizeResult<()> {
        Ok(())
    }

    fn mount_element(
        &self,
        spec: &ElementSpec,
        _events: &ElementEvents,
    ) -> TokenizeResult<ElementHandle> {
        Ok(ElementHandle::new(spec.target.clone(), spec.kind))
    }

    async fn create_payment_method(
        &self,
        _element: &ElementHandle,
        _cart: &Cart,
    ) -> TokenizeResult<CardToken> {
        Ok(CardToken {
            token: "pm_noop".to_string(),
            details: serde_json::Map::new(),
        })
    }

    async fn create_ideal_payment_method(
        &self,
        _element: &ElementHandle,
        _billing: Option<&Billing>,
    ) -> TokenizeResult<PaymentMethod> {
        Ok(PaymentMethod {
            id: "pm_noop".to_string(),
        })
    }

    async fn confirm_card_payment(&self, _client_secret: &str) -> TokenizeResult<Confirmation> {
        Ok(Confirmation {
            payment_intent_id: "pi_noop".to_string(),
        })
    }

    async fn handle_card_action(&self, _client_secret: &str) -> TokenizeResult<()> {
        Ok(())
    }

    async fn create_source(&self, _request: &SourceRequest) -> TokenizeResult<Source> {
        Ok(Source {
            id: "src_noop".to_string(),
            redirect_url: "https://gateway.example/redirect".to_string(),
        })
    }
}

pub(crate) struct NoopBraintree;

#[async_trait]
impl BraintreeSdk for NoopBraintree {
    async fn render_paypal_button(
        &self,
        _authorization: &str,
        _options: &PaypalButtonOptions,
        _flow: Arc<dyn PaypalFlow>,
    ) -> TokenizeResult<()> {
        Ok(())
    }
}

pub(crate) struct StaticCart {
    cart: Option<Cart>,
}

impl StaticCart {
    pub(crate) fn empty() -> Self {
        Self { cart: None }
    }

    pub(crate) fn with_cart() -> Self {
        Self {
            cart: Some(cart_fixture()),
        }
    }
}

#[async_trait]
impl CartService for StaticCart {
    async fn get(&self) -> TokenizeResult<Option<Cart>> {
        Ok(self.cart.clone())
    }

    async fn update_billing(&self, _patch: &BillingPatch) -> TokenizeResult<Cart> {
        Ok(self.cart.clone().unwrap_or_else(cart_fixture))
    }
}

pub(crate) struct StaticSettings {
    methods: PaymentMethodsConfig,
}

impl StaticSettings {
    pub(crate) fn new(methods: PaymentMethodsConfig) -> Self {
        Self { methods }
    }
}

#[async_trait]
impl SettingsService for StaticSettings {
    async fn payments(&self) -> TokenizeResult<PaymentMethodsConfig> {
        Ok(self.methods.clone())
    }

    async fn store(&self) -> TokenizeResult<StoreSettings> {
        Ok(StoreSettings::default())
    }
}

pub(crate) struct StaticVault {
    response: Value,
}

impl StaticVault {
    pub(crate) fn new(response: Value) -> Self {
        Self { response }
    }
}

#[async_trait]
impl VaultService for StaticVault {
    async fn request(&self, _method: &str, _path: &str, _body: &Value) -> TokenizeResult<Value> {
        Ok(self.response.clone())
    }
}

pub(crate) struct CountingBackend {
    response: Value,
    calls: AtomicUsize,
}

impl CountingBackend {
    pub(crate) fn new(response: Value) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpBackend for CountingBackend {
    async fn request(&self, _method: &str, _path: &str) -> TokenizeResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

type FailureFactory = Box<dyn Fn() -> TokenizeError + Send + Sync>;

/// Strategy that records its calls and succeeds (or fails) on demand
pub(crate) struct RecordingStrategy {
    method: MethodKind,
    gateway: Gateway,
    mounts: AtomicUsize,
    tokenizes: AtomicUsize,
    failure: Option<FailureFactory>,
}

impl RecordingStrategy {
    pub(crate) fn new(method: MethodKind, gateway: Gateway) -> Self {
        Self {
            method,
            gateway,
            mounts: AtomicUsize::new(0),
            tokenizes: AtomicUsize::new(0),
            failure: None,
        }
    }

    pub(crate) fn failing_with(
        mut self,
        factory: impl Fn() -> TokenizeError + Send + Sync + 'static,
    ) -> Self {
        self.failure = Some(Box::new(factory));
        self
    }

    pub(crate) fn mount_calls(&self) -> usize {
        self.mounts.load(Ordering::SeqCst)
    }

    pub(crate) fn tokenize_calls(&self) -> usize {
        self.tokenizes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenizeStrategy for RecordingStrategy {
    fn method(&self) -> MethodKind {
        self.method
    }

    fn gateway(&self) -> Gateway {
        self.gateway
    }

    async fn mount(
        &self,
        _params: &TokenizationParams,
        _cart: &Cart,
        _methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<Option<ElementHandle>> {
        self.mounts.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }

    async fn tokenize(
        &self,
        _params: &TokenizationParams,
        _cart: &Cart,
        _methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<PaymentOutcome> {
        self.tokenizes.fetch_add(1, Ordering::SeqCst);
        if let Some(factory) = &self.failure {
            return Err(factory());
        }
        Ok(PaymentOutcome::Success {
            method: self.method,
            intent_id: None,
        })
    }
}

#[allow(clippy::type_complexity)]
pub(crate) fn collaborators() -> (
    Arc<dyn WebHost>,
    Arc<dyn CartService>,
    Arc<dyn SettingsService>,
    Arc<dyn VaultService>,
    Arc<dyn HttpBackend>,
) {
    (
        Arc::new(NoopHost),
        Arc::new(StaticCart::with_cart()),
        Arc::new(StaticSettings::new(PaymentMethodsConfig::default())),
        Arc::new(StaticVault::new(Value::Null)),
        Arc::new(CountingBackend::new(Value::Null)),
    )
}

/// Session builder over static collaborators, with no gateway SDKs wired
pub(crate) fn collaborators_with(cart: StaticCart, settings: StaticSettings) -> SessionBuilder {
    Session::builder(
        Arc::new(NoopHost),
        Arc::new(cart),
        Arc::new(settings),
        Arc::new(StaticVault::new(Value::Null)),
        Arc::new(CountingBackend::new(Value::Null)),
    )
}
