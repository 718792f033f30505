//! # Stripe Redirect Sources
//!
//! Klarna and Bancontact tokenize by creating a one-shot source and
//! sending the shopper to the gateway-hosted page. No element mounts;
//! the only local state written is the billing method, recorded before
//! navigation so the cart reflects the choice when the shopper returns.

use crate::sdk::{
    KlarnaDetails, SourceItem, SourceRequest, StripeSdk, STRIPE_SCRIPT_ID, STRIPE_SCRIPT_URL,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokenflow_core::{
    amount_by_currency, lowercase_code, BillingPatch, Cart, CartService, Gateway, MethodKind,
    PaymentMethodsConfig, PaymentOutcome, ScriptLoader, SettingsService, StoreSettings,
    TokenizationParams, TokenizeError, TokenizeResult, TokenizeStrategy, WebHost,
};
use tracing::{info, instrument};

impl SourceRequest {
    /// Bancontact source for the given cart
    pub fn bancontact(cart: &Cart, return_url: impl Into<String>) -> Self {
        Self {
            source_type: "bancontact".to_string(),
            amount: amount_by_currency(&cart.currency, cart.grand_total),
            currency: lowercase_code(&cart.currency),
            owner_name: billing_name(cart),
            owner_email: None,
            return_url: return_url.into(),
            klarna: None,
            items: Vec::new(),
        }
    }

    /// Klarna source for the given cart. Purchase country falls back to
    /// "US" when the store settings omit one.
    pub fn klarna(cart: &Cart, store: &StoreSettings, return_url: impl Into<String>) -> Self {
        let currency = lowercase_code(&cart.currency);
        let items = cart
            .items
            .iter()
            .map(|item| SourceItem {
                description: item.name.clone().unwrap_or_else(|| "item".to_string()),
                amount: amount_by_currency(&cart.currency, item.price),
                currency: currency.clone(),
                quantity: item.quantity,
            })
            .collect();

        Self {
            source_type: "klarna".to_string(),
            amount: amount_by_currency(&cart.currency, cart.grand_total),
            currency,
            owner_name: billing_name(cart),
            owner_email: billing_email(cart),
            return_url: return_url.into(),
            klarna: Some(KlarnaDetails {
                product: "payment".to_string(),
                purchase_country: store.country.clone().unwrap_or_else(|| "US".to_string()),
                locale: store.locale.clone(),
            }),
            items,
        }
    }
}

fn billing_name(cart: &Cart) -> Option<String> {
    cart.billing.as_ref().and_then(|b| b.name.clone())
}

fn billing_email(cart: &Cart) -> Option<String> {
    cart.billing
        .as_ref()
        .and_then(|b| b.email.clone())
        .or_else(|| cart.account.as_ref().and_then(|a| a.email.clone()))
}

/// Klarna pay-later through a Stripe redirect source
pub struct StripeKlarnaStrategy {
    sdk: Arc<dyn StripeSdk>,
    loader: Arc<ScriptLoader>,
    settings: Arc<dyn SettingsService>,
    cart: Arc<dyn CartService>,
    host: Arc<dyn WebHost>,
}

impl StripeKlarnaStrategy {
    pub fn new(
        sdk: Arc<dyn StripeSdk>,
        loader: Arc<ScriptLoader>,
        settings: Arc<dyn SettingsService>,
        cart: Arc<dyn CartService>,
        host: Arc<dyn WebHost>,
    ) -> Self {
        Self {
            sdk,
            loader,
            settings,
            cart,
            host,
        }
    }
}

#[async_trait]
impl TokenizeStrategy for StripeKlarnaStrategy {
    fn method(&self) -> MethodKind {
        MethodKind::Klarna
    }

    fn gateway(&self) -> Gateway {
        Gateway::Stripe
    }

    #[instrument(skip_all, fields(cart_id = %cart.id))]
    async fn tokenize(
        &self,
        _params: &TokenizationParams,
        cart: &Cart,
        methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<PaymentOutcome> {
        init_sdk(&self.sdk, &self.loader, methods, MethodKind::Klarna).await?;

        let store = self.settings.store().await?;
        let request = SourceRequest::klarna(cart, &store, self.host.current_url());
        let source = self.sdk.create_source(&request).await?;

        self.cart
            .update_billing(&BillingPatch::redirect_method(MethodKind::Klarna))
            .await?;

        info!("klarna source {} created, redirecting", source.id);
        self.host.navigate(&source.redirect_url);

        Ok(PaymentOutcome::Redirect {
            url: source.redirect_url,
        })
    }
}

/// Bancontact through a Stripe redirect source
pub struct StripeBancontactStrategy {
    sdk: Arc<dyn StripeSdk>,
    loader: Arc<ScriptLoader>,
    cart: Arc<dyn CartService>,
    host: Arc<dyn WebHost>,
}

impl StripeBancontactStrategy {
    pub fn new(
        sdk: Arc<dyn StripeSdk>,
        loader: Arc<ScriptLoader>,
        cart: Arc<dyn CartService>,
        host: Arc<dyn WebHost>,
    ) -> Self {
        Self {
            sdk,
            loader,
            cart,
            host,
        }
    }
}

#[async_trait]
impl TokenizeStrategy for StripeBancontactStrategy {
    fn method(&self) -> MethodKind {
        MethodKind::Bancontact
    }

    fn gateway(&self) -> Gateway {
        Gateway::Stripe
    }

    #[instrument(skip_all, fields(cart_id = %cart.id))]
    async fn tokenize(
        &self,
        _params: &TokenizationParams,
        cart: &Cart,
        methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<PaymentOutcome> {
        init_sdk(&self.sdk, &self.loader, methods, MethodKind::Bancontact).await?;

        let request = SourceRequest::bancontact(cart, self.host.current_url());
        let source = self.sdk.create_source(&request).await?;

        self.cart
            .update_billing(&BillingPatch::redirect_method(MethodKind::Bancontact))
            .await?;

        info!("bancontact source {} created, redirecting", source.id);
        self.host.navigate(&source.redirect_url);

        Ok(PaymentOutcome::Redirect {
            url: source.redirect_url,
        })
    }
}

async fn init_sdk(
    sdk: &Arc<dyn StripeSdk>,
    loader: &ScriptLoader,
    methods: &PaymentMethodsConfig,
    kind: MethodKind,
) -> TokenizeResult<()> {
    loader.ensure(STRIPE_SCRIPT_ID, STRIPE_SCRIPT_URL).await?;
    let key = methods.publishable_key_for(kind).ok_or_else(|| {
        TokenizeError::Configuration("stripe publishable key not configured".to_string())
    })?;
    sdk.init(key)
}
