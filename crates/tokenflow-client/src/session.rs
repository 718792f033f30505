//! # Tokenization Session
//!
//! A session owns one script loader, one element registry, one intent
//! lifecycle and one strategy table; nothing is process-global, so two
//! sessions never share mount or script-load state.
//!
//! The builder wires the standard strategy table:
//!
//! ```text
//! (card,       stripe)    StripeCardStrategy
//! (ideal,      stripe)    StripeIdealStrategy
//! (klarna,     stripe)    StripeKlarnaStrategy
//! (bancontact, stripe)    StripeBancontactStrategy
//! (card,       saferpay)  SaferpayCardStrategy
//! (paypal,     braintree) BraintreePaypalStrategy
//! ```
//!
//! Gateway strategies only register when their SDK is supplied; any pair
//! outside the table is rejected at dispatch time.

use crate::config::ClientConfig;
use crate::http::{StoreClient, VaultClient};
use anyhow::Context;
use std::sync::Arc;
use tokenflow_braintree::{BraintreePaypalStrategy, BraintreeSdk};
use tokenflow_core::{
    BoxedStrategy, CartService, ElementRegistry, HttpBackend, IntentLifecycle, ScriptLoader,
    SettingsService, StrategyTable, VaultService, WebHost,
};
use tokenflow_saferpay::SaferpayCardStrategy;
use tokenflow_stripe::{
    StripeBancontactStrategy, StripeCardStrategy, StripeIdealStrategy, StripeKlarnaStrategy,
    StripeSdk,
};

/// One checkout's worth of tokenization state and collaborators
pub struct Session {
    pub(crate) cart: Arc<dyn CartService>,
    pub(crate) settings: Arc<dyn SettingsService>,
    pub(crate) backend: Arc<dyn HttpBackend>,
    pub(crate) intents: Arc<IntentLifecycle>,
    pub(crate) elements: Arc<ElementRegistry>,
    pub(crate) strategies: StrategyTable,
}

impl Session {
    /// Start building a session from its collaborators
    pub fn builder(
        host: Arc<dyn WebHost>,
        cart: Arc<dyn CartService>,
        settings: Arc<dyn SettingsService>,
        vault: Arc<dyn VaultService>,
        backend: Arc<dyn HttpBackend>,
    ) -> SessionBuilder {
        SessionBuilder {
            host,
            cart,
            settings,
            vault,
            backend,
            stripe: None,
            braintree: None,
            extra: Vec::new(),
        }
    }

    /// Build a session backed by env-configured store and vault clients
    pub fn from_env(
        host: Arc<dyn WebHost>,
        stripe: Arc<dyn StripeSdk>,
        braintree: Arc<dyn BraintreeSdk>,
    ) -> anyhow::Result<SessionBuilder> {
        let config = ClientConfig::from_env().context("loading client configuration")?;
        let store = Arc::new(StoreClient::new(config.clone()).context("building store client")?);
        let vault = Arc::new(VaultClient::new(config).context("building vault client")?);

        Ok(Session::builder(
            host,
            store.clone(),
            store.clone(),
            vault,
            store,
        )
        .with_stripe(stripe)
        .with_braintree(braintree))
    }

    /// The element registry, for callers that track mounted handles
    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    /// Registered (method, gateway) pairs
    pub fn supported_pairs(&self) -> Vec<(tokenflow_core::MethodKind, tokenflow_core::Gateway)> {
        self.strategies.pairs()
    }
}

/// Builds a [`Session`] with the standard strategy table
pub struct SessionBuilder {
    host: Arc<dyn WebHost>,
    cart: Arc<dyn CartService>,
    settings: Arc<dyn SettingsService>,
    vault: Arc<dyn VaultService>,
    backend: Arc<dyn HttpBackend>,
    stripe: Option<Arc<dyn StripeSdk>>,
    braintree: Option<Arc<dyn BraintreeSdk>>,
    extra: Vec<BoxedStrategy>,
}

impl SessionBuilder {
    /// Enable the Stripe strategies (card, iDEAL, Klarna, Bancontact)
    pub fn with_stripe(mut self, sdk: Arc<dyn StripeSdk>) -> Self {
        self.stripe = Some(sdk);
        self
    }

    /// Enable the Braintree PayPal button strategy
    pub fn with_braintree(mut self, sdk: Arc<dyn BraintreeSdk>) -> Self {
        self.braintree = Some(sdk);
        self
    }

    /// Register an additional strategy; later registrations win for the
    /// same (method, gateway) pair
    pub fn with_strategy(mut self, strategy: BoxedStrategy) -> Self {
        self.extra.push(strategy);
        self
    }

    pub fn build(self) -> Session {
        let loader = Arc::new(ScriptLoader::new(self.host.clone()));
        let elements = Arc::new(ElementRegistry::new());
        let intents = Arc::new(IntentLifecycle::new(self.vault.clone()));

        let mut strategies = StrategyTable::new();

        if let Some(sdk) = &self.stripe {
            strategies.register(Arc::new(StripeCardStrategy::new(
                sdk.clone(),
                loader.clone(),
                elements.clone(),
                intents.clone(),
                self.cart.clone(),
            )));
            strategies.register(Arc::new(StripeIdealStrategy::new(
                sdk.clone(),
                loader.clone(),
                elements.clone(),
                intents.clone(),
                self.cart.clone(),
                self.host.clone(),
            )));
            strategies.register(Arc::new(StripeKlarnaStrategy::new(
                sdk.clone(),
                loader.clone(),
                self.settings.clone(),
                self.cart.clone(),
                self.host.clone(),
            )));
            strategies.register(Arc::new(StripeBancontactStrategy::new(
                sdk.clone(),
                loader.clone(),
                self.cart.clone(),
                self.host.clone(),
            )));
        }

        strategies.register(Arc::new(SaferpayCardStrategy::new(
            intents.clone(),
            self.cart.clone(),
            self.host.clone(),
        )));

        if let Some(sdk) = &self.braintree {
            strategies.register(Arc::new(BraintreePaypalStrategy::new(
                sdk.clone(),
                loader.clone(),
                elements.clone(),
                self.vault.clone(),
                self.cart.clone(),
            )));
        }

        for strategy in self.extra {
            strategies.register(strategy);
        }

        Session {
            cart: self.cart,
            settings: self.settings,
            backend: self.backend,
            intents,
            elements,
            strategies,
        }
    }
}
