//! # Tokenizer Façade
//!
//! The caller-facing surface: mount elements for the requested methods,
//! then tokenize through whichever strategy the merchant configuration
//! selects. Dispatch precedence is fixed (card → ideal → klarna →
//! bancontact) and first match wins, so a params object carrying both
//! `card` and `ideal` tokenizes only as a card.
//!
//! Configuration gaps during mounting are warnings, never rejections:
//! a disabled method or an unwired (method, gateway) pair simply leaves
//! its element unmounted. At tokenize time the same gap is a hard,
//! typed `UnsupportedCombination` error.

use crate::session::Session;
use serde_json::Value;
use std::sync::Mutex;
use tokenflow_core::{
    normalize, Intent, MethodKind, PaymentOutcome, TokenizationParams, TokenizeError,
    TokenizeResult,
};
use tracing::{info, instrument, warn};

/// Orchestrates element mounting and tokenization over one session
pub struct Tokenizer {
    session: Session,
    methods_cache: tokio::sync::Mutex<Option<Value>>,
    last_params: Mutex<Option<TokenizationParams>>,
}

impl Tokenizer {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            methods_cache: tokio::sync::Mutex::new(None),
            last_params: Mutex::new(None),
        }
    }

    /// Raw payment methods payload, memoized per instance
    pub async fn methods(&self) -> TokenizeResult<Value> {
        let mut cache = self.methods_cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            return Ok(cached.clone());
        }
        let raw = self.session.backend.request("get", "/payment/methods").await?;
        *cache = Some(raw.clone());
        Ok(raw)
    }

    /// Drop the memoized methods payload and refetch
    pub async fn refresh_methods(&self) -> TokenizeResult<Value> {
        self.methods_cache.lock().await.take();
        self.methods().await
    }

    /// Mount payment elements for every requested method kind.
    ///
    /// The params are retained for a later parameterless [`tokenize`]
    /// call.
    ///
    /// [`tokenize`]: Tokenizer::tokenize
    #[instrument(skip_all)]
    pub async fn create_elements(&self, params: TokenizationParams) -> TokenizeResult<()> {
        *self.last_params.lock().expect("params lock poisoned") = Some(params.clone());

        let cart = self
            .session
            .cart
            .get()
            .await?
            .ok_or(TokenizeError::CartNotFound)?;
        let methods = self.session.settings.payments().await?;

        for kind in MethodKind::MOUNTABLE {
            if params.get(kind).is_none() {
                continue;
            }
            if !methods.enabled(kind) {
                warn!("{} params supplied but method is not enabled", kind);
                continue;
            }
            // iDEAL rides on the card gateway's publishable key; without
            // a key source the element simply is not mounted
            if kind == MethodKind::Ideal
                && methods.publishable_key_for(MethodKind::Ideal).is_none()
            {
                warn!("ideal is enabled but no stripe publishable key is configured; element not mounted");
                continue;
            }
            let Some(gateway) = methods.gateway(kind) else {
                continue;
            };
            let Some(strategy) = self.session.strategies.get(kind, gateway) else {
                warn!("no strategy wired for ({}, {}); element not mounted", kind, gateway);
                continue;
            };

            if let Some(displaced) = strategy.mount(&params, &cart, &methods).await? {
                info!(
                    "remounted {} element, displacing previous {} mount",
                    kind,
                    displaced.kind.as_str()
                );
            }
        }

        Ok(())
    }

    /// Tokenize with the given params, or the params from the last
    /// `create_elements` call when `None`.
    #[instrument(skip_all)]
    pub async fn tokenize(
        &self,
        params: Option<TokenizationParams>,
    ) -> TokenizeResult<PaymentOutcome> {
        let params = match params
            .or_else(|| self.last_params.lock().expect("params lock poisoned").clone())
        {
            Some(params) if !params.is_empty() => params,
            _ => {
                return normalize::deliver(
                    &TokenizationParams::default(),
                    TokenizeError::MissingParams,
                )
            }
        };

        match self.dispatch(&params).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => normalize::deliver(&params, err),
        }
    }

    async fn dispatch(&self, params: &TokenizationParams) -> TokenizeResult<PaymentOutcome> {
        let cart = self
            .session
            .cart
            .get()
            .await?
            .ok_or(TokenizeError::CartNotFound)?;
        let methods = self.session.settings.payments().await?;

        for kind in MethodKind::TOKENIZE_PRECEDENCE {
            if params.get(kind).is_none() || !methods.enabled(kind) {
                continue;
            }
            let Some(gateway) = methods.gateway(kind) else {
                continue;
            };
            let strategy = self.session.strategies.get(kind, gateway).ok_or(
                TokenizeError::UnsupportedCombination {
                    method: kind,
                    gateway: Some(gateway),
                },
            )?;

            info!("tokenizing {} via {}", kind, gateway);
            return strategy.tokenize(params, &cart, &methods).await;
        }

        // Something was requested, but nothing dispatchable matched
        let method = params
            .requested_kinds()
            .into_iter()
            .next()
            .ok_or(TokenizeError::MissingParams)?;
        Err(TokenizeError::UnsupportedCombination {
            method,
            gateway: methods.gateway(method),
        })
    }

    /// Pass-through intent creation for caller-managed flows
    pub async fn create_intent(&self, payload: &Value) -> TokenizeResult<Intent> {
        self.session.intents.create(payload).await
    }

    /// Pass-through intent update for caller-managed flows
    pub async fn update_intent(&self, payload: &Value) -> TokenizeResult<Intent> {
        self.session.intents.update(payload).await
    }
}
