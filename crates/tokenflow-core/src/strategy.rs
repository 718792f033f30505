//! # Tokenization Strategy Trait
//!
//! Strategy pattern over (payment-method kind, gateway) pairs. Each
//! provider crate implements [`TokenizeStrategy`] for the combinations it
//! supports; the session resolves a closed [`StrategyTable`] once at
//! startup, and unknown combinations are rejected explicitly instead of
//! silently no-op'ing.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  TokenizeStrategy (trait)                   │
//! │  ├── mount()     - optional visible element step            │
//! │  └── tokenize()  - input -> opaque token -> billing patch   │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!      ┌──────────────┬──────┴────────┬──────────────────┐
//!      │              │               │                  │
//!  card/stripe   ideal/stripe   card/saferpay     paypal/braintree
//!  klarna/stripe bancontact/stripe
//! ```

use crate::cart::Cart;
use crate::error::TokenizeResult;
use crate::methods::{Gateway, MethodKind, PaymentMethodsConfig};
use crate::outcome::PaymentOutcome;
use crate::params::TokenizationParams;
use crate::registry::ElementHandle;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// A gateway- and method-specific mount/tokenize implementation
#[async_trait]
pub trait TokenizeStrategy: Send + Sync {
    /// The payment method kind this strategy tokenizes
    fn method(&self) -> MethodKind;

    /// The gateway this strategy drives
    fn gateway(&self) -> Gateway;

    /// Mount the interactive payment element, if this strategy has one.
    ///
    /// Returns the previously mounted handle this mount displaced, so
    /// callers can observe the last-write-wins overwrite.
    async fn mount(
        &self,
        _params: &TokenizationParams,
        _cart: &Cart,
        _methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<Option<ElementHandle>> {
        // Redirect-based strategies have no visible mount step
        Ok(None)
    }

    /// Turn user input into an opaque payment token and commit it onto
    /// the cart, or leave the page for a gateway-hosted step.
    async fn tokenize(
        &self,
        params: &TokenizationParams,
        cart: &Cart,
        methods: &PaymentMethodsConfig,
    ) -> TokenizeResult<PaymentOutcome>;
}

/// Type alias for a shared strategy (dynamic dispatch)
pub type BoxedStrategy = Arc<dyn TokenizeStrategy>;

/// Closed dispatch table over (method kind, gateway), resolved once at
/// session construction
#[derive(Clone, Default)]
pub struct StrategyTable {
    strategies: HashMap<(MethodKind, Gateway), BoxedStrategy>,
}

impl StrategyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy under its own (method, gateway) pair
    pub fn register(&mut self, strategy: BoxedStrategy) {
        let key = (strategy.method(), strategy.gateway());
        self.strategies.insert(key, strategy);
    }

    /// Register with builder pattern
    pub fn with_strategy(mut self, strategy: BoxedStrategy) -> Self {
        self.register(strategy);
        self
    }

    /// Look up the strategy for a (method, gateway) pair
    pub fn get(&self, method: MethodKind, gateway: Gateway) -> Option<&BoxedStrategy> {
        self.strategies.get(&(method, gateway))
    }

    pub fn has(&self, method: MethodKind, gateway: Gateway) -> bool {
        self.strategies.contains_key(&(method, gateway))
    }

    /// All registered (method, gateway) pairs
    pub fn pairs(&self) -> Vec<(MethodKind, Gateway)> {
        self.strategies.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopStrategy {
        method: MethodKind,
        gateway: Gateway,
    }

    #[async_trait]
    impl TokenizeStrategy for NoopStrategy {
        fn method(&self) -> MethodKind {
            self.method
        }

        fn gateway(&self) -> Gateway {
            self.gateway
        }

        async fn tokenize(
            &self,
            _params: &TokenizationParams,
            _cart: &Cart,
            _methods: &PaymentMethodsConfig,
        ) -> TokenizeResult<PaymentOutcome> {
            Ok(PaymentOutcome::Success {
                method: self.method,
                intent_id: None,
            })
        }
    }

    #[test]
    fn test_table_registration_and_lookup() {
        let table = StrategyTable::new()
            .with_strategy(Arc::new(NoopStrategy {
                method: MethodKind::Card,
                gateway: Gateway::Stripe,
            }))
            .with_strategy(Arc::new(NoopStrategy {
                method: MethodKind::Card,
                gateway: Gateway::Saferpay,
            }));

        assert_eq!(table.len(), 2);
        assert!(table.has(MethodKind::Card, Gateway::Stripe));
        assert!(table.has(MethodKind::Card, Gateway::Saferpay));
        assert!(!table.has(MethodKind::Klarna, Gateway::Stripe));
        assert!(table.get(MethodKind::Paypal, Gateway::Braintree).is_none());
    }
}
