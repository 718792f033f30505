//! # tokenflow-core
//!
//! Core types and traits for the tokenflow payment tokenization engine.
//!
//! This crate provides:
//! - `TokenizeStrategy` trait and `StrategyTable` for gateway dispatch
//! - `Cart`, `Billing`, and `BillingPatch` for cart billing commits
//! - `PaymentMethodsConfig` for the merchant's enabled methods snapshot
//! - `TokenizationParams` with typed caller hooks
//! - `ScriptLoader` and `ElementRegistry` session-owned shared state
//! - `IntentLifecycle` for the vault intent protocol
//! - `TokenizeError` / `PaymentOutcome` / `NormalizedError` for the
//!   single success/error contract
//!
//! ## Example
//!
//! ```rust,ignore
//! use tokenflow_core::{MethodKind, MethodParams, TokenizationParams};
//!
//! let params = TokenizationParams::new().with(
//!     MethodKind::Card,
//!     MethodParams::new()
//!         .with_element_id("#card-element")
//!         .on_success(|| println!("card tokenized"))
//!         .on_error(|err| eprintln!("tokenization failed: {}", err)),
//! );
//!
//! tokenizer.create_elements(params.clone()).await?;
//! let outcome = tokenizer.tokenize(Some(params)).await?;
//! ```

pub mod cart;
pub mod currency;
pub mod error;
pub mod host;
pub mod intent;
pub mod loader;
pub mod methods;
pub mod normalize;
pub mod outcome;
pub mod params;
pub mod registry;
pub mod services;
pub mod strategy;

// Re-exports for convenience
pub use cart::{
    Account, Billing, BillingPatch, Cart, CartItem, IdealBilling, IntentRefs, PaypalBilling,
    SaferpayIntentRef, StoreSettings, StripeIntentRef,
};
pub use currency::{amount_by_currency, lowercase_code, Currency};
pub use error::{TokenizeError, TokenizeResult};
pub use host::WebHost;
pub use intent::{Intent, IntentLifecycle, IntentStatus};
pub use loader::ScriptLoader;
pub use methods::{Gateway, MethodConfig, MethodKind, PaymentMethodsConfig};
pub use outcome::{NormalizedError, PaymentOutcome};
pub use params::{
    CancelHook, ElementEvents, ErrorHook, EventHook, MethodParams, SuccessHook,
    TokenizationParams,
};
pub use registry::{ElementHandle, ElementRegistry, MountKind};
pub use services::{CartService, HttpBackend, SettingsService, VaultService};
pub use strategy::{BoxedStrategy, StrategyTable, TokenizeStrategy};
