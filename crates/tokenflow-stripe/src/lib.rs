//! # tokenflow-stripe
//!
//! Stripe-backed tokenization strategies:
//!
//! - [`StripeCardStrategy`] — mounted card elements, manual-capture
//!   intents with in-page confirmation
//! - [`StripeIdealStrategy`] — bank-selector element, server-side
//!   confirmation and bank redirect
//! - [`StripeKlarnaStrategy`] / [`StripeBancontactStrategy`] — one-shot
//!   redirect sources
//!
//! The hosted SDK is abstracted behind [`StripeSdk`]; everything above
//! it is plain async Rust and fully testable in-memory.

pub mod card;
mod elements;
pub mod ideal;
pub mod sdk;
pub mod sources;

#[cfg(test)]
pub(crate) mod testutil;

pub use card::StripeCardStrategy;
pub use ideal::StripeIdealStrategy;
pub use sdk::{
    CardToken, Confirmation, ElementSpec, KlarnaDetails, PaymentMethod, Source, SourceItem,
    SourceRequest, StripeSdk, STRIPE_SCRIPT_ID, STRIPE_SCRIPT_URL,
};
pub use sources::{StripeBancontactStrategy, StripeKlarnaStrategy};
