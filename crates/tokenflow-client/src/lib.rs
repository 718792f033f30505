//! # tokenflow-client
//!
//! The caller-facing half of tokenflow: reqwest-backed store and vault
//! clients, session construction with the standard strategy table, and
//! the [`Tokenizer`] façade that mounts elements and dispatches
//! tokenization.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokenflow_client::{Session, Tokenizer};
//! # use tokenflow_core::{MethodKind, MethodParams, TokenizationParams};
//! # async fn example(
//! #     host: Arc<dyn tokenflow_core::WebHost>,
//! #     stripe: Arc<dyn tokenflow_stripe::StripeSdk>,
//! #     braintree: Arc<dyn tokenflow_braintree::BraintreeSdk>,
//! # ) -> anyhow::Result<()> {
//! let session = Session::from_env(host, stripe, braintree)?.build();
//! let tokenizer = Tokenizer::new(session);
//!
//! let params = TokenizationParams::new()
//!     .with(MethodKind::Card, MethodParams::new().on_success(|| {}));
//! tokenizer.create_elements(params).await?;
//! let outcome = tokenizer.tokenize(None).await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod orchestrator;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::ClientConfig;
pub use http::{StoreClient, VaultClient};
pub use orchestrator::Tokenizer;
pub use session::{Session, SessionBuilder};
