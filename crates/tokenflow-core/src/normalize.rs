//! # Error Normalization
//!
//! Final step of every tokenize call: map any gateway/vault/orchestrator
//! error into the single [`NormalizedError`] shape and route it to the
//! caller's `on_error` hook when one is registered. Fatal errors always
//! propagate; no hook can intercept them.

use crate::error::{TokenizeError, TokenizeResult};
use crate::methods::MethodKind;
use crate::outcome::{NormalizedError, PaymentOutcome};
use crate::params::{ErrorHook, TokenizationParams};
use tracing::debug;

/// Hook resolution precedence. The first registered `on_error` hook wins
/// regardless of which method actually tokenized.
const HOOK_PRECEDENCE: [MethodKind; 4] = [
    MethodKind::Card,
    MethodKind::Ideal,
    MethodKind::Klarna,
    MethodKind::Bancontact,
];

/// Resolve the caller's error hook, if any
pub fn error_hook(params: &TokenizationParams) -> Option<ErrorHook> {
    HOOK_PRECEDENCE
        .iter()
        .filter_map(|kind| params.get(*kind))
        .find_map(|method| method.on_error.clone())
}

/// Deliver a tokenize failure.
///
/// Non-fatal errors with a registered hook are handed to the hook and
/// reported as [`PaymentOutcome::Handled`]; everything else propagates
/// as a rejection.
pub fn deliver(params: &TokenizationParams, err: TokenizeError) -> TokenizeResult<PaymentOutcome> {
    if err.is_fatal() {
        return Err(err);
    }

    match error_hook(params) {
        Some(hook) => {
            let normalized = NormalizedError::from(&err);
            debug!("delivering error to caller hook: {}", normalized);
            hook(&normalized);
            Ok(PaymentOutcome::Handled(normalized))
        }
        None => Err(err),
    }
}
