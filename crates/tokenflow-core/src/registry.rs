//! # Mounted Element Registry
//!
//! Tracks the active payment-input element handle per gateway. At most one
//! handle per gateway is retained; a later mount overwrites the earlier
//! one (documented last-write-wins) and the displaced handle is returned
//! to the caller. Owned by a session context, never process-wide.

use crate::methods::Gateway;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Kind of payment-input element a gateway SDK can mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MountKind {
    Card,
    CardNumber,
    CardExpiry,
    CardCvc,
    IdealBank,
    PaypalButton,
}

impl MountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MountKind::Card => "card",
            MountKind::CardNumber => "cardNumber",
            MountKind::CardExpiry => "cardExpiry",
            MountKind::CardCvc => "cardCvc",
            MountKind::IdealBank => "idealBank",
            MountKind::PaypalButton => "paypal-button",
        }
    }

    /// Default mount target selector for this element kind
    pub fn default_target(&self) -> String {
        match self {
            // The button container has no -element suffix
            MountKind::PaypalButton => "#paypal-button".to_string(),
            _ => format!("#{}-element", self.as_str()),
        }
    }
}

/// Handle to an element mounted by a gateway SDK.
///
/// Exclusively owned by the registry once registered; strategies borrow
/// it back to drive tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// SDK-assigned element identifier
    pub element_id: String,
    pub kind: MountKind,
}

impl ElementHandle {
    pub fn new(element_id: impl Into<String>, kind: MountKind) -> Self {
        Self {
            element_id: element_id.into(),
            kind,
        }
    }
}

/// Per-session store of mounted element handles, keyed by gateway
#[derive(Default)]
pub struct ElementRegistry {
    inner: Mutex<HashMap<Gateway, ElementHandle>>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mounted element, returning the handle it displaces
    pub fn register(&self, gateway: Gateway, handle: ElementHandle) -> Option<ElementHandle> {
        self.inner
            .lock()
            .expect("element registry lock poisoned")
            .insert(gateway, handle)
    }

    /// The active handle for a gateway, if one is mounted
    pub fn get(&self, gateway: Gateway) -> Option<ElementHandle> {
        self.inner
            .lock()
            .expect("element registry lock poisoned")
            .get(&gateway)
            .cloned()
    }

    pub fn is_mounted(&self, gateway: Gateway) -> bool {
        self.get(gateway).is_some()
    }
}
