//! # Tokenization Parameters
//!
//! Caller-supplied configuration keyed by method kind: mount targets,
//! gateway option bags, and optional callback hooks. Hooks are strongly
//! typed closures; an absent hook is legal and falls back to the engine's
//! default behavior (propagation or logging).

use crate::methods::MethodKind;
use crate::outcome::NormalizedError;
use serde_json::Value;
use std::sync::Arc;

/// Fired once after a successful tokenization commit
pub type SuccessHook = Arc<dyn Fn() + Send + Sync>;

/// Receives the normalized error; presence of this hook marks the error
/// as handled
pub type ErrorHook = Arc<dyn Fn(&NormalizedError) + Send + Sync>;

/// PayPal-specific terminal cancel signal
pub type CancelHook = Arc<dyn Fn() + Send + Sync>;

/// Element lifecycle events (ready/change/focus/blur/escape/click),
/// called with the SDK's native event payload
pub type EventHook = Arc<dyn Fn(&Value) + Send + Sync>;

/// Element event hooks wired onto a mounted payment input
#[derive(Clone, Default)]
pub struct ElementEvents {
    pub on_ready: Option<EventHook>,
    pub on_change: Option<EventHook>,
    pub on_focus: Option<EventHook>,
    pub on_blur: Option<EventHook>,
    pub on_escape: Option<EventHook>,
    pub on_click: Option<EventHook>,
}

impl ElementEvents {
    /// Extract the element event hooks from a method's params
    pub fn from_params(params: &MethodParams) -> Self {
        Self {
            on_ready: params.on_ready.clone(),
            on_change: params.on_change.clone(),
            on_focus: params.on_focus.clone(),
            on_blur: params.on_blur.clone(),
            on_escape: params.on_escape.clone(),
            on_click: params.on_click.clone(),
        }
    }
}

impl std::fmt::Debug for ElementEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementEvents")
            .field("on_ready", &self.on_ready.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("on_escape", &self.on_escape.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// Per-method-kind tokenization parameters
#[derive(Clone, Default)]
pub struct MethodParams {
    /// DOM selector to mount into; defaults derive from element kind
    /// (e.g. "#card-element")
    pub element_id: Option<String>,

    /// Mount cardNumber/cardExpiry/cardCvc as separate elements instead
    /// of a single combined card element
    pub separate_elements: bool,

    /// Gateway-specific element option bag, passed through untouched
    pub options: Value,

    /// Button style options (PayPal)
    pub style: Value,

    /// Caller-built intent payload (Saferpay); used verbatim when present
    pub intent: Option<Value>,

    pub on_success: Option<SuccessHook>,
    pub on_error: Option<ErrorHook>,
    pub on_cancel: Option<CancelHook>,
    pub on_ready: Option<EventHook>,
    pub on_change: Option<EventHook>,
    pub on_focus: Option<EventHook>,
    pub on_blur: Option<EventHook>,
    pub on_escape: Option<EventHook>,
    pub on_click: Option<EventHook>,
}

impl MethodParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the mount target selector
    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    /// Builder: mount separate card number/expiry/cvc elements
    pub fn with_separate_elements(mut self) -> Self {
        self.separate_elements = true;
        self
    }

    /// Builder: gateway-specific element options
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    /// Builder: caller-built intent payload (Saferpay)
    pub fn with_intent(mut self, intent: Value) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Builder: success hook
    pub fn on_success(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(hook));
        self
    }

    /// Builder: error hook
    pub fn on_error(
        mut self,
        hook: impl Fn(&NormalizedError) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Builder: cancel hook (PayPal)
    pub fn on_cancel(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Arc::new(hook));
        self
    }

    /// Builder: change event hook
    pub fn on_change(mut self, hook: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(hook));
        self
    }
}

impl std::fmt::Debug for MethodParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodParams")
            .field("element_id", &self.element_id)
            .field("separate_elements", &self.separate_elements)
            .field("intent", &self.intent.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Caller-supplied configuration for the whole orchestration call,
/// keyed by method kind
#[derive(Debug, Clone, Default)]
pub struct TokenizationParams {
    pub card: Option<MethodParams>,
    pub ideal: Option<MethodParams>,
    pub paypal: Option<MethodParams>,
    pub klarna: Option<MethodParams>,
    pub bancontact: Option<MethodParams>,
}

impl TokenizationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the params for a method kind, if requested
    pub fn get(&self, kind: MethodKind) -> Option<&MethodParams> {
        match kind {
            MethodKind::Card => self.card.as_ref(),
            MethodKind::Ideal => self.ideal.as_ref(),
            MethodKind::Paypal => self.paypal.as_ref(),
            MethodKind::Klarna => self.klarna.as_ref(),
            MethodKind::Bancontact => self.bancontact.as_ref(),
        }
    }

    /// Builder: request a method kind
    pub fn with(mut self, kind: MethodKind, params: MethodParams) -> Self {
        match kind {
            MethodKind::Card => self.card = Some(params),
            MethodKind::Ideal => self.ideal = Some(params),
            MethodKind::Paypal => self.paypal = Some(params),
            MethodKind::Klarna => self.klarna = Some(params),
            MethodKind::Bancontact => self.bancontact = Some(params),
        }
        self
    }

    /// All method kinds the caller requested, in declaration order
    pub fn requested_kinds(&self) -> Vec<MethodKind> {
        [
            MethodKind::Card,
            MethodKind::Ideal,
            MethodKind::Paypal,
            MethodKind::Klarna,
            MethodKind::Bancontact,
        ]
        .into_iter()
        .filter(|kind| self.get(*kind).is_some())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.requested_kinds().is_empty()
    }
}
