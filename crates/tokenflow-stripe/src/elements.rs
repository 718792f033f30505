//! # Stripe Element Mounting
//!
//! Shared mount logic for card and iDEAL elements: resolves the element
//! layout from the caller's params, mounts through the SDK, wires event
//! hooks, and registers the primary handle under the Stripe gateway key.

use crate::sdk::{ElementSpec, StripeSdk};
use std::sync::Arc;
use tokenflow_core::{
    ElementEvents, ElementHandle, ElementRegistry, Gateway, MethodParams, MountKind,
    TokenizeResult,
};
use tracing::debug;

/// Mount the elements a method's params ask for and register the primary
/// (tokenizable) handle. Returns the displaced handle on remount.
pub(crate) fn mount_elements(
    sdk: &Arc<dyn StripeSdk>,
    registry: &ElementRegistry,
    params: &MethodParams,
    ideal: bool,
) -> TokenizeResult<Option<ElementHandle>> {
    let events = ElementEvents::from_params(params);

    let kinds: &[MountKind] = if ideal {
        &[MountKind::IdealBank]
    } else if params.separate_elements {
        &[MountKind::CardNumber, MountKind::CardExpiry, MountKind::CardCvc]
    } else {
        &[MountKind::Card]
    };

    let mut displaced = None;
    for kind in kinds {
        let target = params
            .element_id
            .clone()
            .filter(|_| kinds.len() == 1)
            .unwrap_or_else(|| kind.default_target());
        let spec = ElementSpec::new(*kind, target, params.options.clone());
        let handle = sdk.mount_element(&spec, &events)?;

        // Only the tokenizable element is retained; expiry/cvc ride along
        if matches!(
            kind,
            MountKind::Card | MountKind::CardNumber | MountKind::IdealBank
        ) {
            debug!("registering stripe element: kind={}", kind.as_str());
            displaced = registry.register(Gateway::Stripe, handle);
        }
    }

    Ok(displaced)
}
