//! # tokenflow-braintree
//!
//! PayPal smart-button tokenization backed by a Braintree vault-flow
//! client. Unlike the other strategies, the instrument is committed in
//! the button approval callback rather than a tokenize call: mount
//! renders the button and wires a [`PaypalFlow`] that vaults the
//! approval nonce onto the cart billing.

pub mod paypal;
pub mod sdk;

pub use paypal::BraintreePaypalStrategy;
pub use sdk::{
    paypal_script_url, BraintreeSdk, PaypalApproval, PaypalButtonOptions, PaypalFlow,
    BRAINTREE_PAYPAL_SCRIPT_ID, BRAINTREE_PAYPAL_SCRIPT_URL, BRAINTREE_SCRIPT_ID,
    BRAINTREE_SCRIPT_URL, PAYPAL_SCRIPT_ID,
};
