//! # Hosted Payment Page Payload
//!
//! Saferpay takes the whole payment description up front and returns a
//! hosted page; nothing mounts locally. Amounts go over the wire as
//! minor-unit strings with an uppercase currency code.

use serde_json::{json, Value};
use tokenflow_core::{amount_by_currency, Cart};

/// Build the hosted payment page request for a cart
pub fn payment_page_data(cart: &Cart, return_url: &str) -> Value {
    json!({
        "amount": {
            "value": amount_by_currency(&cart.currency, cart.grand_total).to_string(),
            "currency_code": cart.currency.to_uppercase(),
        },
        "order_id": cart.id,
        "description": format!("Order {}", cart.id),
        "return_urls": {
            "success": return_url,
            "fail": return_url,
        },
    })
}
