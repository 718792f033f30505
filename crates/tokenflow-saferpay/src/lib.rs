//! # tokenflow-saferpay
//!
//! Card tokenization through the Saferpay hosted payment page. There is
//! no client-side SDK to load or element to mount; tokenize builds a
//! hosted-page intent through the vault collaborator and hands control
//! to the gateway page.

pub mod card;
pub mod payment_page;

pub use card::SaferpayCardStrategy;
pub use payment_page::payment_page_data;
