//! Opaque payment provider gateways.

mod coinbase;
mod gateway;
mod paypal;
mod stripe;

pub use coinbase::CoinbaseGateway;
pub use gateway::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentProvider,
};
pub use paypal::PaypalGateway;
pub use stripe::StripeGateway;

#[cfg(test)]
pub use gateway::MockPaymentGateway;
