//! Payment gateway trait and shared types.
//!
//! Providers are consumed as opaque "create checkout" calls that hand back a
//! redirect URL or charge reference; their SDK-level details stay on the
//! other side of this seam.

use crate::domain::entities::SubscriptionPlan;
use async_trait::async_trait;

/// Supported payment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentProvider {
    Stripe,
    Paypal,
    Coinbase,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Paypal => "paypal",
            Self::Coinbase => "coinbase",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stripe" => Some(Self::Stripe),
            "paypal" => Some(Self::Paypal),
            "coinbase" => Some(Self::Coinbase),
            _ => None,
        }
    }
}

/// Errors from a payment provider call.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider request failed: {0}")]
    Http(String),
    #[error("Payment provider returned an unexpected response: {0}")]
    Malformed(String),
}

/// Input for a checkout call.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub user_id: i64,
    pub email: String,
    pub plan: SubscriptionPlan,
    pub amount_cents: u32,
    pub currency: String,
}

impl CheckoutRequest {
    /// Formats the amount as a decimal string (`"9.00"` for 900 cents).
    pub fn amount_decimal(&self) -> String {
        format!("{}.{:02}", self.amount_cents / 100, self.amount_cents % 100)
    }
}

/// Result of a checkout call.
///
/// Hosted-checkout providers return a redirect URL; all providers return a
/// reference usable for reconciliation.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub provider: PaymentProvider,
    pub checkout_url: Option<String>,
    pub reference: String,
}

/// Trait for creating a provider checkout.
///
/// # Implementations
///
/// - [`crate::infrastructure::payments::StripeGateway`]
/// - [`crate::infrastructure::payments::PaypalGateway`]
/// - [`crate::infrastructure::payments::CoinbaseGateway`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// The provider this gateway talks to.
    fn provider(&self) -> PaymentProvider;

    /// Creates a checkout for a plan upgrade.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] on transport failures or unexpected provider
    /// responses. Callers convert these to an internal error; raw provider
    /// errors never reach the API caller.
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}
