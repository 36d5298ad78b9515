//! DTOs for billing endpoints.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::SubscriptionPlan;
use crate::error::AppError;
use crate::infrastructure::payments::{CheckoutSession, PaymentProvider};

/// Request to start a checkout for a plan upgrade.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequestBody {
    /// `"pro"` or `"business"`.
    pub plan: String,
    /// `"stripe"`, `"paypal"`, or `"coinbase"`.
    pub provider: String,
}

impl CheckoutRequestBody {
    /// Parses the plan and provider selectors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unknown values.
    pub fn parse(&self) -> Result<(SubscriptionPlan, PaymentProvider), AppError> {
        let plan = SubscriptionPlan::parse(&self.plan).ok_or_else(|| {
            AppError::bad_request(
                "Unknown plan",
                json!({ "allowed": ["pro", "business"], "got": self.plan }),
            )
        })?;

        let provider = PaymentProvider::parse(&self.provider).ok_or_else(|| {
            AppError::bad_request(
                "Unknown payment provider",
                json!({ "allowed": ["stripe", "paypal", "coinbase"], "got": self.provider }),
            )
        })?;

        Ok((plan, provider))
    }
}

/// Response carrying the provider redirect URL and reference.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub provider: &'static str,
    pub checkout_url: Option<String>,
    pub reference: String,
}

impl From<CheckoutSession> for CheckoutResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            provider: session.provider.as_str(),
            checkout_url: session.checkout_url,
            reference: session.reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_selectors() {
        let body = CheckoutRequestBody {
            plan: "pro".to_string(),
            provider: "coinbase".to_string(),
        };
        let (plan, provider) = body.parse().unwrap();
        assert_eq!(plan, SubscriptionPlan::Pro);
        assert_eq!(provider, PaymentProvider::Coinbase);
    }

    #[test]
    fn test_parse_unknown_provider() {
        let body = CheckoutRequestBody {
            plan: "pro".to_string(),
            provider: "square".to_string(),
        };
        assert!(matches!(
            body.parse().unwrap_err(),
            AppError::Validation { .. }
        ));
    }
}
