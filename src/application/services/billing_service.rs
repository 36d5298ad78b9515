//! Billing service orchestrating opaque payment gateways.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::SubscriptionPlan;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::payments::{
    CheckoutRequest, CheckoutSession, PaymentGateway, PaymentProvider,
};

/// Monthly price in cents per paid plan.
fn plan_amount_cents(plan: SubscriptionPlan) -> Option<u32> {
    match plan {
        SubscriptionPlan::Free => None,
        SubscriptionPlan::Pro => Some(900),
        SubscriptionPlan::Business => Some(2900),
    }
}

/// Service creating provider checkouts for plan upgrades.
///
/// Providers are plugged in behind [`PaymentGateway`]; only the ones whose
/// credentials are configured appear in the registry, and asking for an
/// absent one is a validation error, not an internal one.
pub struct BillingService<U: UserRepository> {
    users: Arc<U>,
    gateways: HashMap<PaymentProvider, Arc<dyn PaymentGateway>>,
}

impl<U: UserRepository> BillingService<U> {
    /// Creates a new billing service from the configured gateways.
    pub fn new(users: Arc<U>, gateways: Vec<Arc<dyn PaymentGateway>>) -> Self {
        let gateways = gateways
            .into_iter()
            .map(|gateway| (gateway.provider(), gateway))
            .collect();

        Self { users, gateways }
    }

    /// Creates a checkout for upgrading the caller to a paid plan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for the free plan or an unconfigured
    /// provider.
    /// Returns [`AppError::NotFound`] if the user record is gone.
    /// Returns [`AppError::Internal`] if the provider call fails.
    pub async fn create_checkout(
        &self,
        user_id: i64,
        plan: SubscriptionPlan,
        provider: PaymentProvider,
    ) -> Result<CheckoutSession, AppError> {
        let amount_cents = plan_amount_cents(plan).ok_or_else(|| {
            AppError::bad_request(
                "The free plan does not require checkout",
                json!({ "plan": plan.as_str() }),
            )
        })?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        let gateway = self.gateways.get(&provider).ok_or_else(|| {
            AppError::bad_request(
                "Payment provider not configured",
                json!({ "provider": provider.as_str() }),
            )
        })?;

        let request = CheckoutRequest {
            user_id: user.id,
            email: user.email,
            plan,
            amount_cents,
            currency: "USD".to_string(),
        };

        gateway.create_checkout(&request).await.map_err(|e| {
            tracing::error!("Checkout with {} failed: {}", provider.as_str(), e);
            AppError::internal("Payment provider error", json!({}))
        })
    }
}
