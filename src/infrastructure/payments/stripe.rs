//! Stripe Checkout gateway.

use super::gateway::{CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentProvider};
use async_trait::async_trait;
use serde_json::Value;

const CHECKOUT_SESSIONS_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

/// Creates Stripe Checkout sessions for plan upgrades.
pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(http: reqwest::Client, secret_key: String) -> Self {
        Self { http, secret_key }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Stripe
    }

    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let amount = request.amount_cents.to_string();
        let currency = request.currency.to_lowercase();
        let plan_name = format!("reflinks {}", request.plan.as_str());
        let form = [
            ("mode", "payment"),
            ("customer_email", request.email.as_str()),
            ("line_items[0][quantity]", "1"),
            ("line_items[0][price_data][currency]", currency.as_str()),
            ("line_items[0][price_data][unit_amount]", amount.as_str()),
            (
                "line_items[0][price_data][product_data][name]",
                plan_name.as_str(),
            ),
        ];

        let response = self
            .http
            .post(CHECKOUT_SESSIONS_URL)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Http(format!(
                "Stripe returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PaymentError::Malformed(e.to_string()))?;

        let reference = body["id"]
            .as_str()
            .ok_or_else(|| PaymentError::Malformed("missing session id".to_string()))?
            .to_string();
        let checkout_url = body["url"].as_str().map(|s| s.to_string());

        Ok(CheckoutSession {
            provider: PaymentProvider::Stripe,
            checkout_url,
            reference,
        })
    }
}
