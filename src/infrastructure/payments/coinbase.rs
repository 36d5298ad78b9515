//! Coinbase Commerce gateway.

use super::gateway::{CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentProvider};
use async_trait::async_trait;
use serde_json::{Value, json};

const CHARGES_URL: &str = "https://api.commerce.coinbase.com/charges";

/// Creates Coinbase Commerce charges for plan upgrades.
pub struct CoinbaseGateway {
    http: reqwest::Client,
    api_key: String,
}

impl CoinbaseGateway {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl PaymentGateway for CoinbaseGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Coinbase
    }

    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let body = json!({
            "name": format!("reflinks {} plan", request.plan.as_str()),
            "pricing_type": "fixed_price",
            "local_price": {
                "amount": request.amount_decimal(),
                "currency": request.currency,
            },
            "metadata": { "user_id": request.user_id },
        });

        let response = self
            .http
            .post(CHARGES_URL)
            .header("X-CC-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Http(format!(
                "Coinbase returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PaymentError::Malformed(e.to_string()))?;

        let reference = body["data"]["code"]
            .as_str()
            .ok_or_else(|| PaymentError::Malformed("missing charge code".to_string()))?
            .to_string();
        let checkout_url = body["data"]["hosted_url"].as_str().map(|s| s.to_string());

        Ok(CheckoutSession {
            provider: PaymentProvider::Coinbase,
            checkout_url,
            reference,
        })
    }
}
