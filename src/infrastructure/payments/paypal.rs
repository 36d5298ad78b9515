//! PayPal Orders gateway.

use super::gateway::{CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentProvider};
use async_trait::async_trait;
use serde_json::{Value, json};

const ORDERS_URL: &str = "https://api-m.paypal.com/v2/checkout/orders";

/// Creates PayPal orders for plan upgrades.
pub struct PaypalGateway {
    http: reqwest::Client,
    client_secret: String,
}

impl PaypalGateway {
    pub fn new(http: reqwest::Client, client_secret: String) -> Self {
        Self {
            http,
            client_secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for PaypalGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Paypal
    }

    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let body = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "description": format!("reflinks {} plan", request.plan.as_str()),
                "amount": {
                    "currency_code": request.currency,
                    "value": request.amount_decimal(),
                },
            }],
        });

        let response = self
            .http
            .post(ORDERS_URL)
            .bearer_auth(&self.client_secret)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Http(format!(
                "PayPal returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PaymentError::Malformed(e.to_string()))?;

        let reference = body["id"]
            .as_str()
            .ok_or_else(|| PaymentError::Malformed("missing order id".to_string()))?
            .to_string();

        let checkout_url = body["links"]
            .as_array()
            .and_then(|links| {
                links
                    .iter()
                    .find(|link| link["rel"].as_str() == Some("approve"))
            })
            .and_then(|link| link["href"].as_str())
            .map(|s| s.to_string());

        Ok(CheckoutSession {
            provider: PaymentProvider::Paypal,
            checkout_url,
            reference,
        })
    }
}
