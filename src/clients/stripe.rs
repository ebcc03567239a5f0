//! Minimal Stripe REST client covering the two calls this service makes:
//! customer creation and a one-off charge. Requests are form-encoded with
//! the secret key as basic-auth username, per the Stripe API convention.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("stripe API error ({status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    pub id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(secret_key: &str, http: reqwest::Client) -> Self {
        StripeClient {
            http,
            secret_key: secret_key.to_string(),
            base_url: STRIPE_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base. Used by tests.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a customer keyed by email and card token.
    pub async fn create_customer(
        &self,
        email: &str,
        source: &str,
    ) -> Result<Customer, StripeError> {
        let params = [("email", email), ("source", source)];
        let resp = self
            .http
            .post(self.endpoint("/customers"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?;
        Self::into_json(resp).await
    }

    /// Charge a customer `amount_minor` in the currency's minor unit (cents).
    pub async fn create_charge(
        &self,
        amount_minor: i64,
        currency: &str,
        customer_id: &str,
        description: &str,
    ) -> Result<Charge, StripeError> {
        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("customer", customer_id),
            ("description", description),
        ];
        let resp = self
            .http
            .post(self.endpoint("/charges"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?;
        Self::into_json(resp).await
    }

    async fn into_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, StripeError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(StripeError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = StripeClient::new("sk_test_x", reqwest::Client::new());
        assert_eq!(client.endpoint("/customers"), "https://api.stripe.com/v1/customers");
    }

    #[test]
    fn with_base_url_trims_trailing_slash() {
        let client = StripeClient::new("sk_test_x", reqwest::Client::new())
            .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(client.endpoint("/charges"), "http://127.0.0.1:9000/charges");
    }

    #[test]
    fn customer_deserializes_from_api_shape() {
        let customer: Customer =
            serde_json::from_str(r#"{"id": "cus_123", "object": "customer", "livemode": false}"#)
                .unwrap();
        assert_eq!(customer.id, "cus_123");
    }

    #[test]
    fn charge_deserializes_from_api_shape() {
        let charge: Charge = serde_json::from_str(
            r#"{"id": "ch_123", "object": "charge", "amount": 2000, "status": "succeeded"}"#,
        )
        .unwrap();
        assert_eq!(charge.id, "ch_123");
        assert_eq!(charge.amount, 2000);
        assert_eq!(charge.status, "succeeded");
    }
}
