use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Minimal Xendit invoicing client built on reqwest.
///
/// The client performs no retries; outbound calls are bounded by the
/// configured timeout and any failure surfaces to the caller, which owns
/// the retry policy.
pub struct XenditClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

#[derive(Debug, Serialize)]
struct CreateInvoiceBody<'a> {
    external_id: &'a str,
    amount: i64,
    payer_email: &'a str,
    description: &'a str,
    currency: &'a str,
    payment_methods: &'a [String],
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreatedInvoice {
    pub id: String,
    pub invoice_url: String,
}

impl XenditClient {
    pub fn new(base_url: String, secret_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            secret_key,
        })
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        error!(
            status = %status,
            response_body = %body,
            context = %context,
            "xendit api request failed"
        );

        anyhow::bail!(
            "Xendit API request failed: {} (status {}): {}",
            context,
            status,
            body
        );
    }

    /// Creates a payable invoice and returns its id and user-facing URL.
    /// https://developers.xendit.co/api-reference/#create-invoice
    pub async fn create_invoice(
        &self,
        external_id: &str,
        amount: i64,
        payer_email: &str,
        description: &str,
        currency: &str,
        payment_methods: &[String],
    ) -> Result<CreatedInvoice> {
        let body = CreateInvoiceBody {
            external_id,
            amount,
            payer_email,
            description,
            currency,
            payment_methods,
        };

        let resp = self
            .http
            .post(format!("{}/v2/invoices", self.base_url))
            .basic_auth(&self.secret_key, Some(""))
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create invoice").await?;

        let invoice: CreatedInvoice = resp.json().await?;
        Ok(invoice)
    }
}
