use serde::Deserialize;

/// Invoice-status notification the payment gateway POSTs to the webhook
/// endpoint. Every field is optional on the wire; what is required for a
/// mutation is decided by the reconciler, not the schema.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentNotification {
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub payment_id: Option<String>,
}
