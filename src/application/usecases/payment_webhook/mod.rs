use std::sync::Arc;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    repositories::{
        orders::OrderRepository, payment_transactions::PaymentTransactionRepository,
    },
    value_objects::{
        enums::order_statuses::OrderStatus, payment_webhook::PaymentNotification,
    },
};

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("invalid webhook token")]
    Unauthorized,
    #[error("malformed webhook payload: {0}")]
    Malformed(String),
}

impl WebhookError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebhookError::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }
}

pub type WebhookResult<T> = std::result::Result<T, WebhookError>;

pub struct PaymentWebhookUseCase<O, T>
where
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
{
    order_repository: Arc<O>,
    transaction_repository: Arc<T>,
    webhook_token: String,
}

impl<O, T> PaymentWebhookUseCase<O, T>
where
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
{
    pub fn new(
        order_repository: Arc<O>,
        transaction_repository: Arc<T>,
        webhook_token: String,
    ) -> Self {
        Self {
            order_repository,
            transaction_repository,
            webhook_token,
        }
    }

    /// Applies a gateway invoice-status notification to the matching order
    /// and its payment transaction.
    ///
    /// The update is a plain overwrite: redelivering the same notification
    /// lands on the same final state, and out-of-order delivery is
    /// last-write-wins. Beyond the token and parse checks, failures are
    /// logged and swallowed so the gateway sees success and stops retrying.
    pub async fn handle_notification(
        &self,
        raw_body: &[u8],
        provided_token: Option<&str>,
    ) -> WebhookResult<()> {
        let token = provided_token.ok_or_else(|| {
            warn!("payment_webhook: missing x-callback-token header");
            WebhookError::Unauthorized
        })?;

        if !token_matches(token, &self.webhook_token) {
            warn!("payment_webhook: webhook token mismatch");
            return Err(WebhookError::Unauthorized);
        }

        let notification: PaymentNotification =
            serde_json::from_slice(raw_body).map_err(|err| {
                warn!(error = %err, "payment_webhook: unparseable notification body");
                WebhookError::Malformed(err.to_string())
            })?;

        let Some(external_id) = notification.external_id.as_deref() else {
            warn!("payment_webhook: notification without external_id ignored");
            return Ok(());
        };

        let Some(raw_order_id) = external_id.strip_prefix("order_") else {
            warn!(
                external_id,
                "payment_webhook: external_id does not reference an order, ignored"
            );
            return Ok(());
        };

        let order_id = match Uuid::parse_str(raw_order_id) {
            Ok(order_id) => order_id,
            Err(err) => {
                warn!(
                    external_id,
                    error = %err,
                    "payment_webhook: external_id carries an invalid order id, ignored"
                );
                return Ok(());
            }
        };

        let status = OrderStatus::from_gateway_status(notification.status.as_deref());

        match self.order_repository.update_status(order_id, status).await {
            Ok(0) => {
                info!(
                    %order_id,
                    status = %status,
                    "payment_webhook: notification for unknown order, nothing updated"
                );
            }
            Ok(_) => {
                info!(
                    %order_id,
                    status = %status,
                    gateway_status = ?notification.status,
                    "payment_webhook: order status updated"
                );
            }
            Err(err) => {
                error!(
                    %order_id,
                    db_error = ?err,
                    "payment_webhook: failed to update order status"
                );
                return Ok(());
            }
        }

        if let Err(err) = self
            .transaction_repository
            .update_status_by_order_id(order_id, status, notification.payment_id.clone())
            .await
        {
            // Order and transaction now diverge until the gateway redelivers.
            error!(
                %order_id,
                db_error = ?err,
                "payment_webhook: failed to update payment transaction"
            );
        }

        Ok(())
    }
}

/// Fixed-length digest comparison; does not short-circuit on the token bytes.
fn token_matches(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}
