use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::payment_transactions::InsertPaymentTransactionEntity,
    value_objects::enums::order_statuses::OrderStatus,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PaymentTransactionRepository {
    async fn insert(&self, transaction: InsertPaymentTransactionEntity) -> Result<Uuid>;
    /// Overwrites status and gateway payment id on the transaction spawned by
    /// the given order. Returns the number of matched rows.
    async fn update_status_by_order_id(
        &self,
        order_id: Uuid,
        status: OrderStatus,
        gateway_payment_id: Option<String>,
    ) -> Result<usize>;
}
