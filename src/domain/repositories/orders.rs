use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::orders::{InsertOrderEntity, OrderEntity},
    value_objects::enums::order_statuses::OrderStatus,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository {
    async fn insert(&self, order: InsertOrderEntity) -> Result<Uuid>;
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>>;
    async fn list(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<OrderEntity>>;
    async fn set_gateway_invoice_id(&self, order_id: Uuid, invoice_id: String) -> Result<()>;
    /// Overwrites the order status and bumps `updated_at`. Returns the number
    /// of matched rows; an unknown id is a no-op, not an error.
    async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> Result<usize>;
}
