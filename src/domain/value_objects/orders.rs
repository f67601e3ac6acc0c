use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::orders::OrderEntity;

/// Fixed-shape line-item snapshot captured at checkout. Catalog price
/// changes after the order exists must not show up here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemSnapshot {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDto {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub user_email: String,
    pub items: Vec<OrderItemSnapshot>,
    pub total_amount: i64,
    pub status: String,
    pub payment_method: String,
    pub gateway_invoice_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderEntity> for OrderDto {
    fn from(entity: OrderEntity) -> Self {
        let items = serde_json::from_value(entity.items.clone()).unwrap_or_else(|err| {
            warn!(
                order_id = %entity.id,
                error = %err,
                "orders: stored line items failed to deserialize"
            );
            Vec::new()
        });

        Self {
            id: entity.id,
            user_id: entity.user_id,
            user_email: entity.user_email,
            items,
            total_amount: entity.total_amount,
            status: entity.status,
            payment_method: entity.payment_method,
            gateway_invoice_id: entity.gateway_invoice_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListOrdersFilter {
    pub user_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}
