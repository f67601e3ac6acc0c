use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::orders;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = orders)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub user_email: String,
    // Immutable line-item snapshots captured at checkout time (Vec<OrderItemSnapshot>).
    pub items: serde_json::Value,
    pub total_amount: i64,
    pub status: String,
    pub payment_method: String,
    pub gateway_invoice_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct InsertOrderEntity {
    pub user_id: Option<Uuid>,
    pub user_email: String,
    pub items: serde_json::Value,
    pub total_amount: i64,
    pub status: String,
    pub payment_method: String,
}
