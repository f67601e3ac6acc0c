use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::cart_items;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = cart_items)]
pub struct CartItemEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub session_id: Option<String>,
    pub product_id: Uuid,
    pub quantity: i32,
    // Unit price snapshot taken when the item was added to the cart.
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cart_items)]
pub struct InsertCartItemEntity {
    pub user_id: Option<Uuid>,
    pub session_id: Option<String>,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: i64,
}
