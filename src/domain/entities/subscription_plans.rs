use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::subscription_plans;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscription_plans)]
pub struct SubscriptionPlanEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub billing_cycle: String,
    // Feature labels shown on the pricing page (Vec<String>).
    pub features: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscription_plans)]
pub struct InsertSubscriptionPlanEntity {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub billing_cycle: String,
    pub features: serde_json::Value,
}
