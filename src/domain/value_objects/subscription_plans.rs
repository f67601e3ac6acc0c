use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::subscription_plans::SubscriptionPlanEntity;

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionPlanDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub billing_cycle: String,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SubscriptionPlanEntity> for SubscriptionPlanDto {
    fn from(entity: SubscriptionPlanEntity) -> Self {
        let features = serde_json::from_value(entity.features).unwrap_or_default();

        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            billing_cycle: entity.billing_cycle,
            features,
            created_at: entity.created_at,
        }
    }
}

fn default_billing_cycle() -> String {
    "monthly".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertSubscriptionPlanModel {
    pub name: String,
    pub description: String,
    pub price: i64,
    #[serde(default = "default_billing_cycle")]
    pub billing_cycle: String,
    #[serde(default)]
    pub features: Vec<String>,
}
