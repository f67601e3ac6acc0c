use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::entities::subscription_plans::{
    InsertSubscriptionPlanEntity, SubscriptionPlanEntity,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubscriptionPlanRepository {
    async fn list(&self) -> Result<Vec<SubscriptionPlanEntity>>;
    async fn insert(&self, plan: InsertSubscriptionPlanEntity) -> Result<SubscriptionPlanEntity>;
}
