use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::domain::{
    entities::subscription_plans::InsertSubscriptionPlanEntity,
    repositories::subscription_plans::SubscriptionPlanRepository,
    value_objects::subscription_plans::{InsertSubscriptionPlanModel, SubscriptionPlanDto},
};

#[derive(Debug, Error)]
pub enum SubscriptionPlanError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionPlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionPlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type SubscriptionPlanResult<T> = std::result::Result<T, SubscriptionPlanError>;

pub struct SubscriptionPlanUseCase<S>
where
    S: SubscriptionPlanRepository + Send + Sync + 'static,
{
    plan_repository: Arc<S>,
}

impl<S> SubscriptionPlanUseCase<S>
where
    S: SubscriptionPlanRepository + Send + Sync + 'static,
{
    pub fn new(plan_repository: Arc<S>) -> Self {
        Self { plan_repository }
    }

    pub async fn list(&self) -> SubscriptionPlanResult<Vec<SubscriptionPlanDto>> {
        let plans = self.plan_repository.list().await.map_err(|err| {
            error!(db_error = ?err, "subscription_plans: failed to list");
            SubscriptionPlanError::Internal(err)
        })?;

        Ok(plans.into_iter().map(SubscriptionPlanDto::from).collect())
    }

    pub async fn create(
        &self,
        model: InsertSubscriptionPlanModel,
    ) -> SubscriptionPlanResult<SubscriptionPlanDto> {
        let features = serde_json::to_value(&model.features)
            .map_err(|err| SubscriptionPlanError::Internal(err.into()))?;

        let plan = self
            .plan_repository
            .insert(InsertSubscriptionPlanEntity {
                name: model.name,
                description: model.description,
                price: model.price,
                billing_cycle: model.billing_cycle,
                features,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscription_plans: failed to insert");
                SubscriptionPlanError::Internal(err)
            })?;

        info!(plan_id = %plan.id, name = %plan.name, "subscription_plans: created");

        Ok(SubscriptionPlanDto::from(plan))
    }
}
