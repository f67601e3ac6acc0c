use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};

use crate::{
    domain::{
        entities::subscription_plans::{InsertSubscriptionPlanEntity, SubscriptionPlanEntity},
        repositories::subscription_plans::SubscriptionPlanRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::subscription_plans},
};

pub struct SubscriptionPlanPostgres {
    db_pool: Arc<PgPool>,
}

impl SubscriptionPlanPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionPlanRepository for SubscriptionPlanPostgres {
    async fn list(&self) -> Result<Vec<SubscriptionPlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = subscription_plans::table
            .order(subscription_plans::price.asc())
            .load::<SubscriptionPlanEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn insert(&self, plan: InsertSubscriptionPlanEntity) -> Result<SubscriptionPlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let inserted = insert_into(subscription_plans::table)
            .values(&plan)
            .get_result::<SubscriptionPlanEntity>(&mut conn)?;

        Ok(inserted)
    }
}
