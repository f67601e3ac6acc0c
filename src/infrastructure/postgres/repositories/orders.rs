use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::orders::{InsertOrderEntity, OrderEntity},
        repositories::orders::OrderRepository,
        value_objects::enums::order_statuses::OrderStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::orders},
};

pub struct OrderPostgres {
    db_pool: Arc<PgPool>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn insert(&self, order: InsertOrderEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order_id = insert_into(orders::table)
            .values(&order)
            .returning(orders::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(order_id)
    }

    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = orders::table
            .filter(orders::id.eq(order_id))
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        Ok(order)
    }

    async fn list(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = orders::table.into_boxed();
        if let Some(user_id) = user_id {
            query = query.filter(orders::user_id.eq(user_id));
        }

        let rows = query
            .order(orders::created_at.desc())
            .offset(skip)
            .limit(limit)
            .load::<OrderEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn set_gateway_invoice_id(&self, order_id: Uuid, invoice_id: String) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(orders::table.filter(orders::id.eq(order_id)))
            .set((
                orders::gateway_invoice_id.eq(Some(invoice_id)),
                orders::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(orders::table.filter(orders::id.eq(order_id)))
            .set((
                orders::status.eq(status.as_str()),
                orders::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
