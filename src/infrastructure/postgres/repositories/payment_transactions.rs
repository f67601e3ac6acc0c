use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::payment_transactions::InsertPaymentTransactionEntity,
        repositories::payment_transactions::PaymentTransactionRepository,
        value_objects::enums::order_statuses::OrderStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::payment_transactions},
};

pub struct PaymentTransactionPostgres {
    db_pool: Arc<PgPool>,
}

impl PaymentTransactionPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentTransactionRepository for PaymentTransactionPostgres {
    async fn insert(&self, transaction: InsertPaymentTransactionEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let transaction_id = insert_into(payment_transactions::table)
            .values(&transaction)
            .returning(payment_transactions::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(transaction_id)
    }

    async fn update_status_by_order_id(
        &self,
        order_id: Uuid,
        status: OrderStatus,
        gateway_payment_id: Option<String>,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(
            payment_transactions::table.filter(payment_transactions::order_id.eq(order_id)),
        )
        .set((
            payment_transactions::status.eq(status.as_str()),
            payment_transactions::gateway_payment_id.eq(gateway_payment_id),
            payment_transactions::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
