use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payment_transactions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_transactions)]
pub struct PaymentTransactionEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Option<Uuid>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub payment_method: String,
    pub gateway_invoice_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payment_transactions)]
pub struct InsertPaymentTransactionEntity {
    pub order_id: Uuid,
    pub user_id: Option<Uuid>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub payment_method: String,
    pub gateway_invoice_id: Option<String>,
}
