use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::payment_methods::PaymentMethod;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutModel {
    pub user_email: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order_id: Uuid,
    pub payment_url: String,
    pub total_amount: i64,
}
