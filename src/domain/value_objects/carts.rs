use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::products::ProductDto;

/// Cart identity: an authenticated user or an anonymous browser session,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOwner {
    User(Uuid),
    Session(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItemModel {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLineDto {
    pub id: Uuid,
    pub product: ProductDto,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartDto {
    pub items: Vec<CartLineDto>,
    pub total: i64,
}
