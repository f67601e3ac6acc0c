use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::products::ProductEntity;

#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub category: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductEntity> for ProductDto {
    fn from(entity: ProductEntity) -> Self {
        let images = serde_json::from_value(entity.images).unwrap_or_default();

        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            stock: entity.stock,
            category: entity.category,
            images,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertProductModel {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsFilter {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}
