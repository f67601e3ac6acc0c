use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::products::{InsertProductEntity, ProductEntity},
    value_objects::products::ListProductsFilter,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository {
    async fn find_by_id(&self, product_id: Uuid) -> Result<Option<ProductEntity>>;
    async fn list(&self, filter: ListProductsFilter) -> Result<Vec<ProductEntity>>;
    async fn insert(&self, product: InsertProductEntity) -> Result<ProductEntity>;
    async fn count(&self) -> Result<i64>;
}
