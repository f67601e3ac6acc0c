use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::cart_items::{CartItemEntity, InsertCartItemEntity},
    value_objects::carts::CartOwner,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CartRepository {
    async fn find_by_owner(&self, owner: &CartOwner) -> Result<Vec<CartItemEntity>>;
    async fn find_line(
        &self,
        owner: &CartOwner,
        product_id: Uuid,
    ) -> Result<Option<CartItemEntity>>;
    async fn insert_line(&self, line: InsertCartItemEntity) -> Result<Uuid>;
    async fn set_quantity(&self, line_id: Uuid, quantity: i32) -> Result<()>;
    /// Returns the number of deleted rows.
    async fn delete_line(&self, line_id: Uuid) -> Result<usize>;
    /// Deletes every line belonging to the owner. Returns the number of
    /// deleted rows.
    async fn clear_owner(&self, owner: &CartOwner) -> Result<usize>;
}
