use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, delete, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::cart_items::{CartItemEntity, InsertCartItemEntity},
        repositories::carts::CartRepository,
        value_objects::carts::CartOwner,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::cart_items},
};

pub struct CartPostgres {
    db_pool: Arc<PgPool>,
}

impl CartPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CartRepository for CartPostgres {
    async fn find_by_owner(&self, owner: &CartOwner) -> Result<Vec<CartItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = cart_items::table.into_boxed();
        query = match owner {
            CartOwner::User(user_id) => query.filter(cart_items::user_id.eq(*user_id)),
            CartOwner::Session(session_id) => {
                query.filter(cart_items::session_id.eq(session_id.clone()))
            }
        };

        let rows = query
            .order(cart_items::created_at.asc())
            .load::<CartItemEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn find_line(
        &self,
        owner: &CartOwner,
        product_id: Uuid,
    ) -> Result<Option<CartItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = cart_items::table
            .filter(cart_items::product_id.eq(product_id))
            .into_boxed();
        query = match owner {
            CartOwner::User(user_id) => query.filter(cart_items::user_id.eq(*user_id)),
            CartOwner::Session(session_id) => {
                query.filter(cart_items::session_id.eq(session_id.clone()))
            }
        };

        let line = query.first::<CartItemEntity>(&mut conn).optional()?;

        Ok(line)
    }

    async fn insert_line(&self, line: InsertCartItemEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let line_id = insert_into(cart_items::table)
            .values(&line)
            .returning(cart_items::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(line_id)
    }

    async fn set_quantity(&self, line_id: Uuid, quantity: i32) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(cart_items::table.filter(cart_items::id.eq(line_id)))
            .set(cart_items::quantity.eq(quantity))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete_line(&self, line_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(cart_items::table.filter(cart_items::id.eq(line_id)))
            .execute(&mut conn)?;

        Ok(deleted)
    }

    async fn clear_owner(&self, owner: &CartOwner) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = match owner {
            CartOwner::User(user_id) => delete(
                cart_items::table.filter(cart_items::user_id.eq(*user_id)),
            )
            .execute(&mut conn)?,
            CartOwner::Session(session_id) => delete(
                cart_items::table.filter(cart_items::session_id.eq(session_id.clone())),
            )
            .execute(&mut conn)?,
        };

        Ok(deleted)
    }
}
