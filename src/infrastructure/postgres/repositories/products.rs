use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::products::{InsertProductEntity, ProductEntity},
        repositories::products::ProductRepository,
        value_objects::products::ListProductsFilter,
    },
    infrastructure::postgres::{postgres_connection::PgPool, schema::products},
};

pub struct ProductPostgres {
    db_pool: Arc<PgPool>,
}

impl ProductPostgres {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ProductRepository for ProductPostgres {
    async fn find_by_id(&self, product_id: Uuid) -> Result<Option<ProductEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let product = products::table
            .filter(products::id.eq(product_id))
            .first::<ProductEntity>(&mut conn)
            .optional()?;

        Ok(product)
    }

    async fn list(&self, filter: ListProductsFilter) -> Result<Vec<ProductEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = products::table.order(products::created_at.desc()).into_boxed();
        if let Some(category) = filter.category {
            query = query.filter(products::category.eq(category));
        }
        // Pagination defaults are the caller's policy, not the store's.
        if let Some(skip) = filter.skip {
            query = query.offset(skip);
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query.load::<ProductEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn insert(&self, product: InsertProductEntity) -> Result<ProductEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let inserted = insert_into(products::table)
            .values(&product)
            .get_result::<ProductEntity>(&mut conn)?;

        Ok(inserted)
    }

    async fn count(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = products::table.count().get_result::<i64>(&mut conn)?;

        Ok(total)
    }
}
