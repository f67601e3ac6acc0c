use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    entities::products::InsertProductEntity,
    repositories::products::ProductRepository,
    value_objects::products::{InsertProductModel, ListProductsFilter, ProductDto},
};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ProductError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ProductError::NotFound => StatusCode::NOT_FOUND,
            ProductError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ProductResult<T> = std::result::Result<T, ProductError>;

pub struct ProductUseCase<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    product_repository: Arc<P>,
}

impl<P> ProductUseCase<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    pub fn new(product_repository: Arc<P>) -> Self {
        Self { product_repository }
    }

    pub async fn list(&self, mut filter: ListProductsFilter) -> ProductResult<Vec<ProductDto>> {
        filter.limit = Some(
            filter
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        );
        filter.skip = Some(filter.skip.unwrap_or(0).max(0));

        let products = self
            .product_repository
            .list(filter)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "products: failed to list");
                ProductError::Internal(err)
            })?;

        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    pub async fn get(&self, product_id: Uuid) -> ProductResult<ProductDto> {
        let product = self
            .product_repository
            .find_by_id(product_id)
            .await
            .map_err(|err| {
                error!(%product_id, db_error = ?err, "products: failed to load");
                ProductError::Internal(err)
            })?
            .ok_or(ProductError::NotFound)?;

        Ok(ProductDto::from(product))
    }

    pub async fn create(&self, model: InsertProductModel) -> ProductResult<ProductDto> {
        let images = serde_json::to_value(&model.images)
            .map_err(|err| ProductError::Internal(err.into()))?;

        let product = self
            .product_repository
            .insert(InsertProductEntity {
                name: model.name,
                description: model.description,
                price: model.price,
                stock: model.stock,
                category: model.category,
                images,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "products: failed to insert");
                ProductError::Internal(err)
            })?;

        info!(product_id = %product.id, name = %product.name, "products: created");

        Ok(ProductDto::from(product))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{
        entities::products::ProductEntity, repositories::products::MockProductRepository,
    };

    fn product(name: &str, price: i64) -> ProductEntity {
        ProductEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            price,
            stock: 10,
            category: "package".to_string(),
            images: serde_json::json!(["one.png"]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_clamps_pagination() {
        let mut products = MockProductRepository::new();
        products
            .expect_list()
            .withf(|filter| filter.limit == Some(MAX_PAGE_SIZE) && filter.skip == Some(0))
            .times(1)
            .returning(|_| Ok(vec![product("Basic", 50)]));

        let usecase = ProductUseCase::new(Arc::new(products));
        let listed = usecase
            .list(ListProductsFilter {
                category: None,
                limit: Some(10_000),
                skip: Some(-5),
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].images, vec!["one.png".to_string()]);
    }

    #[tokio::test]
    async fn test_get_unknown_product() {
        let mut products = MockProductRepository::new();
        products.expect_find_by_id().returning(|_| Ok(None));

        let usecase = ProductUseCase::new(Arc::new(products));
        let result = usecase.get(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_serializes_images() {
        let mut products = MockProductRepository::new();
        products
            .expect_insert()
            .withf(|entity| entity.images == serde_json::json!(["a.png", "b.png"]))
            .times(1)
            .returning(|entity| {
                Ok(ProductEntity {
                    id: Uuid::new_v4(),
                    name: entity.name,
                    description: entity.description,
                    price: entity.price,
                    stock: entity.stock,
                    category: entity.category,
                    images: entity.images,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let usecase = ProductUseCase::new(Arc::new(products));
        let created = usecase
            .create(InsertProductModel {
                name: "Basic".to_string(),
                description: "Entry package".to_string(),
                price: 50,
                stock: 10,
                category: "package".to_string(),
                images: vec!["a.png".to_string(), "b.png".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(created.images, vec!["a.png", "b.png"]);
    }
}
