use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::cart_items::InsertCartItemEntity,
    repositories::{carts::CartRepository, products::ProductRepository},
    value_objects::{
        carts::{AddCartItemModel, CartDto, CartLineDto, CartOwner},
        products::ProductDto,
    },
};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("product not found")]
    ProductNotFound,
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("insufficient stock: {available} available")]
    InsufficientStock { available: i32 },
    #[error("cart item not found")]
    LineNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CartError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CartError::ProductNotFound | CartError::LineNotFound => StatusCode::NOT_FOUND,
            CartError::InvalidQuantity | CartError::InsufficientStock { .. } => {
                StatusCode::BAD_REQUEST
            }
            CartError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type CartResult<T> = std::result::Result<T, CartError>;

pub struct CartUseCase<C, P>
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    cart_repository: Arc<C>,
    product_repository: Arc<P>,
}

impl<C, P> CartUseCase<C, P>
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    pub fn new(cart_repository: Arc<C>, product_repository: Arc<P>) -> Self {
        Self {
            cart_repository,
            product_repository,
        }
    }

    /// Adds a product to the owner's cart, folding into an existing line for
    /// the same product. The line price is snapshotted from the catalog at
    /// add time.
    pub async fn add_item(&self, owner: CartOwner, model: AddCartItemModel) -> CartResult<()> {
        if model.quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        let product = self
            .product_repository
            .find_by_id(model.product_id)
            .await
            .map_err(|err| {
                error!(product_id = %model.product_id, db_error = ?err, "cart: failed to load product");
                CartError::Internal(err)
            })?
            .ok_or(CartError::ProductNotFound)?;

        let existing = self
            .cart_repository
            .find_line(&owner, model.product_id)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "cart: failed to look up line");
                CartError::Internal(err)
            })?;

        let requested = existing.as_ref().map_or(0, |line| line.quantity) + model.quantity;
        if requested > product.stock {
            warn!(
                product_id = %product.id,
                requested,
                available = product.stock,
                "cart: add rejected, not enough stock"
            );
            return Err(CartError::InsufficientStock {
                available: product.stock,
            });
        }

        match existing {
            Some(line) => {
                self.cart_repository
                    .set_quantity(line.id, requested)
                    .await
                    .map_err(|err| {
                        error!(line_id = %line.id, db_error = ?err, "cart: failed to bump quantity");
                        CartError::Internal(err)
                    })?;
            }
            None => {
                let (user_id, session_id) = match &owner {
                    CartOwner::User(user_id) => (Some(*user_id), None),
                    CartOwner::Session(session_id) => (None, Some(session_id.clone())),
                };

                self.cart_repository
                    .insert_line(InsertCartItemEntity {
                        user_id,
                        session_id,
                        product_id: product.id,
                        quantity: model.quantity,
                        price: product.price,
                    })
                    .await
                    .map_err(|err| {
                        error!(db_error = ?err, "cart: failed to insert line");
                        CartError::Internal(err)
                    })?;
            }
        }

        info!(product_id = %product.id, quantity = model.quantity, "cart: item added");

        Ok(())
    }

    pub async fn get_cart(&self, owner: CartOwner) -> CartResult<CartDto> {
        let lines = self
            .cart_repository
            .find_by_owner(&owner)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "cart: failed to load");
                CartError::Internal(err)
            })?;

        let mut items = Vec::with_capacity(lines.len());
        let mut total: i64 = 0;

        for line in lines {
            let product = self
                .product_repository
                .find_by_id(line.product_id)
                .await
                .map_err(|err| {
                    error!(product_id = %line.product_id, db_error = ?err, "cart: failed to load product");
                    CartError::Internal(err)
                })?;

            let Some(product) = product else {
                warn!(
                    product_id = %line.product_id,
                    "cart: line references a vanished product, hiding it"
                );
                continue;
            };

            let line_total = i64::from(line.quantity) * line.price;
            total += line_total;
            items.push(CartLineDto {
                id: line.id,
                product: ProductDto::from(product),
                quantity: line.quantity,
                price: line.price,
                total: line_total,
            });
        }

        Ok(CartDto { items, total })
    }

    pub async fn remove_item(&self, line_id: Uuid) -> CartResult<()> {
        let deleted = self
            .cart_repository
            .delete_line(line_id)
            .await
            .map_err(|err| {
                error!(%line_id, db_error = ?err, "cart: failed to delete line");
                CartError::Internal(err)
            })?;

        if deleted == 0 {
            return Err(CartError::LineNotFound);
        }

        info!(%line_id, "cart: item removed");

        Ok(())
    }
}
