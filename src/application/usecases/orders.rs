use std::sync::Arc;

use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    repositories::orders::OrderRepository,
    value_objects::orders::{ListOrdersFilter, OrderDto},
};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OrderError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            OrderError::NotFound => StatusCode::NOT_FOUND,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type OrderResult<T> = std::result::Result<T, OrderError>;

pub struct OrderUseCase<O>
where
    O: OrderRepository + Send + Sync + 'static,
{
    order_repository: Arc<O>,
}

impl<O> OrderUseCase<O>
where
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(order_repository: Arc<O>) -> Self {
        Self { order_repository }
    }

    pub async fn get(&self, order_id: Uuid) -> OrderResult<OrderDto> {
        let order = self
            .order_repository
            .find_by_id(order_id)
            .await
            .map_err(|err| {
                error!(%order_id, db_error = ?err, "orders: failed to load");
                OrderError::Internal(err)
            })?
            .ok_or(OrderError::NotFound)?;

        Ok(OrderDto::from(order))
    }

    pub async fn list(&self, filter: ListOrdersFilter) -> OrderResult<Vec<OrderDto>> {
        let limit = filter
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let skip = filter.skip.unwrap_or(0).max(0);

        let orders = self
            .order_repository
            .list(filter.user_id, limit, skip)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "orders: failed to list");
                OrderError::Internal(err)
            })?;

        Ok(orders.into_iter().map(OrderDto::from).collect())
    }
}
