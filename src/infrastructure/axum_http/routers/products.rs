use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    application::usecases::products::ProductUseCase,
    auth::AuthUser,
    domain::{
        repositories::products::ProductRepository,
        value_objects::products::{InsertProductModel, ListProductsFilter},
    },
    infrastructure::{
        axum_http::error_responses,
        postgres::{postgres_connection::PgPool, repositories::products::ProductPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPool>) -> Router {
    let product_repository = ProductPostgres::new(Arc::clone(&db_pool));
    let product_usecase = ProductUseCase::new(Arc::new(product_repository));

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:product_id", get(get_product))
        .with_state(Arc::new(product_usecase))
}

pub async fn list_products<P>(
    State(product_usecase): State<Arc<ProductUseCase<P>>>,
    Query(filter): Query<ListProductsFilter>,
) -> impl IntoResponse
where
    P: ProductRepository + Send + Sync,
{
    match product_usecase.list(filter).await {
        Ok(products) => Json(products).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}

pub async fn get_product<P>(
    State(product_usecase): State<Arc<ProductUseCase<P>>>,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: ProductRepository + Send + Sync,
{
    match product_usecase.get(product_id).await {
        Ok(product) => Json(product).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}

pub async fn create_product<P>(
    State(product_usecase): State<Arc<ProductUseCase<P>>>,
    auth: AuthUser,
    Json(insert_product_model): Json<InsertProductModel>,
) -> impl IntoResponse
where
    P: ProductRepository + Send + Sync,
{
    if !auth.is_admin() {
        return error_responses::usecase_error(
            StatusCode::FORBIDDEN,
            "admin role required to manage the catalog",
        );
    }

    match product_usecase.create(insert_product_model).await {
        Ok(product) => Json(product).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}
