use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    application::usecases::carts::CartUseCase,
    auth::AuthUser,
    domain::{
        repositories::{carts::CartRepository, products::ProductRepository},
        value_objects::carts::{AddCartItemModel, CartDto},
    },
    infrastructure::{
        axum_http::{
            error_responses,
            routers::{SessionQuery, resolve_cart_owner},
        },
        postgres::{
            postgres_connection::PgPool,
            repositories::{carts::CartPostgres, products::ProductPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPool>) -> Router {
    let cart_repository = CartPostgres::new(Arc::clone(&db_pool));
    let product_repository = ProductPostgres::new(Arc::clone(&db_pool));
    let cart_usecase = CartUseCase::new(Arc::new(cart_repository), Arc::new(product_repository));

    Router::new()
        .route("/", get(get_cart))
        .route("/add", post(add_to_cart))
        .route("/:item_id", delete(remove_from_cart))
        .with_state(Arc::new(cart_usecase))
}

pub async fn add_to_cart<C, P>(
    State(cart_usecase): State<Arc<CartUseCase<C, P>>>,
    auth: Option<AuthUser>,
    Query(session): Query<SessionQuery>,
    Json(add_cart_item_model): Json<AddCartItemModel>,
) -> impl IntoResponse
where
    C: CartRepository + Send + Sync,
    P: ProductRepository + Send + Sync,
{
    let Some(owner) = resolve_cart_owner(auth.as_ref(), session.session_id) else {
        return error_responses::usecase_error(
            StatusCode::BAD_REQUEST,
            "a session_id or an authenticated user is required",
        );
    };

    match cart_usecase.add_item(owner, add_cart_item_model).await {
        Ok(()) => Json(json!({ "message": "Item added to cart" })).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}

pub async fn get_cart<C, P>(
    State(cart_usecase): State<Arc<CartUseCase<C, P>>>,
    auth: Option<AuthUser>,
    Query(session): Query<SessionQuery>,
) -> impl IntoResponse
where
    C: CartRepository + Send + Sync,
    P: ProductRepository + Send + Sync,
{
    // No identity means an empty cart, not an error.
    let Some(owner) = resolve_cart_owner(auth.as_ref(), session.session_id) else {
        return Json(CartDto {
            items: Vec::new(),
            total: 0,
        })
        .into_response();
    };

    match cart_usecase.get_cart(owner).await {
        Ok(cart) => Json(cart).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}

pub async fn remove_from_cart<C, P>(
    State(cart_usecase): State<Arc<CartUseCase<C, P>>>,
    Path(item_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: CartRepository + Send + Sync,
    P: ProductRepository + Send + Sync,
{
    match cart_usecase.remove_item(item_id).await {
        Ok(()) => Json(json!({ "message": "Item removed from cart" })).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}
