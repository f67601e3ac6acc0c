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
    application::usecases::{
        checkout::{CheckoutUseCase, PaymentGateway},
        orders::OrderUseCase,
    },
    auth::AuthUser,
    domain::{
        repositories::{
            carts::CartRepository, orders::OrderRepository,
            payment_transactions::PaymentTransactionRepository, products::ProductRepository,
        },
        value_objects::{checkout::CheckoutModel, orders::ListOrdersFilter},
    },
    infrastructure::{
        axum_http::{
            error_responses,
            routers::{SessionQuery, resolve_cart_owner},
        },
        payments::xendit_client::XenditClient,
        postgres::{
            postgres_connection::PgPool,
            repositories::{
                carts::CartPostgres, orders::OrderPostgres,
                payment_transactions::PaymentTransactionPostgres, products::ProductPostgres,
            },
        },
    },
};

pub fn routes(db_pool: Arc<PgPool>, xendit_client: Arc<XenditClient>) -> Router {
    let checkout_usecase = CheckoutUseCase::new(
        Arc::new(CartPostgres::new(Arc::clone(&db_pool))),
        Arc::new(ProductPostgres::new(Arc::clone(&db_pool))),
        Arc::new(OrderPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PaymentTransactionPostgres::new(Arc::clone(&db_pool))),
        xendit_client,
    );

    let order_usecase = OrderUseCase::new(Arc::new(OrderPostgres::new(Arc::clone(&db_pool))));

    Router::new()
        .route("/create", post(create_order))
        .with_state(Arc::new(checkout_usecase))
        .merge(
            Router::new()
                .route("/", get(get_orders))
                .route("/:order_id", get(get_order))
                .with_state(Arc::new(order_usecase)),
        )
}

pub async fn create_order<C, P, O, T, G>(
    State(checkout_usecase): State<Arc<CheckoutUseCase<C, P, O, T, G>>>,
    auth: Option<AuthUser>,
    Query(session): Query<SessionQuery>,
    Json(checkout_model): Json<CheckoutModel>,
) -> impl IntoResponse
where
    C: CartRepository + Send + Sync,
    P: ProductRepository + Send + Sync,
    O: OrderRepository + Send + Sync,
    T: PaymentTransactionRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
{
    let Some(owner) = resolve_cart_owner(auth.as_ref(), session.session_id) else {
        return error_responses::usecase_error(
            StatusCode::BAD_REQUEST,
            "a session_id or an authenticated user is required",
        );
    };

    match checkout_usecase
        .checkout(owner, checkout_model.user_email, checkout_model.payment_method)
        .await
    {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}

pub async fn get_order<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync,
{
    match order_usecase.get(order_id).await {
        Ok(order) => Json(order).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}

pub async fn get_orders<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    Query(filter): Query<ListOrdersFilter>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync,
{
    match order_usecase.list(filter).await {
        Ok(orders) => Json(orders).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}
