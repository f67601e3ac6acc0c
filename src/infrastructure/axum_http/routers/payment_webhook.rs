use std::sync::Arc;

use axum::{
    Json, Router, body::Bytes, extract::State, http::HeaderMap, response::IntoResponse,
    routing::post,
};
use serde_json::json;

use crate::{
    application::usecases::payment_webhook::PaymentWebhookUseCase,
    domain::repositories::{
        orders::OrderRepository, payment_transactions::PaymentTransactionRepository,
    },
    infrastructure::{
        axum_http::error_responses,
        postgres::{
            postgres_connection::PgPool,
            repositories::{
                orders::OrderPostgres, payment_transactions::PaymentTransactionPostgres,
            },
        },
    },
};

pub const CALLBACK_TOKEN_HEADER: &str = "x-callback-token";

pub fn routes(db_pool: Arc<PgPool>, webhook_token: String) -> Router {
    let webhook_usecase = PaymentWebhookUseCase::new(
        Arc::new(OrderPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PaymentTransactionPostgres::new(Arc::clone(&db_pool))),
        webhook_token,
    );

    Router::new()
        .route("/xendit", post(xendit_webhook))
        .with_state(Arc::new(webhook_usecase))
}

pub async fn xendit_webhook<O, T>(
    State(webhook_usecase): State<Arc<PaymentWebhookUseCase<O, T>>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync,
    T: PaymentTransactionRepository + Send + Sync,
{
    let provided_token = headers
        .get(CALLBACK_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    match webhook_usecase
        .handle_notification(&body, provided_token)
        .await
    {
        Ok(()) => Json(json!({ "status": "success" })).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}
