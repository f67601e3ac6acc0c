use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde_json::json;

use crate::{
    application::usecases::sample_data::SampleDataUseCase,
    domain::repositories::{
        products::ProductRepository, subscription_plans::SubscriptionPlanRepository,
    },
    infrastructure::{
        axum_http::error_responses,
        postgres::{
            postgres_connection::PgPool,
            repositories::{
                products::ProductPostgres, subscription_plans::SubscriptionPlanPostgres,
            },
        },
    },
};

pub fn routes(db_pool: Arc<PgPool>) -> Router {
    let product_repository = ProductPostgres::new(Arc::clone(&db_pool));
    let plan_repository = SubscriptionPlanPostgres::new(Arc::clone(&db_pool));
    let sample_data_usecase =
        SampleDataUseCase::new(Arc::new(product_repository), Arc::new(plan_repository));

    Router::new()
        .route("/init-data", post(init_data))
        .with_state(Arc::new(sample_data_usecase))
}

pub async fn init_data<P, S>(
    State(sample_data_usecase): State<Arc<SampleDataUseCase<P, S>>>,
) -> impl IntoResponse
where
    P: ProductRepository + Send + Sync,
    S: SubscriptionPlanRepository + Send + Sync,
{
    match sample_data_usecase.init_data().await {
        Ok(message) => Json(json!({ "message": message })).into_response(),
        Err(err) => error_responses::usecase_error(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            err,
        ),
    }
}
