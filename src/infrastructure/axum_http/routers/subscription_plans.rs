use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use crate::{
    application::usecases::subscription_plans::SubscriptionPlanUseCase,
    auth::AuthUser,
    domain::{
        repositories::subscription_plans::SubscriptionPlanRepository,
        value_objects::subscription_plans::InsertSubscriptionPlanModel,
    },
    infrastructure::{
        axum_http::error_responses,
        postgres::{
            postgres_connection::PgPool,
            repositories::subscription_plans::SubscriptionPlanPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPool>) -> Router {
    let plan_repository = SubscriptionPlanPostgres::new(Arc::clone(&db_pool));
    let plan_usecase = SubscriptionPlanUseCase::new(Arc::new(plan_repository));

    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .with_state(Arc::new(plan_usecase))
}

pub async fn list_plans<S>(
    State(plan_usecase): State<Arc<SubscriptionPlanUseCase<S>>>,
) -> impl IntoResponse
where
    S: SubscriptionPlanRepository + Send + Sync,
{
    match plan_usecase.list().await {
        Ok(plans) => Json(plans).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}

pub async fn create_plan<S>(
    State(plan_usecase): State<Arc<SubscriptionPlanUseCase<S>>>,
    auth: AuthUser,
    Json(insert_plan_model): Json<InsertSubscriptionPlanModel>,
) -> impl IntoResponse
where
    S: SubscriptionPlanRepository + Send + Sync,
{
    if !auth.is_admin() {
        return error_responses::usecase_error(
            StatusCode::FORBIDDEN,
            "admin role required to manage subscription plans",
        );
    }

    match plan_usecase.create(insert_plan_model).await {
        Ok(plan) => Json(plan).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}
