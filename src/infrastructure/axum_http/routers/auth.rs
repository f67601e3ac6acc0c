use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};

use crate::{
    application::usecases::auth::AuthUseCase,
    domain::{
        repositories::users::UserRepository,
        value_objects::auth::{LoginModel, RegisterModel},
    },
    infrastructure::{
        axum_http::error_responses,
        postgres::{postgres_connection::PgPool, repositories::users::UserPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPool>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let auth_usecase = AuthUseCase::new(Arc::new(user_repository));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(Arc::new(auth_usecase))
}

pub async fn register<U>(
    State(auth_usecase): State<Arc<AuthUseCase<U>>>,
    Json(register_model): Json<RegisterModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
{
    match auth_usecase.register(register_model).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}

pub async fn login<U>(
    State(auth_usecase): State<Arc<AuthUseCase<U>>>,
    Json(login_model): Json<LoginModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
{
    match auth_usecase.login(login_model).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_responses::usecase_error(err.status_code(), err),
    }
}
