use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    config::config_model::DotEnvyConfig,
    infrastructure::{
        axum_http::{default_routers, routers},
        payments::xendit_client::XenditClient,
        postgres::postgres_connection::PgPool,
    },
};

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPool>) -> Result<()> {
    let xendit_client = Arc::new(XenditClient::new(
        config.xendit.base_url.clone(),
        config.xendit.secret_key.clone(),
        Duration::from_secs(config.xendit.timeout),
    )?);

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest("/api/v1/auth", routers::auth::routes(Arc::clone(&db_pool)))
        .nest(
            "/api/v1/products",
            routers::products::routes(Arc::clone(&db_pool)),
        )
        .nest("/api/v1/cart", routers::carts::routes(Arc::clone(&db_pool)))
        .nest(
            "/api/v1/orders",
            routers::orders::routes(Arc::clone(&db_pool), xendit_client),
        )
        .nest(
            "/api/v1/webhook",
            routers::payment_webhook::routes(
                Arc::clone(&db_pool),
                config.xendit.webhook_token.clone(),
            ),
        )
        .nest(
            "/api/v1/subscription-plans",
            routers::subscription_plans::routes(Arc::clone(&db_pool)),
        )
        .nest(
            "/api/v1/admin",
            routers::admin::routes(Arc::clone(&db_pool)),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any), // TODO Add the domain later
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
