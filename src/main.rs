//! Macrolog server binary.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use macrolog::adapters::http::{api_router, AppState, BillingUrls};
use macrolog::adapters::postgres::{
    PostgresFoodRepository, PostgresMealRepository, PostgresUserRecordRepository,
    PostgresWebhookEventRepository,
};
use macrolog::adapters::stripe::{StripeBillingAdapter, StripeConfig};
use macrolog::config::AppConfig;
use macrolog::domain::billing::{CooldownGate, WebhookVerifier};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Server exited with error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    info!(environment = ?config.server.environment, "Configuration loaded");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Postgres connection established");

    let stripe = StripeBillingAdapter::new(StripeConfig::new(
        config.payment.stripe_api_key.clone(),
        config.payment.stripe_price_id.clone(),
    ));

    let state = AppState {
        users: Arc::new(PostgresUserRecordRepository::new(pool.clone())),
        webhook_events: Arc::new(PostgresWebhookEventRepository::new(pool.clone())),
        payment: Arc::new(stripe),
        foods: Arc::new(PostgresFoodRepository::new(pool.clone())),
        meals: Arc::new(PostgresMealRepository::new(pool)),
        verifier: Arc::new(WebhookVerifier::new(
            config.payment.stripe_webhook_secret.clone(),
        )),
        cooldown: Arc::new(CooldownGate::with_default_window()),
        billing_urls: BillingUrls::from_app_url(&config.payment.app_url),
    };

    let app = api_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Server is running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        let parsed: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(parsed)
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    info!("Received shutdown signal");
}
