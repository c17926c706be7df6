mod config;
mod error;
mod rate_limit;
mod routes;
mod sanitize;
mod state;

use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use studybuddy_ai::{ProviderGateway, RetryPolicy};
use studybuddy_core::Provider;
use studybuddy_database::{Database, MIGRATOR};

use crate::config::AppConfig;
use crate::rate_limit::RateLimiter;
use crate::sanitize::TagStripSanitizer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(filter_fn(|metadata| {
            *metadata.level() <= tracing::Level::INFO
        }));

    tracing_subscriber::registry().with(fmt_layer).init();

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    let connect_options = SqliteConnectOptions::new()
        .filename(&config.database_file)
        .create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;
    info!(path = %config.database_file.display(), "SQLite connection established.");

    MIGRATOR.run(&db_pool).await?;
    info!("Database migrations applied.");

    let db = Database::new(db_pool);

    let gateway = ProviderGateway::from_env(
        Arc::new(TagStripSanitizer),
        RetryPolicy::with_timeout(config.request_timeout),
    );
    for provider in [Provider::Gemini, Provider::OpenRouter] {
        if gateway.is_configured(provider) {
            info!(provider = provider.as_str(), "AI provider configured.");
        } else {
            info!(
                provider = provider.as_str(),
                "AI provider disabled (missing credential)."
            );
        }
    }

    let limiter = RateLimiter::new(config.rate_limit_window, config.rate_limit_per_minute);
    info!(
        window_seconds = config.rate_limit_window.as_secs(),
        max_hits = config.rate_limit_per_minute,
        "Rate limit configured."
    );

    let state = AppState {
        db,
        gateway: Arc::new(gateway),
        limiter: Arc::new(limiter),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(bind_addr = %config.bind_addr, "Study buddy is listening.");
    axum::serve(listener, app).await?;

    Ok(())
}
