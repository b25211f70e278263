//! Teleporter API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use teleporter_api::config::ApiConfig;
use teleporter_api::error::AppError;
use teleporter_api::notify::TracingNotifier;
use teleporter_api::routes;
use teleporter_api::state::AppState;
use teleporter_core::clock::SystemClock;
use teleporter_store::pg_group_registry::PgGroupRegistry;
use teleporter_store::pg_scene_store::PgSceneStore;
use teleporter_store::schema::MIGRATOR;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting teleporter API server");

    let config = ApiConfig::from_env()?;

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    MIGRATOR.run(&pool).await?;

    // Build application state.
    let app_state = AppState::new(
        Arc::new(PgSceneStore::new(pool.clone())),
        Arc::new(PgGroupRegistry::new(pool)),
        Arc::new(SystemClock),
        Arc::new(TracingNotifier),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr = config.listen_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
