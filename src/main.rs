//! Sales dashboard backend
//!
//! Stores, salespeople and their outreach counters in SQLite, a KPI panel, and per-store
//! PDF reports archived on disk.

mod api;
mod config;
mod dashboard;
mod db;
mod errors;
mod models;
mod report;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use report::ReportStyles;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
    pub styles: Arc<ReportStyles>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting sales dashboard backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Reports directory: {:?}", config.reports_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    tokio::fs::create_dir_all(&config.reports_dir).await?;

    let state = AppState {
        repo,
        styles: Arc::new(ReportStyles::from_config(&config)),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Panel
        .route("/painel", get(api::get_panel))
        // Stores
        .route("/lojas", get(api::list_stores).post(api::create_store))
        .route("/lojas/{id}", get(api::get_store).put(api::update_store))
        // Salespeople
        .route(
            "/vendedores",
            get(api::list_salespeople).post(api::create_salesperson),
        )
        .route("/vendedores/{id}", delete(api::delete_salesperson))
        .route(
            "/vendedores/{id}/status",
            put(api::update_salesperson_status),
        )
        .route("/vendedores/{id}/base", post(api::toggle_base_treated))
        .route(
            "/vendedores/{id}/disparos-dia",
            put(api::update_daily_disparos),
        )
        .route(
            "/vendedores/{id}/disparos",
            get(api::get_weekly_disparos).put(api::upsert_weekly_disparos),
        )
        // Events
        .route("/eventos", get(api::list_events).post(api::create_event))
        // Reports
        .route("/relatorios", post(api::create_report));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
