//! Climate API Server
//!
//! Read-only REST API over the historical precipitation and temperature
//! dataset.

use axum::{http::HeaderValue, routing::get, Router};
use date_validator::IsoDate;
use std::net::SocketAddr;
use std::sync::Arc;
use storage::ClimateStore;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod settings;
mod error;
pub mod rate_limit;
mod routes;


pub use settings::{AppConfig, LoggingConfig, QueryConfig, ServerConfig};
pub use error::{ApiError, ErrorResponse, StartupError};

/// Application state shared across handlers
pub struct AppState {
    /// Dataset accessor
    pub store: ClimateStore,
    /// First date of the trailing twelve month window
    pub cutoff: IsoDate,
    /// Station served by the tobs route
    pub tobs_station: String,
}

impl AppState {
    /// Create application state, resolving the query window
    pub fn new(store: ClimateStore, queries: &QueryConfig) -> Result<Self, StartupError> {
        let cutoff = queries.cutoff().ok_or(StartupError::Cutoff {
            reference_date: queries.reference_date,
            lookback_days: queries.lookback_days,
        })?;

        Ok(Self {
            store,
            cutoff,
            tobs_station: queries.tobs_station.clone(),
        })
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home::index))
        .route("/api/v1.0/precipitation", get(routes::precipitation::get_precipitation))
        .route("/api/v1.0/stations", get(routes::stations::get_stations))
        .route("/api/v1.0/tobs", get(routes::tobs::get_tobs))
        .route("/api/v1.0/:start", get(routes::temperature::get_stats_since))
        .route("/api/v1.0/:start/:end", get(routes::temperature::get_stats_between))
        .with_state(state)
}

/// Router with tracing, CORS and optional rate limiting applied
pub fn build_app(state: Arc<AppState>, config: &AppConfig) -> Result<Router, StartupError> {
    let cors = if config.server.cors_origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any)
    } else {
        let origins: Vec<_> = config
            .server
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {}", origin);
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
    };

    let mut app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    if config.rate_limit.enabled {
        let governor = rate_limit::create_governor_config(&config.rate_limit)?;
        info!(
            "Rate limiting enabled: burst {}, replenish every {}s",
            config.rate_limit.burst_size, config.rate_limit.per_second
        );
        app = app.layer(GovernorLayer { config: governor });
    }

    Ok(app)
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), StartupError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| StartupError::LogLevel(config.level.clone()))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

/// Open the dataset and serve until interrupted
pub async fn run_server(config: AppConfig) -> Result<(), StartupError> {
    let store = ClimateStore::open(&config.database.path).await?;
    let state = Arc::new(AppState::new(store, &config.queries)?);
    info!(
        "Trailing window starts {}, tobs station {}",
        state.cutoff, state.tobs_station
    );

    let app = build_app(state, &config)?;

    let addr = config.server.socket_addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
