//! HTTP surface: router assembly, state construction and the serve loop

pub mod response;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tokio::signal;
use tower_http::compression::CompressionLayer;

use crate::{
    config::{Config, CorsConfig, StoreBackend},
    db,
    error::ServerResult,
    features::{self, FeatureState},
    middleware,
    provider::{PlaylistProvider, YouTubeClient},
    store::{CourseStore, MemoryCourseStore, PgCourseStore},
};

/// Application state shared across top-level handlers
#[derive(Clone)]
pub struct AppState {
    pub features: FeatureState,
    /// Present only for the PostgreSQL backend
    pub db: Option<PgPool>,
}

/// Wire the configured store and the YouTube client together
pub async fn build_state(config: &Config) -> ServerResult<AppState> {
    let provider: Arc<dyn PlaylistProvider> = Arc::new(YouTubeClient::new(&config.provider)?);

    let (store, db): (Arc<dyn CourseStore>, Option<PgPool>) = match config.store {
        StoreBackend::Postgres => {
            let pool = db::create_pool(&config.database).await?;
            db::run_migrations(&pool).await?;
            (Arc::new(PgCourseStore::new(pool.clone())), Some(pool))
        },
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; dashboards are lost on restart");
            (Arc::new(MemoryCourseStore::new()), None)
        },
    };

    Ok(AppState {
        features: FeatureState::new(store, provider, config.provider.max_results),
        db,
    })
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = build_state(&config).await?;
    let app = create_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let feature_routes = features::router(state.features.clone());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .with_state(state)
        .nest("/api/v1", feature_routes)
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Classboard Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health_check(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let Some(pool) = state.db.as_ref() else {
        return Ok(Json(json!({ "status": "healthy", "store": "memory" })).into_response());
    };

    match db::health_check(pool).await {
        Ok(()) => Ok(Json(json!({
            "status": "healthy",
            "store": "postgres",
            "database": "connected"
        }))
        .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received terminate signal, starting graceful shutdown"),
    }

    tracing::info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
