//! HTTP middleware for the Classboard server
//!
//! - CORS for the dashboard front end
//! - Request tracing
//! - [`auth::AuthUser`], the authenticated-author extractor

use axum::http::{header, HeaderName, Method};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::CorsConfig;

pub mod auth;

pub use auth::{AuthUser, USER_ID_HEADER};

/// Create CORS layer from configuration
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .expose_headers([header::LOCATION])
        .max_age(Duration::from_secs(3600));

    let wildcard =
        config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*");
    if wildcard {
        // Credentials cannot be combined with a wildcard origin
        return cors.allow_origin(Any);
    }

    let origins: Vec<_> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    cors.allow_origin(origins)
        .allow_credentials(config.allow_credentials)
}

/// Create tracing/logging layer
pub fn tracing_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Micros),
        )
}
