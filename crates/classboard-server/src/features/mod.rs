//! Feature modules implementing the Classboard API
//!
//! Each feature is a vertical slice:
//! - `commands/` - write operations, one file per command with its own error type
//! - `queries/` - read operations
//! - `routes.rs` - axum handlers and the HTTP error mapping
//!
//! # Features
//!
//! - **dashboards**: playlist import, dashboard display with synchronization,
//!   class and video material editing, lesson view

pub mod dashboards;
pub mod shared;

use std::sync::Arc;

use axum::Router;

use crate::{provider::PlaylistProvider, store::CourseStore, sync::SyncEngine};

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub store: Arc<dyn CourseStore>,
    pub provider: Arc<dyn PlaylistProvider>,
    pub sync: SyncEngine,
    /// Page size requested from the provider
    pub max_results: u32,
}

impl FeatureState {
    pub fn new(
        store: Arc<dyn CourseStore>,
        provider: Arc<dyn PlaylistProvider>,
        max_results: u32,
    ) -> Self {
        let sync = SyncEngine::new(store.clone(), provider.clone(), max_results);
        Self {
            store,
            provider,
            sync,
            max_results,
        }
    }
}

/// Mount every feature router under its path prefix:
/// - `/dashboards` - course dashboards
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().nest("/dashboards", dashboards::dashboards_routes().with_state(state))
}
