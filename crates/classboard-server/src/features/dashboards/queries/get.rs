//! Show a dashboard
//!
//! Showing a dashboard first synchronizes it with the provider playlist, so
//! newly published videos appear without a separate refresh step.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    features::FeatureState,
    models::Dashboard,
    provider::ProviderError,
    store::StoreError,
    sync::{SyncError, SyncOutcome},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDashboardQuery {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowDashboardResponse {
    pub dashboard: Dashboard,
    /// Some class material is hosted outside the course environment
    pub has_external_material: bool,
    pub sync: SyncOutcome,
}

#[derive(Debug, thiserror::Error)]
pub enum GetDashboardError {
    #[error("Dashboard '{0}' not found")]
    NotFound(Uuid),
    #[error("Dashboard has an invalid playlist: '{0}'")]
    InvalidPlaylist(String),
    #[error(transparent)]
    Provider(ProviderError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GetDashboardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DashboardNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<SyncError> for GetDashboardError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::InvalidPlaylistUrl(value) | SyncError::InvalidPlaylist(value) => {
                Self::InvalidPlaylist(value)
            },
            SyncError::Provider(e) => Self::Provider(e),
            SyncError::Store(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    query: GetDashboardQuery,
) -> Result<ShowDashboardResponse, GetDashboardError> {
    let mut dashboard = state.store.get_dashboard(query.id).await?;
    let sync = state.sync.synchronize(&mut dashboard).await?;

    let has_external_material = dashboard.has_external_material();
    if has_external_material {
        tracing::debug!(dashboard_id = %dashboard.id, "Dashboard links material outside its environment");
    }

    Ok(ShowDashboardResponse {
        dashboard,
        has_external_material,
        sync,
    })
}
