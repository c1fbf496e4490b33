//! Import a provider playlist as a new course dashboard

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    features::FeatureState,
    models::Dashboard,
    provider::ProviderError,
    store::StoreError,
    sync::SyncError,
};

/// Request body of `POST /api/v1/dashboards`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDashboardCommand {
    pub playlist_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateDashboardError {
    #[error("Playlist URL is required")]
    PlaylistUrlRequired,
    #[error("Playlist URL has no 'list' parameter: {0}")]
    InvalidPlaylistUrl(String),
    #[error("Invalid playlist: '{0}'")]
    InvalidPlaylist(String),
    #[error(transparent)]
    Provider(ProviderError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<SyncError> for CreateDashboardError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::InvalidPlaylistUrl(url) => Self::InvalidPlaylistUrl(url),
            SyncError::InvalidPlaylist(id) => Self::InvalidPlaylist(id),
            SyncError::Provider(e) => Self::Provider(e),
            SyncError::Store(e) => Self::Store(e),
        }
    }
}

impl CreateDashboardCommand {
    pub fn validate(&self) -> Result<(), CreateDashboardError> {
        if self.playlist_url.trim().is_empty() {
            return Err(CreateDashboardError::PlaylistUrlRequired);
        }
        Ok(())
    }
}

/// Fetch the playlist and persist it with its videos for `author_id`
#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    author_id: Uuid,
    command: CreateDashboardCommand,
) -> Result<Dashboard, CreateDashboardError> {
    command.validate()?;
    let dashboard = state
        .sync
        .import_playlist(command.playlist_url.trim(), author_id)
        .await?;
    Ok(dashboard)
}
