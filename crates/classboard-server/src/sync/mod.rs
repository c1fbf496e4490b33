//! Playlist synchronization and import
//!
//! Local video lists are prefix-stable: synchronization compares the stored
//! length with the provider's total and appends only the missing tail.
//! Upstream removals and reorderings are never reconciled.

use std::sync::Arc;

use classboard_common::{types::PlaylistId, ClassboardError};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{Dashboard, NewDashboard, NewVideo},
    provider::{PlaylistProvider, ProviderError},
    store::{CourseStore, StoreError},
};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Playlist URL has no 'list' parameter: {0}")]
    InvalidPlaylistUrl(String),

    #[error("Invalid playlist: '{0}'")]
    InvalidPlaylist(String),

    #[error(transparent)]
    Provider(ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ClassboardError> for SyncError {
    fn from(err: ClassboardError) -> Self {
        match err {
            ClassboardError::InvalidPlaylistUrl(url) => SyncError::InvalidPlaylistUrl(url),
            ClassboardError::InvalidPlaylist(id) => SyncError::InvalidPlaylist(id),
        }
    }
}

impl From<ProviderError> for SyncError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UnknownPlaylist(id) => SyncError::InvalidPlaylist(id),
            other => SyncError::Provider(other),
        }
    }
}

/// What a synchronization pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    /// Stored video count before the pass
    pub previous_len: usize,
    /// Playlist length reported by the provider
    pub provider_total: usize,
    pub appended: usize,
}

impl SyncOutcome {
    pub fn current_len(&self) -> usize {
        self.previous_len + self.appended
    }
}

/// Reconciles dashboards with their provider playlist
#[derive(Clone)]
pub struct SyncEngine {
    store: Arc<dyn CourseStore>,
    provider: Arc<dyn PlaylistProvider>,
    max_results: u32,
}

impl SyncEngine {
    pub fn new(
        store: Arc<dyn CourseStore>,
        provider: Arc<dyn PlaylistProvider>,
        max_results: u32,
    ) -> Self {
        Self {
            store,
            provider,
            max_results,
        }
    }

    /// Append newly discovered provider videos to `dashboard`.
    ///
    /// On success `dashboard.videos` holds the stored sequence, so callers
    /// can render it without reloading. On error nothing is persisted and
    /// the dashboard is left as it was.
    #[tracing::instrument(skip(self, dashboard), fields(dashboard_id = %dashboard.id))]
    pub async fn synchronize(&self, dashboard: &mut Dashboard) -> Result<SyncOutcome, SyncError> {
        let playlist_id = PlaylistId::parse(dashboard.playlist_id.as_str())?;
        let page = self.provider.list_items(&playlist_id, self.max_results).await?;

        let previous_len = dashboard.videos.len();
        let provider_total = page.total_results as usize;
        let mut outcome = SyncOutcome {
            previous_len,
            provider_total,
            appended: 0,
        };

        if provider_total <= previous_len {
            tracing::debug!(previous_len, provider_total, "Dashboard is up to date");
            return Ok(outcome);
        }

        let new_videos: Vec<NewVideo> = page
            .items
            .into_iter()
            .skip(previous_len)
            .take(provider_total - previous_len)
            .map(NewVideo::from)
            .collect();

        if previous_len + new_videos.len() < provider_total {
            tracing::warn!(
                previous_len,
                provider_total,
                available = new_videos.len(),
                max_results = self.max_results,
                "Playlist is longer than one provider page; videos past it are not synchronized"
            );
        }

        if new_videos.is_empty() {
            return Ok(outcome);
        }

        let appended = self.store.append_videos(dashboard.id, new_videos).await?;
        outcome.appended = appended.len();
        dashboard.videos.extend(appended);

        tracing::info!(
            previous_len,
            provider_total,
            appended = outcome.appended,
            "Appended new playlist videos"
        );
        Ok(outcome)
    }

    /// Create a dashboard from a provider playlist URL.
    ///
    /// Videos and dashboard are persisted in one store operation, after every
    /// provider call succeeded.
    #[tracing::instrument(skip(self))]
    pub async fn import_playlist(
        &self,
        playlist_url: &str,
        author_id: Uuid,
    ) -> Result<Dashboard, SyncError> {
        let playlist_id = PlaylistId::from_url(playlist_url)?;

        let meta = self.provider.playlist_meta(&playlist_id).await?;
        let page = self.provider.list_items(&playlist_id, self.max_results).await?;

        if (page.items.len() as u32) < page.total_results {
            tracing::warn!(
                playlist_id = %playlist_id,
                provider_total = page.total_results,
                available = page.items.len(),
                "Playlist is longer than one provider page; only the first page is imported"
            );
        }

        let videos: Vec<NewVideo> = page.items.into_iter().map(NewVideo::from).collect();
        let dashboard = self
            .store
            .create_dashboard(
                NewDashboard {
                    title: meta.title,
                    playlist_id,
                    author_id,
                },
                videos,
            )
            .await?;

        tracing::info!(
            dashboard_id = %dashboard.id,
            video_count = dashboard.videos.len(),
            "Imported playlist"
        );
        Ok(dashboard)
    }
}
