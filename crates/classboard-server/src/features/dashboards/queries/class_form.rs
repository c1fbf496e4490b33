//! Data for editing one class
//!
//! Besides the stored class, the form offers the live provider playlist so
//! the instructor can bind the class to any currently published video.

use classboard_common::types::PlaylistId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    features::FeatureState,
    models::{ClassIndexError, ClassRecord, Dashboard},
    provider::{PlaylistItem, ProviderError},
    store::StoreError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetClassFormQuery {
    pub id: Uuid,
    pub class_num: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassFormResponse {
    pub dashboard: Dashboard,
    pub class_num: usize,
    /// `None` when `class_num` is the next free position
    pub class: Option<ClassRecord>,
    pub provider_videos: Vec<PlaylistItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetClassFormError {
    #[error("Dashboard '{0}' not found")]
    NotFound(Uuid),
    #[error(transparent)]
    ClassNotFound(#[from] ClassIndexError),
    #[error("Dashboard has an invalid playlist: '{0}'")]
    InvalidPlaylist(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GetClassFormError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DashboardNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    query: GetClassFormQuery,
) -> Result<ClassFormResponse, GetClassFormError> {
    let dashboard = state.store.get_dashboard(query.id).await?;
    if query.class_num > dashboard.classes.len() {
        return Err(ClassIndexError {
            index: query.class_num,
            len: dashboard.classes.len(),
        }
        .into());
    }

    let playlist_id = PlaylistId::parse(dashboard.playlist_id.as_str())
        .map_err(|_| GetClassFormError::InvalidPlaylist(dashboard.playlist_id.clone()))?;
    let page = state
        .provider
        .list_items(&playlist_id, state.max_results)
        .await?;

    Ok(ClassFormResponse {
        class: dashboard.class(query.class_num).cloned(),
        class_num: query.class_num,
        provider_videos: page.items,
        dashboard,
    })
}
