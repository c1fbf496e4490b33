//! Lesson view: one dashboard video with its chapter markers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    features::FeatureState,
    models::{Dashboard, Video},
    provider::Chapter,
    store::StoreError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLessonQuery {
    pub id: Uuid,
    pub video_index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonResponse {
    pub dashboard: Dashboard,
    pub video_index: usize,
    pub video: Video,
    /// Empty when the video has no chapters or they could not be fetched
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetLessonError {
    #[error("Dashboard '{0}' not found")]
    NotFound(Uuid),
    #[error("Video index {index} is out of range (dashboard has {len} videos)")]
    VideoIndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GetLessonError {
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
    query: GetLessonQuery,
) -> Result<LessonResponse, GetLessonError> {
    let dashboard = state.store.get_dashboard(query.id).await?;
    let video = dashboard
        .videos
        .get(query.video_index)
        .cloned()
        .ok_or(GetLessonError::VideoIndexOutOfRange {
            index: query.video_index,
            len: dashboard.videos.len(),
        })?;

    let chapters = match state.provider.video_chapters(&video.item_id).await {
        Ok(chapters) => chapters,
        Err(e) => {
            tracing::warn!(item_id = %video.item_id, error = %e, "Could not load chapters");
            Vec::new()
        },
    };

    Ok(LessonResponse {
        dashboard,
        video_index: query.video_index,
        video,
        chapters,
    })
}
