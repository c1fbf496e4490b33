//! Data for editing the materials of one video

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    models::{DashboardSummary, Video},
    store::{CourseStore, StoreError},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetVideoQuery {
    pub dashboard_id: Uuid,
    pub video_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoFormResponse {
    pub dashboard: DashboardSummary,
    pub video: Video,
}

#[derive(Debug, thiserror::Error)]
pub enum GetVideoError {
    #[error("Dashboard '{0}' not found")]
    DashboardNotFound(Uuid),
    #[error("Video '{video_id}' is not part of dashboard '{dashboard_id}'")]
    VideoNotFound { dashboard_id: Uuid, video_id: Uuid },
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GetVideoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DashboardNotFound(id) => Self::DashboardNotFound(id),
            other => Self::Store(other),
        }
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CourseStore,
    query: GetVideoQuery,
) -> Result<VideoFormResponse, GetVideoError> {
    let dashboard = store.get_dashboard(query.dashboard_id).await?;
    let video = dashboard
        .videos
        .iter()
        .find(|v| v.id == query.video_id)
        .cloned()
        .ok_or(GetVideoError::VideoNotFound {
            dashboard_id: query.dashboard_id,
            video_id: query.video_id,
        })?;

    Ok(VideoFormResponse {
        dashboard: dashboard.summary(),
        video,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestFixture;

    #[tokio::test]
    async fn test_returns_video_with_dashboard_summary() {
        let fixture = TestFixture::new(&["Lecture 1", "Lecture 2"]);
        let dashboard = fixture.seed_dashboard(Uuid::new_v4()).await;

        let response = handle(&*fixture.store, GetVideoQuery {
            dashboard_id: dashboard.id,
            video_id: dashboard.videos[1].id,
        })
        .await
        .unwrap();
        assert_eq!(response.video.title, "Lecture 2");
        assert_eq!(response.dashboard.id, dashboard.id);
        assert_eq!(response.dashboard.video_count, 2);
    }

    #[tokio::test]
    async fn test_unknown_video() {
        let fixture = TestFixture::new(&["Lecture 1"]);
        let dashboard = fixture.seed_dashboard(Uuid::new_v4()).await;

        let result = handle(&*fixture.store, GetVideoQuery {
            dashboard_id: dashboard.id,
            video_id: Uuid::new_v4(),
        })
        .await;
        assert!(matches!(result, Err(GetVideoError::VideoNotFound { .. })));
    }
}
