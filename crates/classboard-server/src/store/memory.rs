//! In-process course store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CourseStore, StoreError, StoreResult};
use crate::models::{
    ClassRecord, Dashboard, DashboardDetails, DashboardSummary, NewDashboard, NewVideo, Video,
    VideoMaterials,
};

/// Dashboard row with ordered video references, mirroring `dashboard_videos`
#[derive(Debug, Clone)]
struct DashboardRecord {
    dashboard: Dashboard,
    video_ids: Vec<Uuid>,
}

#[derive(Debug, Default)]
struct Inner {
    dashboards: HashMap<Uuid, DashboardRecord>,
    videos: HashMap<Uuid, Video>,
}

impl Inner {
    fn hydrate(&self, record: &DashboardRecord) -> StoreResult<Dashboard> {
        let videos = record
            .video_ids
            .iter()
            .map(|id| {
                self.videos
                    .get(id)
                    .cloned()
                    .ok_or_else(|| StoreError::Corrupt(format!("dangling video reference {}", id)))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Dashboard {
            videos,
            ..record.dashboard.clone()
        })
    }

    fn record_mut(&mut self, id: Uuid) -> StoreResult<&mut DashboardRecord> {
        self.dashboards
            .get_mut(&id)
            .ok_or(StoreError::DashboardNotFound(id))
    }
}

/// [`CourseStore`] kept in memory behind a `tokio` lock.
///
/// Every operation takes the lock once, so multi-step writes are atomic.
#[derive(Debug, Default)]
pub struct MemoryCourseStore {
    inner: RwLock<Inner>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn dashboard_count(&self) -> usize {
        self.inner.read().await.dashboards.len()
    }

    pub async fn video_count(&self) -> usize {
        self.inner.read().await.videos.len()
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn create_dashboard(
        &self,
        new: NewDashboard,
        videos: Vec<NewVideo>,
    ) -> StoreResult<Dashboard> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        let videos: Vec<Video> = videos.into_iter().map(NewVideo::into_video).collect();
        let video_ids = videos.iter().map(|v| v.id).collect();
        for video in videos {
            inner.videos.insert(video.id, video);
        }

        let dashboard = Dashboard {
            id: Uuid::new_v4(),
            title: new.title,
            playlist_id: new.playlist_id.into(),
            number_of_classes: 0,
            videos: vec![],
            classes: vec![],
            environment_url: None,
            forum_url: None,
            author_id: new.author_id,
            created_at: now,
            updated_at: now,
        };
        let record = DashboardRecord {
            dashboard,
            video_ids,
        };
        let hydrated = inner.hydrate(&record)?;
        inner.dashboards.insert(hydrated.id, record);
        Ok(hydrated)
    }

    async fn get_dashboard(&self, id: Uuid) -> StoreResult<Dashboard> {
        let inner = self.inner.read().await;
        let record = inner
            .dashboards
            .get(&id)
            .ok_or(StoreError::DashboardNotFound(id))?;
        inner.hydrate(record)
    }

    async fn list_dashboards(
        &self,
        author_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> StoreResult<(Vec<DashboardSummary>, i64)> {
        let inner = self.inner.read().await;
        let mut owned: Vec<_> = inner
            .dashboards
            .values()
            .filter(|r| r.dashboard.author_id == author_id)
            .map(|r| {
                let mut summary = r.dashboard.summary();
                summary.video_count = r.video_ids.len() as i64;
                summary
            })
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = owned.len() as i64;
        let page = owned
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn update_dashboard_details(
        &self,
        id: Uuid,
        details: &DashboardDetails,
    ) -> StoreResult<Dashboard> {
        let mut inner = self.inner.write().await;
        let record = inner.record_mut(id)?;
        details.apply(&mut record.dashboard);
        record.dashboard.updated_at = Utc::now();
        let record = record.clone();
        inner.hydrate(&record)
    }

    async fn delete_dashboard(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .dashboards
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::DashboardNotFound(id))
    }

    async fn append_videos(&self, id: Uuid, videos: Vec<NewVideo>) -> StoreResult<Vec<Video>> {
        let mut inner = self.inner.write().await;
        if !inner.dashboards.contains_key(&id) {
            return Err(StoreError::DashboardNotFound(id));
        }

        let videos: Vec<Video> = videos.into_iter().map(NewVideo::into_video).collect();
        for video in &videos {
            inner.videos.insert(video.id, video.clone());
        }
        let record = inner.record_mut(id)?;
        record.video_ids.extend(videos.iter().map(|v| v.id));
        record.dashboard.updated_at = Utc::now();
        Ok(videos)
    }

    async fn save_classes(&self, id: Uuid, classes: &[ClassRecord]) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let record = inner.record_mut(id)?;
        record.dashboard.classes = classes.to_vec();
        record.dashboard.number_of_classes = classes.len() as i32;
        record.dashboard.updated_at = Utc::now();
        Ok(())
    }

    async fn get_video(&self, id: Uuid) -> StoreResult<Video> {
        let inner = self.inner.read().await;
        inner
            .videos
            .get(&id)
            .cloned()
            .ok_or(StoreError::VideoNotFound(id))
    }

    async fn update_video_materials(
        &self,
        id: Uuid,
        materials: &VideoMaterials,
    ) -> StoreResult<Video> {
        let mut inner = self.inner.write().await;
        let video = inner
            .videos
            .get_mut(&id)
            .ok_or(StoreError::VideoNotFound(id))?;
        materials.apply(video);
        Ok(video.clone())
    }
}
