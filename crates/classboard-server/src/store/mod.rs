//! Persistence seam for dashboards and videos
//!
//! Handlers and the sync engine only see [`CourseStore`]. Two backends ship
//! with the server: [`PgCourseStore`] for production and [`MemoryCourseStore`]
//! for tests and throwaway local runs.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    ClassRecord, Dashboard, DashboardDetails, DashboardSummary, NewDashboard, NewVideo, Video,
    VideoMaterials,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryCourseStore;
pub use postgres::PgCourseStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dashboard '{0}' not found")]
    DashboardNotFound(Uuid),

    #[error("Video '{0}' not found")]
    VideoNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored data is malformed: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::DashboardNotFound(_) | StoreError::VideoNotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Persist the videos and a new dashboard referencing them, in order,
    /// as one atomic operation
    async fn create_dashboard(
        &self,
        dashboard: NewDashboard,
        videos: Vec<NewVideo>,
    ) -> StoreResult<Dashboard>;

    /// Load a dashboard with its videos in position order
    async fn get_dashboard(&self, id: Uuid) -> StoreResult<Dashboard>;

    /// Dashboards of one author, newest first, with the total count
    async fn list_dashboards(
        &self,
        author_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> StoreResult<(Vec<DashboardSummary>, i64)>;

    async fn update_dashboard_details(
        &self,
        id: Uuid,
        details: &DashboardDetails,
    ) -> StoreResult<Dashboard>;

    /// Remove the dashboard. Its videos stay in the store.
    async fn delete_dashboard(&self, id: Uuid) -> StoreResult<()>;

    /// Persist `videos` and append them after the existing ones, atomically.
    /// Returns the stored videos in the order given.
    async fn append_videos(&self, id: Uuid, videos: Vec<NewVideo>) -> StoreResult<Vec<Video>>;

    /// Replace the whole class list and keep `number_of_classes` in step
    async fn save_classes(&self, id: Uuid, classes: &[ClassRecord]) -> StoreResult<()>;

    async fn get_video(&self, id: Uuid) -> StoreResult<Video>;

    async fn update_video_materials(
        &self,
        id: Uuid,
        materials: &VideoMaterials,
    ) -> StoreResult<Video>;
}
