//! PostgreSQL course store
//!
//! Dashboards live in `dashboards` with their classes embedded as JSONB.
//! Videos live in `videos` and are linked through `dashboard_videos`, whose
//! dense `position` column fixes the playlist order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{CourseStore, StoreError, StoreResult};
use crate::models::{
    ClassRecord, Dashboard, DashboardDetails, DashboardSummary, NewDashboard, NewVideo, Video,
    VideoMaterials,
};

#[derive(Debug, FromRow)]
struct DashboardRow {
    id: Uuid,
    title: String,
    playlist_id: String,
    number_of_classes: i32,
    classes: Json<Vec<ClassRecord>>,
    environment_url: Option<String>,
    forum_url: Option<String>,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DashboardRow {
    fn into_dashboard(self, videos: Vec<Video>) -> Dashboard {
        Dashboard {
            id: self.id,
            title: self.title,
            playlist_id: self.playlist_id,
            number_of_classes: self.number_of_classes,
            videos,
            classes: self.classes.0,
            environment_url: self.environment_url,
            forum_url: self.forum_url,
            author_id: self.author_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const DASHBOARD_COLUMNS: &str = "id, title, playlist_id, number_of_classes, classes, \
     environment_url, forum_url, author_id, created_at, updated_at";

const VIDEO_COLUMNS: &str = "id, title, item_id, support_material, in_class_exercises, \
     out_of_class_exercises, created_at";

/// [`CourseStore`] backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_videos(
        tx: &mut Transaction<'_, Postgres>,
        dashboard_id: Uuid,
        first_position: i32,
        videos: Vec<NewVideo>,
    ) -> StoreResult<Vec<Video>> {
        let mut stored = Vec::with_capacity(videos.len());
        for (offset, new_video) in videos.into_iter().enumerate() {
            let video = new_video.into_video();
            let query = format!(
                "INSERT INTO videos ({VIDEO_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 RETURNING {VIDEO_COLUMNS}"
            );
            let video = sqlx::query_as::<_, Video>(&query)
                .bind(video.id)
                .bind(&video.title)
                .bind(&video.item_id)
                .bind(&video.support_material)
                .bind(&video.in_class_exercises)
                .bind(&video.out_of_class_exercises)
                .bind(video.created_at)
                .fetch_one(&mut **tx)
                .await?;

            sqlx::query(
                "INSERT INTO dashboard_videos (dashboard_id, position, video_id) VALUES ($1, $2, $3)",
            )
            .bind(dashboard_id)
            .bind(first_position + offset as i32)
            .bind(video.id)
            .execute(&mut **tx)
            .await?;

            stored.push(video);
        }
        Ok(stored)
    }

    async fn load_videos(&self, dashboard_id: Uuid) -> StoreResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT v.id, v.title, v.item_id, v.support_material, v.in_class_exercises,
                   v.out_of_class_exercises, v.created_at
            FROM dashboard_videos dv
            JOIN videos v ON v.id = dv.video_id
            WHERE dv.dashboard_id = $1
            ORDER BY dv.position
            "#,
        )
        .bind(dashboard_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(videos)
    }
}

#[async_trait]
impl CourseStore for PgCourseStore {
    #[tracing::instrument(skip(self, videos), fields(video_count = videos.len()))]
    async fn create_dashboard(
        &self,
        new: NewDashboard,
        videos: Vec<NewVideo>,
    ) -> StoreResult<Dashboard> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "INSERT INTO dashboards (id, title, playlist_id, number_of_classes, classes, author_id) \
             VALUES ($1, $2, $3, 0, '[]'::jsonb, $4) RETURNING {DASHBOARD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, DashboardRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&new.title)
            .bind(new.playlist_id.as_str())
            .bind(new.author_id)
            .fetch_one(&mut *tx)
            .await?;

        let videos = Self::insert_videos(&mut tx, row.id, 0, videos).await?;
        tx.commit().await?;

        Ok(row.into_dashboard(videos))
    }

    async fn get_dashboard(&self, id: Uuid) -> StoreResult<Dashboard> {
        let query = format!("SELECT {DASHBOARD_COLUMNS} FROM dashboards WHERE id = $1");
        let row = sqlx::query_as::<_, DashboardRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::DashboardNotFound(id))?;

        let videos = self.load_videos(id).await?;
        Ok(row.into_dashboard(videos))
    }

    async fn list_dashboards(
        &self,
        author_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> StoreResult<(Vec<DashboardSummary>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dashboards WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, DashboardSummary>(
            r#"
            SELECT d.id, d.title, d.playlist_id, d.number_of_classes, d.created_at, d.updated_at,
                   (SELECT COUNT(*) FROM dashboard_videos dv WHERE dv.dashboard_id = d.id) AS video_count
            FROM dashboards d
            WHERE d.author_id = $1
            ORDER BY d.created_at DESC, d.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((items, total))
    }

    async fn update_dashboard_details(
        &self,
        id: Uuid,
        details: &DashboardDetails,
    ) -> StoreResult<Dashboard> {
        let updated = sqlx::query(
            r#"
            UPDATE dashboards
            SET title = COALESCE($2, title),
                environment_url = CASE WHEN $3::text IS NULL THEN environment_url ELSE NULLIF($3, '') END,
                forum_url = CASE WHEN $4::text IS NULL THEN forum_url ELSE NULLIF($4, '') END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&details.title)
        .bind(&details.environment_url)
        .bind(&details.forum_url)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::DashboardNotFound(id));
        }
        self.get_dashboard(id).await
    }

    async fn delete_dashboard(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM dashboards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DashboardNotFound(id));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, videos), fields(video_count = videos.len()))]
    async fn append_videos(&self, id: Uuid, videos: Vec<NewVideo>) -> StoreResult<Vec<Video>> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent appends to the same dashboard
        let exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM dashboards WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(StoreError::DashboardNotFound(id));
        }

        let next_position: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM dashboard_videos WHERE dashboard_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let stored = Self::insert_videos(&mut tx, id, next_position, videos).await?;

        sqlx::query("UPDATE dashboards SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn save_classes(&self, id: Uuid, classes: &[ClassRecord]) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE dashboards SET classes = $2, number_of_classes = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(Json(classes.to_vec()))
        .bind(classes.len() as i32)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DashboardNotFound(id));
        }
        Ok(())
    }

    async fn get_video(&self, id: Uuid) -> StoreResult<Video> {
        let query = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::VideoNotFound(id))
    }

    async fn update_video_materials(
        &self,
        id: Uuid,
        materials: &VideoMaterials,
    ) -> StoreResult<Video> {
        let query = format!(
            r#"
            UPDATE videos
            SET support_material = CASE WHEN $2::text IS NULL THEN support_material ELSE NULLIF($2, '') END,
                in_class_exercises = CASE WHEN $3::text IS NULL THEN in_class_exercises ELSE NULLIF($3, '') END,
                out_of_class_exercises = CASE WHEN $4::text IS NULL THEN out_of_class_exercises ELSE NULLIF($4, '') END
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&materials.support_material)
            .bind(&materials.in_class_exercises)
            .bind(&materials.out_of_class_exercises)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::VideoNotFound(id))
    }
}
