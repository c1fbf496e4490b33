//! Update the material fields of one dashboard video
//!
//! Only `support_material`, `in_class_exercises` and `out_of_class_exercises`
//! are writable; title and provider id are owned by the playlist.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    models::{Video, VideoMaterials},
    store::{CourseStore, StoreError},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVideoCommand {
    #[serde(skip)]
    pub dashboard_id: Uuid,
    #[serde(skip)]
    pub video_id: Uuid,
    #[serde(flatten)]
    pub materials: VideoMaterials,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateVideoError {
    #[error("At least one of support_material, in_class_exercises or out_of_class_exercises must be provided")]
    NoFieldsToUpdate,
    #[error("Dashboard '{0}' not found")]
    DashboardNotFound(Uuid),
    #[error("Video '{video_id}' is not part of dashboard '{dashboard_id}'")]
    VideoNotFound { dashboard_id: Uuid, video_id: Uuid },
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for UpdateVideoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DashboardNotFound(id) => Self::DashboardNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl UpdateVideoCommand {
    pub fn validate(&self) -> Result<(), UpdateVideoError> {
        if self.materials.is_empty() {
            return Err(UpdateVideoError::NoFieldsToUpdate);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CourseStore,
    command: UpdateVideoCommand,
) -> Result<Video, UpdateVideoError> {
    command.validate()?;

    let not_in_dashboard = || UpdateVideoError::VideoNotFound {
        dashboard_id: command.dashboard_id,
        video_id: command.video_id,
    };

    let dashboard = store.get_dashboard(command.dashboard_id).await?;
    if !dashboard.videos.iter().any(|v| v.id == command.video_id) {
        return Err(not_in_dashboard());
    }

    store
        .update_video_materials(command.video_id, &command.materials)
        .await
        .map_err(|e| match e {
            StoreError::VideoNotFound(_) => not_in_dashboard(),
            other => other.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestFixture;

    #[test]
    fn test_body_ignores_non_whitelisted_fields() {
        let cmd: UpdateVideoCommand = serde_json::from_value(serde_json::json!({
            "title": "Hijacked",
            "item_id": "other",
            "support_material": "Slides"
        }))
        .unwrap();
        assert_eq!(cmd.materials.support_material.as_deref(), Some("Slides"));
        assert!(cmd.materials.in_class_exercises.is_none());
    }

    #[test]
    fn test_validation_no_fields() {
        let cmd = UpdateVideoCommand::default();
        assert!(matches!(cmd.validate(), Err(UpdateVideoError::NoFieldsToUpdate)));
    }

    #[tokio::test]
    async fn test_updates_only_material_fields() {
        let fixture = TestFixture::new(&["Lecture 1", "Lecture 2"]);
        let dashboard = fixture.seed_dashboard(Uuid::new_v4()).await;
        let target = dashboard.videos[1].clone();

        let video = handle(&*fixture.store, UpdateVideoCommand {
            dashboard_id: dashboard.id,
            video_id: target.id,
            materials: VideoMaterials {
                support_material: Some("Slides".to_string()),
                in_class_exercises: Some("Exercise 2.1".to_string()),
                out_of_class_exercises: Some("Homework 2".to_string()),
            },
        })
        .await
        .unwrap();

        assert_eq!(video.title, target.title);
        assert_eq!(video.item_id, target.item_id);
        assert_eq!(video.created_at, target.created_at);
        assert_eq!(video.support_material.as_deref(), Some("Slides"));
        assert_eq!(video.in_class_exercises.as_deref(), Some("Exercise 2.1"));
        assert_eq!(video.out_of_class_exercises.as_deref(), Some("Homework 2"));

        let untouched = fixture.store.get_video(dashboard.videos[0].id).await.unwrap();
        assert_eq!(untouched, dashboard.videos[0]);
    }

    #[tokio::test]
    async fn test_video_from_another_dashboard() {
        let fixture = TestFixture::new(&["Lecture 1"]);
        let first = fixture.seed_dashboard(Uuid::new_v4()).await;
        let second = fixture.seed_dashboard(Uuid::new_v4()).await;

        let result = handle(&*fixture.store, UpdateVideoCommand {
            dashboard_id: first.id,
            video_id: second.videos[0].id,
            materials: VideoMaterials {
                support_material: Some("Slides".to_string()),
                ..Default::default()
            },
        })
        .await;
        assert!(matches!(result, Err(UpdateVideoError::VideoNotFound { .. })));
    }
}
