//! Save one class of a dashboard
//!
//! Position `class_num` is replaced when it exists and appended when it equals
//! the current class count. Anything past the end is rejected so the class list
//! stays dense.

use serde::Serialize;
use uuid::Uuid;

use crate::{
    features::shared::{validate_class_materials, MaterialValidationError},
    models::{ClassIndexError, ClassRecord},
    store::{CourseStore, StoreError},
};

#[derive(Debug, Clone, Serialize)]
pub struct SaveClassCommand {
    pub dashboard_id: Uuid,
    pub class_num: usize,
    pub class: ClassRecord,
}

#[derive(Debug, thiserror::Error)]
pub enum SaveClassError {
    #[error(transparent)]
    Material(#[from] MaterialValidationError),
    #[error("Video index {index} is out of range (dashboard has {len} videos)")]
    VideoIndexOutOfRange { index: u32, len: usize },
    #[error("Dashboard '{0}' not found")]
    DashboardNotFound(Uuid),
    #[error(transparent)]
    ClassNotFound(#[from] ClassIndexError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for SaveClassError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DashboardNotFound(id) => Self::DashboardNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl SaveClassCommand {
    pub fn validate(&self) -> Result<(), SaveClassError> {
        validate_class_materials(&self.class)?;
        Ok(())
    }
}

/// Returns the class as stored, with `class_number` set to its position
#[tracing::instrument(skip(store, command), fields(dashboard_id = %command.dashboard_id, class_num = command.class_num))]
pub async fn handle(
    store: &dyn CourseStore,
    command: SaveClassCommand,
) -> Result<ClassRecord, SaveClassError> {
    command.validate()?;

    let mut dashboard = store.get_dashboard(command.dashboard_id).await?;

    if let Some(index) = command.class.video_index {
        if index as usize >= dashboard.videos.len() {
            return Err(SaveClassError::VideoIndexOutOfRange {
                index,
                len: dashboard.videos.len(),
            });
        }
    }

    dashboard.set_class(command.class_num, command.class)?;
    store.save_classes(dashboard.id, &dashboard.classes).await?;

    let saved = dashboard.classes[command.class_num].clone();
    tracing::debug!(classes = dashboard.classes.len(), "Class saved");
    Ok(saved)
}
