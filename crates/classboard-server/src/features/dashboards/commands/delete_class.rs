//! Delete one class and renumber the ones after it

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    models::{ClassIndexError, ClassRecord},
    store::{CourseStore, StoreError},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteClassCommand {
    pub dashboard_id: Uuid,
    pub class_num: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteClassResponse {
    pub removed: ClassRecord,
    pub number_of_classes: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteClassError {
    #[error("Dashboard '{0}' not found")]
    DashboardNotFound(Uuid),
    #[error(transparent)]
    ClassNotFound(#[from] ClassIndexError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for DeleteClassError {
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
    command: DeleteClassCommand,
) -> Result<DeleteClassResponse, DeleteClassError> {
    let mut dashboard = store.get_dashboard(command.dashboard_id).await?;
    let removed = dashboard.remove_class(command.class_num)?;
    store.save_classes(dashboard.id, &dashboard.classes).await?;

    Ok(DeleteClassResponse {
        removed,
        number_of_classes: dashboard.number_of_classes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestFixture;

    #[tokio::test]
    async fn test_delete_renumbers_remaining_classes() {
        let fixture = TestFixture::new(&["Lecture 1"]);
        let dashboard = fixture.seed_dashboard(Uuid::new_v4()).await;
        let classes: Vec<ClassRecord> = (0..4)
            .map(|i| ClassRecord {
                class_number: i,
                title: Some(format!("Week {}", i + 1)),
                ..Default::default()
            })
            .collect();
        fixture.store.save_classes(dashboard.id, &classes).await.unwrap();

        let response = handle(&*fixture.store, DeleteClassCommand {
            dashboard_id: dashboard.id,
            class_num: 1,
        })
        .await
        .unwrap();
        assert_eq!(response.removed.title.as_deref(), Some("Week 2"));
        assert_eq!(response.number_of_classes, 3);

        let stored = fixture.store.get_dashboard(dashboard.id).await.unwrap();
        let numbers: Vec<u32> = stored.classes.iter().map(|c| c.class_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(stored.classes[1].title.as_deref(), Some("Week 3"));
    }

    #[tokio::test]
    async fn test_out_of_range() {
        let fixture = TestFixture::new(&["Lecture 1"]);
        let dashboard = fixture.seed_dashboard(Uuid::new_v4()).await;

        let result = handle(&*fixture.store, DeleteClassCommand {
            dashboard_id: dashboard.id,
            class_num: 0,
        })
        .await;
        assert!(matches!(result, Err(DeleteClassError::ClassNotFound(_))));
    }
}
