//! Delete a course dashboard
//!
//! The dashboard and its class list go away; imported video records stay.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{CourseStore, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDashboardCommand {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDashboardResponse {
    pub id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteDashboardError {
    #[error("Dashboard '{0}' not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for DeleteDashboardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DashboardNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CourseStore,
    command: DeleteDashboardCommand,
) -> Result<DeleteDashboardResponse, DeleteDashboardError> {
    store.delete_dashboard(command.id).await?;
    Ok(DeleteDashboardResponse { id: command.id })
}
