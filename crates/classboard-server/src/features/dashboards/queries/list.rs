//! List the dashboards of the signed-in author

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    features::shared::{Paginated, PaginationParams},
    models::DashboardSummary,
    store::{CourseStore, StoreError},
};

/// `GET /api/v1/dashboards?page=&per_page=`
///
/// Fields are kept flat: `serde(flatten)` cannot decode numbers from a query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDashboardsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListDashboardsError {
    #[error("{0}")]
    InvalidPagination(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ListDashboardsQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page)
    }

    pub fn validate(&self) -> Result<(), ListDashboardsError> {
        self.pagination()
            .validate()
            .map_err(ListDashboardsError::InvalidPagination)
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CourseStore,
    author_id: Uuid,
    query: ListDashboardsQuery,
) -> Result<Paginated<DashboardSummary>, ListDashboardsError> {
    query.validate()?;
    let params = query.pagination();
    let (items, total) = store
        .list_dashboards(author_id, params.offset(), params.per_page())
        .await?;
    Ok(Paginated::from_items(items, &params, total))
}
