//! Update the editable dashboard details
//!
//! Only `title`, `environment_url` and `forum_url` can change. Omitted fields
//! keep their stored value; an empty URL clears it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    features::shared::{validate_optional_url, validate_title, TitleValidationError, UrlValidationError},
    models::{Dashboard, DashboardDetails},
    store::{CourseStore, StoreError},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDashboardCommand {
    #[serde(skip)]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateDashboardError {
    #[error("At least one of title, environment_url or forum_url must be provided")]
    NoFieldsToUpdate,
    #[error(transparent)]
    Title(#[from] TitleValidationError),
    #[error(transparent)]
    Url(#[from] UrlValidationError),
    #[error("Dashboard '{0}' not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for UpdateDashboardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DashboardNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl UpdateDashboardCommand {
    fn details(&self) -> DashboardDetails {
        DashboardDetails {
            title: self.title.as_ref().map(|t| t.trim().to_string()),
            environment_url: self.environment_url.as_ref().map(|u| u.trim().to_string()),
            forum_url: self.forum_url.as_ref().map(|u| u.trim().to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), UpdateDashboardError> {
        let details = self.details();
        if details.is_empty() {
            return Err(UpdateDashboardError::NoFieldsToUpdate);
        }
        if let Some(title) = &details.title {
            validate_title(title)?;
        }
        validate_optional_url(details.environment_url.as_deref(), "Environment")?;
        validate_optional_url(details.forum_url.as_deref(), "Forum")?;
        Ok(())
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CourseStore,
    command: UpdateDashboardCommand,
) -> Result<Dashboard, UpdateDashboardError> {
    command.validate()?;
    let dashboard = store
        .update_dashboard_details(command.id, &command.details())
        .await?;
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestFixture;

    #[test]
    fn test_validation_no_fields() {
        let cmd = UpdateDashboardCommand::default();
        assert!(matches!(cmd.validate(), Err(UpdateDashboardError::NoFieldsToUpdate)));
    }

    #[test]
    fn test_validation_bad_urls_and_title() {
        let cmd = UpdateDashboardCommand {
            environment_url: Some("moodle".to_string()),
            ..Default::default()
        };
        assert!(matches!(cmd.validate(), Err(UpdateDashboardError::Url(_))));

        let cmd = UpdateDashboardCommand {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(cmd.validate(), Err(UpdateDashboardError::Title(_))));
    }

    #[tokio::test]
    async fn test_handle_updates_only_given_fields() {
        let fixture = TestFixture::new(&["Lecture 1"]);
        let dashboard = fixture.seed_dashboard(Uuid::new_v4()).await;

        let cmd = UpdateDashboardCommand {
            id: dashboard.id,
            environment_url: Some("https://moodle.example.edu/course/1".to_string()),
            ..Default::default()
        };
        let updated = handle(&*fixture.store, cmd).await.unwrap();

        assert_eq!(updated.title, dashboard.title);
        assert_eq!(
            updated.environment_url.as_deref(),
            Some("https://moodle.example.edu/course/1")
        );
        assert_eq!(updated.videos, dashboard.videos);
    }

    #[tokio::test]
    async fn test_handle_not_found() {
        let fixture = TestFixture::new(&[]);
        let cmd = UpdateDashboardCommand {
            id: Uuid::new_v4(),
            title: Some("New title".to_string()),
            ..Default::default()
        };
        let result = handle(&*fixture.store, cmd).await;
        assert!(matches!(result, Err(UpdateDashboardError::NotFound(_))));
    }
}
