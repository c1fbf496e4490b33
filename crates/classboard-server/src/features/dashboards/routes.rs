//! Course dashboard API routes
//!
//! # Route Structure
//!
//! - `GET /api/v1/dashboards` - List the signed-in author's dashboards
//! - `POST /api/v1/dashboards` - Import a playlist as a new dashboard
//! - `GET /api/v1/dashboards/:id` - Show a dashboard (synchronizes it first)
//! - `PUT /api/v1/dashboards/:id` - Update title, environment and forum URLs
//! - `DELETE /api/v1/dashboards/:id` - Delete a dashboard
//! - `GET|PUT|DELETE /api/v1/dashboards/:id/classes/:class_num` - Class form, save, delete
//! - `GET|PUT /api/v1/dashboards/:id/videos/:video_id` - Video material form and update
//! - `GET /api/v1/dashboards/:id/lessons/:video_index` - Lesson view with chapters
//!
//! Write endpoints report a user-facing status message in `meta.message` and
//! the resource to show next in `meta.redirect`.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use super::{
    commands::{
        CreateDashboardCommand, CreateDashboardError, DeleteClassCommand, DeleteClassError,
        DeleteDashboardCommand, DeleteDashboardError, SaveClassCommand, SaveClassError,
        UpdateDashboardCommand, UpdateDashboardError, UpdateVideoCommand, UpdateVideoError,
    },
    queries::{
        GetClassFormError, GetClassFormQuery, GetDashboardError, GetDashboardQuery,
        GetLessonError, GetLessonQuery, GetVideoError, GetVideoQuery, ListDashboardsError,
        ListDashboardsQuery,
    },
};
use crate::{
    api::response::{ApiResponse, ErrorResponse},
    features::FeatureState,
    middleware::AuthUser,
    models::ClassRecord,
    store::StoreError,
};

/// Mount point of this router, used to build redirect targets
pub const DASHBOARDS_PATH: &str = "/api/v1/dashboards";

fn dashboard_path(id: Uuid) -> String {
    format!("{}/{}", DASHBOARDS_PATH, id)
}

// ============================================================================
// Router Configuration
// ============================================================================

pub fn dashboards_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_dashboards).post(create_dashboard))
        .route(
            "/:id",
            get(show_dashboard)
                .put(update_dashboard)
                .delete(delete_dashboard),
        )
        .route(
            "/:id/classes/:class_num",
            get(class_form).put(save_class).delete(delete_class),
        )
        .route("/:id/videos/:video_id", get(video_form).put(update_video))
        .route("/:id/lessons/:video_index", get(lesson))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/v1/dashboards`
///
/// ```json
/// { "playlist_url": "https://www.youtube.com/playlist?list=PL..." }
/// ```
///
/// - `201 Created` with `Location` - Dashboard imported
/// - `400 Bad Request` - URL without `list` parameter, or unknown playlist
/// - `401 Unauthorized` - No signed-in user
/// - `502 Bad Gateway` - Provider unreachable or returned garbage
#[tracing::instrument(skip(state, command), fields(author_id = %user.id()))]
async fn create_dashboard(
    State(state): State<FeatureState>,
    user: AuthUser,
    Json(command): Json<CreateDashboardCommand>,
) -> Result<Response, DashboardApiError> {
    let dashboard = super::commands::create::handle(&state, user.id(), command).await?;
    let location = dashboard_path(dashboard.id);

    tracing::info!(
        dashboard_id = %dashboard.id,
        videos = dashboard.videos.len(),
        "Dashboard created via API"
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location.clone())],
        Json(ApiResponse::with_message(dashboard, "Dashboard created successfully", location)),
    )
        .into_response())
}

/// `PUT /api/v1/dashboards/:id`
///
/// ```json
/// { "title": "...", "environment_url": "https://...", "forum_url": "https://..." }
/// ```
#[tracing::instrument(skip(state, command), fields(dashboard_id = %id))]
async fn update_dashboard(
    State(state): State<FeatureState>,
    Path(id): Path<Uuid>,
    Json(mut command): Json<UpdateDashboardCommand>,
) -> Result<Response, DashboardApiError> {
    command.id = id;
    let dashboard = super::commands::update::handle(&*state.store, command).await?;

    tracing::info!(dashboard_id = %id, "Dashboard updated via API");

    Ok(ApiResponse::with_message(dashboard, "Dashboard saved successfully", dashboard_path(id))
        .into_response())
}

/// `DELETE /api/v1/dashboards/:id`
#[tracing::instrument(skip(state), fields(dashboard_id = %id))]
async fn delete_dashboard(
    State(state): State<FeatureState>,
    Path(id): Path<Uuid>,
) -> Result<Response, DashboardApiError> {
    let response =
        super::commands::delete::handle(&*state.store, DeleteDashboardCommand { id }).await?;

    tracing::info!(dashboard_id = %id, "Dashboard deleted via API");

    Ok(ApiResponse::with_message(response, "Dashboard deleted successfully", DASHBOARDS_PATH)
        .into_response())
}

/// `PUT /api/v1/dashboards/:id/classes/:class_num`
///
/// Body is the class record; `class_number` is ignored and set from the path.
#[tracing::instrument(skip(state, class))]
async fn save_class(
    State(state): State<FeatureState>,
    Path((id, class_num)): Path<(Uuid, usize)>,
    Json(class): Json<ClassRecord>,
) -> Result<Response, DashboardApiError> {
    let command = SaveClassCommand {
        dashboard_id: id,
        class_num,
        class,
    };
    let saved = super::commands::save_class::handle(&*state.store, command).await?;

    Ok(ApiResponse::with_message(
        saved,
        "Class saved successfully",
        format!("{}/classes/{}", dashboard_path(id), class_num),
    )
    .into_response())
}

/// `DELETE /api/v1/dashboards/:id/classes/:class_num`
#[tracing::instrument(skip(state))]
async fn delete_class(
    State(state): State<FeatureState>,
    Path((id, class_num)): Path<(Uuid, usize)>,
) -> Result<Response, DashboardApiError> {
    let command = DeleteClassCommand {
        dashboard_id: id,
        class_num,
    };
    let response = super::commands::delete_class::handle(&*state.store, command).await?;

    Ok(ApiResponse::with_message(response, "Class deleted successfully", dashboard_path(id))
        .into_response())
}

/// `PUT /api/v1/dashboards/:id/videos/:video_id`
///
/// ```json
/// { "support_material": "...", "in_class_exercises": "...", "out_of_class_exercises": "..." }
/// ```
#[tracing::instrument(skip(state, command))]
async fn update_video(
    State(state): State<FeatureState>,
    Path((id, video_id)): Path<(Uuid, Uuid)>,
    Json(mut command): Json<UpdateVideoCommand>,
) -> Result<Response, DashboardApiError> {
    command.dashboard_id = id;
    command.video_id = video_id;
    let video = super::commands::update_video::handle(&*state.store, command).await?;

    Ok(ApiResponse::with_message(video, "Video saved successfully", dashboard_path(id))
        .into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/dashboards?page=1&per_page=20`
#[tracing::instrument(skip(state, query), fields(author_id = %user.id()))]
async fn list_dashboards(
    State(state): State<FeatureState>,
    user: AuthUser,
    Query(query): Query<ListDashboardsQuery>,
) -> Result<Response, DashboardApiError> {
    let page = super::queries::list::handle(&*state.store, user.id(), query).await?;

    tracing::debug!(
        count = page.items.len(),
        total = page.pagination.total,
        "Dashboards listed via API"
    );

    let meta = json!({ "pagination": page.pagination });
    Ok(ApiResponse::success_with_meta(page.items, meta).into_response())
}

/// `GET /api/v1/dashboards/:id`
///
/// Synchronizes the playlist before answering; `data.sync` reports what was appended.
#[tracing::instrument(skip(state), fields(dashboard_id = %id))]
async fn show_dashboard(
    State(state): State<FeatureState>,
    Path(id): Path<Uuid>,
) -> Result<Response, DashboardApiError> {
    let response = super::queries::get::handle(&state, GetDashboardQuery { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

/// `GET /api/v1/dashboards/:id/classes/:class_num`
#[tracing::instrument(skip(state))]
async fn class_form(
    State(state): State<FeatureState>,
    Path((id, class_num)): Path<(Uuid, usize)>,
) -> Result<Response, DashboardApiError> {
    let response =
        super::queries::class_form::handle(&state, GetClassFormQuery { id, class_num }).await?;
    Ok(ApiResponse::success(response).into_response())
}

/// `GET /api/v1/dashboards/:id/videos/:video_id`
#[tracing::instrument(skip(state))]
async fn video_form(
    State(state): State<FeatureState>,
    Path((id, video_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, DashboardApiError> {
    let query = GetVideoQuery {
        dashboard_id: id,
        video_id,
    };
    let response = super::queries::get_video::handle(&*state.store, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

/// `GET /api/v1/dashboards/:id/lessons/:video_index`
#[tracing::instrument(skip(state))]
async fn lesson(
    State(state): State<FeatureState>,
    Path((id, video_index)): Path<(Uuid, usize)>,
) -> Result<Response, DashboardApiError> {
    let response =
        super::queries::lesson::handle(&state, GetLessonQuery { id, video_index }).await?;
    Ok(ApiResponse::success(response).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for dashboard API endpoints
#[derive(Debug, thiserror::Error)]
enum DashboardApiError {
    #[error(transparent)]
    Create(#[from] CreateDashboardError),
    #[error(transparent)]
    Update(#[from] UpdateDashboardError),
    #[error(transparent)]
    Delete(#[from] DeleteDashboardError),
    #[error(transparent)]
    SaveClass(#[from] SaveClassError),
    #[error(transparent)]
    DeleteClass(#[from] DeleteClassError),
    #[error(transparent)]
    UpdateVideo(#[from] UpdateVideoError),
    #[error(transparent)]
    List(#[from] ListDashboardsError),
    #[error(transparent)]
    Get(#[from] GetDashboardError),
    #[error(transparent)]
    ClassForm(#[from] GetClassFormError),
    #[error(transparent)]
    GetVideo(#[from] GetVideoError),
    #[error(transparent)]
    Lesson(#[from] GetLessonError),
}

/// How an error is reported over HTTP
enum ErrorKind {
    Validation,
    NotFound,
    Provider,
    Internal,
}

impl DashboardApiError {
    fn kind(&self) -> ErrorKind {
        use ErrorKind::*;
        match self {
            Self::Create(e) => match e {
                CreateDashboardError::PlaylistUrlRequired
                | CreateDashboardError::InvalidPlaylistUrl(_)
                | CreateDashboardError::InvalidPlaylist(_) => Validation,
                CreateDashboardError::Provider(_) => Provider,
                CreateDashboardError::Store(e) => store_kind(e),
            },
            Self::Update(e) => match e {
                UpdateDashboardError::NoFieldsToUpdate
                | UpdateDashboardError::Title(_)
                | UpdateDashboardError::Url(_) => Validation,
                UpdateDashboardError::NotFound(_) => NotFound,
                UpdateDashboardError::Store(e) => store_kind(e),
            },
            Self::Delete(e) => match e {
                DeleteDashboardError::NotFound(_) => NotFound,
                DeleteDashboardError::Store(e) => store_kind(e),
            },
            Self::SaveClass(e) => match e {
                SaveClassError::Material(_) | SaveClassError::VideoIndexOutOfRange { .. } => {
                    Validation
                },
                SaveClassError::DashboardNotFound(_) | SaveClassError::ClassNotFound(_) => NotFound,
                SaveClassError::Store(e) => store_kind(e),
            },
            Self::DeleteClass(e) => match e {
                DeleteClassError::DashboardNotFound(_) | DeleteClassError::ClassNotFound(_) => {
                    NotFound
                },
                DeleteClassError::Store(e) => store_kind(e),
            },
            Self::UpdateVideo(e) => match e {
                UpdateVideoError::NoFieldsToUpdate => Validation,
                UpdateVideoError::DashboardNotFound(_) | UpdateVideoError::VideoNotFound { .. } => {
                    NotFound
                },
                UpdateVideoError::Store(e) => store_kind(e),
            },
            Self::List(e) => match e {
                ListDashboardsError::InvalidPagination(_) => Validation,
                ListDashboardsError::Store(e) => store_kind(e),
            },
            Self::Get(e) => match e {
                GetDashboardError::NotFound(_) => NotFound,
                GetDashboardError::InvalidPlaylist(_) => Validation,
                GetDashboardError::Provider(_) => Provider,
                GetDashboardError::Store(e) => store_kind(e),
            },
            Self::ClassForm(e) => match e {
                GetClassFormError::NotFound(_) | GetClassFormError::ClassNotFound(_) => NotFound,
                GetClassFormError::InvalidPlaylist(_) => Validation,
                GetClassFormError::Provider(_) => Provider,
                GetClassFormError::Store(e) => store_kind(e),
            },
            Self::GetVideo(e) => match e {
                GetVideoError::DashboardNotFound(_) | GetVideoError::VideoNotFound { .. } => {
                    NotFound
                },
                GetVideoError::Store(e) => store_kind(e),
            },
            Self::Lesson(e) => match e {
                GetLessonError::NotFound(_) | GetLessonError::VideoIndexOutOfRange { .. } => {
                    NotFound
                },
                GetLessonError::Store(e) => store_kind(e),
            },
        }
    }
}

fn store_kind(err: &StoreError) -> ErrorKind {
    if err.is_not_found() {
        ErrorKind::NotFound
    } else {
        ErrorKind::Internal
    }
}

impl IntoResponse for DashboardApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self.kind() {
            ErrorKind::Validation => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", self.to_string()),
            ),
            ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", self.to_string()),
            ),
            ErrorKind::Provider => {
                tracing::warn!("Playlist provider error: {}", self);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new("PROVIDER_ERROR", self.to_string()),
                )
            },
            ErrorKind::Internal => {
                tracing::error!("Store error in dashboard API: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "A database error occurred"),
                )
            },
        };
        (status, Json(error)).into_response()
    }
}
