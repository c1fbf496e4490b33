pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateDashboardCommand, CreateDashboardError, DeleteClassCommand, DeleteClassError,
    DeleteClassResponse, DeleteDashboardCommand, DeleteDashboardError, DeleteDashboardResponse,
    SaveClassCommand, SaveClassError, UpdateDashboardCommand, UpdateDashboardError,
    UpdateVideoCommand, UpdateVideoError,
};

pub use queries::{
    ClassFormResponse, GetClassFormError, GetClassFormQuery, GetDashboardError,
    GetDashboardQuery, GetLessonError, GetLessonQuery, GetVideoError, GetVideoQuery,
    LessonResponse, ListDashboardsError, ListDashboardsQuery, ShowDashboardResponse,
    VideoFormResponse,
};

pub use routes::dashboards_routes;
