pub mod create;
pub mod delete;
pub mod delete_class;
pub mod save_class;
pub mod update;
pub mod update_video;

pub use create::{CreateDashboardCommand, CreateDashboardError};
pub use delete::{DeleteDashboardCommand, DeleteDashboardError, DeleteDashboardResponse};
pub use delete_class::{DeleteClassCommand, DeleteClassError, DeleteClassResponse};
pub use save_class::{SaveClassCommand, SaveClassError};
pub use update::{UpdateDashboardCommand, UpdateDashboardError};
pub use update_video::{UpdateVideoCommand, UpdateVideoError};
