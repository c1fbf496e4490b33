pub mod class_form;
pub mod get;
pub mod get_video;
pub mod lesson;
pub mod list;

pub use class_form::{ClassFormResponse, GetClassFormError, GetClassFormQuery};
pub use get::{GetDashboardError, GetDashboardQuery, ShowDashboardResponse};
pub use get_video::{GetVideoError, GetVideoQuery, VideoFormResponse};
pub use lesson::{GetLessonError, GetLessonQuery, LessonResponse};
pub use list::{ListDashboardsError, ListDashboardsQuery};
