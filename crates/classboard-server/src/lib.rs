//! Classboard Server Library
//!
//! HTTP server that turns a YouTube playlist into a course dashboard.
//!
//! # Overview
//!
//! - **Import**: a playlist URL becomes a dashboard holding the playlist's videos
//! - **Synchronization**: showing a dashboard appends videos added to the playlist since
//! - **Classes**: per-class pre/in/post-class materials, each essential or complementary
//! - **Videos**: support material and exercises attached to each video
//! - **Lessons**: a single video with its description chapters
//!
//! # Architecture
//!
//! Features are vertical slices under [`features`]: commands for writes,
//! queries for reads, and one `routes.rs` mapping both onto HTTP. Persistence
//! sits behind [`store::CourseStore`] (PostgreSQL or in-memory) and the video
//! host behind [`provider::PlaylistProvider`]. [`sync::SyncEngine`] joins the two.
//!
//! # Example
//!
//! ```no_run
//! use classboard_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;
pub mod provider;
pub mod store;
pub mod sync;

pub use error::{ServerError, ServerResult};
