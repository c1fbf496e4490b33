//! Classboard Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging setup, and error handling for the Classboard workspace.
//!
//! - **Error Handling**: [`ClassboardError`] and its result alias
//! - **Logging**: `tracing` subscriber setup driven by environment variables
//! - **Types**: playlist identifiers and playlist URL parsing
//!
//! # Example
//!
//! ```
//! use classboard_common::types::PlaylistId;
//!
//! let id = PlaylistId::from_url("https://www.youtube.com/playlist?list=PLabc_123").unwrap();
//! assert_eq!(id.as_str(), "PLabc_123");
//! ```

pub mod error;
pub mod logging;
pub mod types;

pub use error::{ClassboardError, Result};
