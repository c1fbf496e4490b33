//! Error types shared across Classboard crates

use thiserror::Error;

/// Result type alias for shared Classboard operations
pub type Result<T> = std::result::Result<T, ClassboardError>;

/// Errors raised by the shared domain types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassboardError {
    /// The playlist URL carries no `list` query parameter
    #[error("Playlist URL '{0}' has no 'list' parameter")]
    InvalidPlaylistUrl(String),

    /// The playlist identifier is empty or contains characters the provider never issues
    #[error("Invalid playlist identifier: '{0}'")]
    InvalidPlaylist(String),
}
