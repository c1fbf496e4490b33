//! External playlist provider
//!
//! The rest of the server talks to the video host only through
//! [`PlaylistProvider`]. [`YouTubeClient`] implements it against the YouTube
//! Data API v3.

use async_trait::async_trait;
use classboard_common::types::PlaylistId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod chapters;
pub mod youtube;

pub use chapters::{parse_chapters, Chapter};
pub use youtube::YouTubeClient;

use crate::models::NewVideo;

/// One entry of a provider playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub title: String,
    /// Provider video identifier
    pub item_id: String,
}

impl From<PlaylistItem> for NewVideo {
    fn from(item: PlaylistItem) -> Self {
        NewVideo::new(item.title, item.item_id)
    }
}

/// A single page of playlist items.
///
/// `total_results` counts the whole playlist and can exceed `items.len()`
/// when the playlist is longer than one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistPage {
    pub total_results: u32,
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistMeta {
    pub title: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Playlist provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Playlist provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Playlist provider response was malformed: {0}")]
    Malformed(String),

    #[error("Playlist '{0}' does not exist on the provider")]
    UnknownPlaylist(String),

    #[error("Video '{0}' does not exist on the provider")]
    UnknownVideo(String),

    #[error("Chapter pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[async_trait]
pub trait PlaylistProvider: Send + Sync {
    /// First page of the playlist, at most `max_results` items
    async fn list_items(
        &self,
        playlist_id: &PlaylistId,
        max_results: u32,
    ) -> ProviderResult<PlaylistPage>;

    /// Playlist metadata; [`ProviderError::UnknownPlaylist`] when it does not exist
    async fn playlist_meta(&self, playlist_id: &PlaylistId) -> ProviderResult<PlaylistMeta>;

    /// Chapter markers of one video, empty when it has none
    async fn video_chapters(&self, item_id: &str) -> ProviderResult<Vec<Chapter>>;
}
