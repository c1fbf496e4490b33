//! Common types used across Classboard

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClassboardError, Result};

/// Query parameter that carries the playlist identifier in provider URLs
pub const PLAYLIST_QUERY_PARAM: &str = "list";

/// A validated playlist identifier as issued by the video provider.
///
/// Provider playlist ids are non-empty and made of ASCII letters, digits,
/// `-` and `_` (for example `PLx0sYbCqOb8TBPRdmBHs5Iftvv9TPboYG`).
///
/// # Examples
///
/// ```
/// use classboard_common::types::PlaylistId;
///
/// let id = PlaylistId::parse("PL123-abc_DEF").unwrap();
/// assert_eq!(id.to_string(), "PL123-abc_DEF");
/// assert!(PlaylistId::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Validate a raw identifier
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty()
            || !raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ClassboardError::InvalidPlaylist(raw));
        }
        Ok(Self(raw))
    }

    /// Extract the identifier from a playlist URL.
    ///
    /// Everything after the first `?` (up to an optional `#` fragment) is
    /// decoded as a query string and the first `list` value wins. The URL
    /// does not need a scheme, so pasted links such as
    /// `youtube.com/playlist?list=PL...` are accepted.
    ///
    /// # Errors
    ///
    /// - [`ClassboardError::InvalidPlaylistUrl`] when there is no `list` parameter
    /// - [`ClassboardError::InvalidPlaylist`] when the value is empty or malformed
    pub fn from_url(playlist_url: &str) -> Result<Self> {
        let query = playlist_url
            .split_once('?')
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        let value = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == PLAYLIST_QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| ClassboardError::InvalidPlaylistUrl(playlist_url.to_string()))?;

        Self::parse(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlaylistId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaylistId {
    type Error = ClassboardError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<PlaylistId> for String {
    fn from(id: PlaylistId) -> Self {
        id.0
    }
}
