//! YouTube Data API v3 client

use std::time::Duration;

use async_trait::async_trait;
use classboard_common::types::PlaylistId;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use super::{
    chapters::parse_chapters, Chapter, PlaylistItem, PlaylistMeta, PlaylistPage, PlaylistProvider,
    ProviderError, ProviderResult,
};
use crate::config::{ProviderConfig, YOUTUBE_MAX_PAGE_SIZE};

const API_PREFIX: &str = "youtube/v3";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse<T> {
    #[serde(default)]
    page_info: Option<PageInfo>,
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    total_results: u32,
}

#[derive(Debug, Deserialize)]
struct Resource<S> {
    snippet: S,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    title: String,
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// [`PlaylistProvider`] talking to the YouTube Data API.
///
/// The API key comes from [`ProviderConfig`] and is sent as the `key` query
/// parameter on every request.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, resource)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, String)],
    ) -> ProviderResult<T> {
        let response = self
            .client
            .get(self.endpoint(resource))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::warn!(resource, status = status.as_u16(), %message, "Provider request failed");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl PlaylistProvider for YouTubeClient {
    #[tracing::instrument(skip(self))]
    async fn list_items(
        &self,
        playlist_id: &PlaylistId,
        max_results: u32,
    ) -> ProviderResult<PlaylistPage> {
        let params = [
            ("part", "snippet".to_string()),
            ("playlistId", playlist_id.to_string()),
            ("maxResults", max_results.clamp(1, YOUTUBE_MAX_PAGE_SIZE).to_string()),
        ];

        let response: ListResponse<Resource<PlaylistItemSnippet>> =
            match self.get("playlistItems", &params).await {
                Err(ProviderError::Status { status, .. })
                    if status == StatusCode::NOT_FOUND.as_u16() =>
                {
                    return Err(ProviderError::UnknownPlaylist(playlist_id.to_string()));
                },
                other => other?,
            };

        let total_results = response
            .page_info
            .map(|p| p.total_results)
            .ok_or_else(|| ProviderError::Malformed("missing pageInfo.totalResults".to_string()))?;

        let items = response
            .items
            .into_iter()
            .map(|item| {
                let video_id = item.snippet.resource_id.video_id.ok_or_else(|| {
                    ProviderError::Malformed(format!(
                        "playlist item '{}' has no videoId",
                        item.snippet.title
                    ))
                })?;
                Ok(PlaylistItem {
                    title: item.snippet.title,
                    item_id: video_id,
                })
            })
            .collect::<ProviderResult<Vec<_>>>()?;

        tracing::debug!(total_results, returned = items.len(), "Fetched playlist items");

        Ok(PlaylistPage {
            total_results,
            items,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn playlist_meta(&self, playlist_id: &PlaylistId) -> ProviderResult<PlaylistMeta> {
        let params = [("part", "snippet".to_string()), ("id", playlist_id.to_string())];
        let response: ListResponse<Resource<PlaylistSnippet>> =
            self.get("playlists", &params).await?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| PlaylistMeta {
                title: item.snippet.title,
            })
            .ok_or_else(|| ProviderError::UnknownPlaylist(playlist_id.to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn video_chapters(&self, item_id: &str) -> ProviderResult<Vec<Chapter>> {
        let params = [("part", "snippet".to_string()), ("id", item_id.to_string())];
        let response: ListResponse<Resource<VideoSnippet>> = self.get("videos", &params).await?;

        let description = response
            .items
            .into_iter()
            .next()
            .map(|item| item.snippet.description)
            .ok_or_else(|| ProviderError::UnknownVideo(item_id.to_string()))?;

        Ok(parse_chapters(&description)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> YouTubeClient {
        let config = ProviderConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            max_results: 50,
            timeout_secs: 5,
        };
        YouTubeClient::new(&config).unwrap()
    }

    fn playlist_id() -> PlaylistId {
        PlaylistId::parse("PLcourse").unwrap()
    }

    #[tokio::test]
    async fn test_list_items_maps_snippets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .and(query_param("part", "snippet"))
            .and(query_param("playlistId", "PLcourse"))
            .and(query_param("maxResults", "50"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "youtube#playlistItemListResponse",
                "pageInfo": { "totalResults": 2, "resultsPerPage": 50 },
                "items": [
                    { "snippet": { "title": "Lecture 1", "resourceId": { "kind": "youtube#video", "videoId": "aaa" } } },
                    { "snippet": { "title": "Lecture 2", "resourceId": { "kind": "youtube#video", "videoId": "bbb" } } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).list_items(&playlist_id(), 50).await.unwrap();
        assert_eq!(page.total_results, 2);
        assert_eq!(page.items, vec![
            PlaylistItem {
                title: "Lecture 1".to_string(),
                item_id: "aaa".to_string(),
            },
            PlaylistItem {
                title: "Lecture 2".to_string(),
                item_id: "bbb".to_string(),
            },
        ]);
    }

    #[tokio::test]
    async fn test_list_items_clamps_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .and(query_param("maxResults", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pageInfo": { "totalResults": 0 },
                "items": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).list_items(&playlist_id(), 99).await.unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_items_unknown_playlist() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "code": 404, "message": "The playlist identified with the request's playlistId parameter cannot be found." }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).list_items(&playlist_id(), 50).await.unwrap_err();
        assert!(matches!(err, ProviderError::UnknownPlaylist(id) if id == "PLcourse"));
    }

    #[tokio::test]
    async fn test_server_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "quota exceeded" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).list_items(&playlist_id(), 50).await.unwrap_err();
        match err {
            ProviderError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "quota exceeded");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_items(&playlist_id(), 50).await.unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_playlist_meta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlists"))
            .and(query_param("id", "PLcourse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ { "snippet": { "title": "Operating Systems 2024" } } ]
            })))
            .mount(&server)
            .await;

        let meta = client_for(&server).playlist_meta(&playlist_id()).await.unwrap();
        assert_eq!(meta.title, "Operating Systems 2024");
    }

    #[tokio::test]
    async fn test_playlist_meta_without_items_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pageInfo": { "totalResults": 0 },
                "items": []
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).playlist_meta(&playlist_id()).await.unwrap_err();
        assert!(matches!(err, ProviderError::UnknownPlaylist(_)));
    }

    #[tokio::test]
    async fn test_video_chapters_from_description() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .and(query_param("id", "aaa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [ { "snippet": {
                    "title": "Lecture 1",
                    "description": "Outline\n0:00 Welcome\n5:10 Processes\n12:45 Threads"
                } } ]
            })))
            .mount(&server)
            .await;

        let chapters = client_for(&server).video_chapters("aaa").await.unwrap();
        let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Welcome", "Processes", "Threads"]);
    }

    #[tokio::test]
    async fn test_debug_hides_api_key() {
        let server = MockServer::start().await;
        let printed = format!("{:?}", client_for(&server));
        assert!(!printed.contains("test-key"));
    }
}
