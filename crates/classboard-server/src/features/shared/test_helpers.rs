//! Test fixtures for feature handlers
//!
//! ```rust,ignore
//! let fixture = TestFixture::new(&["Lecture 1", "Lecture 2"]);
//! let dashboard = fixture.seed_dashboard(author).await;
//! let response = handle(&fixture.state, query).await?;
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use classboard_common::types::PlaylistId;
use uuid::Uuid;

use crate::{
    features::FeatureState,
    models::Dashboard,
    provider::{
        Chapter, PlaylistItem, PlaylistMeta, PlaylistPage, PlaylistProvider, ProviderError,
        ProviderResult,
    },
    store::MemoryCourseStore,
};

pub const TEST_PLAYLIST_URL: &str = "https://www.youtube.com/playlist?list=PLfixture";

/// Provider serving a mutable in-memory playlist
#[derive(Default)]
pub struct StubProvider {
    titles: Mutex<Vec<String>>,
    chapters: Mutex<HashMap<String, Vec<Chapter>>>,
    failing: Mutex<bool>,
    unknown_playlist: Mutex<bool>,
    /// Reported `total_results` instead of the title count
    total_override: Mutex<Option<u32>>,
    list_calls: Mutex<usize>,
}

impl StubProvider {
    pub fn with_titles(titles: &[&str]) -> Self {
        let provider = Self::default();
        provider.set_titles(titles);
        provider
    }

    pub fn set_titles(&self, titles: &[&str]) {
        if let Ok(mut current) = self.titles.lock() {
            *current = titles.iter().map(|t| t.to_string()).collect();
        }
    }

    pub fn set_chapters(&self, item_id: &str, chapters: Vec<Chapter>) {
        if let Ok(mut map) = self.chapters.lock() {
            map.insert(item_id.to_string(), chapters);
        }
    }

    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut flag) = self.failing.lock() {
            *flag = failing;
        }
    }

    /// Report `total` as the playlist length regardless of the titles served
    pub fn set_total_override(&self, total: Option<u32>) {
        if let Ok(mut current) = self.total_override.lock() {
            *current = total;
        }
    }

    /// Answer metadata lookups as if the playlist did not exist
    pub fn set_unknown_playlist(&self, unknown: bool) {
        if let Ok(mut flag) = self.unknown_playlist.lock() {
            *flag = unknown;
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.lock().map(|c| *c).unwrap_or(0)
    }

    fn check_failing(&self) -> ProviderResult<()> {
        if self.failing.lock().map(|f| *f).unwrap_or(false) {
            return Err(ProviderError::Status {
                status: 503,
                message: "backend error".to_string(),
            });
        }
        Ok(())
    }

    /// Item ids are `item{position}`
    pub fn item_id(position: usize) -> String {
        format!("item{}", position)
    }
}

#[async_trait]
impl PlaylistProvider for StubProvider {
    async fn list_items(
        &self,
        _playlist_id: &PlaylistId,
        max_results: u32,
    ) -> ProviderResult<PlaylistPage> {
        if let Ok(mut calls) = self.list_calls.lock() {
            *calls += 1;
        }
        self.check_failing()?;
        let titles = self.titles.lock().map(|t| t.clone()).unwrap_or_default();
        let total = self
            .total_override
            .lock()
            .ok()
            .and_then(|t| *t)
            .unwrap_or(titles.len() as u32);
        Ok(PlaylistPage {
            total_results: total,
            items: titles
                .into_iter()
                .enumerate()
                .take(max_results as usize)
                .map(|(i, title)| PlaylistItem {
                    title,
                    item_id: Self::item_id(i),
                })
                .collect(),
        })
    }

    async fn playlist_meta(&self, playlist_id: &PlaylistId) -> ProviderResult<PlaylistMeta> {
        self.check_failing()?;
        if self.unknown_playlist.lock().map(|u| *u).unwrap_or(false) {
            return Err(ProviderError::UnknownPlaylist(playlist_id.to_string()));
        }
        Ok(PlaylistMeta {
            title: "Fixture course".to_string(),
        })
    }

    async fn video_chapters(&self, item_id: &str) -> ProviderResult<Vec<Chapter>> {
        self.check_failing()?;
        Ok(self
            .chapters
            .lock()
            .ok()
            .and_then(|map| map.get(item_id).cloned())
            .unwrap_or_default())
    }
}

pub struct TestFixture {
    pub store: Arc<MemoryCourseStore>,
    pub provider: Arc<StubProvider>,
    pub state: FeatureState,
}

impl TestFixture {
    pub fn new(titles: &[&str]) -> Self {
        let store = Arc::new(MemoryCourseStore::new());
        let provider = Arc::new(StubProvider::with_titles(titles));
        let state = FeatureState::new(store.clone(), provider.clone(), 50);
        Self {
            store,
            provider,
            state,
        }
    }

    /// Import the fixture playlist for `author_id`
    pub async fn seed_dashboard(&self, author_id: Uuid) -> Dashboard {
        match self.state.sync.import_playlist(TEST_PLAYLIST_URL, author_id).await {
            Ok(dashboard) => dashboard,
            Err(e) => panic!("failed to seed dashboard: {e}"),
        }
    }
}
