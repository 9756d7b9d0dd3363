use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{
    duration::to_iso8601,
    extractor::{error::PlaylistError, source::PlaylistSource},
    model::{DurationSeconds, PageEntry, PlaylistPage},
};

const TOKEN_PREFIX: &str = "page-";

/// A page request as seen by [`StaticSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub playlist_id: String,
    pub page_size: u32,
    pub page_token: Option<String>,
}

/// In-memory [`PlaylistSource`] for offline computation and tests.
///
/// Pages are cut from the configured entries using the requested page size;
/// continuation tokens are opaque strings of the form `page-N`.
#[derive(Debug, Default)]
pub struct StaticSource {
    playlists: FxHashMap<String, Vec<PageEntry>>,
    durations: FxHashMap<String, String>,
    failing_videos: FxHashSet<String>,
    // 1-based page number whose request fails
    failing_page: Option<usize>,
    page_requests: Mutex<Vec<PageRequest>>,
    duration_requests: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist<I>(mut self, playlist_id: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = PageEntry>,
    {
        self.playlists
            .insert(playlist_id.into(), entries.into_iter().collect());
        self
    }

    /// Registers a playlist whose entries are the given video ids, in order.
    pub fn with_video_ids<I, S>(self, playlist_id: impl Into<String>, video_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_playlist(playlist_id, video_ids.into_iter().map(PageEntry::new))
    }

    pub fn with_duration(mut self, video_id: impl Into<String>, duration: impl Into<String>) -> Self {
        self.durations.insert(video_id.into(), duration.into());
        self
    }

    pub fn with_seconds(self, video_id: impl Into<String>, seconds: DurationSeconds) -> Self {
        self.with_duration(video_id, to_iso8601(seconds))
    }

    /// Makes the request for the given 1-based page fail.
    pub fn fail_page(mut self, page: usize) -> Self {
        self.failing_page = Some(page);
        self
    }

    /// Makes every duration lookup for `video_id` fail.
    pub fn fail_video(mut self, video_id: impl Into<String>) -> Self {
        self.failing_videos.insert(video_id.into());
        self
    }

    pub fn page_requests(&self) -> Vec<PageRequest> {
        self.page_requests.lock().clone()
    }

    pub fn duration_requests(&self) -> Vec<String> {
        self.duration_requests.lock().clone()
    }

    fn page_number(page_token: Option<&str>) -> Result<usize, PlaylistError> {
        match page_token {
            None => Ok(0),
            Some(token) => token
                .strip_prefix(TOKEN_PREFIX)
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| PlaylistError::Api {
                    status: 400,
                    message: format!("invalid page token: {token}"),
                }),
        }
    }
}

#[async_trait]
impl PlaylistSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlaylistError> {
        self.page_requests.lock().push(PageRequest {
            playlist_id: playlist_id.to_string(),
            page_size,
            page_token: page_token.map(str::to_string),
        });

        let page = Self::page_number(page_token)?;
        if self.failing_page == Some(page + 1) {
            return Err(PlaylistError::Api {
                status: 500,
                message: "backendError".to_string(),
            });
        }

        let entries = self
            .playlists
            .get(playlist_id)
            .ok_or_else(|| PlaylistError::Api {
                status: 404,
                message: "playlistNotFound".to_string(),
            })?;

        let page_size = page_size.max(1) as usize;
        let start = page * page_size;
        let end = (start + page_size).min(entries.len());
        let slice = entries.get(start..end).unwrap_or_default().to_vec();
        let next_page_token = (end < entries.len()).then(|| format!("{TOKEN_PREFIX}{}", page + 1));

        debug!(playlist_id, page, returned = slice.len(), "static page");
        Ok(PlaylistPage {
            entries: slice,
            next_page_token,
        })
    }

    async fn get_video_duration(&self, video_id: &str) -> Result<Option<String>, PlaylistError> {
        self.duration_requests.lock().push(video_id.to_string());
        if self.failing_videos.contains(video_id) {
            return Err(PlaylistError::Api {
                status: 503,
                message: format!("lookup failed for {video_id}"),
            });
        }
        Ok(self.durations.get(video_id).cloned())
    }
}
