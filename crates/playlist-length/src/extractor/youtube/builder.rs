use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    extractor::{
        api_client::ApiClient,
        error::PlaylistError,
        source::{MAX_PAGE_SIZE, PlaylistSource},
        youtube::models::{PlaylistItemsResponse, VideosResponse},
    },
    model::{PageEntry, PlaylistPage},
};

#[derive(Debug, Clone)]
pub struct YouTubeSourceConfig {
    pub api_key: String,
    /// Overrides the Data API base URL, e.g. to point at a mock server.
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

impl YouTubeSourceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            user_agent: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// [`PlaylistSource`] backed by the YouTube Data API v3.
pub struct YouTubeSource {
    api: ApiClient,
}

impl YouTubeSource {
    pub const BASE_URL: &'static str = "https://www.googleapis.com/youtube/v3";

    const PLAYLIST_ITEMS: &'static str = "playlistItems";

    const VIDEOS: &'static str = "videos";

    pub fn new(config: YouTubeSourceConfig, client: Client) -> Self {
        let base_url = config.base_url.as_deref().unwrap_or(Self::BASE_URL);
        let mut api = ApiClient::new("YouTube", base_url, client);
        api.add_param("key", config.api_key);
        if let Some(user_agent) = &config.user_agent {
            api.add_header_str("user-agent", user_agent);
        }
        Self { api }
    }
}

#[async_trait]
impl PlaylistSource for YouTubeSource {
    fn name(&self) -> &str {
        &self.api.service_name
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlaylistError> {
        let max_results = page_size.clamp(1, MAX_PAGE_SIZE).to_string();
        let mut request = self.api.get(Self::PLAYLIST_ITEMS).query(&[
            ("part", "contentDetails"),
            ("maxResults", max_results.as_str()),
            ("playlistId", playlist_id),
        ]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response: PlaylistItemsResponse = self.api.send_json(request).await?;
        debug!(
            playlist_id,
            items = response.items.len(),
            has_next = response.next_page_token.is_some(),
            "playlistItems response"
        );

        let entries = response
            .items
            .into_iter()
            .map(|item| PageEntry {
                video_id: item.content_details.and_then(|d| d.video_id),
            })
            .collect();

        Ok(PlaylistPage {
            entries,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn get_video_duration(&self, video_id: &str) -> Result<Option<String>, PlaylistError> {
        let request = self
            .api
            .get(Self::VIDEOS)
            .query(&[("part", "contentDetails"), ("id", video_id)]);

        let response: VideosResponse = self.api.send_json(request).await?;
        let Some(video) = response.items.into_iter().next() else {
            return Ok(None);
        };

        video
            .content_details
            .and_then(|d| d.duration)
            .map(Some)
            .ok_or_else(|| PlaylistError::InvalidDuration(format!("missing duration for {video_id}")))
    }
}
