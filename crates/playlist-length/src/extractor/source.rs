use async_trait::async_trait;

use crate::{extractor::error::PlaylistError, model::PlaylistPage};

/// Maximum page size accepted by the playlist listing endpoint.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Remote data source for playlist listings and video durations.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Short name of the source, used in logs.
    fn name(&self) -> &str;

    /// Returns up to `page_size` entries of the playlist, continuing from `page_token`.
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlaylistError>;

    /// Returns the raw `PT#H#M#S` duration of a video, or `None` when no video matches.
    async fn get_video_duration(&self, video_id: &str) -> Result<Option<String>, PlaylistError>;
}
