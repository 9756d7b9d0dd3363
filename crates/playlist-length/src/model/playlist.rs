use serde::{Deserialize, Serialize};

/// Canonical unit for every duration computation.
pub type DurationSeconds = u64;

/// Opaque cursor handed back by a source to request the next page.
pub type ContinuationToken = String;

/// Identifier of a playlist, as found in the `list` query parameter of a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistReference {
    pub id: String,
}

impl PlaylistReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for PlaylistReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// One entry of a playlist listing.
///
/// `index` is the 0-based position in the whole playlist, independent of page
/// boundaries. `video_id` is `None` when the source returned an entry without
/// a usable video reference; the entry is still kept so positions stay aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub index: usize,
    pub video_id: Option<String>,
}

impl PlaylistItem {
    pub fn new(index: usize, video_id: Option<String>) -> Self {
        Self { index, video_id }
    }

    /// The video id, if present and non-empty.
    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A single entry as returned by a source page, before indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageEntry {
    pub video_id: Option<String>,
}

impl PageEntry {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: Some(video_id.into()),
        }
    }

    pub fn malformed() -> Self {
        Self { video_id: None }
    }
}

/// One page of a playlist listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    pub entries: Vec<PageEntry>,
    pub next_page_token: Option<ContinuationToken>,
}
