use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    engine::run::RunToken,
    extractor::{
        error::PlaylistError,
        source::{MAX_PAGE_SIZE, PlaylistSource},
    },
    model::{ContinuationToken, PlaylistItem, PlaylistReference},
};

/// The listing ended before the requested number of items was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeExceeded {
    pub requested: usize,
    pub available: usize,
}

impl From<RangeExceeded> for PlaylistError {
    fn from(value: RangeExceeded) -> Self {
        PlaylistError::RangeExceeded {
            requested: value.requested,
            available: value.available,
        }
    }
}

/// Items retrieved by one pagination pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedItems {
    pub items: Vec<PlaylistItem>,
    pub pages: usize,
    pub range_exceeded: Option<RangeExceeded>,
}

/// Walks a playlist listing page by page until enough items are known.
pub struct PlaylistPager<'a> {
    source: &'a dyn PlaylistSource,
    page_size: u32,
    run: RunToken,
}

impl<'a> PlaylistPager<'a> {
    pub fn new(source: &'a dyn PlaylistSource, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            run: RunToken::detached(),
        }
    }

    pub fn with_run(mut self, run: RunToken) -> Self {
        self.run = run;
        self
    }

    /// Fetches pages until at least `minimum_count` items are retrieved or the
    /// listing ends.
    ///
    /// Every call starts from the first page. A failed page aborts the pass and
    /// discards whatever was already retrieved. Running out of pages before
    /// `minimum_count` is reported through [`PagedItems::range_exceeded`] and is
    /// not an error, unless the playlist turned out to be empty.
    pub async fn fetch_up_to(
        &self,
        reference: &PlaylistReference,
        minimum_count: usize,
    ) -> Result<PagedItems, PlaylistError> {
        let mut items: Vec<PlaylistItem> = Vec::new();
        let mut page_token: Option<ContinuationToken> = None;
        let mut seen_tokens: FxHashSet<ContinuationToken> = FxHashSet::default();
        let mut pages = 0usize;

        let range_exceeded = loop {
            self.run.ensure_current()?;
            pages += 1;
            debug!(
                source = self.source.name(),
                playlist_id = %reference,
                page = pages,
                token = page_token.as_deref().unwrap_or(""),
                "Requesting playlist page"
            );

            let page = self
                .source
                .list_playlist_items(&reference.id, self.page_size, page_token.as_deref())
                .await
                .map_err(|e| {
                    warn!(playlist_id = %reference, page = pages, error = %e, "Failed to fetch playlist page");
                    PlaylistError::fetch(pages, e)
                })?;

            let base = items.len();
            items.extend(
                page.entries
                    .into_iter()
                    .enumerate()
                    .map(|(offset, entry)| PlaylistItem::new(base + offset, entry.video_id)),
            );

            if items.len() >= minimum_count {
                break None;
            }

            match page.next_page_token {
                Some(next) if seen_tokens.insert(next.clone()) => {
                    page_token = Some(next);
                }
                next => {
                    if let Some(token) = next {
                        warn!(
                            playlist_id = %reference,
                            page = pages,
                            token = %token,
                            "Source returned an already visited continuation token; stopping"
                        );
                    }
                    if items.is_empty() {
                        return Err(PlaylistError::EmptyPlaylist(reference.id.clone()));
                    }
                    break Some(RangeExceeded {
                        requested: minimum_count,
                        available: items.len(),
                    });
                }
            }
        };

        debug!(
            playlist_id = %reference,
            pages,
            items = items.len(),
            "Pagination finished"
        );

        Ok(PagedItems {
            items,
            pages,
            range_exceeded,
        })
    }
}
