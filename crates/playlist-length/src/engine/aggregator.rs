use futures::{StreamExt, stream};
use tracing::{debug, warn};

use crate::{
    engine::{events::EventSender, resolver::DurationResolver, run::RunToken},
    extractor::error::PlaylistError,
    model::{AggregationRequest, AggregationResult, AggregationState, PlaylistItem},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Maximum number of duration lookups in flight. `1` is strictly sequential.
    pub concurrency: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

/// Sums the durations of a range of playlist positions.
pub struct Aggregator<'a> {
    resolver: DurationResolver<'a>,
    config: AggregatorConfig,
    run: RunToken,
}

impl<'a> Aggregator<'a> {
    pub fn new(resolver: DurationResolver<'a>, config: AggregatorConfig) -> Self {
        Self {
            resolver,
            config,
            run: RunToken::detached(),
        }
    }

    pub fn with_run(mut self, run: RunToken) -> Self {
        self.run = run;
        self
    }

    /// Aggregates the positions of `request` over a fully paginated item list.
    ///
    /// Lookups run with bounded concurrency but complete in playlist order, so
    /// the running total and the published progress are updated serially.
    /// Items lacking a video id count as zero. Positions past the end of
    /// `items` are not walked one by one: they contribute zero and are
    /// published as a single snapshot. Once every position is accounted for
    /// the progress fraction resets to 0.0 and the reset snapshot is published
    /// as the completion signal.
    pub async fn run(
        &self,
        items: &[PlaylistItem],
        request: &AggregationRequest,
        events: &EventSender,
    ) -> Result<AggregationResult, PlaylistError> {
        let mut state = AggregationState::new(request);
        let resolver = self.resolver;
        let covered = request.positions_within(items.len());
        let first_missing = covered.end.max(request.start_index() - 1) + 1;

        let mut lookups = stream::iter(covered)
            .map(|position| async move {
                let seconds = match items[position].video_id() {
                    Some(video_id) => resolver.resolve(video_id).await,
                    None => {
                        warn!(
                            position = position + 1,
                            "Video ID is unavailable for playlist position; skipping"
                        );
                        0
                    }
                };
                (position, seconds)
            })
            .buffered(self.config.concurrency.max(1));

        while let Some((position, seconds)) = lookups.next().await {
            self.run.ensure_current()?;
            let update = state.record(seconds);
            debug!(
                position = position + 1,
                seconds,
                total = state.total_seconds,
                fraction = update.fraction,
                "Processed playlist position"
            );
            events.progress(update);
        }

        let missing = request.missing_after(items.len());
        if missing > 0 {
            self.run.ensure_current()?;
            warn!(
                first_missing,
                last_missing = request.end_index(),
                missing,
                "Playlist positions past the end of the playlist count as zero"
            );
            events.progress(state.skip(missing));
        }

        let reset = state.finish();
        events.progress(reset);
        Ok(state.into_result())
    }
}
