use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    engine::{
        aggregator::{Aggregator, AggregatorConfig},
        events::{EventSender, RunEvent, RunWarning},
        pager::PlaylistPager,
        resolver::DurationResolver,
        run::RunTracker,
    },
    extractor::{
        error::PlaylistError,
        link::extract_playlist_id,
        source::{MAX_PAGE_SIZE, PlaylistSource},
    },
    model::{AggregationRequest, CalculationReport, PlaylistReference},
    presenter::{format_hms, speed_breakdown},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorConfig {
    pub page_size: u32,
    pub concurrency: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            concurrency: AggregatorConfig::default().concurrency,
        }
    }
}

/// Entry point for computing the watch time of a playlist range.
///
/// One calculator runs one aggregation at a time: submitting a new request
/// supersedes any run still in flight, which then ends with
/// [`PlaylistError::Superseded`].
pub struct PlaylistCalculator {
    source: Arc<dyn PlaylistSource>,
    config: CalculatorConfig,
    runs: RunTracker,
}

impl PlaylistCalculator {
    pub fn new(source: Arc<dyn PlaylistSource>) -> Self {
        Self {
            source,
            config: CalculatorConfig::default(),
            runs: RunTracker::new(),
        }
    }

    pub fn with_config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Computes the watch time of positions `start_index..=end_index` (1-based)
    /// of the playlist referenced by `link`.
    ///
    /// Progress, warnings and completion are published on `events`.
    pub async fn submit(
        &self,
        link: &str,
        start_index: usize,
        end_index: usize,
        events: &EventSender,
    ) -> Result<CalculationReport, PlaylistError> {
        let request = AggregationRequest::new(start_index, end_index)?;

        let reference = match extract_playlist_id(link) {
            Ok(Some(reference)) => reference,
            Ok(None) => return Err(PlaylistError::MissingPlaylistId(link.to_string())),
            Err(e) => {
                warn!(link, "Invalid Playlist Link");
                events.warning(RunWarning::InvalidLink {
                    link: link.to_string(),
                });
                return Err(e);
            }
        };

        self.calculate(&reference, request, events).await
    }

    /// Same as [`submit`](Self::submit) for an already known playlist id.
    pub async fn calculate(
        &self,
        reference: &PlaylistReference,
        request: AggregationRequest,
        events: &EventSender,
    ) -> Result<CalculationReport, PlaylistError> {
        let run = self.runs.begin();
        info!(
            run = run.id(),
            source = self.source.name(),
            playlist_id = %reference,
            start = request.start_index(),
            end = request.end_index(),
            "Starting aggregation run"
        );

        let paged = PlaylistPager::new(self.source.as_ref(), self.config.page_size)
            .with_run(run.clone())
            .fetch_up_to(reference, request.end_index())
            .await?;

        let mut warnings = Vec::new();
        if let Some(exceeded) = paged.range_exceeded {
            let warning = if request.start_index() > exceeded.available {
                RunWarning::RangeBeyondPlaylist {
                    start: request.start_index(),
                    available: exceeded.available,
                }
            } else {
                RunWarning::RangeExceeded {
                    requested: exceeded.requested,
                    available: exceeded.available,
                }
            };
            let error = PlaylistError::from(exceeded);
            warn!(
                playlist_id = %reference,
                kind = error.kind(),
                error = %error,
                "{}",
                warning
            );
            events.warning(warning.clone());
            warnings.push(warning);
        }

        let aggregator = Aggregator::new(
            DurationResolver::new(self.source.as_ref()),
            AggregatorConfig {
                concurrency: self.config.concurrency,
            },
        )
        .with_run(run);
        let result = aggregator.run(&paged.items, &request, events).await?;

        let report = CalculationReport {
            playlist_id: reference.id.clone(),
            request,
            items_available: paged.items.len(),
            total_seconds: result.total_seconds,
            formatted: format_hms(result.total_seconds),
            speeds: speed_breakdown(result.total_seconds)?,
            warnings,
        };

        info!(
            playlist_id = %reference,
            total_seconds = report.total_seconds,
            formatted = %report.formatted,
            "Aggregation run finished"
        );
        events.send(RunEvent::Finished {
            total_seconds: report.total_seconds,
        });
        Ok(report)
    }
}
