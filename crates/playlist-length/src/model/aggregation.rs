use serde::{Deserialize, Serialize};

use super::playlist::DurationSeconds;
use crate::extractor::error::PlaylistError;

/// A 1-based inclusive range of playlist positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRequest {
    start_index: usize,
    end_index: usize,
}

impl AggregationRequest {
    pub fn new(start_index: usize, end_index: usize) -> Result<Self, PlaylistError> {
        if start_index == 0 || end_index < start_index {
            return Err(PlaylistError::InvalidRange {
                start: start_index,
                end: end_index,
            });
        }
        Ok(Self {
            start_index,
            end_index,
        })
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Number of positions covered by the range.
    pub fn item_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// 0-based positions of the range that fall within the first `available` items.
    ///
    /// Empty when the range starts past the end of the playlist.
    pub fn positions_within(&self, available: usize) -> std::ops::Range<usize> {
        (self.start_index - 1)..self.end_index.min(available)
    }

    /// Positions of the range that lie past the first `available` items.
    pub fn missing_after(&self, available: usize) -> usize {
        self.end_index - available.max(self.start_index - 1).min(self.end_index)
    }
}

/// Progress snapshot published after each processed position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub processed: usize,
    pub total: usize,
    pub fraction: f64,
}

/// Accumulator for a single aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationState {
    pub total_seconds: DurationSeconds,
    pub items_processed: usize,
    pub progress_fraction: f64,
    expected: usize,
}

impl AggregationState {
    pub fn new(request: &AggregationRequest) -> Self {
        Self {
            total_seconds: 0,
            items_processed: 0,
            progress_fraction: 0.0,
            expected: request.item_count(),
        }
    }

    /// Records one processed position and returns the resulting snapshot.
    pub fn record(&mut self, seconds: DurationSeconds) -> ProgressUpdate {
        debug_assert!(self.items_processed < self.expected);
        self.total_seconds = self.total_seconds.saturating_add(seconds);
        self.items_processed = (self.items_processed + 1).min(self.expected);
        self.progress_fraction = self.items_processed as f64 / self.expected as f64;
        self.snapshot()
    }

    /// Resets the progress fraction, signalling the run is no longer in progress.
    pub fn finish(&mut self) -> ProgressUpdate {
        self.progress_fraction = 0.0;
        self.snapshot()
    }

    pub fn snapshot(&self) -> ProgressUpdate {
        ProgressUpdate {
            processed: self.items_processed,
            total: self.expected,
            fraction: self.progress_fraction,
        }
    }

    /// Records `count` positions without a playlist item in a single step.
    pub fn skip(&mut self, count: usize) -> ProgressUpdate {
        self.items_processed = self.items_processed.saturating_add(count).min(self.expected);
        self.progress_fraction = self.items_processed as f64 / self.expected as f64;
        self.snapshot()
    }

    pub fn into_result(self) -> AggregationResult {
        AggregationResult {
            total_seconds: self.total_seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub total_seconds: DurationSeconds,
}
