use serde::Serialize;

use super::{aggregation::AggregationRequest, playlist::DurationSeconds};
use crate::engine::events::RunWarning;

/// Watch time at one playback speed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedEntry {
    pub multiplier: f64,
    pub formatted: String,
}

/// Final outcome of a successful run, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationReport {
    pub playlist_id: String,
    pub request: AggregationRequest,
    /// Number of playlist entries retrieved for this run.
    pub items_available: usize,
    pub total_seconds: DurationSeconds,
    pub formatted: String,
    pub speeds: Vec<SpeedEntry>,
    pub warnings: Vec<RunWarning>,
}
