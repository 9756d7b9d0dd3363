pub mod aggregation;
pub mod playlist;
pub mod report;

pub use aggregation::{AggregationRequest, AggregationResult, AggregationState, ProgressUpdate};
pub use playlist::{ContinuationToken, DurationSeconds, PageEntry, PlaylistItem, PlaylistPage, PlaylistReference};
pub use report::{CalculationReport, SpeedEntry};
