pub mod aggregator;
pub mod calculator;
pub mod events;
pub mod pager;
pub mod resolver;
pub mod run;

pub use aggregator::{Aggregator, AggregatorConfig};
pub use calculator::{CalculatorConfig, PlaylistCalculator};
pub use events::{EventSender, RunEvent, RunWarning};
pub use pager::{PagedItems, PlaylistPager, RangeExceeded};
pub use resolver::DurationResolver;
pub use run::{RunToken, RunTracker};
