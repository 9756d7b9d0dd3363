//! Watch-time calculator for video playlists.
//!
//! Given a shareable playlist link and a 1-based range of positions, the
//! [`PlaylistCalculator`](engine::PlaylistCalculator) pages through the
//! playlist, looks up every video's duration and reports the total together
//! with the time it takes at common playback speeds.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use playlist_length::{
//!     engine::{EventSender, PlaylistCalculator},
//!     extractor::{YouTubeSource, YouTubeSourceConfig, default_client},
//! };
//!
//! # async fn run() -> Result<(), playlist_length::extractor::error::PlaylistError> {
//! let source = YouTubeSource::new(YouTubeSourceConfig::new("API_KEY"), default_client()?);
//! let calculator = PlaylistCalculator::new(Arc::new(source));
//! let report = calculator
//!     .submit(
//!         "https://www.youtube.com/playlist?list=PLBCF2DAC6FFB574DE",
//!         1,
//!         10,
//!         &EventSender::disabled(),
//!     )
//!     .await?;
//! println!("{}", report.formatted);
//! # Ok(())
//! # }
//! ```

pub mod duration;
pub mod engine;
pub mod extractor;
pub mod model;
pub mod presenter;
