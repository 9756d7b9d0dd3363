mod builder;
pub mod models;

pub use builder::{YouTubeSource, YouTubeSourceConfig};
