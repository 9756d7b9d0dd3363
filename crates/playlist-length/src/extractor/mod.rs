mod default;
pub mod api_client;
pub mod error;
pub mod link;
pub mod source;
pub mod static_source;
pub mod youtube;

pub use default::{DEFAULT_TIMEOUT, ProxyConfig, create_client, default_client};
pub use link::extract_playlist_id;
pub use source::PlaylistSource;
pub use static_source::StaticSource;
pub use youtube::{YouTubeSource, YouTubeSourceConfig};
