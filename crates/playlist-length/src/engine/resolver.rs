use tracing::{debug, warn};

use crate::{
    duration::parse_duration,
    extractor::{error::PlaylistError, source::PlaylistSource},
    model::DurationSeconds,
};

/// Looks up video durations, degrading every failure to zero seconds.
#[derive(Clone, Copy)]
pub struct DurationResolver<'a> {
    source: &'a dyn PlaylistSource,
}

impl<'a> DurationResolver<'a> {
    pub fn new(source: &'a dyn PlaylistSource) -> Self {
        Self { source }
    }

    /// Duration of `video_id` in seconds.
    ///
    /// A video the source does not know, a failed lookup and an unparsable
    /// duration string all count as zero. None of them abort the run.
    pub async fn resolve(&self, video_id: &str) -> DurationSeconds {
        match self.try_resolve(video_id).await {
            Ok(Some(seconds)) => {
                debug!(video_id, seconds, "Resolved video duration");
                seconds
            }
            Ok(None) => {
                warn!(video_id, "No video found for video ID");
                0
            }
            Err(e) => {
                warn!(video_id, error = %e, "Failed to fetch video duration");
                0
            }
        }
    }

    pub async fn try_resolve(
        &self,
        video_id: &str,
    ) -> Result<Option<DurationSeconds>, PlaylistError> {
        self.source
            .get_video_duration(video_id)
            .await?
            .map(|raw| parse_duration(&raw))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::static_source::StaticSource;

    #[tokio::test]
    async fn test_resolves_known_video() {
        let source = StaticSource::new().with_duration("a", "PT1H2M3S");
        let resolver = DurationResolver::new(&source);
        assert_eq!(resolver.resolve("a").await, 3723);
    }

    #[tokio::test]
    async fn test_unknown_video_is_zero() {
        let source = StaticSource::new();
        let resolver = DurationResolver::new(&source);
        assert_eq!(resolver.resolve("missing").await, 0);
        assert_eq!(resolver.try_resolve("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_zero() {
        let source = StaticSource::new().with_seconds("a", 60).fail_video("a");
        let resolver = DurationResolver::new(&source);
        assert_eq!(resolver.resolve("a").await, 0);
        assert!(resolver.try_resolve("a").await.is_err());
    }

    #[tokio::test]
    async fn test_unparsable_duration_is_zero() {
        let source = StaticSource::new().with_duration("a", "P1DT2H");
        let resolver = DurationResolver::new(&source);
        assert_eq!(resolver.resolve("a").await, 0);
        assert!(matches!(
            resolver.try_resolve("a").await,
            Err(PlaylistError::InvalidDuration(_))
        ));
    }
}
