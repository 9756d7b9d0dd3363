//! End-to-end runs of the calculator over an in-memory source.

use std::sync::Arc;

use playlist_length::{
    engine::{CalculatorConfig, EventSender, PlaylistCalculator, RunEvent, RunWarning},
    extractor::{StaticSource, error::PlaylistError},
    presenter::time_at_speed,
};
use tokio::sync::mpsc::UnboundedReceiver;

const LINK: &str = "https://www.youtube.com/playlist?list=PLdemo";

fn three_video_source() -> StaticSource {
    StaticSource::new()
        .with_video_ids("PLdemo", ["v1", "v2", "v3"])
        .with_seconds("v1", 600)
        .with_seconds("v2", 900)
        .with_seconds("v3", 1500)
}

fn drain(rx: &mut UnboundedReceiver<RunEvent>) -> Vec<RunEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn progress_fractions(events: &[RunEvent]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Progress(update) => Some(update.fraction),
            _ => None,
        })
        .collect()
}

mod scenarios {
    use super::*;

    #[tokio::test]
    async fn test_three_item_playlist() {
        let calculator = PlaylistCalculator::new(Arc::new(three_video_source()));
        let (events, mut rx) = EventSender::channel();

        let report = calculator.submit(LINK, 1, 3, &events).await.unwrap();

        assert_eq!(report.playlist_id, "PLdemo");
        assert_eq!(report.total_seconds, 3000);
        assert_eq!(report.formatted, "00:50:00");
        assert_eq!(time_at_speed(report.total_seconds, 1.5).unwrap(), "00:33:20");
        assert_eq!(report.speeds[1].multiplier, 1.5);
        assert_eq!(report.speeds[1].formatted, "00:33:20");
        assert!(report.warnings.is_empty());

        let events = drain(&mut rx);
        let third = 1.0 / 3.0;
        assert_eq!(
            progress_fractions(&events),
            vec![third, 2.0 * third, 1.0, 0.0]
        );
        assert_eq!(
            events.last(),
            Some(&RunEvent::Finished {
                total_seconds: 3000
            })
        );
    }

    #[tokio::test]
    async fn test_end_index_beyond_playlist() {
        let calculator = PlaylistCalculator::new(Arc::new(three_video_source()));
        let (events, mut rx) = EventSender::channel();

        let report = calculator.submit(LINK, 1, 10, &events).await.unwrap();

        assert_eq!(report.total_seconds, 3000);
        assert_eq!(report.items_available, 3);
        let expected = RunWarning::RangeExceeded {
            requested: 10,
            available: 3,
        };
        assert_eq!(report.warnings, vec![expected.clone()]);

        let events = drain(&mut rx);
        assert!(events.contains(&RunEvent::Warning(expected)));
        let fractions = progress_fractions(&events);
        assert_eq!(fractions, vec![0.1, 0.2, 0.3, 1.0, 0.0]);
    }

    #[tokio::test]
    async fn test_huge_end_index_stays_bounded() {
        let calculator = PlaylistCalculator::new(Arc::new(three_video_source()));
        let (events, mut rx) = EventSender::channel();

        let report = calculator.submit(LINK, 1, 1_000_000, &events).await.unwrap();

        assert_eq!(report.total_seconds, 3000);
        let fractions = progress_fractions(&drain(&mut rx));
        assert!(fractions.len() <= 3 + 2);
        assert_eq!(fractions[fractions.len() - 2..], [1.0, 0.0]);
    }

    #[tokio::test]
    async fn test_range_starting_past_the_end() {
        let calculator = PlaylistCalculator::new(Arc::new(three_video_source()));
        let (events, mut rx) = EventSender::channel();

        let report = calculator.submit(LINK, 5, 8, &events).await.unwrap();

        assert_eq!(report.total_seconds, 0);
        assert_eq!(report.formatted, "00:00:00");
        let expected = RunWarning::RangeBeyondPlaylist {
            start: 5,
            available: 3,
        };
        assert_eq!(report.warnings, vec![expected.clone()]);
        assert!(expected.to_string().contains("past the end of the playlist"));

        let events = drain(&mut rx);
        assert!(events.contains(&RunEvent::Warning(expected)));
        assert_eq!(progress_fractions(&events), vec![1.0, 0.0]);
    }

    #[tokio::test]
    async fn test_fetch_failure_on_second_page() {
        let ids: Vec<String> = (0..80).map(|i| format!("v{i}")).collect();
        let source = StaticSource::new()
            .with_video_ids("PLdemo", ids)
            .fail_page(2);
        let calculator = PlaylistCalculator::new(Arc::new(source));
        let (events, mut rx) = EventSender::channel();

        let err = calculator.submit(LINK, 1, 80, &events).await.unwrap_err();

        assert!(matches!(err, PlaylistError::Fetch { page: 2, .. }));
        assert_eq!(err.kind(), "fetch");
        let events = drain(&mut rx);
        assert!(
            events
                .iter()
                .all(|e| !matches!(e, RunEvent::Finished { .. } | RunEvent::Progress(_)))
        );
    }

    #[tokio::test]
    async fn test_sub_range_across_pages() {
        let ids: Vec<String> = (0..120).map(|i| format!("v{i}")).collect();
        let mut source = StaticSource::new().with_video_ids("PLdemo", ids.clone());
        for id in &ids {
            source = source.with_seconds(id.clone(), 60);
        }
        let calculator = PlaylistCalculator::new(Arc::new(source)).with_config(CalculatorConfig {
            page_size: 50,
            concurrency: 8,
        });

        let report = calculator
            .submit(LINK, 45, 105, &EventSender::disabled())
            .await
            .unwrap();

        assert_eq!(report.total_seconds, 61 * 60);
        assert_eq!(report.formatted, "01:01:00");
        assert_eq!(report.items_available, 120);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_invalid_link_raises_warning() {
        let calculator = PlaylistCalculator::new(Arc::new(three_video_source()));
        let (events, mut rx) = EventSender::channel();

        let err = calculator.submit("not a link", 1, 3, &events).await.unwrap_err();

        assert_eq!(err.kind(), "invalid_link");
        assert_eq!(
            drain(&mut rx),
            vec![RunEvent::Warning(RunWarning::InvalidLink {
                link: "not a link".to_string()
            })]
        );
    }

    #[tokio::test]
    async fn test_link_without_list_param() {
        let calculator = PlaylistCalculator::new(Arc::new(three_video_source()));
        let err = calculator
            .submit(
                "https://www.youtube.com/watch?v=abc",
                1,
                3,
                &EventSender::disabled(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "missing_playlist_id");
    }

    #[tokio::test]
    async fn test_invalid_range() {
        let calculator = PlaylistCalculator::new(Arc::new(three_video_source()));
        let err = calculator
            .submit(LINK, 3, 1, &EventSender::disabled())
            .await
            .unwrap_err();
        assert!(matches!(err, PlaylistError::InvalidRange { start: 3, end: 1 }));
    }

    #[tokio::test]
    async fn test_empty_playlist() {
        let source = StaticSource::new().with_video_ids("PLdemo", Vec::<String>::new());
        let calculator = PlaylistCalculator::new(Arc::new(source));
        let err = calculator
            .submit(LINK, 1, 3, &EventSender::disabled())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "empty_playlist");
    }

    #[tokio::test]
    async fn test_missing_videos_contribute_zero() {
        let source = StaticSource::new()
            .with_video_ids("PLdemo", ["v1", "gone", "v3"])
            .with_seconds("v1", 100)
            .with_seconds("v3", 200);
        let calculator = PlaylistCalculator::new(Arc::new(source));
        let report = calculator
            .submit(LINK, 1, 3, &EventSender::disabled())
            .await
            .unwrap();
        assert_eq!(report.total_seconds, 300);
    }
}
