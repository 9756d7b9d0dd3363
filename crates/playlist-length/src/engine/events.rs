use serde::Serialize;
use tokio::sync::mpsc;
use tracing::trace;

use crate::model::{DurationSeconds, ProgressUpdate};

/// Non-fatal conditions worth surfacing to the user while a run proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunWarning {
    InvalidLink { link: String },
    RangeExceeded { requested: usize, available: usize },
    RangeBeyondPlaylist { start: usize, available: usize },
}

impl std::fmt::Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunWarning::InvalidLink { link } => write!(f, "Invalid Playlist Link: {link}"),
            RunWarning::RangeExceeded {
                requested,
                available,
            } => write!(
                f,
                "Videos not found, Range is incorrect (requested up to #{requested}, playlist has {available})"
            ),
            RunWarning::RangeBeyondPlaylist { start, available } => write!(
                f,
                "Videos not found, Range is incorrect (range starts at #{start}, past the end of the playlist with {available} videos)"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Progress(ProgressUpdate),
    Warning(RunWarning),
    Finished { total_seconds: DurationSeconds },
}

/// Publishing side of a run's event stream.
///
/// Sending never fails: a dropped receiver just means nobody is listening.
#[derive(Debug, Clone, Default)]
pub struct EventSender {
    tx: Option<mpsc::UnboundedSender<RunEvent>>,
}

impl EventSender {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RunEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sender that discards every event.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn send(&self, event: RunEvent) {
        if let Some(tx) = &self.tx
            && tx.send(event).is_err()
        {
            trace!("event receiver dropped");
        }
    }

    pub fn progress(&self, update: ProgressUpdate) {
        self.send(RunEvent::Progress(update));
    }

    pub fn warning(&self, warning: RunWarning) {
        self.send(RunEvent::Warning(warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_are_delivered_in_order() {
        let (events, mut rx) = EventSender::channel();
        events.warning(RunWarning::RangeExceeded {
            requested: 10,
            available: 3,
        });
        events.send(RunEvent::Finished { total_seconds: 5 });
        drop(events);

        assert!(matches!(rx.recv().await, Some(RunEvent::Warning(_))));
        assert_eq!(
            rx.recv().await,
            Some(RunEvent::Finished { total_seconds: 5 })
        );
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_closed_receiver_is_ignored() {
        let (events, rx) = EventSender::channel();
        drop(rx);
        events.send(RunEvent::Finished { total_seconds: 1 });
        EventSender::disabled().send(RunEvent::Finished { total_seconds: 1 });
    }

    #[test]
    fn test_warning_messages() {
        let warning = RunWarning::RangeExceeded {
            requested: 10,
            available: 3,
        };
        assert!(warning.to_string().starts_with("Videos not found, Range is incorrect"));

        let warning = RunWarning::RangeBeyondPlaylist {
            start: 5,
            available: 3,
        };
        assert_eq!(
            warning.to_string(),
            "Videos not found, Range is incorrect (range starts at #5, past the end of the playlist with 3 videos)"
        );
        let value = serde_json::to_value(&warning).unwrap();
        assert_eq!(value["type"], "range_beyond_playlist");
        assert_eq!(value["start"], 5);
    }
}
