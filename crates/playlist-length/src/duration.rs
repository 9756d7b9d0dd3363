//! Parsing of the compact `PT#H#M#S` duration strings returned by the video API.

use std::sync::LazyLock;

use regex::Regex;

use crate::{extractor::error::PlaylistError, model::DurationSeconds};

pub static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration regex is valid")
});

/// Parses a duration string such as `PT1H2M3S` into seconds.
///
/// Every component is optional and defaults to zero, so `PT` alone parses to 0.
/// The pattern is searched for anywhere in the input; day components (`P1DT2H`)
/// are not part of the grammar and fail to parse.
pub fn parse_duration(duration: &str) -> Result<DurationSeconds, PlaylistError> {
    let caps = DURATION_REGEX
        .captures(duration)
        .ok_or_else(|| PlaylistError::InvalidDuration(duration.to_string()))?;

    let component = |idx: usize| -> Result<u64, PlaylistError> {
        caps.get(idx)
            .map(|m| m.as_str().parse::<u64>())
            .transpose()
            .map(|v| v.unwrap_or(0))
            .map_err(|_| PlaylistError::InvalidDuration(duration.to_string()))
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| PlaylistError::InvalidDuration(duration.to_string()))
}

/// Renders seconds back into the `PT#H#M#S` form, omitting zero components.
pub fn to_iso8601(total_seconds: DurationSeconds) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds > 0 || total_seconds == 0 {
        out.push_str(&format!("{seconds}S"));
    }
    out
}
