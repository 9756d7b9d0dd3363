use crate::{
    extractor::error::PlaylistError,
    model::{DurationSeconds, SpeedEntry},
};

/// Playback speeds shown alongside the total.
pub const DISPLAY_SPEEDS: [f64; 3] = [1.25, 1.5, 2.0];

/// Formats seconds as `HH:MM:SS`. The hours field grows past two digits as needed.
pub fn format_hms(total_seconds: DurationSeconds) -> String {
    let hours = total_seconds / 3600;
    let remainder = total_seconds % 3600;
    let minutes = remainder / 60;
    let seconds = remainder % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Time needed to watch `total_seconds` of video at `multiplier` speed, floored
/// to whole seconds.
pub fn time_at_speed(
    total_seconds: DurationSeconds,
    multiplier: f64,
) -> Result<String, PlaylistError> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(PlaylistError::InvalidMultiplier(multiplier));
    }
    let adjusted = (total_seconds as f64 / multiplier).floor() as DurationSeconds;
    Ok(format_hms(adjusted))
}

pub fn speed_breakdown(total_seconds: DurationSeconds) -> Result<Vec<SpeedEntry>, PlaylistError> {
    DISPLAY_SPEEDS
        .iter()
        .map(|&multiplier| {
            Ok(SpeedEntry {
                multiplier,
                formatted: time_at_speed(total_seconds, multiplier)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(3000), "00:50:00");
        assert_eq!(format_hms(360_000), "100:00:00");
    }

    #[test]
    fn test_time_at_speed() {
        assert_eq!(time_at_speed(7200, 2.0).unwrap(), "01:00:00");
        assert_eq!(time_at_speed(3000, 1.5).unwrap(), "00:33:20");
        assert_eq!(time_at_speed(3000, 1.25).unwrap(), "00:40:00");
        // 1001 / 2 = 500.5, floored
        assert_eq!(time_at_speed(1001, 2.0).unwrap(), "00:08:20");
    }

    #[test]
    fn test_time_at_speed_rejects_bad_multiplier() {
        assert!(matches!(
            time_at_speed(100, 0.0),
            Err(PlaylistError::InvalidMultiplier(_))
        ));
        assert!(time_at_speed(100, -1.5).is_err());
        assert!(time_at_speed(100, f64::NAN).is_err());
        assert!(time_at_speed(100, f64::INFINITY).is_err());
    }

    #[test]
    fn test_speed_breakdown() {
        let speeds = speed_breakdown(3000).unwrap();
        let formatted: Vec<_> = speeds.iter().map(|s| s.formatted.as_str()).collect();
        assert_eq!(formatted, vec!["00:40:00", "00:33:20", "00:25:00"]);
    }

    proptest! {
        #[test]
        fn prop_format_hms_round_trips(total in 0u64..10_000_000) {
            let formatted = format_hms(total);
            let parts: Vec<u64> = formatted.split(':').map(|p| p.parse().unwrap()).collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert!(parts[1] < 60 && parts[2] < 60);
            prop_assert_eq!(parts[0] * 3600 + parts[1] * 60 + parts[2], total);
        }

        #[test]
        fn prop_unit_speed_is_identity(total in 0u64..10_000_000) {
            prop_assert_eq!(time_at_speed(total, 1.0).unwrap(), format_hms(total));
        }
    }
}
