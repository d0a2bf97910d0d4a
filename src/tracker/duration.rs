//! Compact rendering of elapsed time.

use chrono::TimeDelta;

/// Render a duration as `26h3m4s`, `3m4s` or `4s`.
///
/// Sub-second precision is dropped and hours are never folded into days.
/// Negative durations render as `0s`.
pub fn format_duration(duration: TimeDelta) -> String {
    let secs = duration.num_seconds().max(0);

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_magnitude() {
        assert_eq!(format_duration(TimeDelta::zero()), "0s");
        assert_eq!(format_duration(TimeDelta::seconds(45)), "45s");
        assert_eq!(format_duration(TimeDelta::seconds(184)), "3m4s");
        assert_eq!(format_duration(TimeDelta::seconds(3600)), "1h0m0s");
        assert_eq!(format_duration(TimeDelta::seconds(7384)), "2h3m4s");
        assert_eq!(format_duration(TimeDelta::seconds(26 * 3600 + 4)), "26h0m4s");
    }

    #[test]
    fn drops_fractions_and_clamps_negatives() {
        assert_eq!(format_duration(TimeDelta::milliseconds(59_999)), "59s");
        assert_eq!(format_duration(TimeDelta::seconds(-30)), "0s");
    }
}
