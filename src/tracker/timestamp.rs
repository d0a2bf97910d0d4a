//! Parsing of chat-service event timestamps.

use anyhow::{Context, anyhow};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::base::types::Res;

/// Parse a Slack-style event timestamp (`"1700000000.123456"`).
///
/// The fractional part is optional; timestamps before the epoch are rejected.
pub fn parse_event_timestamp(raw: &str) -> Res<DateTime<Utc>> {
    let raw = raw.trim();

    let timestamp = NaiveDateTime::parse_from_str(raw, "%s%.f")
        .with_context(|| format!("Invalid event timestamp `{raw}`."))?
        .and_utc();

    if timestamp.timestamp() < 0 {
        return Err(anyhow!("Event timestamp `{raw}` is before the epoch."));
    }

    Ok(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_slack_timestamps() {
        let ts = parse_event_timestamp("1700000000.123456").unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert_eq!(ts.nanosecond(), 123_456_000);

        let ts = parse_event_timestamp(" 1700000000 ").unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert_eq!(ts.nanosecond(), 0);
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", ".5", "abc", "17000.12x", "-5.0", "1700000000.", "99999999999999999999", "yesterday"] {
            assert!(parse_event_timestamp(raw).is_err(), "accepted `{raw}`");
        }
    }
}
