//! Status report rendering.

use chrono::{DateTime, TimeDelta, Utc};

use crate::base::messages::{self, fill};

use super::{TrackerSettings, TrackerState, duration::format_duration, leaderboard::leaderboard_text};

/// Render the status report for `now`.
///
/// Rendering counts as an observation: the time elapsed since the last hit is
/// folded into the record gap.
pub fn render_report(state: &mut TrackerState, settings: &TrackerSettings, now: DateTime<Utc>) -> String {
    let word = settings.watch_word.as_str();

    let Some(last) = state.last_event_time else {
        return fill(messages::NO_EVENTS_YET, word);
    };

    let elapsed = (now - last).max(TimeDelta::zero());
    let days = elapsed.num_hours() / 24;

    if elapsed > state.record_gap {
        state.record_gap = elapsed;
    }

    let mut report = format!(
        "{}{}\n\n{}{}\n{}{}",
        fill(messages::DAYS_WITHOUT, word),
        days,
        fill(messages::TIME_SINCE_LAST, word),
        format_duration(elapsed),
        fill(messages::LONGEST_GAP, word),
        format_duration(state.record_gap),
    );

    if settings.enable_leaderboard {
        report.push('\n');
        report.push_str(messages::LEADERBOARD_HEADING);
        report.push('\n');
        report.push_str(&leaderboard_text(&state.tally, settings.leaderboard_size));
    }

    report
}
