//! Reply templates rendered by the tracker.
//!
//! Every template may contain a `{word}` placeholder, which is replaced with the
//! configured watch-word before the text is sent.

/// Reply when a report is requested before any watch-word was ever seen.
pub const NO_EVENTS_YET: &str = "No {word} since I started counting";

/// Headline of a report; followed by the whole number of days.
pub const DAYS_WITHOUT: &str = "Days without {word}: ";

/// Elapsed time since the last watch-word.
pub const TIME_SINCE_LAST: &str = "Time since last {word}: ";

/// Longest observed gap.
pub const LONGEST_GAP: &str = "Longest time between {word}s: ";

/// Leaderboard heading.
pub const LEADERBOARD_HEADING: &str = "Most frequent offenders:";

/// Substitute the watch-word into a template.
pub fn fill(template: &str, word: &str) -> String {
    template.replace("{word}", word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_every_placeholder() {
        assert_eq!(fill("{word} and {word}s", "tea"), "tea and teas");
        assert_eq!(fill(LEADERBOARD_HEADING, "tea"), LEADERBOARD_HEADING);
    }
}
