//! Top-N rendering of the per-user tally.

use std::{collections::HashMap, fmt::Write};

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub count: u64,
}

/// Users seen more than once, most frequent first, at most `limit` of them.
///
/// Ties are ordered arbitrarily.
pub fn leaderboard(tally: &HashMap<String, u64>, limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = tally
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(name, count)| LeaderboardEntry { name: name.clone(), count: *count })
        .collect();

    entries.sort_unstable_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);

    entries
}

/// Render the leaderboard as `name: count` lines, each newline-terminated.
pub fn leaderboard_text(tally: &HashMap<String, u64>, limit: usize) -> String {
    leaderboard(tally, limit).iter().fold(String::new(), |mut out, entry| {
        let _ = writeln!(out, "{}: {}", entry.name, entry.count);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(name, count)| (name.to_string(), *count)).collect()
    }

    #[test]
    fn empty_when_nobody_qualifies() {
        assert_eq!(leaderboard_text(&HashMap::new(), 3), "");
        assert_eq!(leaderboard_text(&tally(&[("alice", 1), ("bob", 1)]), 3), "");
    }

    #[test]
    fn sorts_descending_and_truncates() {
        let t = tally(&[("alice", 2), ("bob", 7), ("carol", 5), ("dave", 3), ("erin", 1)]);

        assert_eq!(leaderboard_text(&t, 3), "bob: 7\ncarol: 5\ndave: 3\n");
        assert_eq!(leaderboard_text(&t, 1), "bob: 7\n");
    }

    #[test]
    fn upholds_invariants_with_ties() {
        let t = tally(&[("a", 4), ("b", 4), ("c", 4), ("d", 4), ("e", 2), ("f", 1), ("g", 0)]);
        let entries = leaderboard(&t, 3);

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.count == 4));
        assert!(entries.windows(2).all(|w| w[0].count >= w[1].count));

        let entries = leaderboard(&t, 10);
        assert_eq!(entries.len(), 5);
        assert!(entries.iter().all(|e| e.count > 1));
        assert!(entries.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(entries.last().map(|e| e.name.as_str()), Some("e"));
    }
}
