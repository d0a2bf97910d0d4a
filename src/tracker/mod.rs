//! Watch-word tracking.
//!
//! The [`Tracker`] owns the only copy of [`TrackerState`] and serializes every
//! read and write behind a single mutex. Handlers receive a clone of the
//! tracker and never touch the state directly.

pub mod duration;
pub mod leaderboard;
pub mod report;
pub mod timestamp;

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::base::{
    config::Config,
    messages::{self, fill},
    types::{InboundMessage, Res, Trigger},
};

use report::render_report;
use timestamp::parse_event_timestamp;

/// Mutable tracking state; one instance per process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerState {
    /// Timestamp of the most recent hit, if any.
    pub last_event_time: Option<DateTime<Utc>>,
    /// Largest gap observed so far; never decreases.
    pub record_gap: TimeDelta,
    /// Hits per user.
    pub tally: HashMap<String, u64>,
}

/// Tracking behavior derived from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    pub watch_word: String,
    /// Hits further apart than this trigger a report.
    pub report_gap: TimeDelta,
    pub enable_leaderboard: bool,
    pub leaderboard_size: usize,
    /// Reply to the first hit ever seen instead of staying quiet.
    pub report_on_first_event: bool,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            watch_word: "piss".to_string(),
            report_gap: TimeDelta::hours(1),
            enable_leaderboard: true,
            leaderboard_size: 3,
            report_on_first_event: false,
        }
    }
}

impl From<&Config> for TrackerSettings {
    fn from(config: &Config) -> Self {
        Self {
            watch_word: config.watch_word.clone(),
            report_gap: i64::try_from(config.report_gap_secs).ok().and_then(TimeDelta::try_seconds).unwrap_or(TimeDelta::MAX),
            enable_leaderboard: config.enable_leaderboard,
            leaderboard_size: config.leaderboard_size,
            report_on_first_event: config.report_on_first_event,
        }
    }
}

/// Watch-word tracker.
///
/// A cheap, cloneable handle: every clone shares the same state and settings,
/// and all state access goes through the one mutex inside.
#[derive(Clone, Debug)]
pub struct Tracker {
    state: Arc<Mutex<TrackerState>>,
    settings: Arc<TrackerSettings>,
}

impl Tracker {
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackerState::default())),
            settings: Arc::new(settings),
        }
    }

    /// Whether `content` contains the watch-word, ignoring case.
    pub fn contains_watch_word(&self, content: &str) -> bool {
        content.to_lowercase().contains(&self.settings.watch_word.to_lowercase())
    }

    /// Decide what `message` asks of the tracker without changing anything.
    ///
    /// Own messages are always ignored and a mention wins over the watch-word.
    pub fn classify(&self, message: &InboundMessage) -> Trigger {
        if message.is_self {
            Trigger::Ignore
        } else if message.mentions_bot {
            Trigger::Mention
        } else if self.contains_watch_word(&message.content) {
            Trigger::WatchWord
        } else {
            Trigger::Ignore
        }
    }

    /// Process one inbound message, returning the reply to send, if any.
    ///
    /// Fails only when a watch-word message carries an unparseable timestamp, in
    /// which case the state is left untouched.
    #[instrument(skip_all, fields(author = %message.author_id))]
    pub async fn on_message(&self, message: &InboundMessage, now: DateTime<Utc>) -> Res<Option<String>> {
        match self.classify(message) {
            Trigger::Ignore => Ok(None),
            Trigger::Mention => {
                info!("Mentioned; reporting ...");
                Ok(Some(self.report(now).await))
            }
            Trigger::WatchWord => self.record_hit(message.tally_name(), &message.timestamp, now).await,
        }
    }

    /// Count a hit by `name` at the raw event timestamp.
    ///
    /// Returns a report when the gap since the previous hit exceeds the
    /// configured threshold. A hit older than the previous one is counted but
    /// neither reports nor moves `last_event_time` backwards.
    pub async fn record_hit(&self, name: &str, raw_timestamp: &str, now: DateTime<Utc>) -> Res<Option<String>> {
        let timestamp = parse_event_timestamp(raw_timestamp)?;

        let mut state = self.state.lock().await;

        *state.tally.entry(name.to_string()).or_insert(0) += 1;

        let reply = match state.last_event_time {
            Some(last) if timestamp < last => {
                debug!("Hit by {name} predates the previous one; counting only.");
                return Ok(None);
            }
            Some(last) => {
                let gap = timestamp - last;

                if gap > state.record_gap {
                    state.record_gap = gap;
                }

                debug!("Hit by {name}, {}s after the previous one.", gap.num_seconds());

                (gap > self.settings.report_gap).then(|| render_report(&mut state, &self.settings, now))
            }
            None => {
                info!("First hit since start, by {name}.");

                self.settings
                    .report_on_first_event
                    .then(|| fill(messages::NO_EVENTS_YET, &self.settings.watch_word))
            }
        };

        state.last_event_time = Some(timestamp);

        Ok(reply)
    }

    /// Render a report for `now` on demand.
    pub async fn report(&self, now: DateTime<Utc>) -> String {
        let mut state = self.state.lock().await;
        render_report(&mut state, &self.settings, now)
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> TrackerState {
        self.state.lock().await.clone()
    }
}
