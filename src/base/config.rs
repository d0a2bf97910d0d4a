//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default watch-word to track.
fn default_watch_word() -> String {
    "piss".to_string()
}

/// Default gap, in seconds, after which a watch-word triggers a report.
fn default_report_gap_secs() -> u64 {
    3600
}

/// Reports include the leaderboard unless told otherwise.
fn default_enable_leaderboard() -> bool {
    true
}

/// Default number of leaderboard entries.
fn default_leaderboard_size() -> usize {
    3
}

/// Configuration for the watchword-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Configuration values, as deserialized from the sources.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Slack app token used for socket mode (`SLACK_APP_TOKEN`).
    pub slack_app_token: String,
    /// Slack bot token (`SLACK_BOT_TOKEN`); the `-t` flag overrides it.
    pub slack_bot_token: String,
    /// Substring that counts as a hit, matched case-insensitively (`WATCH_WORD`).
    #[serde(default = "default_watch_word")]
    pub watch_word: String,
    /// A hit arriving more than this many seconds after the previous one triggers a report (`REPORT_GAP_SECS`).
    #[serde(default = "default_report_gap_secs")]
    pub report_gap_secs: u64,
    /// Append the leaderboard to reports (`ENABLE_LEADERBOARD`).
    #[serde(default = "default_enable_leaderboard")]
    pub enable_leaderboard: bool,
    /// Maximum number of leaderboard entries (`LEADERBOARD_SIZE`).
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
    /// Reply to the very first hit with the "nothing counted yet" message (`REPORT_ON_FIRST_EVENT`).
    #[serde(default)]
    pub report_on_first_event: bool,
}

impl Config {
    /// Load the configuration from the environment and an optional file.
    ///
    /// Environment variables are prefixed with `WATCHWORD_BOT_`. A token passed on
    /// the command line takes precedence over both sources.
    pub fn load(explicit_path: Option<&std::path::Path>, token_override: Option<&str>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("WATCHWORD_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        cfg = cfg.set_override_option("slack_bot_token", token_override)?;

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Check the loaded values for obvious mistakes.
    pub fn validate(&self) -> Res<()> {
        if self.slack_bot_token.trim().is_empty() {
            return Err(anyhow::anyhow!("Slack bot token must be set (use `-t` or `WATCHWORD_BOT_SLACK_BOT_TOKEN`)."));
        }

        if self.slack_app_token.trim().is_empty() {
            return Err(anyhow::anyhow!("Slack app token must be set (`WATCHWORD_BOT_SLACK_APP_TOKEN`)."));
        }

        if self.watch_word.trim().is_empty() {
            return Err(anyhow::anyhow!("Watch-word must not be empty."));
        }

        if self.report_gap_secs == 0 {
            return Err(anyhow::anyhow!("Report gap must be at least one second."));
        }

        if self.leaderboard_size == 0 {
            return Err(anyhow::anyhow!("Leaderboard size must be at least 1."));
        }

        Ok(())
    }
}
