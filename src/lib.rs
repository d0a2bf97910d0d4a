//! Library root for `watchword-bot`.
//!
//! Watchword-bot is a Slack bot that keeps count of a watch-word:
//! - Tallies who says it and how often
//! - Announces the time since the previous occurrence after long quiet stretches
//! - Replies with a status report and leaderboard when mentioned
//!
//! The bot integrates with Slack for chat. Tracking state lives in memory only
//! and is owned by a single `Tracker` handle shared by all event handlers.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;
pub mod tracker;

use anyhow::anyhow;
use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the watchword-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with the tracker and chat client
/// - Starts the main event loop for processing messages
pub async fn start(config: Config) -> Void {
    info!("Starting watchword-bot ...");

    // Start the crypto provider.
    crypto::aws_lc_rs::default_provider().install_default().map_err(|_| anyhow!("Failed to install the crypto provider."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    info!("Stopped.");

    Ok(())
}
