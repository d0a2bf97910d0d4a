//! Runtime services and shared state for the watchword-bot.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::chat::ChatClient,
    tracker::{Tracker, TrackerSettings},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the tracker, chat client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The watch-word tracker; the only owner of the tracking state.
    pub tracker: Tracker,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    ///
    /// Connects to the chat service, so a bad token fails here.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the tracker.
        let tracker = Tracker::new(TrackerSettings::from(&config));

        // Initialize the slack client.
        let chat = ChatClient::slack(&config, tracker.clone()).await?;

        Ok(Self { config, tracker, chat })
    }

    pub async fn start(&self) -> Void {
        self.chat.start().await
    }
}

/// Wait for Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() -> Void {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}
