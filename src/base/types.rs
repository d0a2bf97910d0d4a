//! Common types and result handling.

/// Error type used throughout the crate.
pub type Err = anyhow::Error;
/// Result with the crate's error type.
pub type Res<T> = Result<T, Err>;
/// Result carrying no value.
pub type Void = Res<()>;

/// A chat message as seen by the tracker, independent of the chat service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    /// Channel the message was posted in; replies go back here.
    pub channel_id: String,
    /// Stable identifier of the author.
    pub author_id: String,
    /// Display name of the author, when already known.
    pub author_name: Option<String>,
    /// Whether the bot itself authored the message.
    pub is_self: bool,
    /// Whether the message mentions the bot.
    pub mentions_bot: bool,
    /// Raw message text.
    pub content: String,
    /// Raw event timestamp as delivered by the chat service.
    pub timestamp: String,
}

impl InboundMessage {
    /// Name under which the author is tallied.
    pub fn tally_name(&self) -> &str {
        self.author_name.as_deref().unwrap_or(&self.author_id)
    }
}

/// What an inbound message asks of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Nothing to do.
    Ignore,
    /// The bot was mentioned; reply with a report.
    Mention,
    /// The message contains the watch-word.
    WatchWord,
}
