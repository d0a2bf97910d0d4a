//! Chat service integration for watchword-bot.
//!
//! This module provides the Slack implementation of `GenericChatClient`:
//! - Receiving message events over socket mode
//! - Sending replies to channels
//! - Resolving user display names

use std::{collections::HashMap, ops::Deref, sync::Arc};

use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::prelude::*;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{InboundMessage, Res, Void},
    },
    interaction::message::{MessageQueue, spawn_message_worker},
    runtime,
    tracker::Tracker,
};

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    ///
    /// Fails when the bot token is rejected or Slack cannot be reached.
    pub async fn slack(config: &Config, tracker: Tracker) -> Res<Self> {
        let client = SlackChatClient::new(config, tracker).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<SlackChatClient> for ChatClient {
    fn from(client: SlackChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// User state for the slack socket client.
struct SlackUserState {
    queue: MessageQueue,
    bot_user_id: String,
}

/// Slack client implementation.
#[derive(Clone)]
struct SlackChatClient {
    pub app_token: SlackApiToken,
    pub bot_token: SlackApiToken,
    pub bot_user_id: String,
    pub client: Arc<FullClient>,
    pub tracker: Tracker,
    /// Display names already looked up, by user ID.
    pub user_names: Arc<RwLock<HashMap<String, String>>>,
}

impl Deref for SlackChatClient {
    type Target = FullClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub async fn new(config: &Config, tracker: Tracker) -> Res<Self> {
        // Initialize tokens.

        let app_token = SlackApiToken::new(SlackApiTokenValue(config.slack_app_token.clone()));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        // Get the bot's user ID; this is also where a bad token surfaces.

        let session = client.open_session(&bot_token);
        let bot_user = session.auth_test().await.map_err(|e| anyhow::anyhow!("Failed to connect to Slack: {}", e))?;
        let bot_user_id = bot_user.user_id.0;

        info!("Slack bot user ID: {}", bot_user_id);

        Ok(Self {
            app_token,
            bot_token,
            bot_user_id,
            client,
            tracker,
            user_names: Arc::default(),
        })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    async fn start(&self) -> Void {
        // Start the worker that handles messages in delivery order.

        let (queue, worker) = spawn_message_worker(self.tracker.clone(), ChatClient::from(self.clone()));

        // Initialize the socket mode listener.

        let socket_mode_callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_event);

        // Initialize the socket mode listener environment.

        let listener_environment = Arc::new(SlackClientEventsListenerEnvironment::new(self.client.clone()).with_user_state(SlackUserState {
            queue,
            bot_user_id: self.bot_user_id.clone(),
        }));

        let socket_mode_listener = SlackClientSocketModeListener::new(&SlackClientSocketModeConfig::new(), listener_environment, socket_mode_callbacks);

        // Register an app token to listen for events.
        socket_mode_listener.listen_for(&self.app_token).await?;

        // Open the WS connections, then run until asked to stop.
        socket_mode_listener.start().await;

        info!("Bot is now running. Press CTRL-C to exit.");

        let signal = runtime::shutdown_signal().await;

        info!("Shutting down ...");
        socket_mode_listener.shutdown().await;
        worker.abort();

        signal
    }

    #[instrument(skip(self, text))]
    async fn send_message(&self, channel_id: &str, text: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());

        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message);

        let session = self.client.open_session(&self.bot_token);

        let _ = session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_user_name(&self, user_id: &str) -> Res<String> {
        if let Some(name) = self.user_names.read().await.get(user_id) {
            return Ok(name.clone());
        }

        let request = SlackApiUsersInfoRequest::new(SlackUserId(user_id.to_string()));
        let session = self.client.open_session(&self.bot_token);

        let info = session.users_info(&request).await.map_err(|e| anyhow::anyhow!("Failed to look up user: {}", e))?;

        let name = info
            .user
            .profile
            .and_then(|p| p.display_name)
            .filter(|n| !n.is_empty())
            .or(info.user.real_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| user_id.to_string());

        self.user_names.write().await.insert(user_id.to_string(), name.clone());

        Ok(name)
    }
}

// Event conversion.

/// Convert a Slack message event into an `InboundMessage`.
///
/// Returns `None` for events without a human author (edits, deletions, system
/// notices) or without a channel.
fn to_inbound_message(event: &SlackMessageEvent, bot_user_id: &str) -> Option<InboundMessage> {
    let author_id = event.sender.user.as_ref()?.0.clone();
    let channel_id = event.origin.channel.as_ref()?.0.clone();
    let content = event.content.as_ref().and_then(|c| c.text.clone()).unwrap_or_default();

    Some(InboundMessage {
        channel_id,
        is_self: author_id == bot_user_id,
        mentions_bot: content.contains(&format!("<@{bot_user_id}>")),
        author_id,
        author_name: None,
        content,
        timestamp: event.origin.ts.0.clone(),
    })
}

// Socket mode listener callbacks for Slack.

/// Handles push events from Slack.
#[instrument(skip_all)]
async fn handle_push_event(event_callback: SlackPushEventCallback, _client: Arc<SlackHyperClient>, states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let event = event_callback.event;
    let states = states.read().await;
    let user_state = states.get_user_state::<SlackUserState>().ok_or(anyhow::anyhow!("Failed to get user state"))?;

    match event {
        SlackEventCallbackBody::Message(slack_message_event) => {
            debug!("Received message event ...");

            let Some(message) = to_inbound_message(&slack_message_event, &user_state.bot_user_id) else {
                debug!("Skipping message event without an author or channel.");
                return Ok(());
            };

            user_state.queue.push(message)?;
        }
        SlackEventCallbackBody::AppMention(_) => {
            // The same mention also arrives as a message event.
            debug!("Ignoring app mention event.");
        }
        _ => {
            warn!("Received unhandled push event.")
        }
    }

    Ok(())
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    fn event(json: serde_json::Value) -> SlackMessageEvent {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn converts_user_messages() {
        let message = to_inbound_message(
            &event(serde_json::json!({
                "channel": "C01",
                "user": "U42",
                "text": "Who said PISS?",
                "ts": "1700000000.000100",
            })),
            "UBOT",
        )
        .unwrap();

        assert_eq!(message.channel_id, "C01");
        assert_eq!(message.author_id, "U42");
        assert_eq!(message.author_name, None);
        assert_eq!(message.content, "Who said PISS?");
        assert_eq!(message.timestamp, "1700000000.000100");
        assert!(!message.is_self);
        assert!(!message.mentions_bot);
    }

    #[test]
    fn flags_mentions_and_own_messages() {
        let mention = to_inbound_message(
            &event(serde_json::json!({ "channel": "C01", "user": "U42", "text": "<@UBOT> status", "ts": "1.0" })),
            "UBOT",
        )
        .unwrap();
        assert!(mention.mentions_bot);

        let own = to_inbound_message(&event(serde_json::json!({ "channel": "C01", "user": "UBOT", "text": "report", "ts": "1.0" })), "UBOT").unwrap();
        assert!(own.is_self);
    }

    #[test]
    fn skips_events_without_an_author() {
        assert!(to_inbound_message(&event(serde_json::json!({ "channel": "C01", "text": "edited", "ts": "1.0" })), "UBOT").is_none());
    }
}
