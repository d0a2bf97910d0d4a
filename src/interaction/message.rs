//! Handling of inbound chat messages.
//!
//! Messages are handled strictly one at a time, in delivery order, by a single
//! worker task fed through a [`MessageQueue`].

use chrono::Utc;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};
use tracing::{Instrument, error, info, instrument, warn};

use crate::{
    base::types::{InboundMessage, Trigger, Void},
    service::chat::ChatClient,
    tracker::Tracker,
};

/// Sending half of the message worker.
///
/// Cloneable; the worker stops once every clone has been dropped.
#[derive(Clone, Debug)]
pub struct MessageQueue {
    tx: UnboundedSender<InboundMessage>,
}

impl MessageQueue {
    /// Enqueue a message behind everything pushed before it.
    pub fn push(&self, message: InboundMessage) -> Void {
        self.tx.send(message).map_err(|_| anyhow::anyhow!("Message worker has stopped."))
    }
}

/// Start the message worker.
///
/// The returned handle completes after the last `MessageQueue` clone is dropped
/// and every queued message has been processed.
pub fn spawn_message_worker(tracker: Tracker, chat: ChatClient) -> (MessageQueue, JoinHandle<()>) {
    let (tx, rx) = unbounded_channel();
    let worker = tokio::spawn(run_message_worker(rx, tracker, chat).in_current_span());

    (MessageQueue { tx }, worker)
}

#[instrument(skip_all)]
async fn run_message_worker(mut rx: UnboundedReceiver<InboundMessage>, tracker: Tracker, chat: ChatClient) {
    while let Some(message) = rx.recv().await {
        // Process the event.
        let result = process_message(message, &tracker, &chat).await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    }

    info!("Message worker stopped.");
}

/// Run the tracker for one message and send its reply, if any.
///
/// Errors mean the message was dropped without touching the tracker. A failed
/// send is only logged; the tracker has already counted the message by then.
#[instrument(skip_all, fields(channel = %message.channel_id))]
pub async fn process_message(mut message: InboundMessage, tracker: &Tracker, chat: &ChatClient) -> Void {
    let trigger = tracker.classify(&message);

    if trigger == Trigger::Ignore {
        return Ok(());
    }

    // Names are only needed for the tally.
    if trigger == Trigger::WatchWord && message.author_name.is_none() {
        match chat.get_user_name(&message.author_id).await {
            Ok(name) => message.author_name = Some(name),
            Err(err) => warn!("Falling back to the user ID: {}", err),
        }
    }

    let Some(reply) = tracker.on_message(&message, Utc::now()).await? else {
        return Ok(());
    };

    if let Err(err) = chat.send_message(&message.channel_id, &reply).await {
        warn!("Failed to send reply: {}", err);
    }

    Ok(())
}
