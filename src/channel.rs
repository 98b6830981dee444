use crate::models::Event;
use crate::parsing;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

/// In-process pub/sub channel that every chat stream subscribes to.
#[derive(Clone)]
pub struct ChatChannel {
    name: String,
    sender: broadcast::Sender<Event>,
}

impl ChatChannel {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            name: name.into(),
            sender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns the number of subscriptions that received the event.
    /// Publishing with nobody listening is not an error.
    pub fn publish(&self, event: Event) -> usize {
        let delivered = self.sender.send(event).unwrap_or(0);
        debug!(channel = %self.name, delivered, "Published event");
        delivered
    }

    pub fn publish_message(&self, user: &str, text: &str) -> usize {
        self.publish(Event::message(parsing::encode_payload(user, text)))
    }

    pub fn publish_quit(&self, user: &str) -> usize {
        self.publish(Event::message(parsing::quit_command(user)))
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            channel: self.name.clone(),
            pending: Some(Event::subscribe(self.name.clone())),
            receiver: self.sender.subscribe(),
        }
    }
}

/// Yields a `subscribe` control event before anything published.
pub struct Subscription {
    channel: String,
    pending: Option<Event>,
    receiver: broadcast::Receiver<Event>,
}

impl Subscription {
    pub async fn next(&mut self) -> Option<Event> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }

        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(channel = %self.channel, skipped, "Subscription lagged, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
