//! Notification sinks.
//!
//! The chat platform itself is an external collaborator. Two production sinks
//! sit at that boundary:
//!
//! - `TracingNotificationHandler` writes each delivery to the log. Used by the
//!   operator CLI where no chat connection exists.
//! - `ChannelNotificationHandler` forwards rendered notifications over a tokio
//!   channel to whichever task owns the chat connection.

use async_trait::async_trait;
use reserva_core::effects::{NotificationEffects, NotificationError};
use reserva_core::{NotificationIntent, NotificationTarget};
use tokio::sync::mpsc;

/// Logs every notification at `info`
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationHandler;

impl TracingNotificationHandler {
    /// Create a new tracing notification handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationEffects for TracingNotificationHandler {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotificationError> {
        tracing::info!(
            target: "reserva::notify",
            to = %intent.target(),
            kind = intent.kind(),
            "{}",
            intent.message()
        );
        Ok(())
    }
}

/// A rendered notification handed to the chat adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundNotification {
    /// Where to deliver
    pub target: NotificationTarget,
    /// Text to send
    pub message: String,
    /// Intent the message was rendered from
    pub intent: NotificationIntent,
}

impl From<&NotificationIntent> for OutboundNotification {
    fn from(intent: &NotificationIntent) -> Self {
        Self {
            target: intent.target(),
            message: intent.message(),
            intent: intent.clone(),
        }
    }
}

/// Forwards notifications to a chat adapter over a bounded channel
#[derive(Debug, Clone)]
pub struct ChannelNotificationHandler {
    tx: mpsc::Sender<OutboundNotification>,
}

impl ChannelNotificationHandler {
    /// Create a handler and the receiver the chat adapter drains
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<OutboundNotification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NotificationEffects for ChannelNotificationHandler {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotificationError> {
        self.tx
            .send(OutboundNotification::from(intent))
            .await
            .map_err(|_| NotificationError::Closed)
    }
}
