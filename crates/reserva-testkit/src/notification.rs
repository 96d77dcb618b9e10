//! Recording notification handler
//!
//! Records every delivery attempt, including ones it is told to fail, so tests
//! can assert exactly which intents reached the delivery boundary.

use async_trait::async_trait;
use parking_lot::Mutex;
use reserva_core::effects::{NotificationEffects, NotificationError};
use reserva_core::NotificationIntent;
use std::sync::Arc;
use std::time::Duration;

/// How the handler responds to a delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryBehavior {
    /// Accept every intent
    #[default]
    Succeed,
    /// Reject every intent as undeliverable
    Fail,
    /// Never complete (until the caller gives up)
    Hang,
}

/// Notification handler that records attempts
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationHandler {
    attempts: Arc<Mutex<Vec<NotificationIntent>>>,
    behavior: Arc<Mutex<DeliveryBehavior>>,
}

impl RecordingNotificationHandler {
    /// Handler that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler with a fixed behavior
    pub fn with_behavior(behavior: DeliveryBehavior) -> Self {
        let handler = Self::default();
        handler.set_behavior(behavior);
        handler
    }

    /// Change how subsequent attempts are answered
    pub fn set_behavior(&self, behavior: DeliveryBehavior) {
        *self.behavior.lock() = behavior;
    }

    /// Every intent offered so far, in order
    pub fn attempts(&self) -> Vec<NotificationIntent> {
        self.attempts.lock().clone()
    }

    /// Forget recorded attempts
    pub fn clear(&self) {
        self.attempts.lock().clear();
    }
}

#[async_trait]
impl NotificationEffects for RecordingNotificationHandler {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotificationError> {
        self.attempts.lock().push(intent.clone());
        let behavior = *self.behavior.lock();
        match behavior {
            DeliveryBehavior::Succeed => Ok(()),
            DeliveryBehavior::Fail => Err(NotificationError::Unreachable {
                target: intent.target(),
            }),
            DeliveryBehavior::Hang => loop {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            },
        }
    }
}
