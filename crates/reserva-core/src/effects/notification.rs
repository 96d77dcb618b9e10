//! Notification delivery interface.
//!
//! Handlers report failures honestly; the dispatcher in `reserva-agent` is the
//! component that swallows them.

use crate::intent::{NotificationIntent, NotificationTarget};
use async_trait::async_trait;

/// Delivery failure reported by a notification handler
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Target user or channel could not be resolved
    #[error("Notification target unreachable: {target}")]
    Unreachable {
        /// Target that could not be reached
        target: NotificationTarget,
    },

    /// Transport accepted nothing
    #[error("Notification delivery failed: {reason}")]
    DeliveryFailed {
        /// Underlying cause
        reason: String,
    },

    /// Handler has been shut down
    #[error("Notification handler closed")]
    Closed,
}

/// Delivers notification intents to users and channels
#[async_trait]
pub trait NotificationEffects: Send + Sync {
    /// Deliver one intent
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotificationError>;
}

/// Blanket implementation for Arc<T> where T: NotificationEffects
#[async_trait]
impl<T: NotificationEffects + ?Sized> NotificationEffects for std::sync::Arc<T> {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotificationError> {
        (**self).deliver(intent).await
    }
}
