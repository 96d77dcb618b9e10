//! Physical time effect interface.
//!
//! Claim expiry, the sweep predicate and new expiry instants are all computed
//! from the value returned here, never from the system clock directly.

use crate::time::Timestamp;
use async_trait::async_trait;

/// Error type for time operations.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// Clock could not be read
    #[error("Clock unavailable: {reason}")]
    ClockUnavailable {
        /// Underlying cause
        reason: String,
    },
}

/// Wall-clock source
#[async_trait]
pub trait PhysicalTimeEffects: Send + Sync {
    /// Current UTC instant
    async fn physical_time(&self) -> Result<Timestamp, TimeError>;
}

/// Blanket implementation for Arc<T> where T: PhysicalTimeEffects
#[async_trait]
impl<T: PhysicalTimeEffects + ?Sized> PhysicalTimeEffects for std::sync::Arc<T> {
    async fn physical_time(&self) -> Result<Timestamp, TimeError> {
        (**self).physical_time().await
    }
}
