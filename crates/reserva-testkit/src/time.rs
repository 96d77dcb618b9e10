//! Controllable clock for deterministic expiry tests
//!
//! Time only moves when a test advances or sets it.

use async_trait::async_trait;
use chrono::Duration;
use parking_lot::Mutex;
use reserva_core::effects::{PhysicalTimeEffects, TimeError};
use reserva_core::Timestamp;
use std::sync::Arc;

/// Clock frozen at an instant until advanced
#[derive(Debug, Clone)]
pub struct ControllableClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ControllableClock {
    /// Clock frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Current frozen instant
    pub fn now(&self) -> Timestamp {
        *self.now.lock()
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    /// Jump to an absolute instant
    pub fn set(&self, to: Timestamp) {
        *self.now.lock() = to;
    }
}

#[async_trait]
impl PhysicalTimeEffects for ControllableClock {
    async fn physical_time(&self) -> Result<Timestamp, TimeError> {
        Ok(self.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::t0;

    #[tokio::test]
    async fn advancing_moves_the_reported_time() {
        let clock = ControllableClock::new(t0());
        clock.advance(Duration::milliseconds(1_500));
        assert_eq!(
            clock.physical_time().await.unwrap(),
            t0() + Duration::milliseconds(1_500)
        );
    }

    #[test]
    fn clones_share_the_same_instant() {
        let clock = ControllableClock::new(t0());
        let other = clock.clone();
        other.advance(Duration::days(1));
        assert_eq!(clock.now(), t0() + Duration::days(1));
    }
}
