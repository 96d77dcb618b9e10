//! Layer 3: Time Effect Handler - Production Only
//!
//! Delegates to the operating system clock. Readings are truncated to the
//! millisecond precision the ledger persists, so an expiry computed in memory
//! equals the one read back from disk.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use reserva_core::effects::{PhysicalTimeEffects, TimeError};
use reserva_core::Timestamp;

/// Real time handler for production use
#[derive(Debug, Clone, Default)]
pub struct RealTimeHandler;

impl RealTimeHandler {
    /// Create a new real time handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhysicalTimeEffects for RealTimeHandler {
    async fn physical_time(&self) -> Result<Timestamp, TimeError> {
        Ok(Utc::now().trunc_subsecs(3))
    }
}
