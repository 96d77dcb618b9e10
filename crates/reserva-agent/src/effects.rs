//! Handler bundle
//!
//! Services take their handlers through this bundle so the same service code
//! runs against filesystem handlers in production and testkit mocks in tests.

use crate::config::AgentConfig;
use reserva_core::effects::{LedgerEffects, NotificationEffects, PhysicalTimeEffects};
use reserva_effects::{FilesystemLedgerHandler, RealTimeHandler, TracingNotificationHandler};
use std::fmt;
use std::sync::Arc;

/// Effect handlers used by the runtime
#[derive(Clone)]
pub struct AgentEffects {
    /// Durable ledger
    pub ledger: Arc<dyn LedgerEffects>,
    /// Wall clock
    pub time: Arc<dyn PhysicalTimeEffects>,
    /// Notification sink
    pub notifier: Arc<dyn NotificationEffects>,
}

impl AgentEffects {
    /// Bundle arbitrary handlers
    pub fn new(
        ledger: Arc<dyn LedgerEffects>,
        time: Arc<dyn PhysicalTimeEffects>,
        notifier: Arc<dyn NotificationEffects>,
    ) -> Self {
        Self {
            ledger,
            time,
            notifier,
        }
    }

    /// Production handlers: JSON ledger under `config.data_dir`, system clock,
    /// and the given notification sink
    pub fn production_with_notifier(
        config: &AgentConfig,
        notifier: Arc<dyn NotificationEffects>,
    ) -> Self {
        let ledger = FilesystemLedgerHandler::new(config.data_dir.clone())
            .with_seed_filenames(config.seed_filenames.clone());
        Self::new(Arc::new(ledger), Arc::new(RealTimeHandler::new()), notifier)
    }

    /// Production handlers with notifications written to the log
    pub fn production(config: &AgentConfig) -> Self {
        Self::production_with_notifier(config, Arc::new(TracingNotificationHandler::new()))
    }
}

impl fmt::Debug for AgentEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentEffects").finish_non_exhaustive()
    }
}
