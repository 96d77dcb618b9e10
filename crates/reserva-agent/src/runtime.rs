//! Runtime assembly
//!
//! `ReservaAgent` wires one ledger gate into the claim service and the expiry
//! sweeper, and owns the background task registry.

use crate::config::AgentConfig;
use crate::effects::AgentEffects;
use crate::service::ClaimService;
use crate::sweeper::ExpirySweeper;
use crate::tasks::RuntimeTaskRegistry;
use std::sync::Arc;

/// Assembled claim service runtime
#[derive(Debug)]
pub struct ReservaAgent {
    config: AgentConfig,
    service: ClaimService,
    sweeper: Arc<ExpirySweeper>,
    tasks: RuntimeTaskRegistry,
}

impl ReservaAgent {
    /// Build the runtime over `effects`; no background work starts until [`start`](Self::start)
    pub fn new(config: AgentConfig, effects: AgentEffects) -> Self {
        let service = ClaimService::new(effects.clone(), &config);
        let sweeper = Arc::new(ExpirySweeper::new(effects, &config, service.gate()));
        Self {
            config,
            service,
            sweeper,
            tasks: RuntimeTaskRegistry::new(),
        }
    }

    /// Production runtime from configuration
    pub fn from_config(config: AgentConfig) -> Self {
        let effects = AgentEffects::production(&config);
        Self::new(config, effects)
    }

    /// Active configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Request-facing claim service
    pub fn service(&self) -> &ClaimService {
        &self.service
    }

    /// Expiry sweeper (for one-off sweeps)
    pub fn sweeper(&self) -> &ExpirySweeper {
        &self.sweeper
    }

    /// Start the periodic expiry sweeper. Must be called inside a Tokio runtime.
    pub fn start(&self) {
        Arc::clone(&self.sweeper).spawn(&self.tasks);
    }

    /// Stop background tasks
    pub fn shutdown(&self) {
        tracing::info!("shutting down reserva agent");
        self.tasks.shutdown();
    }

    /// Whether shutdown has been requested
    pub fn is_shut_down(&self) -> bool {
        self.tasks.is_shut_down()
    }
}
