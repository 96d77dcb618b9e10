//! Expiry Sweeper
//!
//! Periodically marks newly expired claims as notified, persists the ledger,
//! and then tells each former holder their claim expired. Marking happens
//! regardless of delivery outcome, so each expiry notice is attempted at most
//! once; a failed delivery is not retried on the next sweep.

use crate::config::AgentConfig;
use crate::dispatcher::{DispatchReport, NotificationDispatcher};
use crate::effects::AgentEffects;
use crate::errors::AgentError;
use crate::service::LedgerGate;
use crate::tasks::RuntimeTaskRegistry;
use reserva_claims::plan_sweep;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Claim records inspected
    pub inspected: usize,
    /// Records newly marked notified
    pub marked: usize,
    /// Delivery results for the marked records
    pub dispatch: DispatchReport,
}

/// Periodic expiry sweeper
#[derive(Debug, Clone)]
pub struct ExpirySweeper {
    effects: AgentEffects,
    gate: LedgerGate,
    dispatcher: NotificationDispatcher,
    interval: Duration,
}

impl ExpirySweeper {
    /// Create a sweeper sharing `gate` with the claim service
    pub fn new(effects: AgentEffects, config: &AgentConfig, gate: LedgerGate) -> Self {
        let dispatcher =
            NotificationDispatcher::new(effects.notifier.clone(), config.notification_timeout());
        Self {
            effects,
            gate,
            dispatcher,
            interval: config.sweep_interval(),
        }
    }

    /// Configured sweep period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one sweep.
    ///
    /// # Errors
    /// * `AgentError::Ledger` / `AgentError::Time` if the ledger or clock fails;
    ///   nothing is dispatched in that case
    pub async fn run_once(&self) -> Result<SweepReport, AgentError> {
        let (inspected, intents) = {
            let _guard = self.gate.lock().await;

            let claims = self.effects.ledger.load_claims().await?;
            let now = self.effects.time.physical_time().await?;
            let inspected = claims.len();

            let plan = plan_sweep(claims, now);
            if plan.changed() {
                self.effects.ledger.save_claims(&plan.claims).await?;
            }
            (inspected, plan.intents)
        };

        let dispatch = self.dispatcher.dispatch_all(&intents).await;
        let report = SweepReport {
            inspected,
            marked: intents.len(),
            dispatch,
        };

        if report.marked > 0 {
            tracing::info!(
                inspected = report.inspected,
                marked = report.marked,
                delivered = report.dispatch.delivered,
                dropped = report.dispatch.dropped,
                "expiry sweep complete"
            );
        } else {
            tracing::debug!(inspected = report.inspected, "expiry sweep found nothing");
        }
        Ok(report)
    }

    /// Register the sweeper as a periodic task on `tasks`.
    ///
    /// The first sweep runs immediately. A failed sweep is logged and the
    /// schedule continues.
    pub fn spawn(self: Arc<Self>, tasks: &RuntimeTaskRegistry) {
        let interval = self.interval;
        tracing::info!(interval_secs = interval.as_secs(), "starting expiry sweeper");
        tasks.spawn_interval_until(interval, move || {
            let sweeper = Arc::clone(&self);
            async move {
                if let Err(err) = sweeper.run_once().await {
                    tracing::error!(error = %err, "expiry sweep failed");
                }
                true
            }
        });
    }
}
