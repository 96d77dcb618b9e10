//! Notification Dispatcher
//!
//! Delivers intents through the configured `NotificationEffects` handler.
//! Delivery is fire-and-forget: failures and timeouts are logged and
//! discarded, never returned, so they cannot fail or roll back the ledger
//! mutation that produced the intent.

use reserva_core::effects::NotificationEffects;
use reserva_core::NotificationIntent;
use std::sync::Arc;
use std::time::Duration;

/// What happened to one delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Handler accepted the intent
    Delivered,
    /// Handler reported a failure
    Failed,
    /// Handler did not answer within the timeout
    TimedOut,
}

/// Tally of a batch dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Intents accepted by the handler
    pub delivered: usize,
    /// Intents rejected or timed out
    pub dropped: usize,
}

impl DispatchReport {
    fn record(&mut self, outcome: DeliveryOutcome) {
        match outcome {
            DeliveryOutcome::Delivered => self.delivered += 1,
            DeliveryOutcome::Failed | DeliveryOutcome::TimedOut => self.dropped += 1,
        }
    }
}

/// Best-effort notification dispatcher
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn NotificationEffects>,
    timeout: Duration,
}

impl NotificationDispatcher {
    /// Create a dispatcher bounding each delivery by `timeout`
    pub fn new(notifier: Arc<dyn NotificationEffects>, timeout: Duration) -> Self {
        Self { notifier, timeout }
    }

    /// Attempt one delivery; never fails
    pub async fn dispatch(&self, intent: &NotificationIntent) -> DeliveryOutcome {
        let target = intent.target();
        match tokio::time::timeout(self.timeout, self.notifier.deliver(intent)).await {
            Ok(Ok(())) => {
                tracing::debug!(kind = intent.kind(), to = %target, "notification delivered");
                DeliveryOutcome::Delivered
            }
            Ok(Err(err)) => {
                tracing::warn!(
                    kind = intent.kind(),
                    to = %target,
                    error = %err,
                    "notification dropped"
                );
                DeliveryOutcome::Failed
            }
            Err(_) => {
                tracing::warn!(
                    kind = intent.kind(),
                    to = %target,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "notification timed out"
                );
                DeliveryOutcome::TimedOut
            }
        }
    }

    /// Attempt every intent in order; never fails
    pub async fn dispatch_all(&self, intents: &[NotificationIntent]) -> DispatchReport {
        let mut report = DispatchReport::default();
        for intent in intents {
            report.record(self.dispatch(intent).await);
        }
        report
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reserva_core::UserId;
    use reserva_testkit::{DeliveryBehavior, RecordingNotificationHandler};

    fn expired(name: &str) -> NotificationIntent {
        NotificationIntent::ClaimExpired {
            holder: UserId::new("u1"),
            filename: name.into(),
        }
    }

    #[tokio::test]
    async fn failures_are_swallowed_and_counted() {
        let handler = RecordingNotificationHandler::with_behavior(DeliveryBehavior::Fail);
        let dispatcher = NotificationDispatcher::new(Arc::new(handler.clone()), Duration::from_secs(1));

        let report = dispatcher
            .dispatch_all(&[expired("a.txt"), expired("b.txt")])
            .await;

        assert_eq!(report, DispatchReport { delivered: 0, dropped: 2 });
        assert_eq!(handler.attempts().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_handler_times_out() {
        let handler = RecordingNotificationHandler::with_behavior(DeliveryBehavior::Hang);
        let dispatcher =
            NotificationDispatcher::new(Arc::new(handler), Duration::from_millis(50));

        assert_eq!(
            dispatcher.dispatch(&expired("a.txt")).await,
            DeliveryOutcome::TimedOut
        );
    }
}
