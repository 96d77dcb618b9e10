//! Expiry sweep planning.
//!
//! One sweep marks every expired, un-notified claim as notified and emits one
//! `ClaimExpired` intent per marked claim. Marking does not depend on delivery:
//! the notification is attempted at most once and a failed delivery is not
//! retried on a later sweep.

use reserva_core::{Claim, NotificationIntent, Timestamp};

/// Result of planning one sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    /// Full claim list with newly expired records marked notified
    pub claims: Vec<Claim>,
    /// One expiry intent per newly marked record, in ledger order
    pub intents: Vec<NotificationIntent>,
}

impl SweepPlan {
    /// Whether any record changed and the claim list must be persisted
    pub fn changed(&self) -> bool {
        !self.intents.is_empty()
    }
}

/// Plan a sweep over `claims` at `now`.
///
/// Selects records with `notified == false` and `now > expires_at`.
pub fn plan_sweep(mut claims: Vec<Claim>, now: Timestamp) -> SweepPlan {
    let mut intents = Vec::new();
    for claim in claims.iter_mut().filter(|c| c.is_pending_notice(now)) {
        claim.notified = true;
        intents.push(NotificationIntent::ClaimExpired {
            holder: claim.holder.clone(),
            filename: claim.filename.clone(),
        });
    }
    SweepPlan { claims, intents }
}
