//! # Reserva Claims - Layer 2: Domain Logic
//!
//! **Purpose**: decide claim lifecycle transitions without performing I/O.
//!
//! Every function takes the current ledger state and an evaluation instant and
//! returns the next state plus a result. Nothing here loads, saves, reads the
//! clock or delivers notifications; `reserva-agent` is the imperative shell
//! that does, in that order: load, decide, save, dispatch.
//!
//! - `engine`: claim, release, autocomplete listings, channel assignment
//! - `sweep`: selection of newly expired claims for one-shot notification

#![forbid(unsafe_code)]

/// Claim, release and listing decisions
pub mod engine;

/// Expiry sweep planning
pub mod sweep;

pub use engine::{
    announce_intent, attempt_claim, attempt_release, list_available, list_mine, set_channel,
    ChannelAssignment, ClaimGrant, ClaimRelease,
};
pub use sweep::{plan_sweep, SweepPlan};
