//! # Reserva Agent - Layer 6: Runtime
//!
//! The imperative shell around the pure claim engine. Every request runs the
//! same sequence:
//!
//! 1. take the ledger gate (one global async mutex)
//! 2. load the ledger and read the clock
//! 3. ask `reserva-claims` for the next state
//! 4. persist it
//! 5. release the gate, then hand notification intents to the dispatcher
//!
//! The expiry sweeper is a periodic task that follows the same sequence and
//! shares the gate with the claim service, so a sweep can never interleave with
//! a claim's load-decide-save.

#![forbid(unsafe_code)]

/// Agent configuration (TOML)
pub mod config;

/// Notification dispatch with timeout and failure swallowing
pub mod dispatcher;

/// Handler bundle passed to services
pub mod effects;

/// Runtime error type
pub mod errors;

/// Runtime assembly: services plus background tasks
pub mod runtime;

/// Claim service (request handling)
pub mod service;

/// Periodic expiry sweeper
pub mod sweeper;

/// Background task registry
pub mod tasks;

pub use config::{AgentConfig, ConfigError, LoggingConfig, MAX_CLAIM_DURATION_DAYS};
pub use dispatcher::{DeliveryOutcome, DispatchReport, NotificationDispatcher};
pub use effects::AgentEffects;
pub use errors::AgentError;
pub use runtime::ReservaAgent;
pub use service::{
    ChannelReceipt, ClaimReceipt, ClaimRequest, ClaimService, ClaimStatus, LedgerGate,
    ReleaseReceipt,
};
pub use sweeper::{ExpirySweeper, SweepReport};
pub use tasks::RuntimeTaskRegistry;
