//! # Reserva Testkit - Layer 8: Testing
//!
//! Stateful mock handlers and fixtures for deterministic tests of the claim
//! service. Production handlers live in `reserva-effects`; nothing here is
//! meant for production wiring.

#![forbid(unsafe_code)]

/// Fixed instants, identifiers and tracing setup for tests
pub mod fixtures;

/// In-memory ledger
pub mod ledger;

/// Recording (optionally failing) notification handler
pub mod notification;

/// Manually advanced clock
pub mod time;

pub use fixtures::{channel, guild, init_test_tracing, t0, user};
pub use ledger::MemoryLedgerHandler;
pub use notification::{DeliveryBehavior, RecordingNotificationHandler};
pub use time::ControllableClock;
