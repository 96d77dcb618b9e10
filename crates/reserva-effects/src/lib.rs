//! # Reserva Effects - Layer 3: Production Handlers
//!
//! Stateless implementations of the effect traits from `reserva-core`.
//!
//! **Layer Constraint**: NO mock handlers - those belong in `reserva-testkit`.

#![forbid(unsafe_code)]

/// JSON-file ledger with atomic replacement
pub mod ledger;

/// Notification sinks
pub mod notification;

/// System clock
pub mod time;

pub use ledger::{
    FilesystemLedgerHandler, CLAIMS_FILE, DEFAULT_SEED_FILENAMES, FILENAMES_FILE,
    SERVER_CONFIG_FILE,
};
pub use notification::{ChannelNotificationHandler, OutboundNotification, TracingNotificationHandler};
pub use time::RealTimeHandler;
