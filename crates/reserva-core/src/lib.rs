//! # Reserva Core - Layer 1: Interfaces
//!
//! Foundational types and effect interfaces for the Reserva filename claim
//! service. Everything here is pure data or trait signatures.
//!
//! # Architecture Constraints
//!
//! - YES identifiers, claim records and per-guild configuration
//! - YES the user-facing error taxonomy
//! - YES effect traits (ledger, time, notification)
//! - NO effect handler implementations (those live in `reserva-effects`)
//! - NO claim decision logic (that's `reserva-claims`)
//! - NO mock handlers (those live in `reserva-testkit`)

#![forbid(unsafe_code)]

/// Claim records and the derived claim state
pub mod claim;

/// Pure effect interfaces (no implementations)
pub mod effects;

/// User-facing claim error taxonomy
pub mod errors;

/// User, guild and channel identifiers
pub mod identifiers;

/// Notification intents emitted by the core for delivery
pub mod intent;

/// Per-guild server configuration
pub mod server_config;

/// Wall-clock timestamps and their persisted ISO-8601 form
pub mod time;

pub use claim::{Claim, ClaimState};
pub use errors::ClaimError;
pub use identifiers::{ChannelId, ChannelKind, ChannelRef, GuildId, UserId};
pub use intent::{NotificationIntent, NotificationTarget};
pub use server_config::ServerConfig;
pub use time::Timestamp;

/// Maximum number of entries an autocomplete listing may return.
pub const AUTOCOMPLETE_PAGE_SIZE: usize = 25;
