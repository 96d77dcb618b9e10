//! Layer 1: Effect Trait Definitions
//!
//! Pure trait definitions for every side effect the claim service performs.
//! This module defines **what** effects exist; handlers define **how**.
//!
//! - **Ledger**: durable filename registry, claims and per-guild configuration
//!   (production: `reserva-effects::FilesystemLedgerHandler`)
//! - **Time**: wall-clock reads (production: `reserva-effects::RealTimeHandler`)
//! - **Notification**: best-effort delivery of notification intents
//!
//! Mock handlers for every trait live in `reserva-testkit`.

pub mod ledger;
pub mod notification;
pub mod time;

pub use ledger::{LedgerEffects, LedgerError};
pub use notification::{NotificationEffects, NotificationError};
pub use time::{PhysicalTimeEffects, TimeError};
