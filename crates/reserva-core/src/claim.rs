//! Claim records.
//!
//! A claim is a time-bounded reservation of one filename by one user. Expiry is
//! never stored; it is recomputed from `expires_at` on every read. The only
//! cached bit is `notified`, which flips once after expiry.

use crate::identifiers::UserId;
use crate::time::{self, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A persisted claim record
///
/// Field names follow the on-disk layout: `{filename, userId, expiresAt, notified}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Claimed filename (member of the registry at creation time)
    pub filename: String,
    /// User holding the claim
    #[serde(rename = "userId")]
    pub holder: UserId,
    /// Instant at which the claim stops being active
    #[serde(with = "time::iso8601")]
    pub expires_at: Timestamp,
    /// Whether the expiry notification has been attempted
    #[serde(default)]
    pub notified: bool,
}

impl Claim {
    /// Create a fresh, un-notified claim
    pub fn new(filename: impl Into<String>, holder: UserId, expires_at: Timestamp) -> Self {
        Self {
            filename: filename.into(),
            holder,
            expires_at,
            notified: false,
        }
    }

    /// A claim is active while its expiry lies strictly in the future.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.expires_at > now
    }

    /// Whether the sweeper should pick this record up at `now`.
    pub fn is_pending_notice(&self, now: Timestamp) -> bool {
        !self.notified && now > self.expires_at
    }

    /// Whether this is an active claim on `filename` held by `holder`.
    pub fn is_active_for(&self, filename: &str, holder: &UserId, now: Timestamp) -> bool {
        self.filename == filename && &self.holder == holder && self.is_active(now)
    }

    /// Derived lifecycle state at `now`
    pub fn state(&self, now: Timestamp) -> ClaimState {
        if self.is_active(now) {
            ClaimState::Active
        } else if self.notified {
            ClaimState::ExpiredNotified
        } else {
            ClaimState::ExpiredPendingNotice
        }
    }
}

/// Lifecycle state of a single claim record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimState {
    /// `now < expires_at`
    Active,
    /// Expired, expiry notice not yet attempted
    ExpiredPendingNotice,
    /// Expired, expiry notice attempted
    ExpiredNotified,
}

impl fmt::Display for ClaimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClaimState::Active => "active",
            ClaimState::ExpiredPendingNotice => "expired (notice pending)",
            ClaimState::ExpiredNotified => "expired (notified)",
        };
        f.write_str(label)
    }
}
