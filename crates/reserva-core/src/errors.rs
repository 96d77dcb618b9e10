//! User-facing claim errors.
//!
//! Every variant is recoverable: the engine returns it, the surrounding shell
//! turns it into a reply and takes no further action. Storage failures are not
//! part of this taxonomy; see `effects::LedgerError`.

use serde::{Deserialize, Serialize};

/// Rejection produced by the claim engine.
///
/// The `Display` text is the reply shown to the requesting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ClaimError {
    /// Filename is not in the registry
    #[error("Filename not found.")]
    NotFound {
        /// Requested filename
        filename: String,
    },

    /// Filename already has an active claim
    #[error("This filename is already claimed.")]
    AlreadyClaimed {
        /// Requested filename
        filename: String,
    },

    /// Requester holds no active claim on the filename
    #[error("You do not have an active claim on this filename.")]
    NoActiveClaim {
        /// Requested filename
        filename: String,
    },

    /// New expiry would fall past the last instant the ledger can store
    #[error("This claim would expire too far in the future.")]
    ExpiryOutOfRange {
        /// Requested filename
        filename: String,
    },

    /// Admin-only operation attempted by a non-admin
    #[error("Only server admins can set the ok channel.")]
    PermissionDenied,

    /// Channel is not a plain text channel
    #[error("Please select a text channel.")]
    InvalidChannel,

    /// Operation needs a guild scope and none was given
    #[error("This command can only be used in a server.")]
    NoGuildContext,
}

impl ClaimError {
    /// Create a not found error
    pub fn not_found(filename: impl Into<String>) -> Self {
        Self::NotFound {
            filename: filename.into(),
        }
    }

    /// Create an already claimed error
    pub fn already_claimed(filename: impl Into<String>) -> Self {
        Self::AlreadyClaimed {
            filename: filename.into(),
        }
    }

    /// Create a no active claim error
    pub fn no_active_claim(filename: impl Into<String>) -> Self {
        Self::NoActiveClaim {
            filename: filename.into(),
        }
    }

    /// Create an expiry out of range error
    pub fn expiry_out_of_range(filename: impl Into<String>) -> Self {
        Self::ExpiryOutOfRange {
            filename: filename.into(),
        }
    }

    /// Stable short code, used in structured logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::AlreadyClaimed { .. } => "already_claimed",
            Self::NoActiveClaim { .. } => "no_active_claim",
            Self::ExpiryOutOfRange { .. } => "expiry_out_of_range",
            Self::PermissionDenied => "permission_denied",
            Self::InvalidChannel => "invalid_channel",
            Self::NoGuildContext => "no_guild_context",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_user_reply() {
        assert_eq!(
            ClaimError::not_found("x").to_string(),
            "Filename not found."
        );
        assert_eq!(
            ClaimError::no_active_claim("x").to_string(),
            "You do not have an active claim on this filename."
        );
        assert_eq!(
            ClaimError::NoGuildContext.to_string(),
            "This command can only be used in a server."
        );
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            ClaimError::not_found("x").code(),
            ClaimError::already_claimed("x").code(),
            ClaimError::no_active_claim("x").code(),
            ClaimError::expiry_out_of_range("x").code(),
            ClaimError::PermissionDenied.code(),
            ClaimError::InvalidChannel.code(),
            ClaimError::NoGuildContext.code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
