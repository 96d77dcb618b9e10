//! Ledger effect interface.
//!
//! The ledger is the combined durable state: filename registry, claim records
//! and per-guild configuration. Handlers own the representation exclusively.
//!
//! # Handler contract
//!
//! - First access to each record initialises it to its default (empty claim
//!   list, empty configuration map, seed filename list). Bootstrap never
//!   overwrites existing data.
//! - Saves are crash-consistent: a subsequent load sees either the previous
//!   version or the new one, never a partial write.
//! - Handlers do not lock. Callers serialise load-decide-save sequences.

use crate::claim::Claim;
use crate::identifiers::GuildId;
use crate::server_config::ServerConfig;
use async_trait::async_trait;

/// Ledger access failure.
///
/// These are infrastructure failures, not claim rejections; callers treat them
/// as fatal for the current request.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Backing record could not be read
    #[error("Ledger read failed: {0}")]
    ReadFailed(String),

    /// Backing record could not be written
    #[error("Ledger write failed: {0}")]
    WriteFailed(String),

    /// Backing record exists but does not parse
    #[error("Ledger record {record} is corrupt: {reason}")]
    Corrupt {
        /// Record name (e.g. `claims.json`)
        record: String,
        /// Parser message
        reason: String,
    },

    /// In-memory state could not be encoded
    #[error("Ledger serialization failed: {0}")]
    Serialization(String),
}

/// Load/save access to the claim ledger
#[async_trait]
pub trait LedgerEffects: Send + Sync {
    /// Ordered filename registry
    async fn load_filenames(&self) -> Result<Vec<String>, LedgerError>;

    /// All stored claim records, in stored order
    async fn load_claims(&self) -> Result<Vec<Claim>, LedgerError>;

    /// Replace the stored claim list
    async fn save_claims(&self, claims: &[Claim]) -> Result<(), LedgerError>;

    /// Configuration for one guild (default when absent)
    async fn load_config(&self, guild: &GuildId) -> Result<ServerConfig, LedgerError>;

    /// Replace the configuration for one guild, leaving other guilds intact
    async fn save_config(&self, guild: &GuildId, config: &ServerConfig)
        -> Result<(), LedgerError>;
}

/// Blanket implementation for Arc<T> where T: LedgerEffects
#[async_trait]
impl<T: LedgerEffects + ?Sized> LedgerEffects for std::sync::Arc<T> {
    async fn load_filenames(&self) -> Result<Vec<String>, LedgerError> {
        (**self).load_filenames().await
    }

    async fn load_claims(&self) -> Result<Vec<Claim>, LedgerError> {
        (**self).load_claims().await
    }

    async fn save_claims(&self, claims: &[Claim]) -> Result<(), LedgerError> {
        (**self).save_claims(claims).await
    }

    async fn load_config(&self, guild: &GuildId) -> Result<ServerConfig, LedgerError> {
        (**self).load_config(guild).await
    }

    async fn save_config(
        &self,
        guild: &GuildId,
        config: &ServerConfig,
    ) -> Result<(), LedgerError> {
        (**self).save_config(guild, config).await
    }
}
