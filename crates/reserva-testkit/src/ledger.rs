//! Mock ledger handler for testing
//!
//! Keeps the three ledger records behind `Arc<RwLock<_>>` so clones share state
//! and tests can inspect what the service persisted.

use async_lock::RwLock;
use async_trait::async_trait;
use reserva_core::effects::{LedgerEffects, LedgerError};
use reserva_core::{Claim, GuildId, ServerConfig};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct LedgerState {
    filenames: Vec<String>,
    claims: Vec<Claim>,
    configs: HashMap<GuildId, ServerConfig>,
}

/// In-memory ledger handler for testing
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerHandler {
    state: Arc<RwLock<LedgerState>>,
    claim_saves: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryLedgerHandler {
    /// Ledger with the given registry and no claims
    pub fn with_filenames<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = LedgerState {
            filenames: filenames.into_iter().map(Into::into).collect(),
            ..LedgerState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            ..Self::default()
        }
    }

    /// Replace the stored claims directly, bypassing the save counter
    pub async fn seed_claims(&self, claims: Vec<Claim>) {
        self.state.write().await.claims = claims;
    }

    /// Snapshot of the stored claims
    pub async fn claims(&self) -> Vec<Claim> {
        self.state.read().await.claims.clone()
    }

    /// Number of `save_claims` calls so far
    pub fn claim_saves(&self) -> usize {
        self.claim_saves.load(Ordering::SeqCst)
    }

    /// Make every subsequent save fail with `LedgerError::WriteFailed`
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), LedgerError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::WriteFailed("injected write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerEffects for MemoryLedgerHandler {
    async fn load_filenames(&self) -> Result<Vec<String>, LedgerError> {
        Ok(self.state.read().await.filenames.clone())
    }

    async fn load_claims(&self) -> Result<Vec<Claim>, LedgerError> {
        Ok(self.state.read().await.claims.clone())
    }

    async fn save_claims(&self, claims: &[Claim]) -> Result<(), LedgerError> {
        self.check_writable()?;
        self.state.write().await.claims = claims.to_vec();
        self.claim_saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_config(&self, guild: &GuildId) -> Result<ServerConfig, LedgerError> {
        Ok(self
            .state
            .read()
            .await
            .configs
            .get(guild)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_config(
        &self,
        guild: &GuildId,
        config: &ServerConfig,
    ) -> Result<(), LedgerError> {
        self.check_writable()?;
        self.state
            .write()
            .await
            .configs
            .insert(guild.clone(), config.clone());
        Ok(())
    }
}
