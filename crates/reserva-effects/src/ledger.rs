//! Layer 3: Filesystem Ledger Handler - Production Only
//!
//! Stores the ledger as three independent JSON files under a base directory:
//!
//! | File | Content | Default |
//! |------|---------|---------|
//! | `filenames.json` | array of filenames | seed list |
//! | `claims.json` | array of `{filename, userId, expiresAt, notified}` | `[]` |
//! | `server-config.json` | object guild id → `{okChannelId?}` | `{}` |
//!
//! Each file is created with its default on first access and never overwritten
//! by bootstrap. Writes go to a sibling temporary file which is flushed to disk
//! and then renamed over the target, so a reader sees either the old or the new
//! version.

use async_trait::async_trait;
use reserva_core::effects::{LedgerEffects, LedgerError};
use reserva_core::{Claim, GuildId, ServerConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Filename registry file
pub const FILENAMES_FILE: &str = "filenames.json";
/// Claim records file
pub const CLAIMS_FILE: &str = "claims.json";
/// Per-guild configuration file
pub const SERVER_CONFIG_FILE: &str = "server-config.json";

/// Registry written on first access when no seed list is configured
pub const DEFAULT_SEED_FILENAMES: [&str; 3] = ["file1.txt", "file2.txt", "file3.txt"];

type GuildConfigs = BTreeMap<GuildId, ServerConfig>;

/// Filesystem-backed ledger for production use
///
/// The handler holds no state besides its paths and is the sole writer of the
/// files it manages. It does not lock; the claim service serialises access.
#[derive(Debug, Clone)]
pub struct FilesystemLedgerHandler {
    /// Directory holding the ledger files
    base_path: PathBuf,
    /// Registry written when `filenames.json` does not exist yet
    seed_filenames: Vec<String>,
}

impl FilesystemLedgerHandler {
    /// Create a handler rooted at `base_path` with the default seed registry
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            seed_filenames: DEFAULT_SEED_FILENAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replace the seed registry used on first access
    pub fn with_seed_filenames(mut self, seed: Vec<String>) -> Self {
        self.seed_filenames = seed;
        self
    }

    /// Directory holding the ledger files
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_of(&self, record: &str) -> PathBuf {
        self.base_path.join(record)
    }

    /// Read `record`, creating it from `default` when it does not exist.
    async fn read_or_bootstrap<T, F>(&self, record: &str, default: F) -> Result<T, LedgerError>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce() -> T,
    {
        let path = self.path_of(record);
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| LedgerError::Corrupt {
                record: record.to_string(),
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let value = default();
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| LedgerError::Serialization(e.to_string()))?;
                self.write_atomic(record, &bytes).await?;
                tracing::info!(record, path = %path.display(), "initialised ledger record");
                Ok(value)
            }
            Err(e) => Err(LedgerError::ReadFailed(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Replace `record` with `bytes` via write-to-temp, fsync, rename.
    async fn write_atomic(&self, record: &str, bytes: &[u8]) -> Result<(), LedgerError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            LedgerError::WriteFailed(format!("Failed to create ledger directory: {}", e))
        })?;

        let target = self.path_of(record);
        let staging = self.path_of(&format!(".{record}.tmp"));

        let mut file = fs::File::create(&staging).await.map_err(|e| {
            LedgerError::WriteFailed(format!("Failed to create {}: {}", staging.display(), e))
        })?;
        file.write_all(bytes).await.map_err(|e| {
            LedgerError::WriteFailed(format!("Failed to write {}: {}", staging.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            LedgerError::WriteFailed(format!("Failed to sync {}: {}", staging.display(), e))
        })?;
        drop(file);

        fs::rename(&staging, &target).await.map_err(|e| {
            LedgerError::WriteFailed(format!(
                "Failed to replace {}: {}",
                target.display(),
                e
            ))
        })?;
        Ok(())
    }

    async fn write_pretty<T: Serialize + ?Sized>(
        &self,
        record: &str,
        value: &T,
    ) -> Result<(), LedgerError> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        self.write_atomic(record, &bytes).await
    }

    async fn load_all_configs(&self) -> Result<GuildConfigs, LedgerError> {
        self.read_or_bootstrap(SERVER_CONFIG_FILE, GuildConfigs::new)
            .await
    }
}

#[async_trait]
impl LedgerEffects for FilesystemLedgerHandler {
    async fn load_filenames(&self) -> Result<Vec<String>, LedgerError> {
        let seed = self.seed_filenames.clone();
        self.read_or_bootstrap(FILENAMES_FILE, move || seed).await
    }

    async fn load_claims(&self) -> Result<Vec<Claim>, LedgerError> {
        self.read_or_bootstrap(CLAIMS_FILE, Vec::new).await
    }

    async fn save_claims(&self, claims: &[Claim]) -> Result<(), LedgerError> {
        self.write_pretty(CLAIMS_FILE, claims).await?;
        tracing::debug!(count = claims.len(), "saved claims");
        Ok(())
    }

    async fn load_config(&self, guild: &GuildId) -> Result<ServerConfig, LedgerError> {
        let mut all = self.load_all_configs().await?;
        Ok(all.remove(guild).unwrap_or_default())
    }

    async fn save_config(
        &self,
        guild: &GuildId,
        config: &ServerConfig,
    ) -> Result<(), LedgerError> {
        let mut all = self.load_all_configs().await?;
        all.insert(guild.clone(), config.clone());
        self.write_pretty(SERVER_CONFIG_FILE, &all).await?;
        tracing::debug!(%guild, "saved server config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reserva_core::{ChannelId, UserId};
    use tempfile::TempDir;

    fn handler(dir: &TempDir) -> FilesystemLedgerHandler {
        FilesystemLedgerHandler::new(dir.path())
    }

    #[tokio::test]
    async fn first_access_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let ledger = handler(&dir);

        assert_eq!(
            ledger.load_filenames().await.unwrap(),
            vec!["file1.txt", "file2.txt", "file3.txt"]
        );
        assert!(ledger.load_claims().await.unwrap().is_empty());
        assert_eq!(
            ledger.load_config(&GuildId::new("g")).await.unwrap(),
            ServerConfig::default()
        );

        assert_eq!(
            std::fs::read_to_string(dir.path().join(CLAIMS_FILE)).unwrap(),
            "[]"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join(SERVER_CONFIG_FILE)).unwrap(),
            "{}"
        );
    }

    #[tokio::test]
    async fn bootstrap_never_overwrites_existing_records() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(FILENAMES_FILE), r#"["only.txt"]"#).unwrap();

        let ledger = handler(&dir).with_seed_filenames(vec!["seed.txt".into()]);
        assert_eq!(ledger.load_filenames().await.unwrap(), vec!["only.txt"]);
        assert_eq!(ledger.load_filenames().await.unwrap(), vec!["only.txt"]);
    }

    #[tokio::test]
    async fn claims_round_trip_through_disk() {
        let dir = TempDir::new().unwrap();
        let ledger = handler(&dir);
        let expires = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let claims = vec![Claim::new("file1.txt", UserId::new("42"), expires)];

        ledger.save_claims(&claims).await.unwrap();

        assert_eq!(ledger.load_claims().await.unwrap(), claims);
        assert!(!dir.path().join(".claims.json.tmp").exists());
    }

    #[tokio::test]
    async fn latest_storable_expiry_reads_back() {
        let dir = TempDir::new().unwrap();
        let ledger = handler(&dir);
        let claims = vec![Claim::new(
            "file1.txt",
            UserId::new("42"),
            reserva_core::time::latest_persistable(),
        )];

        ledger.save_claims(&claims).await.unwrap();

        assert_eq!(ledger.load_claims().await.unwrap(), claims);
    }

    #[tokio::test]
    async fn save_config_keeps_other_guilds() {
        let dir = TempDir::new().unwrap();
        let ledger = handler(&dir);
        let g1 = GuildId::new("g1");
        let g2 = GuildId::new("g2");

        ledger
            .save_config(&g1, &ServerConfig::with_channel(ChannelId::new("c1")))
            .await
            .unwrap();
        ledger
            .save_config(&g2, &ServerConfig::with_channel(ChannelId::new("c2")))
            .await
            .unwrap();

        assert_eq!(
            ledger.load_config(&g1).await.unwrap(),
            ServerConfig::with_channel(ChannelId::new("c1"))
        );
        assert_eq!(
            ledger.load_config(&g2).await.unwrap(),
            ServerConfig::with_channel(ChannelId::new("c2"))
        );
    }

    #[tokio::test]
    async fn corrupt_record_is_reported_not_replaced() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CLAIMS_FILE), "{ not json").unwrap();

        let err = handler(&dir).load_claims().await.unwrap_err();
        assert!(matches!(err, LedgerError::Corrupt { ref record, .. } if record == CLAIMS_FILE));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(CLAIMS_FILE)).unwrap(),
            "{ not json"
        );
    }
}
