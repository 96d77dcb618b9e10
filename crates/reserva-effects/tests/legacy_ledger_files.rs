//! Ledger files in the established on-disk layout must load unchanged, and
//! files we write must keep the same layout.

use chrono::{Duration, TimeZone, Utc};
use reserva_core::effects::LedgerEffects;
use reserva_core::{ChannelId, Claim, GuildId, ServerConfig, UserId};
use reserva_effects::{FilesystemLedgerHandler, CLAIMS_FILE, SERVER_CONFIG_FILE};
use tempfile::TempDir;

const LEGACY_CLAIMS: &str = r#"[
  {
    "filename": "file2.txt",
    "userId": "301234567890123456",
    "expiresAt": "2025-02-03T10:20:30.456Z",
    "notified": false
  },
  {
    "filename": "file3.txt",
    "userId": "301234567890123457",
    "expiresAt": "2025-01-01T00:00:00.000Z",
    "notified": true
  }
]"#;

const LEGACY_CONFIG: &str = r#"{
  "111": {
    "okChannelId": "222"
  },
  "333": {}
}"#;

#[tokio::test]
async fn loads_claims_in_the_established_layout() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CLAIMS_FILE), LEGACY_CLAIMS).unwrap();

    let claims = FilesystemLedgerHandler::new(dir.path())
        .load_claims()
        .await
        .unwrap();

    let first_expiry = Utc.with_ymd_and_hms(2025, 2, 3, 10, 20, 30).unwrap()
        + Duration::milliseconds(456);
    assert_eq!(
        claims,
        vec![
            Claim::new("file2.txt", UserId::new("301234567890123456"), first_expiry),
            Claim {
                notified: true,
                ..Claim::new(
                    "file3.txt",
                    UserId::new("301234567890123457"),
                    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                )
            },
        ]
    );
}

#[tokio::test]
async fn rewritten_claims_keep_the_layout() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CLAIMS_FILE), LEGACY_CLAIMS).unwrap();
    let ledger = FilesystemLedgerHandler::new(dir.path());

    let claims = ledger.load_claims().await.unwrap();
    ledger.save_claims(&claims).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(dir.path().join(CLAIMS_FILE)).unwrap(),
        LEGACY_CLAIMS
    );
}

#[tokio::test]
async fn loads_existing_server_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(SERVER_CONFIG_FILE), LEGACY_CONFIG).unwrap();
    let ledger = FilesystemLedgerHandler::new(dir.path());

    assert_eq!(
        ledger.load_config(&GuildId::new("111")).await.unwrap(),
        ServerConfig::with_channel(ChannelId::new("222"))
    );
    assert_eq!(
        ledger.load_config(&GuildId::new("333")).await.unwrap(),
        ServerConfig::default()
    );
    assert_eq!(
        ledger.load_config(&GuildId::new("unknown")).await.unwrap(),
        ServerConfig::default()
    );
}
