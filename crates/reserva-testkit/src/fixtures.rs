//! Test fixtures

use chrono::{TimeZone, Utc};
use reserva_core::{ChannelId, GuildId, Timestamp, UserId};

/// Reference instant used across tests: 2025-01-01T00:00:00Z
pub fn t0() -> Timestamp {
    Utc.timestamp_opt(1_735_689_600, 0)
        .single()
        .unwrap_or_default()
}

/// User identifier fixture
pub fn user(name: &str) -> UserId {
    UserId::new(name)
}

/// Guild identifier fixture
pub fn guild(name: &str) -> GuildId {
    GuildId::new(name)
}

/// Channel identifier fixture
pub fn channel(name: &str) -> ChannelId {
    ChannelId::new(name)
}

/// Install a test-writer tracing subscriber once per process.
///
/// Honors `RUST_LOG`; repeated calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
