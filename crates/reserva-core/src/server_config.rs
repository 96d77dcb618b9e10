//! Per-guild server configuration

use crate::identifiers::ChannelId;
use serde::{Deserialize, Serialize};

/// Configuration stored for one guild.
///
/// Persisted as `{"okChannelId": "..."}`; the field is omitted when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Channel receiving claim announcements
    #[serde(
        rename = "okChannelId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub notification_channel_id: Option<ChannelId>,
}

impl ServerConfig {
    /// Configuration routing announcements to `channel`
    pub fn with_channel(channel: ChannelId) -> Self {
        Self {
            notification_channel_id: Some(channel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_serializes_to_empty_object() {
        let json = serde_json::to_string(&ServerConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn reads_legacy_field_name() {
        let config: ServerConfig = serde_json::from_str(r#"{"okChannelId":"99"}"#).unwrap();
        assert_eq!(config, ServerConfig::with_channel(ChannelId::new("99")));
    }
}
