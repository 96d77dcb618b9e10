//! Identifier types handed to the core by the chat platform.
//!
//! The platform hands out opaque string identifiers (snowflakes). They are
//! wrapped so a user id cannot be passed where a channel id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw platform identifier
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw platform identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_identifier!(
    /// Identity of a chat user; the holder of a claim
    UserId
);

string_identifier!(
    /// Identity of a guild (server); scope for notification configuration
    GuildId
);

string_identifier!(
    /// Identity of a channel inside a guild
    ChannelId
);

/// Kind of channel as reported by the chat platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Plain guild text channel
    Text,
    /// Voice channel
    Voice,
    /// Channel category (a folder of channels)
    Category,
    /// Announcement / news channel
    Announcement,
    /// Forum channel
    Forum,
    /// Thread inside another channel
    Thread,
}

impl ChannelKind {
    /// Whether claim announcements may be routed to this kind of channel.
    ///
    /// Only plain text channels qualify.
    pub fn accepts_announcements(self) -> bool {
        matches!(self, ChannelKind::Text)
    }
}

impl std::str::FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "voice" => Ok(Self::Voice),
            "category" => Ok(Self::Category),
            "announcement" | "news" => Ok(Self::Announcement),
            "forum" => Ok(Self::Forum),
            "thread" => Ok(Self::Thread),
            other => Err(format!("unknown channel kind: {other}")),
        }
    }
}

/// A channel reference as supplied with an admin request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    /// Channel identifier
    pub id: ChannelId,
    /// Channel kind reported by the platform
    pub kind: ChannelKind,
}

impl ChannelRef {
    /// Create a channel reference
    pub fn new(id: impl Into<ChannelId>, kind: ChannelKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}
