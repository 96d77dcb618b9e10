//! Notification intents.
//!
//! The core never delivers anything itself. It emits intents; a dispatcher
//! hands them to a `NotificationEffects` handler and discards failures.

use crate::identifiers::{ChannelId, GuildId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request to inform a user or channel of a claim event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationIntent {
    /// A claim was granted in a guild with a configured announcement channel
    ClaimAnnounced {
        /// Guild the claim was made from
        guild: GuildId,
        /// Configured announcement channel for that guild
        channel: ChannelId,
        /// Claimed filename
        filename: String,
        /// New holder
        holder: UserId,
    },

    /// A claim expired and its holder has not been told yet
    ClaimExpired {
        /// Former holder
        holder: UserId,
        /// Filename whose claim expired
        filename: String,
    },
}

/// Where an intent is delivered
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationTarget {
    /// Direct message to a user
    User(UserId),
    /// Message posted in a guild channel
    Channel(ChannelId),
}

impl fmt::Display for NotificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationTarget::User(user) => write!(f, "user:{user}"),
            NotificationTarget::Channel(channel) => write!(f, "channel:{channel}"),
        }
    }
}

impl NotificationIntent {
    /// Delivery target of this intent
    pub fn target(&self) -> NotificationTarget {
        match self {
            NotificationIntent::ClaimAnnounced { channel, .. } => {
                NotificationTarget::Channel(channel.clone())
            }
            NotificationIntent::ClaimExpired { holder, .. } => {
                NotificationTarget::User(holder.clone())
            }
        }
    }

    /// Filename the intent is about
    pub fn filename(&self) -> &str {
        match self {
            NotificationIntent::ClaimAnnounced { filename, .. }
            | NotificationIntent::ClaimExpired { filename, .. } => filename,
        }
    }

    /// Message text to deliver
    pub fn message(&self) -> String {
        match self {
            NotificationIntent::ClaimAnnounced {
                filename, holder, ..
            } => format!("{holder} has just claimed {filename} for the day."),
            NotificationIntent::ClaimExpired { filename, .. } => {
                format!("Your claim on `{filename}` has expired.")
            }
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationIntent::ClaimAnnounced { .. } => "claim_announced",
            NotificationIntent::ClaimExpired { .. } => "claim_expired",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_intent_targets_the_holder() {
        let intent = NotificationIntent::ClaimExpired {
            holder: UserId::new("u1"),
            filename: "a.txt".into(),
        };
        assert_eq!(intent.target(), NotificationTarget::User(UserId::new("u1")));
        assert_eq!(intent.message(), "Your claim on `a.txt` has expired.");
    }

    #[test]
    fn announcement_targets_the_channel() {
        let intent = NotificationIntent::ClaimAnnounced {
            guild: GuildId::new("g1"),
            channel: ChannelId::new("c1"),
            filename: "a.txt".into(),
            holder: UserId::new("u1"),
        };
        assert_eq!(
            intent.target(),
            NotificationTarget::Channel(ChannelId::new("c1"))
        );
        assert_eq!(intent.message(), "u1 has just claimed a.txt for the day.");
        assert_eq!(intent.filename(), "a.txt");
    }
}
