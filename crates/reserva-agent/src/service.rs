//! Claim Service - request handling over the claim engine
//!
//! Each mutating request holds the ledger gate across load, decide and save,
//! then releases it before dispatching notifications. Read-only queries skip
//! the gate; every save replaces whole records, so a read sees a consistent
//! version.

use crate::config::AgentConfig;
use crate::dispatcher::NotificationDispatcher;
use crate::effects::AgentEffects;
use crate::errors::AgentError;
use async_lock::Mutex;
use reserva_claims as engine;
use reserva_core::{
    ChannelId, ChannelRef, Claim, ClaimState, GuildId, ServerConfig, Timestamp, UserId,
};
use std::sync::Arc;

/// Global mutual exclusion around load-decide-save sequences
pub type LedgerGate = Arc<Mutex<()>>;

/// Inbound claim request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    /// Requested filename
    pub filename: String,
    /// Requesting user
    pub requester: UserId,
    /// Guild the request came from, if any
    pub guild: Option<GuildId>,
}

impl ClaimRequest {
    /// Request from inside a guild
    pub fn in_guild(filename: impl Into<String>, requester: UserId, guild: GuildId) -> Self {
        Self {
            filename: filename.into(),
            requester,
            guild: Some(guild),
        }
    }

    /// Request with no guild scope (direct message)
    pub fn direct(filename: impl Into<String>, requester: UserId) -> Self {
        Self {
            filename: filename.into(),
            requester,
            guild: None,
        }
    }
}

/// A granted claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    /// The stored claim
    pub claim: Claim,
    /// Configured claim lifetime in days
    pub duration_days: u32,
    /// Whether an announcement intent was handed to the dispatcher
    pub announced: bool,
}

impl ClaimReceipt {
    /// Reply shown to the requester
    pub fn reply(&self) -> String {
        let unit = if self.duration_days == 1 { "day" } else { "days" };
        format!(
            "You have claimed `{}` for {} {}.",
            self.claim.filename, self.duration_days, unit
        )
    }
}

/// A released claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReceipt {
    /// The removed record
    pub released: Claim,
}

impl ReleaseReceipt {
    /// Reply shown to the requester
    pub fn reply(&self) -> String {
        format!("You have unclaimed `{}`.", self.released.filename)
    }
}

/// A stored announcement channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReceipt {
    /// Configured guild
    pub guild: GuildId,
    /// Announcement channel
    pub channel: ChannelId,
}

impl ChannelReceipt {
    /// Reply shown to the admin
    pub fn reply(&self) -> String {
        format!("OK channel set to <#{}>.", self.channel)
    }
}

/// One stored claim with its derived state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimStatus {
    /// Stored record
    pub claim: Claim,
    /// State at evaluation time
    pub state: ClaimState,
}

/// Request-facing claim service
#[derive(Debug, Clone)]
pub struct ClaimService {
    effects: AgentEffects,
    gate: LedgerGate,
    dispatcher: NotificationDispatcher,
    duration_days: u32,
}

impl ClaimService {
    /// Create a service with its own ledger gate
    pub fn new(effects: AgentEffects, config: &AgentConfig) -> Self {
        Self::with_gate(effects, config, Arc::new(Mutex::new(())))
    }

    /// Create a service sharing `gate` with other ledger writers
    pub fn with_gate(effects: AgentEffects, config: &AgentConfig, gate: LedgerGate) -> Self {
        let dispatcher =
            NotificationDispatcher::new(effects.notifier.clone(), config.notification_timeout());
        Self {
            effects,
            gate,
            dispatcher,
            duration_days: config.claim_duration_days,
        }
    }

    /// Gate guarding the ledger; share it with the sweeper
    pub fn gate(&self) -> LedgerGate {
        self.gate.clone()
    }

    async fn now(&self) -> Result<Timestamp, AgentError> {
        Ok(self.effects.time.physical_time().await?)
    }

    /// Claim a filename for the requester.
    ///
    /// On success the claim is persisted before the announcement (if the guild
    /// has a channel configured) is dispatched.
    ///
    /// # Errors
    /// * `AgentError::Rejected(NotFound | AlreadyClaimed)` for engine rejections
    /// * `AgentError::Ledger` / `AgentError::Time` for infrastructure failures
    pub async fn claim(&self, request: ClaimRequest) -> Result<ClaimReceipt, AgentError> {
        let (claim, announcement) = {
            let _guard = self.gate.lock().await;

            let registry = self.effects.ledger.load_filenames().await?;
            let claims = self.effects.ledger.load_claims().await?;
            let now = self.now().await?;

            let grant = match engine::attempt_claim(
                &registry,
                &claims,
                &request.filename,
                &request.requester,
                now,
                chrono::Duration::days(i64::from(self.duration_days)),
            ) {
                Ok(grant) => grant,
                Err(rejection) => {
                    tracing::info!(
                        filename = %request.filename,
                        user = %request.requester,
                        reason = rejection.code(),
                        "claim rejected"
                    );
                    return Err(rejection.into());
                }
            };

            let config = match &request.guild {
                Some(guild) => self.effects.ledger.load_config(guild).await?,
                None => ServerConfig::default(),
            };

            self.effects.ledger.save_claims(&grant.claims).await?;
            tracing::info!(
                filename = %grant.claim.filename,
                user = %grant.claim.holder,
                expires_at = %reserva_core::time::to_iso8601(&grant.claim.expires_at),
                purged = grant.purged,
                "claim granted"
            );

            let announcement =
                engine::announce_intent(request.guild.as_ref(), &config, &grant.claim);
            (grant.claim, announcement)
        };

        let announced = announcement.is_some();
        if let Some(intent) = announcement {
            self.dispatcher.dispatch(&intent).await;
        }

        Ok(ClaimReceipt {
            claim,
            duration_days: self.duration_days,
            announced,
        })
    }

    /// Release the requester's active claim on `filename`.
    ///
    /// # Errors
    /// * `AgentError::Rejected(NoActiveClaim)` if the requester holds no active claim
    pub async fn release(
        &self,
        filename: &str,
        requester: &UserId,
    ) -> Result<ReleaseReceipt, AgentError> {
        let _guard = self.gate.lock().await;

        let claims = self.effects.ledger.load_claims().await?;
        let now = self.now().await?;

        let release = match engine::attempt_release(&claims, filename, requester, now) {
            Ok(release) => release,
            Err(rejection) => {
                tracing::info!(
                    filename,
                    user = %requester,
                    reason = rejection.code(),
                    "release rejected"
                );
                return Err(rejection.into());
            }
        };

        self.effects.ledger.save_claims(&release.claims).await?;
        tracing::info!(filename, user = %requester, "claim released");

        Ok(ReleaseReceipt {
            released: release.released,
        })
    }

    /// Autocomplete for claiming: unclaimed filenames containing `partial`
    pub async fn autocomplete_claim(&self, partial: &str) -> Result<Vec<String>, AgentError> {
        let registry = self.effects.ledger.load_filenames().await?;
        let claims = self.effects.ledger.load_claims().await?;
        let now = self.now().await?;
        Ok(engine::list_available(&registry, &claims, now, partial))
    }

    /// Autocomplete for releasing: the requester's active claims containing `partial`
    pub async fn autocomplete_release(
        &self,
        partial: &str,
        requester: &UserId,
    ) -> Result<Vec<String>, AgentError> {
        let claims = self.effects.ledger.load_claims().await?;
        let now = self.now().await?;
        Ok(engine::list_mine(&claims, requester, now, partial))
    }

    /// Route a guild's claim announcements to `channel` (admin only).
    ///
    /// # Errors
    /// * `AgentError::Rejected(PermissionDenied | InvalidChannel | NoGuildContext)`
    pub async fn set_channel(
        &self,
        guild: Option<&GuildId>,
        channel: &ChannelRef,
        requester_is_admin: bool,
    ) -> Result<ChannelReceipt, AgentError> {
        let assignment = match engine::set_channel(guild, channel, requester_is_admin) {
            Ok(assignment) => assignment,
            Err(rejection) => {
                tracing::info!(
                    channel = %channel.id,
                    reason = rejection.code(),
                    "set channel rejected"
                );
                return Err(rejection.into());
            }
        };

        let _guard = self.gate.lock().await;
        let current = self.effects.ledger.load_config(&assignment.guild).await?;
        self.effects
            .ledger
            .save_config(&assignment.guild, &assignment.apply(current))
            .await?;
        tracing::info!(guild = %assignment.guild, channel = %assignment.channel, "announcement channel set");

        Ok(ChannelReceipt {
            guild: assignment.guild,
            channel: assignment.channel,
        })
    }

    /// Every stored claim with its derived state, in ledger order
    pub async fn claim_status(&self) -> Result<Vec<ClaimStatus>, AgentError> {
        let claims = self.effects.ledger.load_claims().await?;
        let now = self.now().await?;
        Ok(claims
            .into_iter()
            .map(|claim| ClaimStatus {
                state: claim.state(now),
                claim,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn receipt(days: u32) -> ClaimReceipt {
        ClaimReceipt {
            claim: Claim::new(
                "a.txt",
                UserId::new("x"),
                chrono::Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
            ),
            duration_days: days,
            announced: false,
        }
    }

    #[test]
    fn claim_reply_pluralizes_days() {
        assert_eq!(receipt(1).reply(), "You have claimed `a.txt` for 1 day.");
        assert_eq!(receipt(3).reply(), "You have claimed `a.txt` for 3 days.");
    }

    #[test]
    fn channel_reply_mentions_the_channel() {
        let receipt = ChannelReceipt {
            guild: GuildId::new("g"),
            channel: ChannelId::new("123"),
        };
        assert_eq!(receipt.reply(), "OK channel set to <#123>.");
    }
}
