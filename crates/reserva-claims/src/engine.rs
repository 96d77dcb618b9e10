//! Claim Engine - pure claim lifecycle decisions
//!
//! Functions here never mutate their inputs. A successful transition returns the
//! complete next claim list for the caller to persist.
//!
//! State machine for one claim record:
//!
//! ```text
//! Active --(time passes expires_at)--> ExpiredPendingNotice --(sweep)--> ExpiredNotified
//!   |                                          |                               |
//!   +--(release by holder)--> deleted          +---(new claim on filename)-----+--> deleted
//! ```
//!
//! There is no transition back to `Active`; a new claim is a fresh record.

use chrono::Duration;
use reserva_core::{
    time, ChannelId, ChannelRef, Claim, ClaimError, GuildId, NotificationIntent, ServerConfig,
    Timestamp, UserId, AUTOCOMPLETE_PAGE_SIZE,
};

/// A granted claim and the ledger state that records it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimGrant {
    /// The newly created claim
    pub claim: Claim,
    /// Next claim list: stale records for the filename removed, new claim appended
    pub claims: Vec<Claim>,
    /// Number of expired records for the filename that were dropped
    pub purged: usize,
}

/// A released claim and the ledger state without it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRelease {
    /// The record that was removed
    pub released: Claim,
    /// Next claim list
    pub claims: Vec<Claim>,
}

/// Validated request to route a guild's announcements to a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAssignment {
    /// Guild being configured
    pub guild: GuildId,
    /// Channel receiving announcements
    pub channel: ChannelId,
}

impl ChannelAssignment {
    /// Apply the assignment on top of the guild's current configuration
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        config.notification_channel_id = Some(self.channel.clone());
        config
    }
}

fn matches_prefix(name: &str, needle_lower: &str) -> bool {
    name.to_lowercase().contains(needle_lower)
}

/// Attempt to claim `filename` for `holder` at `now`.
///
/// # Errors
/// * `ClaimError::NotFound` if `filename` is not in `registry`
/// * `ClaimError::AlreadyClaimed` if anyone (the requester included) holds an
///   active claim on it; active claims are never extended
/// * `ClaimError::ExpiryOutOfRange` if `now + duration` is past the last
///   instant the ledger can store
pub fn attempt_claim(
    registry: &[String],
    claims: &[Claim],
    filename: &str,
    holder: &UserId,
    now: Timestamp,
    duration: Duration,
) -> Result<ClaimGrant, ClaimError> {
    if filename.is_empty() || !registry.iter().any(|f| f == filename) {
        return Err(ClaimError::not_found(filename));
    }

    if claims
        .iter()
        .any(|c| c.filename == filename && c.is_active(now))
    {
        return Err(ClaimError::already_claimed(filename));
    }

    let expires_at = now
        .checked_add_signed(duration)
        .filter(time::is_persistable)
        .ok_or_else(|| ClaimError::expiry_out_of_range(filename))?;

    // Only expired records for this filename can remain at this point
    let mut next: Vec<Claim> = claims
        .iter()
        .filter(|c| c.filename != filename)
        .cloned()
        .collect();
    let purged = claims.len() - next.len();

    let claim = Claim::new(filename, holder.clone(), expires_at);
    next.push(claim.clone());

    Ok(ClaimGrant {
        claim,
        claims: next,
        purged,
    })
}

/// Attempt to release `holder`'s active claim on `filename`.
///
/// Release is destructive: the record is removed, not flagged.
///
/// # Errors
/// * `ClaimError::NoActiveClaim` if `holder` has no active claim on `filename`
pub fn attempt_release(
    claims: &[Claim],
    filename: &str,
    holder: &UserId,
    now: Timestamp,
) -> Result<ClaimRelease, ClaimError> {
    let index = claims
        .iter()
        .position(|c| c.is_active_for(filename, holder, now))
        .ok_or_else(|| ClaimError::no_active_claim(filename))?;

    let mut next = claims.to_vec();
    let released = next.remove(index);
    Ok(ClaimRelease {
        released,
        claims: next,
    })
}

/// Registry filenames without an active claim whose name contains `prefix`
/// (case-insensitive), in registry order, at most one autocomplete page.
pub fn list_available(
    registry: &[String],
    claims: &[Claim],
    now: Timestamp,
    prefix: &str,
) -> Vec<String> {
    let needle = prefix.to_lowercase();
    registry
        .iter()
        .filter(|f| {
            !claims
                .iter()
                .any(|c| &c.filename == *f && c.is_active(now))
        })
        .filter(|f| matches_prefix(f, &needle))
        .take(AUTOCOMPLETE_PAGE_SIZE)
        .cloned()
        .collect()
}

/// Filenames `holder` actively claims whose name contains `prefix`
/// (case-insensitive), in ledger order, at most one autocomplete page.
pub fn list_mine(claims: &[Claim], holder: &UserId, now: Timestamp, prefix: &str) -> Vec<String> {
    let needle = prefix.to_lowercase();
    claims
        .iter()
        .filter(|c| &c.holder == holder && c.is_active(now))
        .filter(|c| matches_prefix(&c.filename, &needle))
        .take(AUTOCOMPLETE_PAGE_SIZE)
        .map(|c| c.filename.clone())
        .collect()
}

/// Validate an admin request routing `guild`'s announcements to `channel`.
///
/// Checks run in order: admin, channel kind, guild scope.
///
/// # Errors
/// * `ClaimError::PermissionDenied` if the requester is not an admin
/// * `ClaimError::InvalidChannel` if the channel is not a plain text channel
/// * `ClaimError::NoGuildContext` if the request carries no guild
pub fn set_channel(
    guild: Option<&GuildId>,
    channel: &ChannelRef,
    is_admin: bool,
) -> Result<ChannelAssignment, ClaimError> {
    if !is_admin {
        return Err(ClaimError::PermissionDenied);
    }
    if !channel.kind.accepts_announcements() {
        return Err(ClaimError::InvalidChannel);
    }
    let guild = guild.ok_or(ClaimError::NoGuildContext)?;

    Ok(ChannelAssignment {
        guild: guild.clone(),
        channel: channel.id.clone(),
    })
}

/// Announcement intent for a freshly granted claim.
///
/// `None` when the request had no guild or the guild has no channel configured.
pub fn announce_intent(
    guild: Option<&GuildId>,
    config: &ServerConfig,
    claim: &Claim,
) -> Option<NotificationIntent> {
    let guild = guild?;
    let channel = config.notification_channel_id.as_ref()?;
    Some(NotificationIntent::ClaimAnnounced {
        guild: guild.clone(),
        channel: channel.clone(),
        filename: claim.filename.clone(),
        holder: claim.holder.clone(),
    })
}
