//! Announcement channel configuration

use super::reply;
use anyhow::Result;
use reserva_agent::ReservaAgent;
use reserva_core::{ChannelId, ChannelKind, ChannelRef, GuildId};

/// `reserva set-channel <channel> --guild G [--kind K] [--admin]`
pub async fn set_channel(
    agent: &ReservaAgent,
    channel: String,
    guild: Option<String>,
    kind: ChannelKind,
    admin: bool,
) -> Result<()> {
    let guild = guild.map(GuildId::new);
    let channel = ChannelRef::new(ChannelId::new(channel), kind);
    reply(
        agent
            .service()
            .set_channel(guild.as_ref(), &channel, admin)
            .await,
        |receipt| receipt.reply(),
    )
}
