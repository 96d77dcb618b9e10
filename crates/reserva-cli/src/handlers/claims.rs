//! Claim, release and listing commands

use super::{print_list, reply};
use anyhow::Result;
use reserva_agent::{ClaimRequest, ReservaAgent};
use reserva_core::{time::to_iso8601, GuildId, UserId};

/// `reserva claim <filename> --user U [--guild G]`
pub async fn claim(
    agent: &ReservaAgent,
    filename: String,
    user: String,
    guild: Option<String>,
) -> Result<()> {
    let request = ClaimRequest {
        filename,
        requester: UserId::new(user),
        guild: guild.map(GuildId::new),
    };
    reply(agent.service().claim(request).await, |receipt| receipt.reply())
}

/// `reserva unclaim <filename> --user U`
pub async fn unclaim(agent: &ReservaAgent, filename: &str, user: String) -> Result<()> {
    let requester = UserId::new(user);
    reply(
        agent.service().release(filename, &requester).await,
        |receipt| receipt.reply(),
    )
}

/// `reserva available [--prefix P]`
pub async fn available(agent: &ReservaAgent, prefix: &str) -> Result<()> {
    let names = agent.service().autocomplete_claim(prefix).await?;
    print_list(&names, "No filenames available.");
    Ok(())
}

/// `reserva mine --user U [--prefix P]`
pub async fn mine(agent: &ReservaAgent, user: String, prefix: &str) -> Result<()> {
    let names = agent
        .service()
        .autocomplete_release(prefix, &UserId::new(user))
        .await?;
    print_list(&names, "No active claims.");
    Ok(())
}

/// `reserva status`
pub async fn status(agent: &ReservaAgent) -> Result<()> {
    let claims = agent.service().claim_status().await?;
    if claims.is_empty() {
        println!("No claims recorded.");
        return Ok(());
    }
    for entry in claims {
        println!(
            "{}\t{}\t{}\t{}",
            entry.claim.filename,
            entry.claim.holder,
            to_iso8601(&entry.claim.expires_at),
            entry.state
        );
    }
    Ok(())
}
