//! One-off expiry sweep

use anyhow::Result;
use reserva_agent::ReservaAgent;

/// `reserva sweep`
pub async fn sweep_once(agent: &ReservaAgent) -> Result<()> {
    let report = agent.sweeper().run_once().await?;
    println!(
        "Swept {} claims: {} expired, {} notified, {} undeliverable.",
        report.inspected, report.marked, report.dispatch.delivered, report.dispatch.dropped
    );
    Ok(())
}
