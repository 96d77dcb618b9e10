//! Long-running mode

use anyhow::{Context, Result};
use reserva_agent::ReservaAgent;

/// `reserva run`: sweep on the configured interval until Ctrl-C
pub async fn run_until_interrupted(agent: &ReservaAgent) -> Result<()> {
    tracing::info!(
        data_dir = %agent.config().data_dir.display(),
        sweep_interval_secs = agent.config().sweep_interval_secs,
        "reserva running"
    );
    agent.start();

    tokio::signal::ctrl_c()
        .await
        .context("waiting for Ctrl-C")?;

    agent.shutdown();
    Ok(())
}
