//! Command-line interface for Reserva
//!
//! Drives the claim service against the JSON ledger in the configured data
//! directory. One-shot commands act as a single request; `run` keeps the
//! expiry sweeper going until Ctrl-C.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reserva_agent::{AgentConfig, ReservaAgent};
use reserva_core::ChannelKind;
use std::path::PathBuf;

mod handlers;

#[derive(Parser)]
#[command(name = "reserva")]
#[command(about = "Reserva - filename claim service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "reserva.toml")]
    config: PathBuf,

    /// Override the ledger directory from the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Claim a filename
    Claim {
        /// Filename to claim
        filename: String,

        /// Requesting user
        #[arg(short, long)]
        user: String,

        /// Guild the request comes from; omit for a direct request
        #[arg(short, long)]
        guild: Option<String>,
    },

    /// Release your claim on a filename
    Unclaim {
        /// Filename to release
        filename: String,

        /// Requesting user
        #[arg(short, long)]
        user: String,
    },

    /// List filenames that can be claimed
    Available {
        /// Case-insensitive substring filter
        #[arg(short, long, default_value = "")]
        prefix: String,
    },

    /// List filenames a user holds
    Mine {
        /// User whose claims to list
        #[arg(short, long)]
        user: String,

        /// Case-insensitive substring filter
        #[arg(short, long, default_value = "")]
        prefix: String,
    },

    /// Set the channel that receives claim announcements
    SetChannel {
        /// Channel identifier
        channel: String,

        /// Guild being configured
        #[arg(short, long)]
        guild: Option<String>,

        /// Channel kind (text, voice, category, announcement, forum, thread)
        #[arg(short, long, default_value = "text")]
        kind: ChannelKind,

        /// Requester has admin rights in the guild
        #[arg(long)]
        admin: bool,
    },

    /// Run one expiry sweep
    Sweep,

    /// Show every stored claim with its state
    Status,

    /// Run the service until interrupted
    Run,
}

fn init_logging(verbose: bool, config: &AgentConfig) {
    let level = if verbose {
        "debug".to_string()
    } else {
        config.logging.level.to_ascii_lowercase()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AgentConfig::load(&cli.config)
        .await
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    init_logging(cli.verbose, &config);
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");

    let agent = ReservaAgent::from_config(config);

    match cli.command {
        Commands::Claim {
            filename,
            user,
            guild,
        } => handlers::claims::claim(&agent, filename, user, guild).await?,

        Commands::Unclaim { filename, user } => {
            handlers::claims::unclaim(&agent, &filename, user).await?
        }

        Commands::Available { prefix } => handlers::claims::available(&agent, &prefix).await?,

        Commands::Mine { user, prefix } => handlers::claims::mine(&agent, user, &prefix).await?,

        Commands::SetChannel {
            channel,
            guild,
            kind,
            admin,
        } => handlers::channel::set_channel(&agent, channel, guild, kind, admin).await?,

        Commands::Sweep => handlers::sweep::sweep_once(&agent).await?,

        Commands::Status => handlers::claims::status(&agent).await?,

        Commands::Run => handlers::run::run_until_interrupted(&agent).await?,
    }

    Ok(())
}
