//! `sharemount` attaches the SMB and NFS shares declared in a YAML file,
//! skipping any that are already mounted.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sharemount_core::platform::config_paths::CONFIG_ENV;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sharemount")]
#[command(about = "Attach declared SMB and NFS shares")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./config.yaml, then the user config dir)
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount every configured share that is not already attached
    Mount {
        /// Show what would be done without provisioning or mounting
        #[arg(long)]
        dry_run: bool,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configured shares and where they attach
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration and look for the required programs
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    // JSON output owns stdout; logs move to stderr
    let json_output = matches!(
        cli.command,
        Commands::Mount { json: true, .. } | Commands::List { json: true }
    );
    let writer = if json_output {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    debug!("Starting sharemount v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Mount { dry_run, json } => commands::mount::execute(config, dry_run, json).await,
        Commands::List { json } => commands::list::execute(config, json),
        Commands::Check => commands::check::execute(config),
    }
}
