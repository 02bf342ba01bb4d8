use clap::Parser;
use osnap::{Config, OsnapClient, RunMode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "osnap")]
#[command(version, author, about = "Creates and rotates oVirt VM snapshots")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, visible_alias = "config.file", default_value = "config.yml")]
    config: PathBuf,

    /// Log requests and responses
    #[arg(long)]
    debug: bool,

    /// Only delete old snapshots, do not create new ones
    #[arg(long)]
    purge_only: bool,

    /// Only list the VMs that would be processed
    #[arg(long)]
    dry: bool,
}

const EXIT_RUN_FAILED: u8 = 1;
const EXIT_CONFIG_FAILED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let directive = if args.debug { "osnap=debug" } else { "osnap=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .init();

    let config = match Config::from_path(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Could not load configuration");
            return ExitCode::from(EXIT_CONFIG_FAILED);
        }
    };

    let (client, settings) = match OsnapClient::from_config(&config)
        .and_then(|client| Ok((client, config.run_settings()?)))
    {
        Ok(prepared) => prepared,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(EXIT_CONFIG_FAILED);
        }
    };

    let mode = RunMode::from_flags(args.purge_only, args.dry);
    info!(url = %client.url().as_str(), mode = ?mode, "Starting run");

    match client.run(&settings, mode).await {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_RUN_FAILED),
        Err(e) => {
            error!(error = %e, "Run aborted");
            ExitCode::from(EXIT_RUN_FAILED)
        }
    }
}
