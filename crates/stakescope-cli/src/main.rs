// crates/stakescope-cli/src/main.rs
//
// CLI entrypoint for stakescope.
//
// Loads configuration, initializes tracing, and dispatches to one of the
// analytical commands: census, cadence, yield, historical, or report.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::cadence::CadenceCmd;
use commands::historical::HistoricalCmd;
use commands::yields::YieldCmd;
use commands::AppContext;
use config::{StakescopeConfig, DEFAULT_CONFIG_PATH};
use output::OutputFormat;

/// stakescope: validator participation, block cadence, and staking yield
/// estimates from a node's JSON-RPC interface.
#[derive(Parser, Debug)]
#[command(
    name = "stakescope",
    version,
    about = "Estimate validator participation, block cadence, and staking yield from a network node"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// RPC endpoint; overrides `rpc.url` from the configuration file.
    #[arg(long, global = true)]
    rpc: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Count active and delinquent validators.
    Census,

    /// Average time between consecutive blocks.
    Cadence(CadenceCmd),

    /// Staking yield from current inflation, stake, and cadence.
    Yield(YieldCmd),

    /// Staking yield reconstructed for the historical reference period.
    Historical(HistoricalCmd),

    /// Run every routine, reporting each failure independently.
    Report,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration before tracing so the configured level applies;
    // the outcome is logged once the subscriber is up.
    let loaded = StakescopeConfig::load(&cli.config);
    let log_level = match &loaded {
        Ok(cfg) => cfg.log_level.clone(),
        Err(_) => StakescopeConfig::default().log_level,
    };

    // Logs go to stderr so `--output json` stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match loaded {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", cli.config);
            cfg
        }
        Err(e) => {
            tracing::warn!(
                "Could not load config from {}: {}. Using defaults.",
                cli.config,
                e
            );
            StakescopeConfig::default()
        }
    };

    // CLI --rpc flag overrides the config file value.
    if let Some(url) = &cli.rpc {
        config.rpc.url = url.clone();
    }
    tracing::info!("RPC endpoint: {}", config.rpc.url);

    let ctx = AppContext {
        config,
        format: cli.output,
    };

    match &cli.command {
        Commands::Census => commands::census::run(&ctx).await?,
        Commands::Cadence(cmd) => commands::cadence::run(&ctx, cmd).await?,
        Commands::Yield(cmd) => commands::yields::run(&ctx, cmd).await?,
        Commands::Historical(cmd) => commands::historical::run(&ctx, cmd).await?,
        Commands::Report => commands::report::run(&ctx).await?,
    }

    Ok(())
}
