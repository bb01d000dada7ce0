mod lookup;
mod profile;
mod rewards;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::rewards::RewardsCommands;

/// Stand-in user until the app has real authentication.
pub(crate) const DEFAULT_USER_ID: &str = "user-123";

#[derive(Debug, Parser)]
#[command(name = "greenkart")]
#[command(about = "Scan products, check eco-scores, and earn EcoCoins")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up one or more barcodes in the product database
    Lookup {
        #[arg(required = true)]
        barcodes: Vec<String>,

        /// Print records as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the EcoCoins a display grade (e.g. "A+") earns
    Award {
        /// Display grade; omit for a product without one
        grade: Option<String>,
    },
    /// Look up a barcode, award coins for it, and record the scan
    Scan {
        barcode: String,

        #[arg(long, default_value = DEFAULT_USER_ID)]
        user: String,

        /// Show the award without recording the scan
        #[arg(long)]
        dry_run: bool,
    },
    /// Create or fetch a profile and show its coin totals
    Profile {
        user: String,

        /// Username stored when the profile is first created
        #[arg(long)]
        username: Option<String>,

        /// Email stored when the profile is first created
        #[arg(long)]
        email: Option<String>,
    },
    /// Show a user's recent scans
    History {
        user: String,

        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Browse and redeem rewards
    Rewards {
        #[command(subcommand)]
        command: RewardsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        None => println!("greenkart: run `greenkart --help` to see available commands"),
        // The award rule is pure; it runs even when the environment is invalid.
        Some(Commands::Award { grade }) => println!("{}", lookup::award_message(grade.as_deref())),
        Some(command) => run_configured(command).await?,
    }

    Ok(())
}

/// Loads configuration and logging, then runs a command that performs I/O.
async fn run_configured(command: Commands) -> anyhow::Result<()> {
    let config = greenkart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match command {
        Commands::Lookup { barcodes, json } => {
            lookup::run_lookup(&config, &barcodes, json).await?;
        }
        Commands::Award { grade } => println!("{}", lookup::award_message(grade.as_deref())),
        Commands::Scan {
            barcode,
            user,
            dry_run,
        } => lookup::run_scan(&config, &barcode, &user, dry_run).await?,
        Commands::Profile {
            user,
            username,
            email,
        } => profile::run_profile(&config, &user, username, email).await?,
        Commands::History { user, limit } => {
            profile::run_history(&config, &user, limit).await?;
        }
        Commands::Rewards { command } => rewards::run_rewards(&config, command).await?,
    }

    Ok(())
}
