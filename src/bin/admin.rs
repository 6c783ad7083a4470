//! CLI administration tool for waf-dashboard.
//!
//! Provides commands for switching prevention mode, viewing statistics,
//! and checking the database and GeoIP setup without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show prevention mode
//! cargo run --bin admin -- prevention status
//!
//! # Switch to blocking without a prompt
//! cargo run --bin admin -- prevention enable --yes
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Resolve an address with the configured GeoLite2 database
//! cargo run --bin admin -- geoip lookup 8.8.8.8
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see [`waf_dashboard::config`].

use waf_dashboard::application::services::PreventionService;
use waf_dashboard::config::{self, Config};
use waf_dashboard::domain::repositories::SettingsRepository;
use waf_dashboard::infrastructure::geoip::{GeoLocator, MaxMindLocator};
use waf_dashboard::infrastructure::persistence::PgSettingsRepository;
use waf_dashboard::server::{build_waf_client, connect_pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::net::IpAddr;
use std::sync::Arc;

/// CLI tool for managing waf-dashboard.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Read or change prevention mode
    Prevention {
        #[command(subcommand)]
        action: PreventionAction,
    },

    /// Show log statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// GeoIP database tools
    Geoip {
        #[command(subcommand)]
        action: GeoipAction,
    },
}

/// Prevention mode subcommands.
#[derive(Subcommand)]
enum PreventionAction {
    /// Show the current mode
    Status,

    /// Block flagged requests
    Enable {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Only log flagged requests
    Disable {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// GeoIP subcommands.
#[derive(Subcommand)]
enum GeoipAction {
    /// Resolve an IP address
    Lookup {
        /// IPv4 or IPv6 address
        ip: IpAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Prevention { action } => {
            let pool = connect_pool(&config).await?;
            handle_prevention_action(action, &config, &pool).await?
        }
        Commands::Stats => handle_stats(&connect_pool(&config).await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect_pool(&config).await?).await?,
        Commands::Geoip { action } => handle_geoip_action(action, &config)?,
    }

    Ok(())
}

/// Dispatches prevention mode commands.
async fn handle_prevention_action(
    action: PreventionAction,
    config: &Config,
    pool: &PgPool,
) -> Result<()> {
    let settings = Arc::new(PgSettingsRepository::new(Arc::new(pool.clone())));

    match action {
        PreventionAction::Status => show_prevention_status(settings).await,
        PreventionAction::Enable { yes } => set_prevention(settings, config, true, yes).await,
        PreventionAction::Disable { yes } => set_prevention(settings, config, false, yes).await,
    }
}

/// Prints the stored prevention mode.
async fn show_prevention_status(settings: Arc<PgSettingsRepository>) -> Result<()> {
    println!("{}", "🛡️  Prevention Mode".bright_blue().bold());
    println!();

    let setting = settings
        .get_prevention_mode()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match setting {
        Some(setting) => {
            println!("  Mode:    {}", mode_label(setting.enabled));
            println!(
                "  Changed: {}",
                setting
                    .updated_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .bright_black()
            );
        }
        None => {
            println!("  Mode:    {}", mode_label(false));
            println!("  {}", "Never changed, using the default".bright_black());
        }
    }
    println!();

    Ok(())
}

/// Changes prevention mode with a confirmation prompt.
///
/// The flag is stored first, then forwarded to the WAF engine when
/// `WAF_API_URL` is configured, exactly like `POST /api/waf/prevention`.
async fn set_prevention(
    settings: Arc<PgSettingsRepository>,
    config: &Config,
    enabled: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🛡️  Change Prevention Mode".bright_blue().bold());
    println!();
    println!("  New mode: {}", mode_label(enabled));
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Apply this change?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = PreventionService::new(settings, build_waf_client(config));
    let update = service
        .set_enabled(enabled)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update prevention mode: {}", e))?;

    println!();
    println!("{}", "✅ Prevention mode stored".green().bold());
    if update.forwarded {
        println!("{}", "✅ WAF engine acknowledged the change".green());
    } else if config.is_waf_forwarding_enabled() {
        println!(
            "{}",
            "⚠️  WAF engine did not acknowledge the change, see logs".yellow()
        );
    } else {
        println!(
            "{}",
            "⚠️  WAF_API_URL not set, the WAF engine was not notified".yellow()
        );
    }
    println!();

    Ok(())
}

fn mode_label(enabled: bool) -> ColoredString {
    if enabled {
        "BLOCKING".red().bold()
    } else {
        "MONITORING".green().bold()
    }
}

/// Displays log statistics.
///
/// Shows:
/// - Total number of logged requests
/// - Number of requests flagged as attacks
/// - Number of distinct client addresses
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (requests, attacks, ips): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE injection_detected), COUNT(DISTINCT ip) \
         FROM waf_logs",
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Requests:     {}",
        requests.to_string().bright_green().bold()
    );
    println!("  Attacks:      {}", attacks.to_string().bright_red().bold());
    println!("  Distinct IPs: {}", ips.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Handles GeoIP commands. No database connection is needed.
fn handle_geoip_action(action: GeoipAction, config: &Config) -> Result<()> {
    match action {
        GeoipAction::Lookup { ip } => {
            println!("{}", "🌍 GeoIP Lookup".bright_blue().bold());
            println!();

            let locator = MaxMindLocator::open(&config.geoip_db_path)
                .with_context(|| format!("Cannot open {}", config.geoip_db_path))?;

            match locator.lookup(ip)? {
                Some(location) => {
                    println!("  Address: {}", ip.to_string().cyan());
                    println!("  Country: {}", location.country_label().bright_white());
                    if let Some(code) = &location.country_code {
                        println!("  Code:    {}", code.bright_white());
                    }
                    if let Some(city) = &location.city {
                        println!("  City:    {}", city.bright_white());
                    }
                    if let Some((lat, lon)) = location.coordinates() {
                        println!("  Coords:  {:.4}, {:.4}", lat, lon);
                    }
                }
                None => {
                    println!(
                        "  {} is not in the database",
                        ip.to_string().yellow().bold()
                    );
                }
            }
            println!();
        }
    }

    Ok(())
}
