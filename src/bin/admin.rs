//! CLI administration tool for shortlytics.
//!
//! Works directly against the PostgreSQL store, without requiring HTTP access.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection and row counts
//! cargo run --bin admin -- db check
//!
//! # Create a short link
//! cargo run --bin admin -- shorten https://example.com/page
//!
//! # Show analytics for a link
//! cargo run --bin admin -- analytics aZ3_k9
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or the `DB_*` components): PostgreSQL connection
//! - `BASE_URL`: prefix for printed short URLs
//! - `SHORT_ID_LENGTH`: identifier length for `shorten`

use shortlytics::application::services::{AnalyticsService, LinkService};
use shortlytics::config::{self, mask_connection_string};
use shortlytics::domain::repositories::{ClickRepository, LinkRepository};
use shortlytics::infrastructure::persistence::{PgClickRepository, PgLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// Widest histogram bar, in characters.
const BAR_WIDTH: u64 = 40;

/// CLI tool for managing shortlytics.
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
    /// Create a short link
    Shorten {
        /// Long URL to shorten
        url: String,
    },

    /// Show click analytics for a short link
    Analytics {
        /// Short identifier
        short_id: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show row counts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_USER, DB_PASSWORD, DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;
    let pool = Arc::new(pool);

    let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let clicks: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool.clone()));

    match cli.command {
        Commands::Shorten { url } => {
            let service = LinkService::new(links, config.base_url, config.short_id_length);
            handle_shorten(&service, &url).await?
        }
        Commands::Analytics { short_id } => {
            let service = AnalyticsService::new(links, clicks);
            handle_analytics(&service, &short_id).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool, links, clicks).await?,
    }

    Ok(())
}

/// Creates a short link and prints its public URL.
async fn handle_shorten(service: &LinkService, url: &str) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let link = service
        .create_short_link(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("  Long URL:  {}", link.long_url.cyan());
    println!("  Short id:  {}", link.short_id.bright_yellow().bold());
    println!(
        "  Short URL: {}",
        service.short_url(&link.short_id).bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints totals and an hour-of-day histogram (UTC) for a link.
async fn handle_analytics(service: &AnalyticsService, short_id: &str) -> Result<()> {
    println!("{}", "📊 Link Analytics".bright_blue().bold());
    println!();

    let analytics = service
        .analytics(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load analytics: {}", e))?;

    println!("  Long URL:        {}", analytics.link.long_url.cyan());
    println!(
        "  Total clicks:    {}",
        analytics.total_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Unique visitors: {}",
        analytics.unique_visitors.to_string().bright_green().bold()
    );
    println!();

    println!("{}", "  Clicks per hour (UTC)".bright_white().bold());
    println!("  {}", "─".repeat(52).bright_black());

    let peak = analytics.clicks_per_hour.iter().copied().max().unwrap_or(0);
    for (hour, count) in analytics.clicks_per_hour.iter().enumerate() {
        let bar = "█".repeat(bar_len(*count, peak));
        println!("  {:02}:00 {:>6} {}", hour, count, bar.bright_cyan());
    }
    println!();

    Ok(())
}

/// Scales `count` to the histogram width relative to `peak`.
fn bar_len(count: u64, peak: u64) -> usize {
    if peak == 0 {
        return 0;
    }
    (count * BAR_WIDTH).div_ceil(peak) as usize
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    pool: &PgPool,
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;
            println!("{}", "✅ Database connection OK".green().bold());
            println!();

            let links_count = links
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
            let clicks_count = clicks
                .count_all()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count clicks: {}", e))?;

            println!(
                "  Links:  {}",
                links_count.to_string().bright_green().bold()
            );
            println!(
                "  Clicks: {}",
                clicks_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
