/// Daily Snapshot - capture a page every day and forward it to a chat webhook
use anyhow::Context;
use clap::{Parser, Subcommand};
use daily_snapshot::config::AppConfig;
use snapshot_archive::DeliveryTracker;
use snapshot_sync::{SyncManager, SyncSummary};
use snapshot_webhook::WebhookClient;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "daily-snapshot")]
#[command(about = "Archive a daily webpage screenshot and forward it to a chat webhook", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "DAILYSNAP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screenshot the configured page into today's archive slot
    Capture,
    /// Deliver every archived capture that has not been delivered yet
    Sync,
    /// Capture today's page, then sync
    Run,
    /// Show delivered and pending counts
    Status {
        /// List every pending file
        #[arg(short, long)]
        list: bool,
    },
    /// Forget all deliveries so the next sync re-sends the whole archive
    Reset {
        /// Actually delete the delivery record
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "daily_snapshot=info,snapshot_sync=info,snapshot_webhook=info,snapshot_archive=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Capture => {
            capture(&config).await?;
        }
        Commands::Sync => {
            sync(&config).await?;
        }
        Commands::Run => {
            run(&config).await?;
        }
        Commands::Status { list } => {
            status(&config, list);
        }
        Commands::Reset { yes } => {
            reset(&config, yes)?;
        }
    }

    Ok(())
}

async fn capture(config: &AppConfig) -> anyhow::Result<PathBuf> {
    config.validate_capture()?;

    let today = chrono::Local::now().date_naive();
    let path = config
        .capturer()
        .capture_for(&config.archive_root, today)
        .await?;

    println!("Captured {}", path.display());
    Ok(path)
}

async fn sync(config: &AppConfig) -> anyhow::Result<SyncSummary> {
    config.validate_delivery()?;
    let client = WebhookClient::new(config.webhook_config()).context("invalid webhook")?;

    let mut tracker = DeliveryTracker::load(&config.tracker_path);
    let manager = SyncManager::new(client, config.sync_options());
    let summary = manager.sync(&mut tracker).await;

    println!("Sync complete: {}", summary);
    Ok(summary)
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    // Fail fast on config before taking a screenshot nobody can receive
    config.validate_delivery()?;
    config.validate_capture()?;

    let captured = capture(config).await;
    if let Err(e) = &captured {
        tracing::error!("Capture failed, syncing existing archive anyway: {:#}", e);
    }

    sync(config).await?;

    captured.map(|_| ())
}

fn status(config: &AppConfig, list: bool) {
    let tracker = DeliveryTracker::load(&config.tracker_path);
    let discovered = snapshot_sync::discover(&config.archive_root);
    let pending = snapshot_sync::filter_pending(&discovered, &tracker);

    println!("Archive root:    {}", config.archive_root.display());
    println!("Delivery record: {}", tracker.storage_path().display());
    println!("Discovered:      {}", discovered.len());
    println!("Delivered:       {}", discovered.len() - pending.len());
    println!("Pending:         {}", pending.len());

    if list {
        for file in &pending {
            let date = file
                .captured_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "undated".to_string());
            println!("  {}  {}", date, file.key());
        }
    }
}

fn reset(config: &AppConfig, yes: bool) -> anyhow::Result<()> {
    let tracker = DeliveryTracker::load(&config.tracker_path);

    if !yes {
        println!(
            "Would forget {} deliveries recorded in {}. Re-run with --yes to confirm.",
            tracker.len(),
            config.tracker_path.display()
        );
        return Ok(());
    }

    if DeliveryTracker::reset(&config.tracker_path)? {
        println!(
            "Removed {} ({} deliveries forgotten)",
            config.tracker_path.display(),
            tracker.len()
        );
    } else {
        println!("No delivery record at {}", config.tracker_path.display());
    }

    Ok(())
}
