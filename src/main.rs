use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing_subscriber::EnvFilter;

use airbrb::adapters::cache::memory_cache::MemoryCache;
use airbrb::adapters::rest::client::RestClient;
use airbrb::app::dashboard::BookingDesk;
use airbrb::config::load_config;
use airbrb::domain::identity::Identity;

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [
        PathBuf::from("config.yaml"),
        exe_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn exe_dir() -> PathBuf {
    // Look in the directory where the binary is
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Print the booking-request dashboard for one hosted listing:
/// `airbrb <host-email> <listing-id>`.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(listing_id)) = (args.next(), args.next()) else {
        bail!("usage: airbrb <host-email> <listing-id>");
    };

    let config_path = find_config_path();
    let config = load_config(&config_path)?;
    tracing::info!(backend = %config.api.base_url, "loaded configuration");

    let cache: Arc<dyn airbrb::ports::cache::ListingCache> =
        Arc::new(MemoryCache::new(config.cache.max_entries));
    let client = RestClient::new(&config.api, &config.cache, cache)
        .context("failed to build HTTP client")?;

    let desk = BookingDesk::new(Arc::new(client));
    let today = Local::now().date_naive();
    let view = desk
        .load(&Identity::new(email), &listing_id, today)
        .await?;

    print!("{view}");
    Ok(())
}
