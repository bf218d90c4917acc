//! Anti-cheat command implementation.

use anyhow::Result;
use tracing::info;
use vapor_core::{Config, RefreshOutcome, Vapor};

pub async fn run(config: &Config, app_ids: &[String]) -> Result<()> {
    let mut vapor = Vapor::from_config(config)?;

    match vapor.refresh_anti_cheat().await {
        RefreshOutcome::AlreadyFresh => info!("Anti-cheat data is up to date"),
        RefreshOutcome::Updated(count) => info!("Downloaded anti-cheat data for {} games", count),
        RefreshOutcome::Unchanged => eprintln!("Could not refresh anti-cheat data, using cache"),
    }

    for app_id in app_ids {
        match vapor.anti_cheat_status(app_id) {
            Some(status) if status.is_playable() => println!("{}: {} (playable)", app_id, status),
            Some(status) => println!("{}: {}", app_id, status),
            None => println!("{}: no anti-cheat data", app_id),
        }
    }

    Ok(())
}
