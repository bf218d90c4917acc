//! Single game rating lookup.

use anyhow::Result;
use vapor_core::{Cache, Config, resolve_single_rating};

pub async fn run(config: &Config, app_id: &str) -> Result<()> {
    let cache = Cache::load_or_default(config.resolved_cache_path());
    let rating = resolve_single_rating(app_id, &cache).await?;
    println!("{}: {}", app_id, rating);
    Ok(())
}
