//! Config command implementation.

use anyhow::Result;
use std::path::Path;
use vapor_core::Config;

pub fn run(config: &Config, path: Option<&Path>, show: bool) -> Result<()> {
    let path = path.map(Path::to_path_buf).or_else(Config::default_path);
    match path {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none)"),
    }

    let key = match (&config.steam_api_key, show) {
        (Some(key), true) => key.clone(),
        (Some(_), false) => "(set)".to_string(),
        (None, _) => "(not set)".to_string(),
    };
    println!("Steam API key: {}", key);
    println!(
        "User ID: {}",
        config.user_id.as_deref().unwrap_or("(not set)")
    );
    println!("Cache: {}", config.resolved_cache_path().display());

    Ok(())
}
