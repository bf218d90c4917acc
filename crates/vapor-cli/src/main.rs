mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;
use vapor_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides; default to warnings only
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vapor=warn,vapor_core=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = args.resolve_config()?;

    match args.command {
        Command::Library { user_id, stream } => {
            let user_id = user_id
                .or_else(|| config.user_id.clone())
                .ok_or_else(|| anyhow::anyhow!("No user ID given and none configured"))?;
            commands::library::run(&config, &user_id, stream).await
        }
        Command::Rating { app_id } => commands::rating::run(&config, &app_id).await,
        Command::AntiCheat { app_ids } => commands::anticheat::run(&config, &app_ids).await,
        Command::Config { show } => commands::config::run(&config, args.config.as_deref(), show),
    }
}

impl Args {
    /// Config file values with command line flags layered on top.
    fn resolve_config(&self) -> Result<Config> {
        let path = self.config.clone().or_else(Config::default_path);

        let mut config = match &path {
            Some(path) if path.exists() => Config::load(path)?,
            Some(path) if self.config.is_some() => {
                anyhow::bail!("Config file {} does not exist", path.display())
            }
            _ => Config::default(),
        };

        if let Some(key) = &self.api_key {
            config.steam_api_key = Some(key.clone());
        }
        if let Some(cache) = &self.cache {
            config.cache_path = Some(cache.clone());
        }

        Ok(config)
    }
}
