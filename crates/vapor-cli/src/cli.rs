use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vapor")]
#[command(about = "ProtonDB compatibility ratings for a Steam library", version)]
pub struct Args {
    /// Path to config file (defaults to the user config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Steam Web API key
    #[arg(long, global = true, env = "STEAM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path to the rating cache file
    #[arg(long, global = true, value_name = "FILE")]
    pub cache: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rate every game in a Steam library
    Library {
        /// Steam ID or vanity name
        #[arg(env = "VAPOR_USER_ID")]
        user_id: Option<String>,

        /// Print each rating as soon as it resolves
        #[arg(long)]
        stream: bool,
    },
    /// Look up the rating of a single game
    Rating {
        /// Steam app ID
        app_id: String,
    },
    /// Show anti-cheat status for games, refreshing the list if stale
    AntiCheat {
        /// Steam app IDs to check
        #[arg(required = true)]
        app_ids: Vec<String>,
    },
    /// Print the effective configuration
    Config {
        /// Include the API key in the output
        #[arg(long)]
        show: bool,
    },
}
