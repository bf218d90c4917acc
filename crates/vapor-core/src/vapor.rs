use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::anticheat::{AntiCheatStatus, RefreshOutcome, refresh_anti_cheat};
use crate::cache::Cache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::game::LibraryResult;
use crate::identity::resolve_steam_id;
use crate::network::{AntiCheatApi, HttpClient, RemoteRatingSource, SteamApi};
use crate::resolve::{LibraryObserver, StreamingAggregator};

/// Entry point tying the Steam account, remote sources and the cache together.
pub struct Vapor {
    api_key: String,
    cache: Cache,
    cache_path: PathBuf,
    http: HttpClient,
}

impl Vapor {
    /// Create a client and load the cache from `cache_path`.
    pub fn new(api_key: impl Into<String>, cache_path: impl AsRef<Path>) -> Result<Self> {
        let cache_path = cache_path.as_ref().to_path_buf();
        Ok(Self {
            api_key: api_key.into(),
            cache: Cache::load_or_default(&cache_path),
            cache_path,
            http: HttpClient::new()?,
        })
    }

    /// Create from a config, which must carry an API key.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.steam_api_key.as_deref().ok_or(Error::Credential)?;
        Self::new(api_key, config.resolved_cache_path())
    }

    pub fn save_cache(&self) -> Result<()> {
        self.cache.save(&self.cache_path)
    }

    /// Fetch a user's library and resolve a rating for every game.
    ///
    /// `user_id` may be a Steam ID or a vanity name. The cache is saved once
    /// the batch has finished.
    pub async fn fetch_library<O>(&mut self, user_id: &str, observer: O) -> Result<LibraryResult>
    where
        O: LibraryObserver,
    {
        let steam = SteamApi::new(self.http.clone());
        let steam_id = resolve_steam_id(&steam, &self.api_key, user_id).await?;
        info!("Fetching owned games for {}", steam_id);

        let payload = steam.owned_games(&self.api_key, &steam_id).await?;

        let source = RemoteRatingSource::new(self.http.clone());
        let result = StreamingAggregator::new()
            .run(payload, &mut self.cache, &source, observer)
            .await?;

        if let Err(e) = self.save_cache() {
            warn!("Failed to save cache to {:?}: {}", self.cache_path, e);
        }

        Ok(result)
    }

    /// Refresh the anti-cheat list if stale and save the cache when it changed.
    pub async fn refresh_anti_cheat(&mut self) -> RefreshOutcome {
        let source = AntiCheatApi::new(self.http.clone());
        let outcome = refresh_anti_cheat(&mut self.cache, &source).await;

        if matches!(outcome, RefreshOutcome::Updated(_))
            && let Err(e) = self.save_cache()
        {
            warn!("Failed to save cache to {:?}: {}", self.cache_path, e);
        }

        outcome
    }

    pub fn anti_cheat_status(&self, app_id: &str) -> Option<AntiCheatStatus> {
        self.cache.anti_cheat_status(app_id)
    }
}
