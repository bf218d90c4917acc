use async_trait::async_trait;

use crate::error::Result;
use crate::network::{AntiCheatApi, HttpClient, HttpResponse, ProtonDbApi, SteamApi};
use crate::rating::Rating;

/// Remote lookups the rating resolver depends on.
///
/// This trait abstracts the Steam store and ProtonDB, allowing mock
/// implementations for testing without network access.
#[async_trait]
pub trait RatingSource: Sync {
    /// Whether the game ships a native Linux build.
    async fn is_native(&self, app_id: &str) -> Result<bool>;

    /// The community tier, `None` when unavailable.
    async fn tier(&self, app_id: &str) -> Result<Option<Rating>>;
}

/// Turns a vanity name into a Steam ID.
#[async_trait]
pub trait VanityResolver: Sync {
    async fn resolve_vanity_name(&self, api_key: &str, name: &str) -> Result<String>;
}

/// Source of the raw anti-cheat compatibility list.
#[async_trait]
pub trait AntiCheatSource: Sync {
    async fn fetch_anti_cheat_list(&self) -> Result<HttpResponse>;
}

/// Steam + ProtonDB sharing one connection pool.
#[derive(Clone)]
pub struct RemoteRatingSource {
    steam: SteamApi,
    protondb: ProtonDbApi,
}

impl RemoteRatingSource {
    pub fn new(client: HttpClient) -> Self {
        Self {
            steam: SteamApi::new(client.clone()),
            protondb: ProtonDbApi::new(client),
        }
    }
}

#[async_trait]
impl RatingSource for RemoteRatingSource {
    async fn is_native(&self, app_id: &str) -> Result<bool> {
        self.steam.is_native(app_id).await
    }

    async fn tier(&self, app_id: &str) -> Result<Option<Rating>> {
        self.protondb.tier(app_id).await
    }
}

#[async_trait]
impl VanityResolver for SteamApi {
    async fn resolve_vanity_name(&self, api_key: &str, name: &str) -> Result<String> {
        SteamApi::resolve_vanity_name(self, api_key, name).await
    }
}

#[async_trait]
impl AntiCheatSource for AntiCheatApi {
    async fn fetch_anti_cheat_list(&self) -> Result<HttpResponse> {
        self.fetch_games().await
    }
}
