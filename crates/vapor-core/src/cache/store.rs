use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::anticheat::{AntiCheatRecord, AntiCheatStatus};
use crate::cache::RatingCache;
use crate::config::cache::CACHE_INVALIDATION_DAYS;
use crate::error::Result;
use crate::game::ResolvedGame;
use crate::rating::Rating;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedGame {
    pub name: String,
    pub rating: Rating,
    pub playtime: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiCheatCache {
    pub timestamp: DateTime<Utc>,
    pub data: HashMap<String, AntiCheatStatus>,
}

/// Persistent cache of game ratings and anti-cheat status.
///
/// Lifecycle per run: `load` → reads → one commit per batch → `save`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cache {
    #[serde(default)]
    game_cache: HashMap<String, CachedGame>,
    #[serde(default)]
    anticheat_cache: Option<AntiCheatCache>,
}

fn is_fresh(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - timestamp < Duration::days(CACHE_INVALIDATION_DAYS)
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cache from file, dropping stale game entries.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut cache: Cache = serde_json::from_str(&content)?;
        cache.prune_stale(Utc::now());
        Ok(cache)
    }

    /// Load the cache, starting empty if the file is missing or unreadable.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(cache) => {
                debug!(
                    "Loaded {} cached games from {:?}",
                    cache.game_count(),
                    path.as_ref()
                );
                cache
            }
            Err(crate::error::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Self::new(),
            Err(e) => {
                warn!(
                    "Failed to load cache {:?}: {}, starting fresh",
                    path.as_ref(),
                    e
                );
                Self::new()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Drop game entries older than the invalidation window.
    pub fn prune_stale(&mut self, now: DateTime<Utc>) {
        self.game_cache
            .retain(|_, game| is_fresh(game.timestamp, now));
    }

    pub fn game(&self, app_id: &str) -> Option<&CachedGame> {
        self.game_cache.get(app_id)
    }

    pub fn game_count(&self) -> usize {
        self.game_cache.len()
    }

    /// Insert or replace one game with an explicit timestamp.
    pub fn insert_game_at(&mut self, game: &ResolvedGame, timestamp: DateTime<Utc>) {
        self.game_cache.insert(
            game.app_id.clone(),
            CachedGame {
                name: game.name.clone(),
                rating: game.rating,
                playtime: game.playtime,
                timestamp,
            },
        );
    }

    pub fn anti_cheat_status(&self, app_id: &str) -> Option<AntiCheatStatus> {
        self.anticheat_cache
            .as_ref()
            .and_then(|ac| ac.data.get(app_id).copied())
    }

    fn has_fresh_game_cache_at(&self, now: DateTime<Utc>) -> bool {
        self.game_cache
            .values()
            .any(|game| is_fresh(game.timestamp, now))
    }
}

impl RatingCache for Cache {
    fn has_fresh_game_cache(&self) -> bool {
        self.has_fresh_game_cache_at(Utc::now())
    }

    fn has_fresh_anti_cheat_cache(&self) -> bool {
        self.anticheat_cache
            .as_ref()
            .is_some_and(|ac| is_fresh(ac.timestamp, Utc::now()))
    }

    fn lookup_game(&self, app_id: &str) -> Option<Rating> {
        self.game_cache
            .get(app_id)
            .filter(|game| is_fresh(game.timestamp, Utc::now()))
            .map(|game| game.rating)
    }

    fn commit_games(&mut self, games: &[ResolvedGame]) {
        let now = Utc::now();
        for game in games {
            self.insert_game_at(game, now);
        }
    }

    fn commit_anti_cheat(&mut self, records: Vec<AntiCheatRecord>) {
        self.anticheat_cache = Some(AntiCheatCache {
            timestamp: Utc::now(),
            data: records
                .into_iter()
                .map(|record| (record.app_id, record.status))
                .collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameRecord;

    fn resolved(app_id: &str, rating: Rating) -> ResolvedGame {
        ResolvedGame::with_rating(
            &GameRecord::new(app_id, format!("Game {}", app_id), 60),
            rating,
        )
    }

    #[test]
    fn test_empty_cache_is_not_fresh() {
        let cache = Cache::new();
        assert!(!cache.has_fresh_game_cache());
        assert!(!cache.has_fresh_anti_cheat_cache());
        assert_eq!(cache.lookup_game("10"), None);
    }

    #[test]
    fn test_commit_and_lookup() {
        let mut cache = Cache::new();
        cache.commit_games(&[resolved("10", Rating::Gold), resolved("20", Rating::Native)]);

        assert!(cache.has_fresh_game_cache());
        assert_eq!(cache.lookup_game("10"), Some(Rating::Gold));
        assert_eq!(cache.lookup_game("20"), Some(Rating::Native));
        assert_eq!(cache.lookup_game("30"), None);
    }

    #[test]
    fn test_stale_entry_is_ignored() {
        let mut cache = Cache::new();
        let old = Utc::now() - Duration::days(CACHE_INVALIDATION_DAYS + 1);
        cache.insert_game_at(&resolved("10", Rating::Silver), old);

        assert!(!cache.has_fresh_game_cache());
        assert_eq!(cache.lookup_game("10"), None);

        cache.prune_stale(Utc::now());
        assert_eq!(cache.game_count(), 0);
    }

    #[test]
    fn test_anti_cheat_commit() {
        let mut cache = Cache::new();
        cache.commit_anti_cheat(vec![AntiCheatRecord {
            app_id: "578080".to_string(),
            status: AntiCheatStatus::Denied,
        }]);

        assert!(cache.has_fresh_anti_cheat_cache());
        assert_eq!(
            cache.anti_cheat_status("578080"),
            Some(AntiCheatStatus::Denied)
        );
        assert_eq!(cache.anti_cheat_status("1"), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vapor").join("cache.json");

        let mut cache = Cache::new();
        cache.commit_games(&[resolved("10", Rating::Platinum)]);
        cache.insert_game_at(
            &resolved("20", Rating::Borked),
            Utc::now() - Duration::days(30),
        );
        cache.save(&path).unwrap();

        let loaded = Cache::load(&path).unwrap();
        assert_eq!(loaded.game_count(), 1);
        assert_eq!(loaded.lookup_game("10"), Some(Rating::Platinum));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::load_or_default(dir.path().join("absent.json"));
        assert_eq!(cache, Cache::new());
    }

    #[test]
    fn test_load_or_default_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();

        let cache = Cache::load_or_default(&path);
        assert_eq!(cache.game_count(), 0);
    }
}
