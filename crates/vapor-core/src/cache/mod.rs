//! Rating and anti-cheat cache.
//!
//! `RatingCache` is the interface the resolver and refresh paths use;
//! `Cache` is the JSON file backed implementation.

mod store;

pub use store::*;

use crate::anticheat::AntiCheatRecord;
use crate::game::ResolvedGame;
use crate::rating::Rating;

/// Cache operations used while resolving a library.
///
/// Within a batch the cache is read through shared references by every
/// in-flight resolution and written once after all of them finish.
pub trait RatingCache {
    /// Whether cached game ratings may be used instead of fetching.
    fn has_fresh_game_cache(&self) -> bool;

    /// Whether the cached anti-cheat list is recent enough to skip a refresh.
    fn has_fresh_anti_cheat_cache(&self) -> bool;

    /// Last known rating for a game.
    fn lookup_game(&self, app_id: &str) -> Option<Rating>;

    /// Store resolved games, stamping them with the current time.
    fn commit_games(&mut self, games: &[ResolvedGame]);

    /// Replace the anti-cheat list.
    fn commit_anti_cheat(&mut self, records: Vec<AntiCheatRecord>);
}
