use tracing::{info, warn};

use crate::anticheat::parse_anti_cheat_list;
use crate::cache::RatingCache;
use crate::network::AntiCheatSource;

/// What a refresh did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Cached data was still fresh, nothing fetched.
    AlreadyFresh,
    /// New records were committed.
    Updated(usize),
    /// The fetch failed; the cache was left as it was.
    Unchanged,
}

/// Refresh the cached anti-cheat list.
///
/// Failures are logged and leave the cache untouched; this never errors.
pub async fn refresh_anti_cheat<C, S>(cache: &mut C, source: &S) -> RefreshOutcome
where
    C: RatingCache + ?Sized,
    S: AntiCheatSource + ?Sized,
{
    if cache.has_fresh_anti_cheat_cache() {
        return RefreshOutcome::AlreadyFresh;
    }

    let response = match source.fetch_anti_cheat_list().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Failed to fetch anti-cheat list: {}", e);
            return RefreshOutcome::Unchanged;
        }
    };

    if !response.is_success() {
        warn!("Anti-cheat list returned HTTP {}", response.status);
        return RefreshOutcome::Unchanged;
    }

    let records = match parse_anti_cheat_list(&response.body) {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to parse anti-cheat list: {}", e);
            return RefreshOutcome::Unchanged;
        }
    };

    let count = records.len();
    cache.commit_anti_cheat(records);
    info!("Refreshed anti-cheat data for {} games", count);

    RefreshOutcome::Updated(count)
}
