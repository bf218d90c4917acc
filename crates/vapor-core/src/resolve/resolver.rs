use tracing::debug;

use crate::cache::RatingCache;
use crate::error::Result;
use crate::game::{GameRecord, ResolvedGame};
use crate::network::{HttpClient, RatingSource, RemoteRatingSource};
use crate::rating::Rating;

/// Resolve the rating of one game.
///
/// Order: fresh cache entry, then native Linux support, then the ProtonDB
/// tier. Never fails; any lookup error degrades to `pending`.
pub async fn resolve_rating<C, S>(app_id: &str, cache: &C, source: &S) -> Rating
where
    C: RatingCache + ?Sized,
    S: RatingSource + ?Sized,
{
    if cache.has_fresh_game_cache()
        && let Some(rating) = cache.lookup_game(app_id)
    {
        return rating;
    }

    match lookup_remote(app_id, source).await {
        Ok(rating) => rating,
        Err(e) => {
            debug!(
                "Rating lookup for {} failed, marking pending: {}",
                app_id, e
            );
            Rating::Pending
        }
    }
}

async fn lookup_remote<S>(app_id: &str, source: &S) -> Result<Rating>
where
    S: RatingSource + ?Sized,
{
    if source.is_native(app_id).await? {
        return Ok(Rating::Native);
    }

    Ok(source.tier(app_id).await?.unwrap_or(Rating::Pending))
}

/// Resolve one owned game, carrying its name and playtime over.
pub async fn resolve_game<C, S>(record: &GameRecord, cache: &C, source: &S) -> ResolvedGame
where
    C: RatingCache + ?Sized,
    S: RatingSource + ?Sized,
{
    let rating = resolve_rating(&record.app_id, cache, source).await;
    ResolvedGame::with_rating(record, rating)
}

/// Resolve a single game outside a batch, on its own HTTP client.
pub async fn resolve_single_rating<C>(app_id: &str, cache: &C) -> Result<Rating>
where
    C: RatingCache + ?Sized,
{
    let source = RemoteRatingSource::new(HttpClient::new()?);
    Ok(resolve_rating(app_id, cache, &source).await)
}
