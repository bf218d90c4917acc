use std::collections::{HashMap, HashSet};

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info};

use crate::cache::RatingCache;
use crate::error::{Error, Result};
use crate::game::{LibraryResult, OwnedGamesResponse, ResolvedGame, sort_by_playtime};
use crate::network::RatingSource;
use crate::rating::{Rating, average_rating};
use crate::resolve::{ConcurrencyLimiter, LibraryObserver, resolve_game};

/// Phases of one library batch. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BatchState {
    CollectingInput,
    SnapshotEmitted,
    Resolving,
    Finalizing,
    Done,
}

/// Drives one library batch from the owned-games payload to a `LibraryResult`.
///
/// All resolutions are polled on the calling task and gated by a limiter that
/// lives exactly as long as the batch. The cache is only read while games are
/// resolving and is written once at the end.
#[derive(Debug)]
pub struct StreamingAggregator {
    limiter: ConcurrencyLimiter,
    state: BatchState,
}

impl Default for StreamingAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingAggregator {
    pub fn new() -> Self {
        Self::with_limiter(ConcurrencyLimiter::default())
    }

    pub fn with_limiter(limiter: ConcurrencyLimiter) -> Self {
        Self {
            limiter,
            state: BatchState::CollectingInput,
        }
    }

    fn advance(&mut self, next: BatchState) {
        debug_assert!(
            next > self.state,
            "batch cannot move from {:?} to {:?}",
            self.state,
            next
        );
        debug!("Library batch: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Resolve every game in `payload`.
    ///
    /// Fails with `PrivateAccount` if the payload has no games list, or
    /// `EmptyLibrary` if the list is empty. Both are reported before the
    /// snapshot is emitted; after that the batch always completes.
    pub async fn run<C, S, O>(
        mut self,
        payload: OwnedGamesResponse,
        cache: &mut C,
        source: &S,
        mut observer: O,
    ) -> Result<LibraryResult>
    where
        C: RatingCache + ?Sized,
        S: RatingSource + ?Sized,
        O: LibraryObserver,
    {
        let records = payload.into_games()?;
        if records.is_empty() {
            return Err(Error::EmptyLibrary);
        }

        let mut snapshot: Vec<ResolvedGame> = records.iter().map(ResolvedGame::loading).collect();
        sort_by_playtime(&mut snapshot);
        observer.on_snapshot(&snapshot);
        self.advance(BatchState::SnapshotEmitted);

        self.advance(BatchState::Resolving);
        info!("Resolving ratings for {} games", records.len());

        let mut ratings: HashMap<String, Rating> = HashMap::with_capacity(records.len());
        {
            let reader: &C = &*cache;
            let limiter = &self.limiter;
            let mut in_flight: FuturesUnordered<_> = records
                .iter()
                .map(|record| async move {
                    match limiter.run(resolve_game(record, reader, source)).await {
                        Some(game) => game,
                        None => ResolvedGame::with_rating(record, Rating::Pending),
                    }
                })
                .collect();

            while let Some(game) = in_flight.next().await {
                observer.on_update(&game);
                ratings.insert(game.app_id.clone(), game.rating);
            }
        }

        self.advance(BatchState::Finalizing);

        let mut games: Vec<ResolvedGame> = snapshot
            .into_iter()
            .map(|mut game| {
                game.rating = ratings
                    .get(&game.app_id)
                    .copied()
                    .unwrap_or(Rating::Pending);
                game
            })
            .collect();
        sort_by_playtime(&mut games);

        // games served from cache keep their original timestamp, and pending
        // games are looked up again next batch
        let cached = previously_cached(&games, cache);
        let fresh: Vec<ResolvedGame> = games
            .iter()
            .filter(|game| game.rating != Rating::Pending)
            .filter(|game| !cached.contains(game.app_id.as_str()))
            .cloned()
            .collect();
        debug!(
            "Committing {} new ratings ({} already cached)",
            fresh.len(),
            cached.len()
        );
        cache.commit_games(&fresh);

        let average = average_rating(games.iter().map(|game| game.rating))?;
        self.advance(BatchState::Done);
        info!("Library average rating: {}", average);

        Ok(LibraryResult { games, average })
    }
}

/// Ids the resolver would have answered from the cache.
fn previously_cached<'a, C>(games: &'a [ResolvedGame], cache: &C) -> HashSet<&'a str>
where
    C: RatingCache + ?Sized,
{
    if !cache.has_fresh_game_cache() {
        return HashSet::new();
    }

    games
        .iter()
        .filter(|game| cache.lookup_game(&game.app_id).is_some())
        .map(|game| game.app_id.as_str())
        .collect()
}
