//! Integration tests for library batches.
//!
//! These drive `StreamingAggregator` end to end against scripted sources that
//! record how they were called.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use vapor_core::{
    Cache, ConcurrencyLimiter, Error, GameRecord, LibraryObserver, OwnedGamesResponse, Rating,
    RatingCache, RatingSource, ResolvedGame, Result, StreamingAggregator,
};

/// Scripted remote source.
///
/// Ids listed in `native` are native; otherwise `tiers` decides the tier
/// lookup (`None` behaves like a failed status). Ids in `failing` raise a
/// transport error. Tier lookups sleep briefly so batches overlap.
#[derive(Default)]
struct ScriptedSource {
    native: HashSet<String>,
    tiers: HashMap<String, Option<Rating>>,
    failing: HashSet<String>,
    native_calls: AtomicUsize,
    tier_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    fn with_tiers(tiers: &[(&str, Option<Rating>)]) -> Self {
        Self {
            tiers: tiers
                .iter()
                .map(|(id, tier)| (id.to_string(), *tier))
                .collect(),
            ..Default::default()
        }
    }

    fn total_calls(&self) -> usize {
        self.native_calls.load(Ordering::SeqCst) + self.tier_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RatingSource for ScriptedSource {
    async fn is_native(&self, app_id: &str) -> Result<bool> {
        self.native_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(app_id) {
            return Err(Error::Http("Connection failed".to_string()));
        }
        Ok(self.native.contains(app_id))
    }

    async fn tier(&self, app_id: &str) -> Result<Option<Rating>> {
        self.tier_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(2)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.tiers.get(app_id).copied().flatten())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Snapshot(Vec<ResolvedGame>),
    Update(ResolvedGame),
}

/// Records callbacks along with how many remote calls had happened at the time.
struct Recorder<'a> {
    source: &'a ScriptedSource,
    events: Vec<Event>,
    calls_at_snapshot: Option<usize>,
}

impl<'a> Recorder<'a> {
    fn new(source: &'a ScriptedSource) -> Self {
        Self {
            source,
            events: Vec::new(),
            calls_at_snapshot: None,
        }
    }

    fn updates(&self) -> Vec<&ResolvedGame> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Update(game) => Some(game),
                Event::Snapshot(_) => None,
            })
            .collect()
    }
}

impl LibraryObserver for Recorder<'_> {
    fn on_snapshot(&mut self, games: &[ResolvedGame]) {
        self.calls_at_snapshot = Some(self.source.total_calls());
        self.events.push(Event::Snapshot(games.to_vec()));
    }

    fn on_update(&mut self, game: &ResolvedGame) {
        self.events.push(Event::Update(game.clone()));
    }
}

fn payload(games: &[(&str, &str, u32)]) -> OwnedGamesResponse {
    OwnedGamesResponse::from_games(
        games
            .iter()
            .map(|(id, name, playtime)| GameRecord::new(*id, *name, *playtime))
            .collect(),
    )
}

fn summary(games: &[ResolvedGame]) -> Vec<(&str, Rating, u32)> {
    games
        .iter()
        .map(|g| (g.name.as_str(), g.rating, g.playtime))
        .collect()
}

mod scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_two_game_library() {
        let source = ScriptedSource::with_tiers(&[("10", Some(Rating::Gold)), ("20", None)]);
        let mut cache = Cache::new();
        let mut recorder = Recorder::new(&source);

        let result = StreamingAggregator::new()
            .run(
                payload(&[("20", "B", 50), ("10", "A", 5)]),
                &mut cache,
                &source,
                &mut recorder,
            )
            .await
            .unwrap();

        match &recorder.events[0] {
            Event::Snapshot(games) => assert_eq!(
                summary(games),
                [("B", Rating::Loading, 50), ("A", Rating::Loading, 5)]
            ),
            other => panic!("expected snapshot first, got {:?}", other),
        }
        assert_eq!(
            summary(&result.games),
            [("B", Rating::Pending, 50), ("A", Rating::Gold, 5)]
        );
        assert_eq!(result.average.rank(), 2);
        assert_eq!(result.average, Rating::Bronze);
    }

    #[tokio::test]
    async fn test_native_and_tiers_mixed() {
        let mut source = ScriptedSource::with_tiers(&[
            ("1", Some(Rating::Platinum)),
            ("2", Some(Rating::Borked)),
        ]);
        source.native.insert("3".to_string());

        let mut cache = Cache::new();
        let result = StreamingAggregator::new()
            .run(
                payload(&[("1", "One", 1), ("2", "Two", 2), ("3", "Three", 3)]),
                &mut cache,
                &source,
                (),
            )
            .await
            .unwrap();

        assert_eq!(
            summary(&result.games),
            [
                ("Three", Rating::Native, 3),
                ("Two", Rating::Borked, 2),
                ("One", Rating::Platinum, 1),
            ]
        );
        // (5 + 1 + 5) / 3 = 3.67
        assert_eq!(result.average, Rating::Gold);
        // native games never reach the tier lookup
        assert_eq!(source.tier_calls.load(Ordering::SeqCst), 2);
    }
}

mod streaming_tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_precedes_remote_calls_and_updates() {
        let source = ScriptedSource::with_tiers(&[
            ("1", Some(Rating::Gold)),
            ("2", Some(Rating::Silver)),
            ("3", Some(Rating::Bronze)),
        ]);
        let mut cache = Cache::new();
        let mut recorder = Recorder::new(&source);

        StreamingAggregator::new()
            .run(
                payload(&[("1", "a", 30), ("2", "b", 20), ("3", "c", 10)]),
                &mut cache,
                &source,
                &mut recorder,
            )
            .await
            .unwrap();

        assert_eq!(recorder.calls_at_snapshot, Some(0));
        assert!(matches!(recorder.events[0], Event::Snapshot(_)));
        assert_eq!(
            recorder
                .events
                .iter()
                .filter(|e| matches!(e, Event::Snapshot(_)))
                .count(),
            1
        );

        // one update per game, in whatever order they completed
        let updates = recorder.updates();
        assert_eq!(updates.len(), 3);
        let updated: HashSet<&str> = updates.iter().map(|g| g.app_id.as_str()).collect();
        assert_eq!(updated, HashSet::from(["1", "2", "3"]));
        assert!(updates.iter().all(|g| g.rating.is_final()));
    }

    #[tokio::test]
    async fn test_snapshot_is_sorted_placeholders() {
        let source = ScriptedSource::default();
        let mut cache = Cache::new();
        let mut recorder = Recorder::new(&source);

        StreamingAggregator::new()
            .run(
                payload(&[("1", "a", 5), ("2", "b", 500), ("3", "c", 50)]),
                &mut cache,
                &source,
                &mut recorder,
            )
            .await
            .unwrap();

        let Event::Snapshot(snapshot) = &recorder.events[0] else {
            panic!("expected snapshot first");
        };
        let playtimes: Vec<u32> = snapshot.iter().map(|g| g.playtime).collect();
        assert_eq!(playtimes, [500, 50, 5]);
        assert!(snapshot.iter().all(|g| g.rating == Rating::Loading));
    }
}

mod invariant_tests {
    use super::*;

    #[tokio::test]
    async fn test_output_matches_input_set() {
        let games: Vec<(String, String, u32)> = (0..57)
            .map(|i| (i.to_string(), format!("Game {}", i), (i * 37 % 11) as u32))
            .collect();
        let records: Vec<(&str, &str, u32)> = games
            .iter()
            .map(|(id, name, p)| (id.as_str(), name.as_str(), *p))
            .collect();

        let source = ScriptedSource::default();
        let mut cache = Cache::new();
        let result = StreamingAggregator::new()
            .run(payload(&records), &mut cache, &source, ())
            .await
            .unwrap();

        assert_eq!(result.games.len(), records.len());
        let input_ids: HashSet<&str> = records.iter().map(|(id, _, _)| *id).collect();
        let output_ids: HashSet<&str> = result.games.iter().map(|g| g.app_id.as_str()).collect();
        assert_eq!(input_ids, output_ids);

        let playtimes: Vec<u32> = result.games.iter().map(|g| g.playtime).collect();
        assert!(playtimes.windows(2).all(|w| w[0] >= w[1]));
        assert!(result.games.iter().all(|g| g.rating != Rating::Loading));
    }

    #[tokio::test]
    async fn test_equal_playtime_keeps_input_order() {
        let source = ScriptedSource::default();
        let mut cache = Cache::new();

        let result = StreamingAggregator::new()
            .run(
                payload(&[
                    ("1", "first", 10),
                    ("2", "second", 10),
                    ("3", "top", 90),
                    ("4", "third", 10),
                ]),
                &mut cache,
                &source,
                (),
            )
            .await
            .unwrap();

        let names: Vec<&str> = result.games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["top", "first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_failing_game_does_not_stop_batch() {
        let mut source =
            ScriptedSource::with_tiers(&[("1", Some(Rating::Gold)), ("2", Some(Rating::Gold))]);
        source.failing.insert("2".to_string());

        let mut cache = Cache::new();
        let result = StreamingAggregator::new()
            .run(
                payload(&[("1", "ok", 2), ("2", "broken", 1)]),
                &mut cache,
                &source,
                (),
            )
            .await
            .unwrap();

        assert_eq!(
            summary(&result.games),
            [("ok", Rating::Gold, 2), ("broken", Rating::Pending, 1)]
        );
    }
}

mod concurrency_tests {
    use super::*;

    fn big_library(count: usize) -> OwnedGamesResponse {
        OwnedGamesResponse::from_games(
            (0..count)
                .map(|i| GameRecord::new(i.to_string(), format!("Game {}", i), i as u32))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_at_most_twenty_lookups_in_flight() {
        let source = ScriptedSource::default();
        let mut cache = Cache::new();

        StreamingAggregator::new()
            .run(big_library(150), &mut cache, &source, ())
            .await
            .unwrap();

        let max = source.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 20, "observed {} concurrent lookups", max);
        assert!(max > 1, "lookups never overlapped");
        assert_eq!(source.tier_calls.load(Ordering::SeqCst), 150);
    }

    #[tokio::test]
    async fn test_custom_limit_is_respected() {
        let source = ScriptedSource::default();
        let mut cache = Cache::new();

        StreamingAggregator::with_limiter(ConcurrencyLimiter::new(3))
            .run(big_library(30), &mut cache, &source, ())
            .await
            .unwrap();

        assert!(source.max_in_flight.load(Ordering::SeqCst) <= 3);
    }
}

mod cache_tests {
    use super::*;

    #[tokio::test]
    async fn test_cached_games_make_no_remote_calls() {
        let source = ScriptedSource::with_tiers(&[("10", Some(Rating::Gold))]);
        let mut cache = Cache::new();
        cache.commit_games(&[ResolvedGame::with_rating(
            &GameRecord::new("10", "A", 5),
            Rating::Silver,
        )]);

        let result = StreamingAggregator::new()
            .run(payload(&[("10", "A", 5)]), &mut cache, &source, ())
            .await
            .unwrap();

        assert_eq!(result.games[0].rating, Rating::Silver);
        assert_eq!(source.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_commit_skips_previously_cached_games() {
        let source = ScriptedSource::with_tiers(&[("20", Some(Rating::Platinum))]);
        let mut cache = Cache::new();
        let cached_at = Utc::now() - chrono::Duration::days(2);
        cache.insert_game_at(
            &ResolvedGame::with_rating(&GameRecord::new("10", "Old", 5), Rating::Silver),
            cached_at,
        );

        StreamingAggregator::new()
            .run(
                payload(&[("10", "Old", 5), ("20", "New", 50)]),
                &mut cache,
                &source,
                (),
            )
            .await
            .unwrap();

        let old = cache.game("10").unwrap();
        assert_eq!(old.timestamp, cached_at);
        assert_eq!(old.rating, Rating::Silver);

        let new = cache.game("20").unwrap();
        assert_eq!(new.rating, Rating::Platinum);
        assert!(new.timestamp > cached_at);
    }

    #[tokio::test]
    async fn test_results_written_back_to_cache() {
        let source = ScriptedSource::with_tiers(&[("10", Some(Rating::Gold)), ("20", None)]);
        let mut cache = Cache::new();

        StreamingAggregator::new()
            .run(
                payload(&[("10", "A", 5), ("20", "B", 50)]),
                &mut cache,
                &source,
                (),
            )
            .await
            .unwrap();

        assert_eq!(cache.lookup_game("10"), Some(Rating::Gold));
        assert_eq!(cache.lookup_game("20"), None);
    }

    #[tokio::test]
    async fn test_pending_is_looked_up_again_next_batch() {
        let games = [("10", "Flaky", 50), ("20", "Steady", 5)];
        let mut cache = Cache::new();

        let mut failing = ScriptedSource::with_tiers(&[
            ("10", Some(Rating::Gold)),
            ("20", Some(Rating::Silver)),
        ]);
        failing.failing.insert("10".to_string());
        let first = StreamingAggregator::new()
            .run(payload(&games), &mut cache, &failing, ())
            .await
            .unwrap();
        assert_eq!(first.games[0].rating, Rating::Pending);
        assert_eq!(cache.lookup_game("10"), None);

        let healthy = ScriptedSource::with_tiers(&[("10", Some(Rating::Gold))]);
        let second = StreamingAggregator::new()
            .run(payload(&games), &mut cache, &healthy, ())
            .await
            .unwrap();

        assert_eq!(
            summary(&second.games),
            [("Flaky", Rating::Gold, 50), ("Steady", Rating::Silver, 5)]
        );
        // only the game that degraded last time goes back to the remote source
        assert_eq!(healthy.native_calls.load(Ordering::SeqCst), 1);
        assert_eq!(healthy.tier_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.lookup_game("10"), Some(Rating::Gold));
    }
}

mod batch_error_tests {
    use super::*;

    #[tokio::test]
    async fn test_private_account() {
        let source = ScriptedSource::default();
        let mut cache = Cache::new();
        let mut recorder = Recorder::new(&source);

        let result = StreamingAggregator::new()
            .run(
                OwnedGamesResponse::default(),
                &mut cache,
                &source,
                &mut recorder,
            )
            .await;

        assert!(matches!(result, Err(Error::PrivateAccount)));
        assert!(recorder.events.is_empty());
        assert_eq!(source.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_library() {
        let source = ScriptedSource::default();
        let mut cache = Cache::new();

        let result = StreamingAggregator::new()
            .run(
                OwnedGamesResponse::from_games(Vec::new()),
                &mut cache,
                &source,
                (),
            )
            .await;

        assert!(matches!(result, Err(Error::EmptyLibrary)));
    }

    #[tokio::test]
    async fn test_private_payload_from_json() {
        let payload: OwnedGamesResponse =
            serde_json::from_str(r#"{"response": {"game_count": 0}}"#).unwrap();
        let source = ScriptedSource::default();
        let mut cache = Cache::new();

        let result = StreamingAggregator::new()
            .run(payload, &mut cache, &source, ())
            .await;

        assert!(matches!(result, Err(Error::PrivateAccount)));
    }
}
