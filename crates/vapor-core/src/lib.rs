pub mod anticheat;
pub mod cache;
pub mod config;
pub mod error;
pub mod game;
pub mod identity;
pub mod network;
pub mod rating;
pub mod resolve;
pub mod vapor;

pub use anticheat::{AntiCheatRecord, AntiCheatStatus, RefreshOutcome, refresh_anti_cheat};
pub use cache::{Cache, RatingCache};
pub use config::Config;
pub use error::{Error, Result};
pub use game::{GameRecord, LibraryResult, OwnedGamesResponse, ResolvedGame};
pub use identity::{is_steam_id, resolve_steam_id};
pub use network::{
    AntiCheatSource, HttpClient, HttpResponse, RatingSource, RemoteRatingSource, VanityResolver,
};
pub use rating::{Rating, average_rating};
pub use resolve::{
    ConcurrencyLimiter, LibraryObserver, StreamingAggregator, resolve_game, resolve_rating,
    resolve_single_rating,
};
pub use vapor::Vapor;
