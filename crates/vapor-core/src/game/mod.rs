//! Game library types.
//!
//! - `GameRecord` - one owned game as reported by Steam
//! - `ResolvedGame` - a game paired with its compatibility rating
//! - `LibraryResult` - the finished, sorted library with its average rating
//! - `OwnedGamesResponse` - the raw owned-games payload

mod owned;
mod record;

pub use owned::*;
pub use record::*;
