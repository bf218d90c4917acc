//! Compatibility ratings.
//!
//! This module contains the rating types and the library score:
//! - `Rating` - ProtonDB tiers plus the `loading`, `pending` and `native` sentinels
//! - `average_rating` - collapses per-game ratings into one library rating

mod score;
mod tier;

pub use score::*;
pub use tier::*;
