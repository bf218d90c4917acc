//! Remote collaborators.
//!
//! - `HttpClient` - shared reqwest client returning status and body
//! - `SteamApi` - store platform check, vanity resolution, owned games
//! - `ProtonDbApi` - compatibility tier summaries
//! - `AntiCheatApi` - AreWeAntiCheatYet game list
//! - `RatingSource` / `AntiCheatSource` - seams used by the resolver and refresh

mod anticheat;
mod client;
mod protondb;
mod source;
mod steam;

pub use anticheat::*;
pub use client::*;
pub use protondb::*;
pub use source::*;
pub use steam::*;
