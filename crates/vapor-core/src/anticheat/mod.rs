//! Anti-cheat compatibility data.
//!
//! The list comes from AreWeAntiCheatYet and is refreshed independently of
//! the per-game rating flow.

mod refresh;
mod types;

pub use refresh::*;
pub use types::*;
