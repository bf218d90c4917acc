//! Library rating resolution.
//!
//! - `resolve_rating` - cache, native check, then ProtonDB for one game
//! - `ConcurrencyLimiter` - caps in-flight resolutions per batch
//! - `StreamingAggregator` - drives a whole library batch
//! - `LibraryObserver` - snapshot and per-game progress callbacks

mod limiter;
mod observer;
mod resolver;
mod stream;

pub use limiter::*;
pub use observer::*;
pub use resolver::*;
pub use stream::*;
