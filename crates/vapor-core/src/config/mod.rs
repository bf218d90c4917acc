//! Configuration and tuning constants.
//!
//! - `Config` - user settings loaded from `config.toml`
//! - Network, identity and cache constants

mod settings;

pub use settings::*;

/// Outbound request configuration.
pub mod network {
    use std::time::Duration;

    /// Maximum number of game ratings resolved at once within one batch.
    pub const MAX_CONCURRENT_REQUESTS: usize = 20;

    /// Per-request timeout for the shared HTTP client.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Steam identity format.
pub mod identity {
    /// Length of a 64-bit Steam ID in decimal.
    pub const STEAM_USER_ID_LENGTH: usize = 17;

    /// Prefix shared by individual account Steam IDs.
    pub const STEAM_USER_ID_PREFIX: &str = "76561198";
}

/// Cache freshness configuration.
pub mod cache {
    /// Days before a cached rating or anti-cheat list is considered stale.
    pub const CACHE_INVALIDATION_DAYS: i64 = 7;

    /// File name used when no cache path is configured.
    pub const CACHE_FILE_NAME: &str = "cache.json";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_constants() {
        assert_eq!(network::MAX_CONCURRENT_REQUESTS, 20);
        assert_eq!(network::REQUEST_TIMEOUT.as_secs(), 30);
    }

    #[test]
    fn test_identity_constants() {
        let prefix = identity::STEAM_USER_ID_PREFIX;
        assert_eq!(prefix.len(), 8);
        assert!(prefix.len() < identity::STEAM_USER_ID_LENGTH);
    }
}
