//! Steam user identity resolution.

use tracing::debug;

use crate::config::identity::{STEAM_USER_ID_LENGTH, STEAM_USER_ID_PREFIX};
use crate::error::Result;
use crate::network::VanityResolver;

/// Whether `input` already looks like a 64-bit individual Steam ID.
pub fn is_steam_id(input: &str) -> bool {
    input.len() == STEAM_USER_ID_LENGTH
        && input.starts_with(STEAM_USER_ID_PREFIX)
        && input.bytes().all(|b| b.is_ascii_digit())
}

/// Turn a Steam ID or vanity name into a Steam ID.
///
/// Steam IDs are returned unchanged without a request. Anything else is sent
/// to `ResolveVanityURL`; a forbidden key is a `Credential` error and an
/// unknown name an `InvalidIdentifier` error.
pub async fn resolve_steam_id<R>(resolver: &R, api_key: &str, user_id: &str) -> Result<String>
where
    R: VanityResolver + ?Sized,
{
    let user_id = user_id.trim();
    if is_steam_id(user_id) {
        return Ok(user_id.to_string());
    }

    debug!("Resolving vanity name {}", user_id);
    resolver.resolve_vanity_name(api_key, user_id).await
}
