use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::game::OwnedGamesResponse;
use crate::network::{HttpClient, HttpResponse};

const APP_DETAILS_URL: &str = "https://store.steampowered.com/api/appdetails";
const RESOLVE_VANITY_URL: &str = "https://api.steampowered.com/ISteamUser/ResolveVanityURL/v0001/";
const OWNED_GAMES_URL: &str = "https://api.steampowered.com/IPlayerService/GetOwnedGames/v0001/";

const HTTP_BAD_REQUEST: u16 = 400;
const HTTP_UNAUTHORIZED: u16 = 401;
const HTTP_FORBIDDEN: u16 = 403;

#[derive(Debug, Deserialize)]
struct VanityResponse {
    response: Option<VanityBody>,
}

#[derive(Debug, Deserialize)]
struct VanityBody {
    success: i32,
    steamid: Option<String>,
}

#[derive(Clone)]
pub struct SteamApi {
    client: HttpClient,
}

impl SteamApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Check whether the store lists native Linux support for a game.
    pub async fn is_native(&self, app_id: &str) -> Result<bool> {
        let response = self
            .client
            .get_with_query(
                APP_DETAILS_URL,
                &[("appids", app_id), ("filters", "platforms")],
            )
            .await?;
        parse_native_response(app_id, &response)
    }

    /// Resolve a vanity name (the custom part of a profile URL) into a Steam ID.
    pub async fn resolve_vanity_name(&self, api_key: &str, name: &str) -> Result<String> {
        let response = self
            .client
            .get_with_query(
                RESOLVE_VANITY_URL,
                &[("key", api_key), ("vanityurl", name)],
            )
            .await?;
        parse_vanity_response(&response)
    }

    /// Fetch every game a user owns, including free-to-play titles they have played.
    pub async fn owned_games(&self, api_key: &str, steam_id: &str) -> Result<OwnedGamesResponse> {
        let response = self
            .client
            .get_with_query(
                OWNED_GAMES_URL,
                &[
                    ("key", api_key),
                    ("steamid", steam_id),
                    ("format", "json"),
                    ("include_appinfo", "1"),
                    ("include_played_free_games", "1"),
                ],
            )
            .await?;
        parse_owned_games_response(&response)
    }
}

/// `{"<app_id>": {"success": true, "data": {"platforms": {"linux": true}}}}`
///
/// A failed status, a missing entry or an unsuccessful lookup all mean "not native".
pub fn parse_native_response(app_id: &str, response: &HttpResponse) -> Result<bool> {
    if !response.is_success() {
        return Ok(false);
    }

    let json: JsonValue = serde_json::from_str(&response.body)?;
    let Some(entry) = json.get(app_id) else {
        return Ok(false);
    };

    let success = entry
        .get("success")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false);
    let linux = entry
        .pointer("/data/platforms/linux")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false);

    Ok(success && linux)
}

pub fn parse_vanity_response(response: &HttpResponse) -> Result<String> {
    if response.status == HTTP_FORBIDDEN {
        return Err(Error::Credential);
    }

    let parsed: VanityResponse = serde_json::from_str(&response.body)?;
    match parsed.response {
        Some(VanityBody {
            success: 1,
            steamid: Some(steam_id),
        }) => Ok(steam_id),
        _ => Err(Error::InvalidIdentifier),
    }
}

pub fn parse_owned_games_response(response: &HttpResponse) -> Result<OwnedGamesResponse> {
    match response.status {
        HTTP_BAD_REQUEST => Err(Error::InvalidIdentifier),
        HTTP_UNAUTHORIZED | HTTP_FORBIDDEN => Err(Error::Credential),
        _ if !response.is_success() => Err(Error::Http(format!(
            "HTTP {} error fetching owned games",
            response.status
        ))),
        _ => Ok(serde_json::from_str(&response.body)?),
    }
}
