use serde::Deserialize;

use crate::error::{Error, Result};
use crate::game::GameRecord;

/// `IPlayerService/GetOwnedGames` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedGamesResponse {
    #[serde(default)]
    pub response: OwnedGamesBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedGamesBody {
    /// Absent when the profile hides its game details.
    pub games: Option<Vec<GameRecord>>,
}

impl OwnedGamesResponse {
    pub fn from_games(games: Vec<GameRecord>) -> Self {
        Self {
            response: OwnedGamesBody {
                games: Some(games),
            },
        }
    }

    /// Take the games list, failing if the account withholds it.
    pub fn into_games(self) -> Result<Vec<GameRecord>> {
        self.response.games.ok_or(Error::PrivateAccount)
    }
}
