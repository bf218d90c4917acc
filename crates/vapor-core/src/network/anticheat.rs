use crate::error::Result;
use crate::network::{HttpClient, HttpResponse};

const ARE_WE_ANTI_CHEAT_YET_URL: &str =
    "https://raw.githubusercontent.com/AreWeAntiCheatYet/AreWeAntiCheatYet/master/games.json";

#[derive(Clone)]
pub struct AntiCheatApi {
    client: HttpClient,
}

impl AntiCheatApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Download the raw AreWeAntiCheatYet game list.
    pub async fn fetch_games(&self) -> Result<HttpResponse> {
        self.client.get(ARE_WE_ANTI_CHEAT_YET_URL).await
    }
}
