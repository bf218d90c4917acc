use serde::Deserialize;

use crate::error::Result;
use crate::network::{HttpClient, HttpResponse};
use crate::rating::Rating;

const PROTONDB_SUMMARY_URL: &str = "https://www.protondb.com/api/v1/reports/summaries";

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    tier: Option<String>,
}

#[derive(Clone)]
pub struct ProtonDbApi {
    client: HttpClient,
}

impl ProtonDbApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetch the community tier for a game, `None` if ProtonDB has none.
    pub async fn tier(&self, app_id: &str) -> Result<Option<Rating>> {
        let url = format!("{}/{}.json", PROTONDB_SUMMARY_URL, app_id);
        let response = self.client.get(&url).await?;
        parse_summary_response(&response)
    }
}

/// Interpret a summary response: a failed status or missing tier is `None`.
pub fn parse_summary_response(response: &HttpResponse) -> Result<Option<Rating>> {
    if !response.is_success() {
        return Ok(None);
    }

    let summary: SummaryResponse = serde_json::from_str(&response.body)?;
    Ok(summary.tier.as_deref().map(Rating::from_tier))
}
