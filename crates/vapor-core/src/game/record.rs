use serde::{Deserialize, Deserializer, Serialize};

use crate::rating::Rating;

/// One owned game, immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "appid", deserialize_with = "app_id_from_json")]
    pub app_id: String,
    #[serde(default)]
    pub name: String,
    /// Total playtime in minutes
    #[serde(rename = "playtime_forever", default)]
    pub playtime: u32,
}

impl GameRecord {
    pub fn new(app_id: impl Into<String>, name: impl Into<String>, playtime: u32) -> Self {
        Self {
            app_id: app_id.into(),
            name: name.into(),
            playtime,
        }
    }
}

fn app_id_from_json<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AppId {
        Number(u64),
        Text(String),
    }

    Ok(match AppId::deserialize(deserializer)? {
        AppId::Number(n) => n.to_string(),
        AppId::Text(s) => s,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGame {
    pub app_id: String,
    pub name: String,
    pub playtime: u32,
    pub rating: Rating,
}

impl ResolvedGame {
    /// Placeholder entry shown before the rating is known.
    pub fn loading(record: &GameRecord) -> Self {
        Self::with_rating(record, Rating::Loading)
    }

    pub fn with_rating(record: &GameRecord, rating: Rating) -> Self {
        Self {
            app_id: record.app_id.clone(),
            name: record.name.clone(),
            playtime: record.playtime,
            rating,
        }
    }
}

/// Sort by playtime, most played first.
///
/// The sort is stable, so games with equal playtime keep their input order.
pub fn sort_by_playtime(games: &mut [ResolvedGame]) {
    games.sort_by(|a, b| b.playtime.cmp(&a.playtime));
}

/// A fully resolved library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryResult {
    pub games: Vec<ResolvedGame>,
    pub average: Rating,
}
