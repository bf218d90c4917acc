use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Anti-cheat support on Linux as reported by AreWeAntiCheatYet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AntiCheatStatus {
    Supported,
    Running,
    Planned,
    Broken,
    Denied,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AntiCheatStatus {
    /// Whether the game is expected to be playable online.
    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Supported | Self::Running)
    }
}

impl std::fmt::Display for AntiCheatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Supported => "Supported",
            Self::Running => "Running",
            Self::Planned => "Planned",
            Self::Broken => "Broken",
            Self::Denied => "Denied",
            Self::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiCheatRecord {
    pub app_id: String,
    pub status: AntiCheatStatus,
}

#[derive(Debug, Deserialize)]
struct AntiCheatEntry {
    #[serde(rename = "storeIds", default)]
    store_ids: StoreIds,
    #[serde(default)]
    status: AntiCheatStatus,
}

#[derive(Debug, Default, Deserialize)]
struct StoreIds {
    steam: Option<JsonValue>,
}

impl StoreIds {
    /// Any string or number under `steam` is taken verbatim, even an empty one.
    fn steam_app_id(&self) -> Option<String> {
        match self.steam.as_ref()? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Parse the AreWeAntiCheatYet `games.json` list.
///
/// Entries without a Steam store id are dropped.
pub fn parse_anti_cheat_list(body: &str) -> Result<Vec<AntiCheatRecord>> {
    let entries: Vec<AntiCheatEntry> = serde_json::from_str(body)?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            let app_id = entry.store_ids.steam_app_id()?;
            Some(AntiCheatRecord {
                app_id,
                status: entry.status,
            })
        })
        .collect())
}
