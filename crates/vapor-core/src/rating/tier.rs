use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rating {
    /// Placeholder shown while a game is still being resolved.
    #[default]
    Loading,
    Pending,
    Borked,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Native,
}

impl Rating {
    /// Ratings that can be the result of averaging, in lookup order.
    ///
    /// `Platinum` precedes `Native` so a mean of 5 reports platinum.
    pub const CANONICAL: [Rating; 7] = [
        Rating::Pending,
        Rating::Borked,
        Rating::Bronze,
        Rating::Silver,
        Rating::Gold,
        Rating::Platinum,
        Rating::Native,
    ];

    /// Rank used when averaging a library.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Loading | Self::Pending => 0,
            Self::Borked => 1,
            Self::Bronze => 2,
            Self::Silver => 3,
            Self::Gold => 4,
            Self::Platinum | Self::Native => 5,
        }
    }

    /// First canonical rating with the given rank.
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::CANONICAL.iter().copied().find(|r| r.rank() == rank)
    }

    /// Interpret a tier string reported by ProtonDB.
    ///
    /// Anything unrecognized, including our own `loading` sentinel, is `pending`.
    pub fn from_tier(tier: &str) -> Self {
        match tier.parse::<Rating>() {
            Ok(Rating::Loading) | Err(_) => Rating::Pending,
            Ok(rating) => rating,
        }
    }

    /// True once a rating is no longer a placeholder.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
