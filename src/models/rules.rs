//! Sport identifiers and the scoring rules resolved from them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sport a tournament is played under. Selects the scoring rules.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SportType {
    #[default]
    Soccer,
    Rugby,
    Custom,
}

impl FromStr for SportType {
    type Err = std::convert::Infallible;

    /// Case-insensitive. Anything unrecognized is treated as soccer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sport = match s.trim().to_ascii_lowercase().as_str() {
            "rugby" => SportType::Rugby,
            "custom" => SportType::Custom,
            _ => SportType::Soccer,
        };
        Ok(sport)
    }
}

/// Fixed score awarded when a match is settled by walkover.
/// `home` goes to the side that advances, `away` to the side that forfeits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WalkoverScore {
    pub home: u32,
    pub away: u32,
}

/// Points table for a sport. Resolved once per tournament, never per match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub win_points: u32,
    pub draw_points: u32,
    pub loss_points: u32,
    pub walkover_score: WalkoverScore,
}

/// Caller overrides for the `custom` sport. Missing fields use the custom defaults.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CustomRules {
    #[serde(default)]
    pub win_points: Option<u32>,
    #[serde(default)]
    pub draw_points: Option<u32>,
    #[serde(default)]
    pub walkover_score: Option<WalkoverScore>,
}
