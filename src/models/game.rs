//! Match (fixture) and its lifecycle status.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a match.
pub type MatchId = String;

/// Identifier for a pitch (venue resource).
pub type PitchId = String;

/// Where a match is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    /// Final. No schedule operation touches a completed match.
    Completed,
    Cancelled,
}

/// A single fixture between two teams on a pitch.
///
/// Scores are present if and only if `status` is `Completed`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    pub pitch_id: PitchId,
    pub scheduled_time: DateTime<Utc>,
    /// Position in the intended running order; anchor for push-backs.
    pub sort_order: i64,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub is_walkover: bool,
}

impl Match {
    /// New scheduled match with a generated id.
    pub fn new(
        home_team_id: impl Into<TeamId>,
        away_team_id: impl Into<TeamId>,
        pitch_id: impl Into<PitchId>,
        scheduled_time: DateTime<Utc>,
        sort_order: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            home_team_id: home_team_id.into(),
            away_team_id: away_team_id.into(),
            home_score: None,
            away_score: None,
            pitch_id: pitch_id.into(),
            scheduled_time,
            sort_order,
            status: MatchStatus::Scheduled,
            is_walkover: false,
        }
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<MatchId>) -> Self {
        self.id = id.into();
        self
    }

    /// Mark as completed with the given score.
    pub fn with_result(mut self, home_score: u32, away_score: u32) -> Self {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.status = MatchStatus::Completed;
        self
    }

    pub fn with_status(mut self, status: MatchStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Whether `team_id` plays in this match on either side.
    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Both scores, if the match has a result.
    pub fn score(&self) -> Option<(u32, u32)> {
        Some((self.home_score?, self.away_score?))
    }
}
