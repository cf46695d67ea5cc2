//! Standing: one derived row of the league table.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Aggregated results for one team. Always recomputed from the match set.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl Standing {
    /// Zeroed row for a team.
    pub fn for_team(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            ..Self::default()
        }
    }

    /// Add one match from this team's point of view.
    pub(crate) fn record(&mut self, scored: u32, conceded: u32, points: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        self.points = self.points.saturating_add(points);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.won += 1,
            std::cmp::Ordering::Equal => self.drawn += 1,
            std::cmp::Ordering::Less => self.lost += 1,
        }
    }
}
