//! Scoring rules per sport and per-match points.

use crate::models::{CustomRules, ScoringRules, SportType, WalkoverScore};

/// Rules for a sport. `custom` applies the caller's overrides over 3/1/0 with a 1-0 walkover;
/// the overrides are ignored for the built-in sports.
pub fn resolve_rules(sport: SportType, custom: Option<&CustomRules>) -> ScoringRules {
    match sport {
        SportType::Soccer => ScoringRules {
            win_points: 3,
            draw_points: 1,
            loss_points: 0,
            walkover_score: WalkoverScore { home: 3, away: 0 },
        },
        SportType::Rugby => ScoringRules {
            win_points: 4,
            draw_points: 2,
            loss_points: 0,
            walkover_score: WalkoverScore { home: 28, away: 0 },
        },
        SportType::Custom => {
            let custom = custom.copied().unwrap_or_default();
            ScoringRules {
                win_points: custom.win_points.unwrap_or(3),
                draw_points: custom.draw_points.unwrap_or(1),
                loss_points: 0,
                walkover_score: custom
                    .walkover_score
                    .unwrap_or(WalkoverScore { home: 1, away: 0 }),
            }
        }
    }
}

/// Resolve from a free-form sport name (e.g. a stored `"Rugby"`). Unknown names get soccer rules.
pub fn resolve_rules_by_name(sport: &str, custom: Option<&CustomRules>) -> ScoringRules {
    let sport: SportType = sport.parse().unwrap_or_default();
    resolve_rules(sport, custom)
}

/// Points one side earns from a result.
pub fn match_points(team_score: u32, opponent_score: u32, rules: &ScoringRules) -> u32 {
    match team_score.cmp(&opponent_score) {
        std::cmp::Ordering::Greater => rules.win_points,
        std::cmp::Ordering::Equal => rules.draw_points,
        std::cmp::Ordering::Less => rules.loss_points,
    }
}
