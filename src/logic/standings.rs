//! League table: fold completed matches into per-team rows and rank them.

use crate::logic::scoring::match_points;
use crate::models::{Match, ScoringRules, Standing, Team};
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compute the ranked table for `teams` from `matches`.
///
/// 1. One zeroed row per team.
/// 2. Only completed matches with both scores count (walkovers included).
/// 3. Matches naming a team outside `teams` are skipped.
/// 4. Rank by points, goal difference, goals for (all descending), then team name.
///
/// Input order of `teams` and `matches` does not affect the result. A repeated team id
/// keeps the entry whose name sorts first.
pub fn compute_standings(teams: &[Team], matches: &[Match], rules: &ScoringRules) -> Vec<Standing> {
    let mut rows: HashMap<&str, Standing> = HashMap::with_capacity(teams.len());
    for t in teams {
        let row = rows
            .entry(t.id.as_str())
            .or_insert_with(|| Standing::for_team(t));
        if compare_names(&t.name, &row.team_name) == Ordering::Less {
            row.team_name = t.name.clone();
        }
    }

    for m in matches.iter().filter(|m| m.is_completed()) {
        let Some((home, away)) = m.score() else {
            continue;
        };
        if !rows.contains_key(m.home_team_id.as_str()) || !rows.contains_key(m.away_team_id.as_str()) {
            log::debug!("match {} references an unknown team, skipped in standings", m.id);
            continue;
        }
        if let Some(row) = rows.get_mut(m.home_team_id.as_str()) {
            row.record(home, away, match_points(home, away, rules));
        }
        if let Some(row) = rows.get_mut(m.away_team_id.as_str()) {
            row.record(away, home, match_points(away, home, rules));
        }
    }

    let mut table: Vec<Standing> = rows.into_values().collect();
    table.sort_by(rank_order);
    table
}

/// Total order used for the table.
fn rank_order(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| compare_names(&a.team_name, &b.team_name))
        // Identical names fall back to the id.
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Human-friendly name order: base letters first (accents and case ignored), then
/// case-insensitive with accents, then exact bytes.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| a.cmp(b))
}

/// Lowercased letters with diacritics removed (`Ä` -> `a`).
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}
