//! Bulk schedule edits: push-back, pitch evacuation, dropout walkovers.
//!
//! Each operator returns a new snapshot in the same order as the input. Matches an
//! operator may not touch are cloned through unchanged; completed matches are never touched.

use crate::models::{Match, MatchStatus, WalkoverScore};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Which matches a push-back starts from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushBackAnchor {
    /// Matches with `sort_order >= n`.
    SortOrder(i64),
    /// Matches scheduled at or after this time.
    Time(DateTime<Utc>),
}

/// Delay every non-completed match (from `anchor` onward, if given) by `delay_minutes`.
///
/// No conflict re-check happens here; run the detector on the result.
/// A match whose new time would fall outside chrono's range keeps its old time.
pub fn push_back(matches: &[Match], delay_minutes: i64, anchor: Option<PushBackAnchor>) -> Vec<Match> {
    let delay = Duration::try_minutes(delay_minutes);
    let mut shifted = 0usize;
    let mut out_of_range = 0usize;
    let out = matches
        .iter()
        .map(|m| {
            let eligible = !m.is_completed()
                && match anchor {
                    None => true,
                    Some(PushBackAnchor::SortOrder(from)) => m.sort_order >= from,
                    Some(PushBackAnchor::Time(from)) => m.scheduled_time >= from,
                };
            if !eligible {
                return m.clone();
            }
            match delay.and_then(|d| m.scheduled_time.checked_add_signed(d)) {
                Some(scheduled_time) => {
                    shifted += 1;
                    Match {
                        scheduled_time,
                        ..m.clone()
                    }
                }
                None => {
                    out_of_range += 1;
                    m.clone()
                }
            }
        })
        .collect();
    if out_of_range > 0 {
        log::warn!("push-back of {delay_minutes} min left {out_of_range} match(es) unchanged: time out of range");
    }
    log::debug!("push-back of {delay_minutes} min shifted {shifted} match(es)");
    out
}

/// Move every still-scheduled match from `from_pitch` to `to_pitch`. Times are kept as they are.
pub fn evacuate_pitch(matches: &[Match], from_pitch: &str, to_pitch: &str) -> Vec<Match> {
    let mut moved = 0usize;
    let out = matches
        .iter()
        .map(|m| {
            if m.pitch_id != from_pitch || m.status != MatchStatus::Scheduled {
                return m.clone();
            }
            moved += 1;
            Match {
                pitch_id: to_pitch.to_string(),
                ..m.clone()
            }
        })
        .collect();
    log::debug!("evacuated {moved} match(es) from pitch {from_pitch} to {to_pitch}");
    out
}

/// Settle every open (scheduled or in-progress) match of `dropped_team_id` as a walkover.
///
/// The opponent gets `walkover.home`, the dropped team gets `walkover.away`, whichever side each was on.
pub fn convert_dropout_to_walkovers(
    matches: &[Match],
    dropped_team_id: &str,
    walkover: WalkoverScore,
) -> Vec<Match> {
    let mut converted = 0usize;
    let out = matches
        .iter()
        .map(|m| {
            let open = matches!(m.status, MatchStatus::Scheduled | MatchStatus::InProgress);
            if !open || !m.involves(dropped_team_id) {
                return m.clone();
            }
            converted += 1;
            let score_for = |team: &str| {
                if team == dropped_team_id {
                    walkover.away
                } else {
                    walkover.home
                }
            };
            Match {
                home_score: Some(score_for(m.home_team_id.as_str())),
                away_score: Some(score_for(m.away_team_id.as_str())),
                status: MatchStatus::Completed,
                is_walkover: true,
                ..m.clone()
            }
        })
        .collect();
    log::debug!("team {dropped_team_id} dropped out, {converted} match(es) converted to walkovers");
    out
}
