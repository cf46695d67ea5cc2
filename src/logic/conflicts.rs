//! Schedule conflict detection: double-booked pitches and double-booked teams.
//!
//! Every match occupies `[start, start + duration)`. Two intervals overlap when
//! `a.start < b.end && a.end > b.start`. With a zero duration the intervals are
//! instants and only identical start times clash. An end past chrono's range counts
//! as unbounded.

use crate::models::{Conflict, ConflictKind, Match, MatchStatus, ValidationReport};
use chrono::{DateTime, Duration, Utc};

/// Match length assumed when none is configured.
pub const DEFAULT_MATCH_DURATION_MINUTES: i64 = 60;

/// Longest match length a tournament may configure (one day).
pub const MAX_MATCH_DURATION_MINUTES: i64 = 24 * 60;

/// Find every pitch and team clash among non-cancelled matches.
///
/// Each unordered pair is reported at most once per conflict kind, in input order.
pub fn detect_conflicts(matches: &[Match], match_duration_minutes: i64) -> Vec<Conflict> {
    let length = match_length(match_duration_minutes);
    let active: Vec<&Match> = matches
        .iter()
        .filter(|m| m.status != MatchStatus::Cancelled)
        .collect();

    let mut pitch_clashes = Vec::new();
    let mut team_clashes = Vec::new();
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if !overlaps(a.scheduled_time, b.scheduled_time, length) {
                continue;
            }
            if a.pitch_id == b.pitch_id {
                pitch_clashes.push(Conflict {
                    kind: ConflictKind::ResourceClash,
                    message: format!(
                        "Pitch {} is double-booked at {}",
                        a.pitch_id,
                        clock(a.scheduled_time)
                    ),
                    match_ids: vec![a.id.clone(), b.id.clone()],
                });
            }
            if let Some(team) = shared_team(a, b) {
                team_clashes.push(Conflict {
                    kind: ConflictKind::TeamClash,
                    message: format!(
                        "Team {} is scheduled for multiple matches at {}",
                        team,
                        clock(a.scheduled_time)
                    ),
                    match_ids: vec![a.id.clone(), b.id.clone()],
                });
            }
        }
    }

    pitch_clashes.extend(team_clashes);
    pitch_clashes
}

/// Conflicts wrapped with an overall verdict.
pub fn validate_schedule(matches: &[Match], match_duration_minutes: i64) -> ValidationReport {
    ValidationReport::from_conflicts(detect_conflicts(matches, match_duration_minutes))
}

/// Whether `team_id` could start a match at `start` without overlapping one of its
/// non-cancelled matches.
pub fn team_available(
    team_id: &str,
    start: DateTime<Utc>,
    matches: &[Match],
    match_duration_minutes: i64,
) -> bool {
    let length = match_length(match_duration_minutes);
    !matches.iter().any(|m| {
        m.status != MatchStatus::Cancelled
            && m.involves(team_id)
            && overlaps(m.scheduled_time, start, length)
    })
}

/// First free time on `pitch_id` after its latest booking, or `None` if nothing is booked there.
/// Saturates at the latest representable time.
pub fn next_available_slot(
    matches: &[Match],
    pitch_id: &str,
    match_duration_minutes: i64,
) -> Option<DateTime<Utc>> {
    matches
        .iter()
        .filter(|m| m.status != MatchStatus::Cancelled && m.pitch_id == pitch_id)
        .map(|m| m.scheduled_time)
        .max()
        .map(|last| {
            match_length(match_duration_minutes)
                .and_then(|d| last.checked_add_signed(d))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
}

/// Match length as a `Duration`; `None` when too long to represent.
fn match_length(minutes: i64) -> Option<Duration> {
    Duration::try_minutes(minutes.max(0))
}

fn overlaps(a: DateTime<Utc>, b: DateTime<Utc>, length: Option<Duration>) -> bool {
    if length == Some(Duration::zero()) {
        return a == b;
    }
    ends_after(b, length, a) && ends_after(a, length, b)
}

/// Whether the match starting at `start` is still running at `t`.
fn ends_after(start: DateTime<Utc>, length: Option<Duration>, t: DateTime<Utc>) -> bool {
    match length.and_then(|d| start.checked_add_signed(d)) {
        Some(end) => end > t,
        None => true,
    }
}

/// First team of `a` that also plays in `b`.
fn shared_team<'a>(a: &'a Match, b: &Match) -> Option<&'a str> {
    [a.home_team_id.as_str(), a.away_team_id.as_str()]
        .into_iter()
        .find(|t| b.involves(t))
}

fn clock(t: DateTime<Utc>) -> String {
    t.format("%H:%M").to_string()
}
