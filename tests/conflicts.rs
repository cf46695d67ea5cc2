//! Integration tests for conflict detection and schedule validation.

use chrono::{DateTime, TimeZone, Utc};
use tournament_integrity::{
    detect_conflicts, next_available_slot, team_available, validate_schedule, ConflictKind,
    Match, MatchStatus,
};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 2, hour, minute, 0).unwrap()
}

fn fixture(id: &str, home: &str, away: &str, pitch: &str, start: DateTime<Utc>) -> Match {
    Match::new(home, away, pitch, start, 0).with_id(id)
}

#[test]
fn overlapping_matches_on_one_pitch_clash_once() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P1", at(10, 30)),
    ];
    let conflicts = detect_conflicts(&matches, 60);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::ResourceClash);
    assert_eq!(conflicts[0].match_ids, ["m1", "m2"]);
    assert!(conflicts[0].message.contains("P1"));
    assert!(conflicts[0].message.contains("10:00"));
}

#[test]
fn back_to_back_matches_do_not_clash() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P1", at(11, 0)),
    ];
    assert!(detect_conflicts(&matches, 60).is_empty());
}

#[test]
fn different_pitches_do_not_clash() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P2", at(10, 0)),
    ];
    assert!(detect_conflicts(&matches, 60).is_empty());
}

#[test]
fn team_in_two_overlapping_matches_clashes() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "A", "P2", at(10, 45)),
    ];
    let conflicts = detect_conflicts(&matches, 60);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::TeamClash);
    assert!(conflicts[0].message.contains("Team A"));
    assert_eq!(conflicts[0].match_ids, ["m1", "m2"]);
}

#[test]
fn rematch_on_same_pitch_reports_one_of_each_kind() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "B", "A", "P1", at(10, 0)),
    ];
    let conflicts = detect_conflicts(&matches, 60);
    assert_eq!(conflicts.len(), 2);
    assert_eq!(
        conflicts.iter().filter(|c| c.kind == ConflictKind::ResourceClash).count(),
        1
    );
    assert_eq!(
        conflicts.iter().filter(|c| c.kind == ConflictKind::TeamClash).count(),
        1
    );
}

#[test]
fn cancelled_matches_are_ignored() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P1", at(10, 0)).with_status(MatchStatus::Cancelled),
    ];
    assert!(detect_conflicts(&matches, 60).is_empty());
}

#[test]
fn zero_duration_only_flags_identical_times() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P1", at(10, 0)),
        fixture("m3", "E", "F", "P1", at(10, 1)),
    ];
    let conflicts = detect_conflicts(&matches, 0);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].match_ids, ["m1", "m2"]);
}

#[test]
fn moving_a_match_clears_the_clash() {
    let mut matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P1", at(10, 30)),
    ];
    assert_eq!(detect_conflicts(&matches, 60).len(), 1);
    matches[1].scheduled_time = at(11, 0);
    assert!(detect_conflicts(&matches, 60).is_empty());
}

#[test]
fn validation_report_reflects_conflicts() {
    let clean = vec![fixture("m1", "A", "B", "P1", at(10, 0))];
    let report = validate_schedule(&clean, 60);
    assert!(report.is_valid);
    assert!(report.conflicts.is_empty());

    let clashing = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "A", "C", "P1", at(10, 15)),
    ];
    let report = validate_schedule(&clashing, 60);
    assert!(!report.is_valid);
    assert_eq!(report.conflicts.len(), 2);
}

#[test]
fn team_availability_respects_duration() {
    let matches = vec![fixture("m1", "A", "B", "P1", at(10, 0))];
    assert!(!team_available("A", at(10, 30), &matches, 60));
    assert!(team_available("A", at(11, 0), &matches, 60));
    assert!(team_available("C", at(10, 0), &matches, 60));
}

#[test]
fn next_slot_follows_latest_booking() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P1", at(12, 0)),
        fixture("m3", "E", "F", "P1", at(14, 0)).with_status(MatchStatus::Cancelled),
    ];
    assert_eq!(next_available_slot(&matches, "P1", 60), Some(at(13, 0)));
    assert_eq!(next_available_slot(&matches, "P2", 60), None);
}

#[test]
fn huge_duration_treats_matches_as_unbounded() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P1", at(18, 0)),
        fixture("m3", "E", "F", "P2", at(9, 0)),
    ];
    let conflicts = detect_conflicts(&matches, i64::MAX);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].match_ids, ["m1", "m2"]);
    assert!(!team_available("A", at(23, 0), &matches, i64::MAX));
}

#[test]
fn negative_duration_counts_as_zero() {
    let matches = vec![
        fixture("m1", "A", "B", "P1", at(10, 0)),
        fixture("m2", "C", "D", "P1", at(10, 30)),
    ];
    assert!(detect_conflicts(&matches, -60).is_empty());
    assert!(detect_conflicts(&matches, i64::MIN).is_empty());
}

#[test]
fn next_slot_saturates_on_huge_duration() {
    let matches = vec![fixture("m1", "A", "B", "P1", at(10, 0))];
    assert_eq!(
        next_available_slot(&matches, "P1", i64::MAX),
        Some(DateTime::<Utc>::MAX_UTC)
    );
}
