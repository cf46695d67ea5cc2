//! Integration tests for push-back, pitch evacuation and dropout walkovers.

use chrono::{DateTime, TimeZone, Utc};
use tournament_integrity::{
    convert_dropout_to_walkovers, evacuate_pitch, push_back, Match, MatchStatus, PushBackAnchor,
    WalkoverScore,
};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 2, hour, minute, 0).unwrap()
}

fn schedule() -> Vec<Match> {
    vec![
        Match::new("A", "B", "P1", at(9, 0), 0).with_id("m0").with_result(2, 1),
        Match::new("C", "D", "P1", at(10, 0), 1)
            .with_id("m1")
            .with_status(MatchStatus::InProgress),
        Match::new("A", "C", "P1", at(11, 0), 2).with_id("m2"),
        Match::new("B", "D", "P2", at(11, 0), 3).with_id("m3"),
        Match::new("A", "D", "P1", at(12, 0), 4)
            .with_id("m4")
            .with_status(MatchStatus::Cancelled),
    ]
}

#[test]
fn zero_push_back_returns_equal_snapshot() {
    let matches = schedule();
    assert_eq!(push_back(&matches, 0, None), matches);
}

#[test]
fn push_back_without_anchor_shifts_everything_but_completed() {
    let matches = schedule();
    let out = push_back(&matches, 15, None);
    assert_eq!(out[0], matches[0]);
    for (old, new) in matches.iter().zip(&out).skip(1) {
        assert_eq!(new.scheduled_time, old.scheduled_time + chrono::Duration::minutes(15));
        assert_eq!(new.id, old.id);
    }
}

#[test]
fn push_back_from_sort_order() {
    let matches = schedule();
    let out = push_back(&matches, 30, Some(PushBackAnchor::SortOrder(2)));
    assert_eq!(out[1], matches[1]);
    assert_eq!(out[2].scheduled_time, at(11, 30));
    assert_eq!(out[3].scheduled_time, at(11, 30));
}

#[test]
fn push_back_from_time() {
    let matches = schedule();
    let out = push_back(&matches, 10, Some(PushBackAnchor::Time(at(11, 0))));
    assert_eq!(out[1], matches[1]);
    assert_eq!(out[2].scheduled_time, at(11, 10));
    assert_eq!(out[4].scheduled_time, at(12, 10));
}

#[test]
fn push_back_never_moves_completed_even_past_anchor() {
    let matches = vec![Match::new("A", "B", "P1", at(12, 0), 9).with_result(1, 0)];
    let out = push_back(&matches, 60, Some(PushBackAnchor::SortOrder(0)));
    assert_eq!(out, matches);
}

#[test]
fn evacuation_moves_only_scheduled_matches() {
    let matches = schedule();
    let out = evacuate_pitch(&matches, "P1", "P9");
    let pitches: Vec<_> = out.iter().map(|m| m.pitch_id.as_str()).collect();
    assert_eq!(pitches, ["P1", "P1", "P9", "P2", "P1"]);
    assert_eq!(out[2].scheduled_time, matches[2].scheduled_time);
}

#[test]
fn dropout_converts_open_matches_either_side() {
    let matches = vec![
        Match::new("C", "A", "P1", at(10, 0), 0).with_id("home"),
        Match::new("B", "C", "P2", at(11, 0), 1)
            .with_id("away")
            .with_status(MatchStatus::InProgress),
        Match::new("A", "B", "P1", at(12, 0), 2).with_id("other"),
    ];
    let out = convert_dropout_to_walkovers(&matches, "C", WalkoverScore { home: 3, away: 0 });

    assert_eq!(out[0].status, MatchStatus::Completed);
    assert!(out[0].is_walkover);
    assert_eq!((out[0].home_score, out[0].away_score), (Some(0), Some(3)));

    assert_eq!(out[1].status, MatchStatus::Completed);
    assert!(out[1].is_walkover);
    assert_eq!((out[1].home_score, out[1].away_score), (Some(3), Some(0)));

    assert_eq!(out[2], matches[2]);
}

#[test]
fn dropout_leaves_completed_and_cancelled_alone() {
    let matches = vec![
        Match::new("C", "A", "P1", at(10, 0), 0).with_result(5, 0),
        Match::new("C", "B", "P1", at(11, 0), 1).with_status(MatchStatus::Cancelled),
    ];
    let out = convert_dropout_to_walkovers(&matches, "C", WalkoverScore { home: 3, away: 0 });
    assert_eq!(out, matches);
}

#[test]
fn operators_do_not_touch_their_input() {
    let matches = schedule();
    let before = matches.clone();
    let _ = push_back(&matches, 45, None);
    let _ = evacuate_pitch(&matches, "P1", "P2");
    let _ = convert_dropout_to_walkovers(&matches, "A", WalkoverScore { home: 3, away: 0 });
    assert_eq!(matches, before);
}

#[test]
fn negative_delay_pulls_matches_forward() {
    let matches = schedule();
    let out = push_back(&matches, -30, Some(PushBackAnchor::SortOrder(2)));
    assert_eq!(out[2].scheduled_time, at(10, 30));
    assert_eq!(out[3].scheduled_time, at(10, 30));
    assert_eq!(out[1], matches[1]);
}

#[test]
fn out_of_range_delay_leaves_times_unchanged() {
    let matches = schedule();
    assert_eq!(push_back(&matches, 1_000_000_000_000, None), matches);
    assert_eq!(push_back(&matches, i64::MAX, None), matches);
    assert_eq!(push_back(&matches, i64::MIN, None), matches);
}
