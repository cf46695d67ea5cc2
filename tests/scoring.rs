//! Integration tests for scoring rule resolution.

use tournament_integrity::{
    match_points, resolve_rules, resolve_rules_by_name, CustomRules, SportType, WalkoverScore,
};

#[test]
fn soccer_rules() {
    let r = resolve_rules(SportType::Soccer, None);
    assert_eq!((r.win_points, r.draw_points, r.loss_points), (3, 1, 0));
    assert_eq!(r.walkover_score, WalkoverScore { home: 3, away: 0 });
}

#[test]
fn rugby_rules() {
    let r = resolve_rules(SportType::Rugby, None);
    assert_eq!((r.win_points, r.draw_points, r.loss_points), (4, 2, 0));
    assert_eq!(r.walkover_score, WalkoverScore { home: 28, away: 0 });
}

#[test]
fn custom_rules_default_when_no_overrides() {
    let r = resolve_rules(SportType::Custom, None);
    assert_eq!((r.win_points, r.draw_points, r.loss_points), (3, 1, 0));
    assert_eq!(r.walkover_score, WalkoverScore { home: 1, away: 0 });
}

#[test]
fn custom_rules_apply_overrides() {
    let custom = CustomRules {
        win_points: Some(2),
        draw_points: None,
        walkover_score: Some(WalkoverScore { home: 5, away: 0 }),
    };
    let r = resolve_rules(SportType::Custom, Some(&custom));
    assert_eq!(r.win_points, 2);
    assert_eq!(r.draw_points, 1);
    assert_eq!(r.loss_points, 0);
    assert_eq!(r.walkover_score, WalkoverScore { home: 5, away: 0 });
}

#[test]
fn overrides_ignored_for_builtin_sports() {
    let custom = CustomRules {
        win_points: Some(10),
        ..CustomRules::default()
    };
    assert_eq!(
        resolve_rules(SportType::Soccer, Some(&custom)),
        resolve_rules(SportType::Soccer, None)
    );
}

#[test]
fn unknown_sport_name_falls_back_to_soccer() {
    assert_eq!(
        resolve_rules_by_name("curling", None),
        resolve_rules(SportType::Soccer, None)
    );
    assert_eq!(
        resolve_rules_by_name("Rugby", None),
        resolve_rules(SportType::Rugby, None)
    );
}

#[test]
fn points_per_result() {
    let r = resolve_rules(SportType::Rugby, None);
    assert_eq!(match_points(20, 10, &r), 4);
    assert_eq!(match_points(10, 10, &r), 2);
    assert_eq!(match_points(3, 10, &r), 0);
}
