//! Tournament scheduling integrity engine: library with models and business logic.
//!
//! Standings, conflict detection, bulk schedule edits and the publish gate are pure
//! functions over a snapshot of teams and matches. `Tournament` holds such a snapshot
//! for the web binary.

pub mod logic;
pub mod models;

pub use logic::{
    can_publish, can_publish_with, compute_standings, convert_dropout_to_walkovers,
    detect_conflicts, evacuate_pitch, match_points, next_available_slot, push_back,
    resolve_rules, resolve_rules_by_name, team_available, validate_schedule, PublishDecision,
    PushBackAnchor, DEFAULT_MATCH_DURATION_MINUTES, MAX_MATCH_DURATION_MINUTES,
};
pub use models::{
    Conflict, ConflictKind, CustomRules, Match, MatchId, MatchStatus, PitchId, ScoringRules,
    SportType, Standing, Team, TeamId, Tournament, TournamentError, TournamentId,
    TournamentState, ValidationReport, WalkoverScore, MAX_PUSH_BACK_MINUTES,
};
