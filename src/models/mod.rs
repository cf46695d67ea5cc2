//! Data structures: teams, matches, scoring rules, standings, conflicts, tournament snapshot.

mod conflict;
mod game;
mod rules;
mod standing;
mod team;
mod tournament;

pub use conflict::{Conflict, ConflictKind, ValidationReport};
pub use game::{Match, MatchId, MatchStatus, PitchId};
pub use rules::{CustomRules, ScoringRules, SportType, WalkoverScore};
pub use standing::Standing;
pub use team::{Team, TeamId};
pub use tournament::{
    Tournament, TournamentError, TournamentId, TournamentState, MAX_PUSH_BACK_MINUTES,
};
