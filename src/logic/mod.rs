//! Scheduling integrity logic: scoring rules, standings, conflicts, bulk edits, publish gate.
//!
//! Every function here is pure: it reads a snapshot and returns a derived value or a new snapshot.

mod conflicts;
mod mutations;
mod publish;
mod scoring;
mod standings;

pub use conflicts::{
    detect_conflicts, next_available_slot, team_available, validate_schedule,
    DEFAULT_MATCH_DURATION_MINUTES, MAX_MATCH_DURATION_MINUTES,
};
pub use mutations::{convert_dropout_to_walkovers, evacuate_pitch, push_back, PushBackAnchor};
pub use publish::{can_publish, can_publish_with, PublishDecision};
pub use scoring::{match_points, resolve_rules, resolve_rules_by_name};
pub use standings::compute_standings;
