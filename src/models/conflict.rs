//! Schedule conflicts reported by the detector.

use crate::models::game::MatchId;
use serde::{Deserialize, Serialize};

/// What kind of resource two matches are fighting over.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    /// Same pitch, overlapping times.
    ResourceClash,
    /// Same team, overlapping times.
    TeamClash,
}

/// One violating pair of matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
    pub match_ids: Vec<MatchId>,
}

/// Result of validating a whole schedule.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub conflicts: Vec<Conflict>,
}

impl ValidationReport {
    pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        Self {
            is_valid: conflicts.is_empty(),
            conflicts,
        }
    }
}
