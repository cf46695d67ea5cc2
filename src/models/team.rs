//! Team data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a team (unique within a tournament).
pub type TeamId = String;

/// A team entered in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Set once the team has withdrawn; its open matches become walkovers.
    #[serde(default)]
    pub dropped_out: bool,
}

impl Team {
    /// Create a team with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Create a team with a caller-chosen id.
    pub fn with_id(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dropped_out: false,
        }
    }
}
