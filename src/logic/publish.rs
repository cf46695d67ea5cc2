//! Publish gate: the single go/no-go check before a schedule goes public.

use crate::logic::conflicts::{detect_conflicts, DEFAULT_MATCH_DURATION_MINUTES};
use crate::models::Match;
use serde::{Deserialize, Serialize};

/// Outcome of the publish gate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PublishDecision {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Gate with the default match duration.
pub fn can_publish(matches: &[Match]) -> PublishDecision {
    can_publish_with(matches, DEFAULT_MATCH_DURATION_MINUTES)
}

/// Refuse on any conflict, then on an empty schedule; otherwise allow.
pub fn can_publish_with(matches: &[Match], match_duration_minutes: i64) -> PublishDecision {
    let conflicts = detect_conflicts(matches, match_duration_minutes);
    if !conflicts.is_empty() {
        return PublishDecision {
            allowed: false,
            reason: Some(format!(
                "Found {} conflict(s). Resolve them before going live.",
                conflicts.len()
            )),
        };
    }
    if matches.is_empty() {
        return PublishDecision {
            allowed: false,
            reason: Some("No matches scheduled. Add matches before going live.".to_string()),
        };
    }
    PublishDecision {
        allowed: true,
        reason: None,
    }
}
