//! Tournament snapshot and TournamentState.
//!
//! `Tournament` is the in-memory holder the surrounding application keeps per event.
//! Every derived view (standings, conflicts, publish decision) is recomputed from its
//! teams and matches through the pure functions in `logic`.

use crate::logic::{
    compute_standings, convert_dropout_to_walkovers, can_publish_with, evacuate_pitch, push_back,
    resolve_rules, validate_schedule, PublishDecision, PushBackAnchor,
    DEFAULT_MATCH_DURATION_MINUTES, MAX_MATCH_DURATION_MINUTES,
};
use crate::models::conflict::ValidationReport;
use crate::models::game::{Match, MatchId, MatchStatus, PitchId};
use crate::models::rules::{CustomRules, ScoringRules, SportType};
use crate::models::standing::Standing;
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use uuid::Uuid;

/// Errors that can occur while editing a tournament snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A team with this id is already entered.
    DuplicateTeamId(TeamId),
    /// Team names must not be blank.
    EmptyTeamName,
    TeamNotFound(TeamId),
    MatchNotFound(MatchId),
    /// A match needs two different teams.
    SameTeamBothSides(TeamId),
    /// Cancelled matches cannot be started or scored.
    MatchCancelled(MatchId),
    /// Completed matches are final.
    MatchCompleted(MatchId),
    /// Push-back delay beyond `MAX_PUSH_BACK_MINUTES` in either direction.
    DelayOutOfRange(i64),
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// The publish gate refused; carries its reason.
    NotPublishable(String),
    /// A schedule import row could not be used (1-based line number, header is line 1).
    CsvImport { line: usize, message: String },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::DuplicateTeamId(id) => write!(f, "A team with id {} already exists", id),
            TournamentError::EmptyTeamName => write!(f, "Team name must not be empty"),
            TournamentError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::SameTeamBothSides(id) => {
                write!(f, "Team {} cannot play against itself", id)
            }
            TournamentError::MatchCancelled(id) => write!(f, "Match {} is cancelled", id),
            TournamentError::MatchCompleted(id) => {
                write!(f, "Match {} is completed and cannot be changed", id)
            }
            TournamentError::DelayOutOfRange(minutes) => write!(
                f,
                "Delay of {} min is out of range (at most {} either way)",
                minutes, MAX_PUSH_BACK_MINUTES
            ),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::NotPublishable(reason) => write!(f, "Cannot publish: {}", reason),
            TournamentError::CsvImport { line, message } => {
                write!(f, "Schedule import failed at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Largest push-back (or pull-forward) a tournament accepts in one call: one week.
pub const MAX_PUSH_BACK_MINUTES: i64 = 7 * 24 * 60;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Public visibility of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Being set up; not visible to the public.
    #[default]
    Draft,
    /// Published after passing the publish gate.
    Live,
    /// Every match has been completed or cancelled.
    Completed,
}

/// One row of a CSV schedule import.
#[derive(Debug, Deserialize)]
struct ScheduleRow {
    home_team_id: TeamId,
    away_team_id: TeamId,
    pitch_id: PitchId,
    scheduled_time: DateTime<Utc>,
    #[serde(default)]
    sort_order: Option<i64>,
}

/// Full tournament snapshot: rules, teams, matches and visibility.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub sport: SportType,
    pub rules: ScoringRules,
    /// Length of a match used for conflict detection.
    pub match_duration_minutes: i64,
    pub state: TournamentState,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
}

impl Tournament {
    /// Create an empty draft tournament. `custom` only applies to `SportType::Custom`.
    pub fn new(name: impl Into<String>, sport: SportType, custom: Option<&CustomRules>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sport,
            rules: resolve_rules(sport, custom),
            match_duration_minutes: DEFAULT_MATCH_DURATION_MINUTES,
            state: TournamentState::Draft,
            teams: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Override the match length used for conflict detection, clamped to
    /// `0..=MAX_MATCH_DURATION_MINUTES`.
    pub fn with_match_duration(mut self, minutes: i64) -> Self {
        self.match_duration_minutes = minutes.clamp(0, MAX_MATCH_DURATION_MINUTES);
        self
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    fn get_match_mut(&mut self, id: &str) -> Result<&mut Match, TournamentError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| TournamentError::MatchNotFound(id.to_string()))
    }

    /// Enter a team under a generated id.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, TournamentError> {
        let id = Uuid::new_v4().to_string();
        self.add_team_with_id(id, name)
    }

    /// Enter a team under a caller-chosen id. Ids must be unique.
    pub fn add_team_with_id(
        &mut self,
        id: impl Into<TeamId>,
        name: impl Into<String>,
    ) -> Result<TeamId, TournamentError> {
        let id = id.into();
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        if self.team(&id).is_some() {
            return Err(TournamentError::DuplicateTeamId(id));
        }
        self.teams.push(Team::with_id(id.clone(), name));
        Ok(id)
    }

    /// Both teams must be entered and distinct.
    fn check_pairing(&self, home: &str, away: &str) -> Result<(), TournamentError> {
        for id in [home, away] {
            if self.team(id).is_none() {
                return Err(TournamentError::TeamNotFound(id.to_string()));
            }
        }
        if home == away {
            return Err(TournamentError::SameTeamBothSides(home.to_string()));
        }
        Ok(())
    }

    /// Sort order for a match appended at the end of the running order.
    fn next_sort_order(&self) -> i64 {
        self.matches
            .iter()
            .map(|m| m.sort_order)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    /// Schedule a match. Without a `sort_order` it goes to the end of the running order.
    pub fn add_match(
        &mut self,
        home_team_id: &str,
        away_team_id: &str,
        pitch_id: impl Into<PitchId>,
        scheduled_time: DateTime<Utc>,
        sort_order: Option<i64>,
    ) -> Result<MatchId, TournamentError> {
        self.check_pairing(home_team_id, away_team_id)?;
        let sort_order = sort_order.unwrap_or_else(|| self.next_sort_order());
        let m = Match::new(home_team_id, away_team_id, pitch_id, scheduled_time, sort_order);
        let id = m.id.clone();
        self.matches.push(m);
        Ok(id)
    }

    /// Import matches from CSV with header
    /// `home_team_id,away_team_id,pitch_id,scheduled_time,sort_order` (RFC 3339 times,
    /// `sort_order` may be empty). Either every row is added or none is.
    pub fn import_matches_csv<R: Read>(&mut self, reader: R) -> Result<usize, TournamentError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut next_sort_order = self.next_sort_order();
        let mut staged = Vec::new();
        for (idx, row) in rdr.deserialize::<ScheduleRow>().enumerate() {
            let line = idx + 2;
            let row = row.map_err(|e| TournamentError::CsvImport {
                line,
                message: e.to_string(),
            })?;
            self.check_pairing(&row.home_team_id, &row.away_team_id)
                .map_err(|e| TournamentError::CsvImport {
                    line,
                    message: e.to_string(),
                })?;
            let sort_order = row.sort_order.unwrap_or(next_sort_order);
            next_sort_order = next_sort_order.max(sort_order.saturating_add(1));
            staged.push(Match::new(
                row.home_team_id,
                row.away_team_id,
                row.pitch_id,
                row.scheduled_time,
                sort_order,
            ));
        }
        let count = staged.len();
        self.matches.extend(staged);
        log::info!("Imported {} match(es) into tournament {}", count, self.id);
        Ok(count)
    }

    /// Record a final score. The match becomes completed.
    pub fn record_result(
        &mut self,
        match_id: &str,
        home_score: u32,
        away_score: u32,
    ) -> Result<(), TournamentError> {
        let m = self.get_match_mut(match_id)?;
        match m.status {
            MatchStatus::Cancelled => return Err(TournamentError::MatchCancelled(m.id.clone())),
            MatchStatus::Completed => return Err(TournamentError::MatchCompleted(m.id.clone())),
            MatchStatus::Scheduled | MatchStatus::InProgress => {}
        }
        m.home_score = Some(home_score);
        m.away_score = Some(away_score);
        m.status = MatchStatus::Completed;
        Ok(())
    }

    /// Kick off a scheduled match.
    pub fn start_match(&mut self, match_id: &str) -> Result<(), TournamentError> {
        let m = self.get_match_mut(match_id)?;
        match m.status {
            MatchStatus::Scheduled => {
                m.status = MatchStatus::InProgress;
                Ok(())
            }
            MatchStatus::InProgress => Err(TournamentError::InvalidState),
            MatchStatus::Completed => Err(TournamentError::MatchCompleted(m.id.clone())),
            MatchStatus::Cancelled => Err(TournamentError::MatchCancelled(m.id.clone())),
        }
    }

    /// Cancel a match that has not been completed. Cancelled matches no longer book a pitch.
    pub fn cancel_match(&mut self, match_id: &str) -> Result<(), TournamentError> {
        let m = self.get_match_mut(match_id)?;
        if m.is_completed() {
            return Err(TournamentError::MatchCompleted(m.id.clone()));
        }
        m.status = MatchStatus::Cancelled;
        Ok(())
    }

    pub fn standings(&self) -> Vec<Standing> {
        compute_standings(&self.teams, &self.matches, &self.rules)
    }

    pub fn validate(&self) -> ValidationReport {
        validate_schedule(&self.matches, self.match_duration_minutes)
    }

    pub fn publish_decision(&self) -> PublishDecision {
        can_publish_with(&self.matches, self.match_duration_minutes)
    }

    /// Delay open matches by at most `MAX_PUSH_BACK_MINUTES` either way.
    /// Returns how many start times changed.
    pub fn push_back(
        &mut self,
        delay_minutes: i64,
        anchor: Option<PushBackAnchor>,
    ) -> Result<usize, TournamentError> {
        if !(-MAX_PUSH_BACK_MINUTES..=MAX_PUSH_BACK_MINUTES).contains(&delay_minutes) {
            return Err(TournamentError::DelayOutOfRange(delay_minutes));
        }
        let updated = push_back(&self.matches, delay_minutes, anchor);
        Ok(self.replace_matches(updated))
    }

    /// Move scheduled matches off a pitch. Returns how many moved.
    pub fn evacuate_pitch(&mut self, from_pitch: &str, to_pitch: &str) -> usize {
        let updated = evacuate_pitch(&self.matches, from_pitch, to_pitch);
        self.replace_matches(updated)
    }

    /// Withdraw a team: flag it and settle its open matches as walkovers.
    /// Returns how many matches were converted.
    pub fn drop_out_team(&mut self, team_id: &str) -> Result<usize, TournamentError> {
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(team_id.to_string()))?;
        team.dropped_out = true;
        let updated =
            convert_dropout_to_walkovers(&self.matches, team_id, self.rules.walkover_score);
        Ok(self.replace_matches(updated))
    }

    /// Swap in a new snapshot, returning the number of matches that differ.
    fn replace_matches(&mut self, updated: Vec<Match>) -> usize {
        let changed = self
            .matches
            .iter()
            .zip(&updated)
            .filter(|(old, new)| old != new)
            .count();
        self.matches = updated;
        changed
    }

    /// Go live. Only a draft can be published, and only when the publish gate allows it.
    pub fn publish(&mut self) -> Result<(), TournamentError> {
        if self.state != TournamentState::Draft {
            return Err(TournamentError::InvalidState);
        }
        let decision = self.publish_decision();
        if !decision.allowed {
            return Err(TournamentError::NotPublishable(
                decision.reason.unwrap_or_default(),
            ));
        }
        self.state = TournamentState::Live;
        log::info!("Tournament {} ({}) is live", self.id, self.name);
        Ok(())
    }

    /// Close a live tournament once no match is left open.
    pub fn finish(&mut self) -> Result<(), TournamentError> {
        if self.state != TournamentState::Live {
            return Err(TournamentError::InvalidState);
        }
        let open = self
            .matches
            .iter()
            .any(|m| matches!(m.status, MatchStatus::Scheduled | MatchStatus::InProgress));
        if open {
            return Err(TournamentError::InvalidState);
        }
        self.state = TournamentState::Completed;
        Ok(())
    }
}
