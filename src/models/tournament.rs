//! Tournament: teams and the full single-elimination bracket.

use crate::models::error::{BracketError, EntityKind};
use crate::models::game::{Match, MatchId};
use crate::models::lookup;
use crate::models::team::Team;
use crate::models::view::{match_view, Summary, TournamentView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state: teams, every match of every round, and completion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Always a power of two.
    pub team_count: u32,
    /// Ordered by `position`.
    pub teams: Vec<Team>,
    /// Ordered by round, then match index.
    pub matches: Vec<Match>,
    /// False once every match has a winner.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Assemble a tournament from already generated teams and matches.
    pub fn new(name: impl Into<String>, teams: Vec<Team>, matches: Vec<Match>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_count: teams.len() as u32,
            teams,
            matches,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Number of rounds, the final being the last one.
    pub fn total_rounds(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    /// Look up the match at a bracket position.
    pub fn find_match(&self, round: u32, match_index: u32) -> Option<&Match> {
        self.matches
            .iter()
            .find(|m| m.round == round && m.match_index == match_index)
    }

    pub fn find_match_mut(&mut self, round: u32, match_index: u32) -> Option<&mut Match> {
        self.matches
            .iter_mut()
            .find(|m| m.round == round && m.match_index == match_index)
    }

    pub fn match_by_id(&self, id: MatchId) -> Result<&Match, BracketError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(BracketError::NotFound(EntityKind::Match, id))
    }

    pub fn match_by_id_mut(&mut self, id: MatchId) -> Result<&mut Match, BracketError> {
        lookup::match_mut(&mut self.matches, id)
    }

    pub fn completed_matches(&self) -> usize {
        lookup::completed(&self.matches)
    }

    /// Recompute `is_active` from the matches. Returns true if this call completed the tournament.
    pub fn refresh_completion(&mut self) -> bool {
        lookup::refresh_active(&mut self.is_active, &self.matches)
    }

    /// Read-time view with team names joined into the match slots.
    pub fn view(&self) -> TournamentView {
        TournamentView {
            id: self.id,
            name: self.name.clone(),
            team_count: self.team_count,
            teams: self.teams.clone(),
            matches: self.matches.iter().map(|m| match_view(m, &self.teams)).collect(),
            is_active: self.is_active,
            created_at: self.created_at,
            total_matches: self.matches.len(),
            completed_matches: self.completed_matches(),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::new(self.id, &self.name, self.team_count, self.is_active, self.created_at, &self.matches)
    }
}
