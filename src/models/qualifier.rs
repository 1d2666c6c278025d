//! Qualifier: one round of 1:1 matches, no advancement.

use crate::models::error::BracketError;
use crate::models::game::{Match, MatchId};
use crate::models::lookup;
use crate::models::team::Team;
use crate::models::view::{match_view, QualifierView, Summary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a qualifier.
pub type QualifierId = Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Qualifier {
    pub id: QualifierId,
    pub name: String,
    pub team_count: u32,
    pub teams: Vec<Team>,
    /// All in round 1. An odd trailing team has no match.
    pub matches: Vec<Match>,
    /// False once every match is scored.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Qualifier {
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

    pub fn match_by_id_mut(&mut self, id: MatchId) -> Result<&mut Match, BracketError> {
        lookup::match_mut(&mut self.matches, id)
    }

    /// Teams that were not paired (at most one, when the count is odd).
    pub fn unmatched_teams(&self) -> Vec<&Team> {
        self.teams
            .iter()
            .filter(|t| !self.matches.iter().any(|m| m.has_team(t.id)))
            .collect()
    }

    pub fn completed_matches(&self) -> usize {
        lookup::completed(&self.matches)
    }

    /// Recompute `is_active`. Returns true if this call completed the qualifier.
    pub fn refresh_completion(&mut self) -> bool {
        lookup::refresh_active(&mut self.is_active, &self.matches)
    }

    pub fn view(&self) -> QualifierView {
        QualifierView {
            id: self.id,
            name: self.name.clone(),
            team_count: self.team_count,
            teams: self.teams.clone(),
            matches: self.matches.iter().map(|m| match_view(m, &self.teams)).collect(),
            unmatched_teams: self.unmatched_teams().into_iter().cloned().collect(),
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
