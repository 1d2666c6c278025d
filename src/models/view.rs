//! Read-time views for API responses and events: team names joined into match slots.

use crate::models::game::{Match, MatchId};
use crate::models::lookup;
use crate::models::team::Team;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A match with its slots resolved to teams. `None` means TBD (or unplayed for `winner`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchView {
    pub id: MatchId,
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub winner: Option<Team>,
    pub round: u32,
    pub match_index: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TournamentView {
    pub id: Uuid,
    pub name: String,
    pub team_count: u32,
    pub teams: Vec<Team>,
    pub matches: Vec<MatchView>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub total_matches: usize,
    pub completed_matches: usize,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct QualifierView {
    pub id: Uuid,
    pub name: String,
    pub team_count: u32,
    pub teams: Vec<Team>,
    pub matches: Vec<MatchView>,
    pub unmatched_teams: Vec<Team>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub total_matches: usize,
    pub completed_matches: usize,
}

/// Dashboard row for a tournament or qualifier.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub id: Uuid,
    pub name: String,
    pub team_count: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub total_matches: usize,
    pub completed_matches: usize,
}

impl Summary {
    pub(crate) fn new(
        id: Uuid,
        name: &str,
        team_count: u32,
        is_active: bool,
        created_at: DateTime<Utc>,
        matches: &[Match],
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            team_count,
            is_active,
            created_at,
            total_matches: matches.len(),
            completed_matches: lookup::completed(matches),
        }
    }
}

pub(crate) fn match_view(m: &Match, teams: &[Team]) -> MatchView {
    let lookup = |id: Option<Uuid>| id.and_then(|id| teams.iter().find(|t| t.id == id).cloned());
    MatchView {
        id: m.id,
        team1: lookup(m.team1),
        team2: lookup(m.team2),
        score1: m.result.map(|r| r.score1),
        score2: m.result.map(|r| r.score2),
        winner: lookup(m.winner_id()),
        round: m.round,
        match_index: m.match_index,
    }
}
