//! Match, MatchResult and Slot.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One of the two team positions in a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Team1,
    Team2,
}

/// Scores and winner of a played match. Present as a whole or not at all.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score1: u32,
    pub score2: u32,
    pub winner_id: TeamId,
}

/// A single match. Team slots are `None` while still TBD.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub team1: Option<TeamId>,
    pub team2: Option<TeamId>,
    /// None if not yet played.
    pub result: Option<MatchResult>,
    /// 1-based; round 1 is the first round played.
    pub round: u32,
    /// 0-based position within the round.
    pub match_index: u32,
}

impl Match {
    /// Create an empty match (both slots TBD) at the given bracket position.
    pub fn new(round: u32, match_index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            team1: None,
            team2: None,
            result: None,
            round,
            match_index,
        }
    }

    /// Write a team into one slot, leaving the other untouched.
    pub fn set_slot(&mut self, slot: Slot, team: Option<TeamId>) {
        match slot {
            Slot::Team1 => self.team1 = team,
            Slot::Team2 => self.team2 = team,
        }
    }

    pub fn winner_id(&self) -> Option<TeamId> {
        self.result.map(|r| r.winner_id)
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    /// True if the team sits in either slot.
    pub fn has_team(&self, team: TeamId) -> bool {
        self.team1 == Some(team) || self.team2 == Some(team)
    }
}
