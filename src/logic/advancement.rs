//! Advancement: where the winner of a match goes next.

use crate::logic::bracket::matches_in_round;
use crate::models::{BracketError, MatchId, Slot, TeamId, Tournament};
use serde::{Deserialize, Serialize};

/// The next-round slot a winner moves into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Advancement {
    pub next_round: u32,
    pub next_match_index: u32,
    pub slot: Slot,
    pub team_id: TeamId,
}

/// Compute the next-round slot for the winner of match `(round, match_index)`.
///
/// Returns `Ok(None)` for the final. Even match indexes feed `team1` of match
/// `match_index / 2`, odd ones feed `team2`. Positions outside a bracket of
/// `total_rounds` rounds are rejected.
pub fn resolve_advancement(
    round: u32,
    match_index: u32,
    winner_id: TeamId,
    total_rounds: u32,
) -> Result<Option<Advancement>, BracketError> {
    if match_index >= matches_in_round(round, total_rounds) {
        return Err(BracketError::InvalidBracketPosition { round, match_index });
    }
    if round == total_rounds {
        return Ok(None);
    }
    let slot = if match_index % 2 == 0 { Slot::Team1 } else { Slot::Team2 };
    Ok(Some(Advancement {
        next_round: round + 1,
        next_match_index: match_index / 2,
        slot,
        team_id: winner_id,
    }))
}

/// Write the advancing team into its slot. Only that slot is touched, so applying the
/// same advancement twice leaves the match unchanged. Returns the updated match id.
pub fn apply_advancement(tournament: &mut Tournament, advancement: &Advancement) -> Result<MatchId, BracketError> {
    let next = tournament
        .find_match_mut(advancement.next_round, advancement.next_match_index)
        .ok_or(BracketError::InvalidBracketPosition {
            round: advancement.next_round,
            match_index: advancement.next_match_index,
        })?;
    next.set_slot(advancement.slot, Some(advancement.team_id));
    log::debug!(
        "Advanced team {} to round {} match {} ({:?})",
        advancement.team_id,
        advancement.next_round,
        advancement.next_match_index,
        advancement.slot
    );
    Ok(next.id)
}
