//! Score recording: winner determination, advancement and completion for one submitted score.

use crate::logic::advancement::{apply_advancement, resolve_advancement};
use crate::models::{
    BracketError, Match, MatchId, MatchResult, Qualifier, ScoreRejection, Tournament,
};

/// What changed when a score was recorded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScoreUpdate {
    /// The match that was scored.
    pub scored: MatchId,
    /// The next-round match that received the winner, if any.
    pub advanced: Option<MatchId>,
    /// True if this score completed the tournament or qualifier.
    pub completed: bool,
}

/// Validate a submitted score against a match and decide the winner (higher score wins).
pub fn decide_result(m: &Match, score1: i32, score2: i32) -> Result<MatchResult, BracketError> {
    let score1 = u32::try_from(score1).map_err(|_| BracketError::InvalidScore(ScoreRejection::Negative))?;
    let score2 = u32::try_from(score2).map_err(|_| BracketError::InvalidScore(ScoreRejection::Negative))?;
    if score1 == score2 {
        return Err(BracketError::InvalidScore(ScoreRejection::Tie));
    }
    let (team1, team2) = match (m.team1, m.team2) {
        (Some(team1), Some(team2)) => (team1, team2),
        _ => return Err(BracketError::InvalidScore(ScoreRejection::TeamsNotSet)),
    };
    Ok(MatchResult {
        score1,
        score2,
        winner_id: if score1 > score2 { team1 } else { team2 },
    })
}

/// Record a score on a tournament match and advance the winner.
///
/// Every check runs before the first write, so an error leaves the tournament untouched.
/// Re-scoring a played match is allowed if the winner stays the same, or if the winner
/// changes while the next-round match is still unplayed (its slot is then replaced).
pub fn record_tournament_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score1: i32,
    score2: i32,
) -> Result<ScoreUpdate, BracketError> {
    let total_rounds = tournament.total_rounds();
    let m = tournament.match_by_id(match_id)?;
    let result = decide_result(m, score1, score2)?;
    let advancement = resolve_advancement(m.round, m.match_index, result.winner_id, total_rounds)?;

    let winner_changed = m
        .winner_id()
        .is_some_and(|previous| previous != result.winner_id);
    if let (true, Some(adv)) = (winner_changed, &advancement) {
        let next = tournament
            .find_match(adv.next_round, adv.next_match_index)
            .ok_or(BracketError::InvalidBracketPosition {
                round: adv.next_round,
                match_index: adv.next_match_index,
            })?;
        if next.is_played() {
            return Err(BracketError::InvalidScore(ScoreRejection::WinnerLocked));
        }
    }

    tournament.match_by_id_mut(match_id)?.result = Some(result);
    let advanced = advancement
        .map(|adv| apply_advancement(tournament, &adv))
        .transpose()?;
    let completed = tournament.refresh_completion();
    if completed {
        log::info!("Tournament {} completed", tournament.id);
    }

    Ok(ScoreUpdate {
        scored: match_id,
        advanced,
        completed,
    })
}

/// Record a score on a qualifier match. No advancement; completion once all matches are scored.
pub fn record_qualifier_score(
    qualifier: &mut Qualifier,
    match_id: MatchId,
    score1: i32,
    score2: i32,
) -> Result<ScoreUpdate, BracketError> {
    let m = qualifier.match_by_id_mut(match_id)?;
    let result = decide_result(m, score1, score2)?;
    m.result = Some(result);
    let completed = qualifier.refresh_completion();
    if completed {
        log::info!("Qualifier {} completed", qualifier.id);
    }

    Ok(ScoreUpdate {
        scored: match_id,
        advanced: None,
        completed,
    })
}
