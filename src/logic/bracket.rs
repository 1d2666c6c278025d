//! Bracket generation: the match skeleton for N teams, round-1 seeding and qualifier pairing.

use crate::models::{BracketError, Match, Team};
use serde::{Deserialize, Serialize};

/// Smallest bracket that can be played.
pub const MIN_TEAM_COUNT: u32 = 2;
/// Hard ceiling on team count regardless of configuration.
pub const MAX_TEAM_COUNT: u32 = 1024;

/// Position of one match in the bracket skeleton.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub round: u32,
    pub match_index: u32,
}

/// Number of rounds for a bracket of `team_count` teams (`ceil(log2(team_count))`).
pub fn total_rounds(team_count: u32) -> u32 {
    if team_count <= 1 {
        return 0;
    }
    u32::BITS - (team_count - 1).leading_zeros()
}

/// Matches played in `round` of a bracket with `total_rounds` rounds. Zero outside the bracket,
/// including rounds too far from the final to count in a `u32`.
pub fn matches_in_round(round: u32, total_rounds: u32) -> u32 {
    if round == 0 || round > total_rounds {
        return 0;
    }
    1u32.checked_shl(total_rounds - round).unwrap_or(0)
}

/// Check that a single-elimination bracket can be built for `team_count`.
pub fn validate_bracket_size(team_count: u32) -> Result<(), BracketError> {
    if team_count < MIN_TEAM_COUNT || team_count > MAX_TEAM_COUNT || !team_count.is_power_of_two() {
        return Err(BracketError::InvalidTeamCount {
            count: team_count,
            min: MIN_TEAM_COUNT,
            max: MAX_TEAM_COUNT,
            power_of_two: true,
        });
    }
    Ok(())
}

/// Generate every match position of a single-elimination bracket.
///
/// Round 1 is the first round played and holds `team_count / 2` matches; each later round
/// halves, ending with the single final. The result is ordered by round, then match index,
/// and always contains `team_count - 1` positions.
pub fn generate_bracket(team_count: u32) -> Result<Vec<BracketSlot>, BracketError> {
    validate_bracket_size(team_count)?;
    let rounds = total_rounds(team_count);
    let slots = (1..=rounds)
        .flat_map(|round| {
            (0..matches_in_round(round, rounds)).map(move |match_index| BracketSlot { round, match_index })
        })
        .collect();
    Ok(slots)
}

/// Empty matches (both slots TBD) for every position of the bracket.
pub fn bracket_matches(team_count: u32) -> Result<Vec<Match>, BracketError> {
    Ok(generate_bracket(team_count)?
        .into_iter()
        .map(|slot| Match::new(slot.round, slot.match_index))
        .collect())
}

/// Place teams into round 1 by position: the pair `(2k, 2k + 1)` goes to match `k`.
///
/// Earlier round-1 slot contents are overwritten. A missing partner leaves the slot empty.
pub fn seed_first_round(matches: &mut [Match], teams: &[Team]) {
    let mut seeded: Vec<&Team> = teams.iter().collect();
    seeded.sort_by_key(|t| t.position);

    for m in matches.iter_mut().filter(|m| m.round == 1) {
        let first = (m.match_index as usize) * 2;
        m.team1 = seeded.get(first).map(|t| t.id);
        m.team2 = seeded.get(first + 1).map(|t| t.id);
    }
}

/// Pair teams `(0, 1), (2, 3), ...` by position into one round of matches.
/// An odd trailing team gets no match.
pub fn pair_qualifier(teams: &[Team]) -> Vec<Match> {
    let mut seeded: Vec<&Team> = teams.iter().collect();
    seeded.sort_by_key(|t| t.position);

    seeded
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| {
            let mut m = Match::new(1, index as u32);
            m.team1 = Some(pair[0].id);
            m.team2 = Some(pair[1].id);
            m
        })
        .collect()
}

/// Display name for a round, counted from the final backwards.
pub fn round_label(round: u32, total_rounds: u32) -> String {
    match total_rounds.checked_sub(round) {
        Some(0) => "Final".to_string(),
        Some(1) => "Semi Final".to_string(),
        Some(2) => "Quarter Final".to_string(),
        _ => format!("Round {}", round),
    }
}
