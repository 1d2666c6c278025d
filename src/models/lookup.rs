//! Lookups and progress counts shared by tournaments and qualifiers.

use crate::models::error::{BracketError, EntityKind};
use crate::models::game::{Match, MatchId};
use crate::models::team::{Team, TeamId};

pub(crate) fn match_mut(matches: &mut [Match], id: MatchId) -> Result<&mut Match, BracketError> {
    matches
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or(BracketError::NotFound(EntityKind::Match, id))
}

pub(crate) fn team_mut(teams: &mut [Team], id: TeamId) -> Result<&mut Team, BracketError> {
    teams
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(BracketError::NotFound(EntityKind::Team, id))
}

pub(crate) fn completed(matches: &[Match]) -> usize {
    matches.iter().filter(|m| m.is_played()).count()
}

/// Recompute an `is_active` flag from `matches`. Returns true on the active -> done transition.
pub(crate) fn refresh_active(is_active: &mut bool, matches: &[Match]) -> bool {
    let was_active = *is_active;
    *is_active = completed(matches) < matches.len();
    was_active && !*is_active
}
