//! Setup: build a complete tournament or qualifier (teams + matches) in one go, and rename teams.

use crate::config::TeamLimits;
use crate::logic::bracket::{bracket_matches, pair_qualifier, seed_first_round};
use crate::models::{lookup, BracketError, Qualifier, Team, TeamId, Tournament};

/// Trimmed name, or `InvalidName` if nothing is left.
pub fn validate_name(name: &str) -> Result<String, BracketError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BracketError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// Create a tournament with `team_count` default-named teams, the full bracket, and round 1 seeded.
/// `team_count` must be a power of two within `limits`.
pub fn create_tournament(name: &str, team_count: u32, limits: TeamLimits) -> Result<Tournament, BracketError> {
    let name = validate_name(name)?;
    limits.check(team_count, true)?;

    let teams = Team::roster(team_count);
    let mut matches = bracket_matches(team_count)?;
    seed_first_round(&mut matches, &teams);

    Ok(Tournament::new(name, teams, matches))
}

/// Create a qualifier with `team_count` default-named teams paired into one round.
pub fn create_qualifier(name: &str, team_count: u32, limits: TeamLimits) -> Result<Qualifier, BracketError> {
    let name = validate_name(name)?;
    limits.check(team_count, false)?;

    let teams = Team::roster(team_count);
    let matches = pair_qualifier(&teams);

    Ok(Qualifier::new(name, teams, matches))
}

/// Rename one team of a roster. Matches reference teams by id, so nothing else changes.
pub fn rename_team(teams: &mut [Team], team_id: TeamId, name: &str) -> Result<Team, BracketError> {
    let name = validate_name(name)?;
    let team = lookup::team_mut(teams, team_id)?;
    team.name = name;
    Ok(team.clone())
}
