//! Bracket engine: generation, advancement, scoring and setup.

mod advancement;
mod bracket;
mod scoring;
mod setup;

pub use advancement::{apply_advancement, resolve_advancement, Advancement};
pub use bracket::{
    bracket_matches, generate_bracket, matches_in_round, pair_qualifier, round_label,
    seed_first_round, total_rounds, validate_bracket_size, BracketSlot, MAX_TEAM_COUNT,
    MIN_TEAM_COUNT,
};
pub use scoring::{decide_result, record_qualifier_score, record_tournament_score, ScoreUpdate};
pub use setup::{create_qualifier, create_tournament, rename_team, validate_name};
