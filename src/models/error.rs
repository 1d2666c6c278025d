//! Errors shared by the bracket engine, the aggregates and the store.

use uuid::Uuid;

/// What kind of entity a lookup failed for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityKind {
    Tournament,
    Qualifier,
    Team,
    Match,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Tournament => "Tournament",
            EntityKind::Qualifier => "Qualifier",
            EntityKind::Team => "Team",
            EntityKind::Match => "Match",
        };
        f.write_str(name)
    }
}

/// Why a submitted score was refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreRejection {
    /// Equal scores have no winner.
    Tie,
    /// Scores must be zero or more.
    Negative,
    /// One or both slots are still TBD.
    TeamsNotSet,
    /// The match winner already plays in the next round; it cannot change anymore.
    WinnerLocked,
}

/// Errors that can occur during tournament and qualifier operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Team count is not a power of two (tournaments) or outside the configured bounds.
    InvalidTeamCount {
        count: u32,
        min: u32,
        max: u32,
        power_of_two: bool,
    },
    /// Score cannot be recorded; nothing was written.
    InvalidScore(ScoreRejection),
    /// Round/match index outside the bracket.
    InvalidBracketPosition { round: u32, match_index: u32 },
    /// Name is empty after trimming.
    InvalidName,
    /// Unknown tournament, qualifier, team or match id.
    NotFound(EntityKind, Uuid),
    /// Persistence failed; the operation was not applied.
    StoreUnavailable(String),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidTeamCount {
                count,
                min,
                max,
                power_of_two: true,
            } => write!(
                f,
                "Invalid team count {} (must be a power of two between {} and {})",
                count, min, max
            ),
            BracketError::InvalidTeamCount {
                count,
                min,
                max,
                power_of_two: false,
            } => write!(
                f,
                "Invalid team count {} (must be between {} and {})",
                count, min, max
            ),
            BracketError::InvalidScore(ScoreRejection::Tie) => {
                write!(f, "Invalid score: a match cannot end in a tie")
            }
            BracketError::InvalidScore(ScoreRejection::Negative) => {
                write!(f, "Invalid score: scores cannot be negative")
            }
            BracketError::InvalidScore(ScoreRejection::TeamsNotSet) => {
                write!(f, "Invalid score: both teams must be known before scoring")
            }
            BracketError::InvalidScore(ScoreRejection::WinnerLocked) => write!(
                f,
                "Invalid score: the winner already played the next round"
            ),
            BracketError::InvalidBracketPosition { round, match_index } => write!(
                f,
                "No match at round {} index {} in this bracket",
                round, match_index
            ),
            BracketError::InvalidName => write!(f, "Name cannot be empty"),
            BracketError::NotFound(kind, id) => write!(f, "{} {} not found", kind, id),
            BracketError::StoreUnavailable(reason) => write!(f, "Store unavailable: {}", reason),
        }
    }
}

impl std::error::Error for BracketError {}
