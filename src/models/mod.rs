//! Data structures for tournaments and qualifiers: teams, matches, views, errors.

mod error;
mod game;
pub(crate) mod lookup;
mod qualifier;
mod team;
mod tournament;
mod view;

pub use error::{BracketError, EntityKind, ScoreRejection};
pub use game::{Match, MatchId, MatchResult, Slot};
pub use qualifier::{Qualifier, QualifierId};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentId};
pub use view::{MatchView, QualifierView, Summary, TournamentView};
