//! Transactional operations on stored tournaments and qualifiers.

mod qualifier;
mod tournament;

pub use qualifier::QualifierService;
pub use tournament::TournamentService;
