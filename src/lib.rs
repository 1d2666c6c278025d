//! Tennis tournament web app: single-elimination brackets and qualifier rounds.
//!
//! The bracket engine in [`logic`] is pure; [`service`] runs it against a [`store::Store`]
//! and publishes [`events::Event`]s after each committed change.

pub mod config;
pub mod events;
pub mod export;
pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use config::{Config, TeamLimits};
pub use events::{BroadcastNotifier, Event, Notifier};
pub use logic::{
    generate_bracket, resolve_advancement, round_label, total_rounds, Advancement, BracketSlot,
    ScoreUpdate,
};
pub use models::{
    BracketError, EntityKind, Match, MatchId, MatchResult, MatchView, Qualifier, QualifierId,
    QualifierView, ScoreRejection, Slot, Summary, Team, TeamId, Tournament, TournamentId,
    TournamentView,
};
pub use service::{QualifierService, TournamentService};
pub use store::{Aggregate, MemoryStore, Store};
