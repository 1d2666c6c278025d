//! Tournament operations: each one loads, changes and stores a tournament as one unit,
//! then publishes what changed.

use crate::config::TeamLimits;
use crate::events::{Event, Notifier};
use crate::logic::{create_tournament, record_tournament_score, rename_team};
use crate::models::{
    BracketError, EntityKind, MatchId, Summary, Team, TeamId, Tournament, TournamentId,
    TournamentView,
};
use crate::store::Store;
use std::sync::Arc;

pub struct TournamentService<S> {
    store: S,
    notifier: Arc<dyn Notifier>,
    limits: TeamLimits,
}

impl<S: Store<Tournament>> TournamentService<S> {
    pub fn new(store: S, notifier: Arc<dyn Notifier>, limits: TeamLimits) -> Self {
        Self {
            store,
            notifier,
            limits,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All tournaments, newest first.
    pub fn list(&self) -> Result<Vec<Summary>, BracketError> {
        let mut tournaments = self.store.list()?;
        tournaments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tournaments.iter().map(Tournament::summary).collect())
    }

    pub fn get(&self, id: TournamentId) -> Result<TournamentView, BracketError> {
        Ok(self.store.get(id)?.view())
    }

    /// Raw aggregate, e.g. for exports.
    pub fn snapshot(&self, id: TournamentId) -> Result<Tournament, BracketError> {
        self.store.get(id)
    }

    /// Create a tournament with its teams and full bracket, round 1 seeded by position.
    pub fn create(&self, name: &str, team_count: u32) -> Result<TournamentView, BracketError> {
        let tournament = create_tournament(name, team_count, self.limits)?;
        let view = tournament.view();
        self.store.insert(tournament)?;
        log::info!(
            "Created tournament {} ({:?}, {} teams, {} matches)",
            view.id,
            view.name,
            view.team_count,
            view.total_matches
        );
        self.notifier.publish(Event::TournamentCreated {
            id: view.id,
            name: view.name.clone(),
            team_count: view.team_count,
        });
        Ok(view)
    }

    /// Score a match, advance the winner and update completion in one transaction.
    /// Publishes `match_updated` for the scored match and for the match the winner moved into.
    pub fn record_score(&self, match_id: MatchId, score1: i32, score2: i32) -> Result<TournamentView, BracketError> {
        let id = self
            .store
            .owner_of(match_id)?
            .ok_or(BracketError::NotFound(EntityKind::Match, match_id))?;
        let (update, tournament) = self.store.update(id, |t| {
            let update = record_tournament_score(t, match_id, score1, score2)?;
            Ok((update, t.clone()))
        })?;

        let view = tournament.view();
        for changed in [Some(update.scored), update.advanced].into_iter().flatten() {
            if let Some(m) = view.matches.iter().find(|m| m.id == changed) {
                self.notifier.publish(Event::MatchUpdated {
                    tournament_id: id,
                    updated: m.clone(),
                });
            }
        }
        Ok(view)
    }

    pub fn rename_team(&self, team_id: TeamId, name: &str) -> Result<Team, BracketError> {
        let id = self
            .store
            .owner_of(team_id)?
            .ok_or(BracketError::NotFound(EntityKind::Team, team_id))?;
        let team = self
            .store
            .update(id, |t| rename_team(&mut t.teams, team_id, name))?;
        self.notifier.publish(Event::TeamUpdated {
            tournament_id: id,
            team: team.clone(),
        });
        Ok(team)
    }

    /// Delete the tournament with all its teams and matches.
    pub fn delete(&self, id: TournamentId) -> Result<(), BracketError> {
        let removed = self.store.delete(id)?;
        log::info!("Deleted tournament {} ({:?})", id, removed.name);
        self.notifier.publish(Event::TournamentDeleted { id });
        Ok(())
    }
}
