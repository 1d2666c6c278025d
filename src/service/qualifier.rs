//! Qualifier operations, same shape as tournaments minus advancement.

use crate::config::TeamLimits;
use crate::events::{Event, Notifier};
use crate::logic::{create_qualifier, record_qualifier_score, rename_team};
use crate::models::{
    BracketError, EntityKind, MatchId, Qualifier, QualifierId, QualifierView, Summary, Team,
    TeamId,
};
use crate::store::Store;
use std::sync::Arc;

pub struct QualifierService<S> {
    store: S,
    notifier: Arc<dyn Notifier>,
    limits: TeamLimits,
}

impl<S: Store<Qualifier>> QualifierService<S> {
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

    pub fn list(&self) -> Result<Vec<Summary>, BracketError> {
        let mut qualifiers = self.store.list()?;
        qualifiers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(qualifiers.iter().map(Qualifier::summary).collect())
    }

    pub fn get(&self, id: QualifierId) -> Result<QualifierView, BracketError> {
        Ok(self.store.get(id)?.view())
    }

    pub fn snapshot(&self, id: QualifierId) -> Result<Qualifier, BracketError> {
        self.store.get(id)
    }

    pub fn create(&self, name: &str, team_count: u32) -> Result<QualifierView, BracketError> {
        let qualifier = create_qualifier(name, team_count, self.limits)?;
        let view = qualifier.view();
        self.store.insert(qualifier)?;
        log::info!(
            "Created qualifier {} ({:?}, {} teams, {} matches)",
            view.id,
            view.name,
            view.team_count,
            view.total_matches
        );
        self.notifier.publish(Event::QualifierCreated {
            id: view.id,
            name: view.name.clone(),
            team_count: view.team_count,
        });
        Ok(view)
    }

    pub fn record_score(&self, match_id: MatchId, score1: i32, score2: i32) -> Result<QualifierView, BracketError> {
        let id = self
            .store
            .owner_of(match_id)?
            .ok_or(BracketError::NotFound(EntityKind::Match, match_id))?;
        let qualifier = self.store.update(id, |q| {
            record_qualifier_score(q, match_id, score1, score2)?;
            Ok(q.clone())
        })?;

        let view = qualifier.view();
        if let Some(m) = view.matches.iter().find(|m| m.id == match_id) {
            self.notifier.publish(Event::QualifierMatchUpdated {
                qualifier_id: id,
                updated: m.clone(),
            });
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
            .update(id, |q| rename_team(&mut q.teams, team_id, name))?;
        self.notifier.publish(Event::QualifierTeamUpdated {
            qualifier_id: id,
            team: team.clone(),
        });
        Ok(team)
    }

    pub fn delete(&self, id: QualifierId) -> Result<(), BracketError> {
        let removed = self.store.delete(id)?;
        log::info!("Deleted qualifier {} ({:?})", id, removed.name);
        self.notifier.publish(Event::QualifierDeleted { id });
        Ok(())
    }
}
