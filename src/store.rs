//! Persistence seam: the `Store` trait and an in-memory implementation.
//!
//! A store holds whole aggregates (a tournament or a qualifier with its teams and matches).
//! `update` is the only way to change a stored aggregate: the closure works on a copy that
//! replaces the stored value only when it returns `Ok`, and the aggregate stays locked for the
//! duration. Two submissions touching the same aggregate are therefore serialised, while
//! different aggregates never wait on each other.

use crate::models::{BracketError, EntityKind, Qualifier, Tournament};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use uuid::Uuid;

/// Something a `Store` can hold: an id, owned child ids (teams and matches), a creation time.
pub trait Aggregate: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> Uuid;

    fn child_ids(&self) -> Vec<Uuid>;

    fn created_at(&self) -> DateTime<Utc>;
}

impl Aggregate for Tournament {
    const KIND: EntityKind = EntityKind::Tournament;

    fn id(&self) -> Uuid {
        self.id
    }

    fn child_ids(&self) -> Vec<Uuid> {
        self.teams
            .iter()
            .map(|t| t.id)
            .chain(self.matches.iter().map(|m| m.id))
            .collect()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Aggregate for Qualifier {
    const KIND: EntityKind = EntityKind::Qualifier;

    fn id(&self) -> Uuid {
        self.id
    }

    fn child_ids(&self) -> Vec<Uuid> {
        self.teams
            .iter()
            .map(|t| t.id)
            .chain(self.matches.iter().map(|m| m.id))
            .collect()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Durable record of aggregates. Every method is atomic for one aggregate.
pub trait Store<A: Aggregate>: Send + Sync {
    fn list(&self) -> Result<Vec<A>, BracketError>;

    /// `NotFound` if no aggregate has this id.
    fn get(&self, id: Uuid) -> Result<A, BracketError>;

    fn insert(&self, aggregate: A) -> Result<(), BracketError>;

    /// Remove the aggregate with all its teams and matches, returning what was removed.
    fn delete(&self, id: Uuid) -> Result<A, BracketError>;

    /// Id of the aggregate owning a team or match id.
    fn owner_of(&self, child_id: Uuid) -> Result<Option<Uuid>, BracketError>;

    /// Apply `change` as one transaction: all of it is stored, or none of it.
    fn update<T, F>(&self, id: Uuid, change: F) -> Result<T, BracketError>
    where
        F: FnOnce(&mut A) -> Result<T, BracketError>;
}

/// In-process store with one lock per aggregate.
pub struct MemoryStore<A> {
    aggregates: RwLock<HashMap<Uuid, Arc<Mutex<A>>>>,
    owners: RwLock<HashMap<Uuid, Uuid>>,
}

impl<A> Default for MemoryStore<A> {
    fn default() -> Self {
        Self {
            aggregates: RwLock::new(HashMap::new()),
            owners: RwLock::new(HashMap::new()),
        }
    }
}

impl<A: Aggregate> MemoryStore<A> {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, id: Uuid) -> Result<Arc<Mutex<A>>, BracketError> {
        let map = self.aggregates.read().map_err(lock_error)?;
        map.get(&id).cloned().ok_or(BracketError::NotFound(A::KIND, id))
    }
}

fn lock_error<T>(_: PoisonError<T>) -> BracketError {
    BracketError::StoreUnavailable("lock poisoned".to_string())
}

impl<A: Aggregate> Store<A> for MemoryStore<A> {
    fn list(&self) -> Result<Vec<A>, BracketError> {
        let entries: Vec<Arc<Mutex<A>>> = {
            let map = self.aggregates.read().map_err(lock_error)?;
            map.values().cloned().collect()
        };
        entries
            .iter()
            .map(|entry| entry.lock().map(|a| a.clone()).map_err(lock_error))
            .collect()
    }

    fn get(&self, id: Uuid) -> Result<A, BracketError> {
        let entry = self.entry(id)?;
        let aggregate = entry.lock().map_err(lock_error)?;
        Ok(aggregate.clone())
    }

    fn insert(&self, aggregate: A) -> Result<(), BracketError> {
        let id = aggregate.id();
        let children = aggregate.child_ids();
        let mut map = self.aggregates.write().map_err(lock_error)?;
        let mut owners = self.owners.write().map_err(lock_error)?;
        for child in children {
            owners.insert(child, id);
        }
        map.insert(id, Arc::new(Mutex::new(aggregate)));
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<A, BracketError> {
        // Never hold the map lock while waiting on an aggregate lock.
        let entry = {
            let mut map = self.aggregates.write().map_err(lock_error)?;
            map.remove(&id).ok_or(BracketError::NotFound(A::KIND, id))?
        };
        let removed = entry.lock().map_err(lock_error)?.clone();
        let mut owners = self.owners.write().map_err(lock_error)?;
        for child in removed.child_ids() {
            owners.remove(&child);
        }
        Ok(removed)
    }

    fn owner_of(&self, child_id: Uuid) -> Result<Option<Uuid>, BracketError> {
        let owners = self.owners.read().map_err(lock_error)?;
        Ok(owners.get(&child_id).copied())
    }

    fn update<T, F>(&self, id: Uuid, change: F) -> Result<T, BracketError>
    where
        F: FnOnce(&mut A) -> Result<T, BracketError>,
    {
        let entry = self.entry(id)?;
        let mut current = entry.lock().map_err(lock_error)?;
        let mut working = current.clone();
        let out = change(&mut working)?;
        *current = working;
        Ok(out)
    }
}
