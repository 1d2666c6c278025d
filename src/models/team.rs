//! Team data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in match slots and lookups).
pub type TeamId = Uuid;

/// A team entered in a tournament or qualifier.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// 1-based seed order, fixed at creation.
    pub position: u32,
}

impl Team {
    /// Create a team at the given seed position with the default name `Team {position}`.
    pub fn new(position: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("Team {}", position),
            position,
        }
    }

    /// Create `count` teams with positions `1..=count`.
    pub fn roster(count: u32) -> Vec<Team> {
        (1..=count).map(Team::new).collect()
    }
}
