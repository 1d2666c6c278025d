//! Domain events pushed to live viewers after a change is committed.

use crate::models::{MatchView, Team};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// A committed change. Payload is the changed entity plus its parent id.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TournamentCreated {
        id: Uuid,
        name: String,
        team_count: u32,
    },
    TournamentDeleted {
        id: Uuid,
    },
    TeamUpdated {
        tournament_id: Uuid,
        team: Team,
    },
    MatchUpdated {
        tournament_id: Uuid,
        #[serde(rename = "match")]
        updated: MatchView,
    },
    QualifierCreated {
        id: Uuid,
        name: String,
        team_count: u32,
    },
    QualifierDeleted {
        id: Uuid,
    },
    QualifierTeamUpdated {
        qualifier_id: Uuid,
        team: Team,
    },
    QualifierMatchUpdated {
        qualifier_id: Uuid,
        #[serde(rename = "match")]
        updated: MatchView,
    },
}

impl Event {
    /// Wire name, same as the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Event::TournamentCreated { .. } => "tournament_created",
            Event::TournamentDeleted { .. } => "tournament_deleted",
            Event::TeamUpdated { .. } => "team_updated",
            Event::MatchUpdated { .. } => "match_updated",
            Event::QualifierCreated { .. } => "qualifier_created",
            Event::QualifierDeleted { .. } => "qualifier_deleted",
            Event::QualifierTeamUpdated { .. } => "qualifier_team_updated",
            Event::QualifierMatchUpdated { .. } => "qualifier_match_updated",
        }
    }
}

/// Side channel for committed changes. Publishing never fails from the caller's point of view.
pub trait Notifier: Send + Sync {
    fn publish(&self, event: Event);
}

/// Fan-out to every subscribed viewer. Viewers that fall more than `capacity` events behind
/// skip the oldest ones.
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Event>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn viewer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Notifier for BroadcastNotifier {
    fn publish(&self, event: Event) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(viewers) => log::debug!("Published {} to {} viewer(s)", name, viewers),
            Err(_) => log::debug!("Published {} with no viewers connected", name),
        }
    }
}
