//! Integration tests for qualifiers: pairing, scoring without advancement, completion.

use std::sync::Arc;
use tennis_bracket_web::{
    BracketError, BroadcastNotifier, Event, MemoryStore, Qualifier, QualifierService,
    ScoreRejection, TeamLimits,
};

fn service() -> (QualifierService<MemoryStore<Qualifier>>, Arc<BroadcastNotifier>) {
    let events = Arc::new(BroadcastNotifier::new(16));
    let service = QualifierService::new(MemoryStore::new(), events.clone(), TeamLimits::default());
    (service, events)
}

#[test]
fn scenario_e_five_teams() {
    let (svc, _) = service();
    let q = svc.create("Qualifying", 5).unwrap();
    assert_eq!(q.matches.len(), 2);
    let pairs: Vec<_> = q
        .matches
        .iter()
        .map(|m| {
            (
                m.team1.as_ref().unwrap().position,
                m.team2.as_ref().unwrap().position,
            )
        })
        .collect();
    assert_eq!(pairs, vec![(1, 2), (3, 4)]);
    assert_eq!(q.unmatched_teams.len(), 1);
    assert_eq!(q.unmatched_teams[0].position, 5);
}

#[test]
fn qualifier_accepts_any_count_in_bounds() {
    let (svc, _) = service();
    assert_eq!(svc.create("Six", 6).unwrap().matches.len(), 3);
    assert_eq!(svc.create("Two", 2).unwrap().matches.len(), 1);
    assert!(matches!(
        svc.create("One", 1),
        Err(BracketError::InvalidTeamCount { power_of_two: false, .. })
    ));
    assert!(svc.create("Too many", 65).is_err());
}

#[test]
fn scores_set_winner_without_advancement() {
    let (svc, _) = service();
    let q = svc.create("Qualifying", 4).unwrap();
    let m = &q.matches[1];

    let q = svc.record_score(m.id, 3, 9).unwrap();
    let scored = q.matches.iter().find(|x| x.id == m.id).unwrap();
    assert_eq!(scored.winner, m.team2);
    assert_eq!((scored.score1, scored.score2), (Some(3), Some(9)));
    // The other match is untouched
    assert_eq!(q.matches[0].winner, None);
    assert!(q.is_active);
}

#[test]
fn all_scored_qualifier_is_complete() {
    let (svc, _) = service();
    let q = svc.create("Qualifying", 5).unwrap();
    svc.record_score(q.matches[0].id, 1, 0).unwrap();
    let q = svc.record_score(q.matches[1].id, 0, 1).unwrap();
    assert!(!q.is_active);
    assert_eq!(q.completed_matches, q.total_matches);
}

#[test]
fn tie_is_rejected() {
    let (svc, _) = service();
    let q = svc.create("Qualifying", 2).unwrap();
    assert_eq!(
        svc.record_score(q.matches[0].id, 4, 4).unwrap_err(),
        BracketError::InvalidScore(ScoreRejection::Tie)
    );
    assert_eq!(svc.get(q.id).unwrap().matches[0].winner, None);
}

#[test]
fn rename_and_delete() {
    let (svc, _) = service();
    let q = svc.create("Qualifying", 3).unwrap();
    let team = svc.rename_team(q.teams[2].id, "Lobbers").unwrap();
    assert_eq!(team.name, "Lobbers");
    assert_eq!(svc.get(q.id).unwrap().unmatched_teams[0].name, "Lobbers");

    svc.delete(q.id).unwrap();
    assert!(svc.list().unwrap().is_empty());
    assert!(matches!(
        svc.rename_team(q.teams[0].id, "Again"),
        Err(BracketError::NotFound(..))
    ));
}

#[test]
fn viewers_receive_qualifier_events() {
    let (svc, events) = service();
    let mut viewer = events.subscribe();

    let q = svc.create("Live", 2).unwrap();
    svc.record_score(q.matches[0].id, 6, 2).unwrap();

    match viewer.try_recv().unwrap() {
        Event::QualifierCreated { id, team_count, .. } => {
            assert_eq!(id, q.id);
            assert_eq!(team_count, 2);
        }
        other => panic!("unexpected event {other:?}"),
    }
    match viewer.try_recv().unwrap() {
        Event::QualifierMatchUpdated { qualifier_id, updated } => {
            assert_eq!(qualifier_id, q.id);
            assert_eq!(updated.score1, Some(6));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
