//! Integration tests for bracket generation, seeding and advancement.

use tennis_bracket_web::logic::{
    bracket_matches, matches_in_round, pair_qualifier, seed_first_round,
};
use tennis_bracket_web::{
    generate_bracket, resolve_advancement, round_label, total_rounds, Advancement, BracketError,
    BracketSlot, Slot, Team,
};
use uuid::Uuid;

#[test]
fn bracket_sizes_for_every_power_of_two() {
    for k in 1..=6u32 {
        let team_count = 1 << k;
        let slots = generate_bracket(team_count).unwrap();
        assert_eq!(slots.len() as u32, team_count - 1);
        assert_eq!(total_rounds(team_count), k);
        for round in 1..=k {
            let in_round: Vec<_> = slots.iter().filter(|s| s.round == round).collect();
            assert_eq!(in_round.len() as u32, 1 << (k - round));
            // Contiguous indexes 0..n-1
            for (i, s) in in_round.iter().enumerate() {
                assert_eq!(s.match_index, i as u32);
            }
        }
        assert!(slots.iter().all(|s| s.round >= 1 && s.round <= k));
    }
}

#[test]
fn four_teams_make_two_rounds() {
    let slots = generate_bracket(4).unwrap();
    assert_eq!(
        slots,
        vec![
            BracketSlot { round: 1, match_index: 0 },
            BracketSlot { round: 1, match_index: 1 },
            BracketSlot { round: 2, match_index: 0 },
        ]
    );
}

#[test]
fn generator_rejects_sizes_without_a_full_bracket() {
    for count in [0, 1, 3, 5, 6, 12, 100] {
        assert!(
            matches!(
                generate_bracket(count),
                Err(BracketError::InvalidTeamCount { power_of_two: true, .. })
            ),
            "{count} teams should be rejected"
        );
    }
}

#[test]
fn round_one_is_seeded_by_position() {
    let mut teams = Team::roster(8);
    // Input order must not matter, only position
    teams.reverse();
    let mut matches = bracket_matches(8).unwrap();
    seed_first_round(&mut matches, &teams);

    let by_position = |p: u32| teams.iter().find(|t| t.position == p).unwrap().id;
    for i in 0..4u32 {
        let m = matches.iter().find(|m| m.round == 1 && m.match_index == i).unwrap();
        assert_eq!(m.team1, Some(by_position(2 * i + 1)));
        assert_eq!(m.team2, Some(by_position(2 * i + 2)));
    }
    for m in matches.iter().filter(|m| m.round > 1) {
        assert_eq!(m.team1, None);
        assert_eq!(m.team2, None);
    }
}

#[test]
fn default_team_names_follow_position() {
    let teams = Team::roster(3);
    let names: Vec<_> = teams.iter().map(|t| (t.position, t.name.as_str())).collect();
    assert_eq!(names, vec![(1, "Team 1"), (2, "Team 2"), (3, "Team 3")]);
}

#[test]
fn qualifier_pairs_leave_odd_team_out() {
    let teams = Team::roster(5);
    let matches = pair_qualifier(&teams);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].team1, Some(teams[0].id));
    assert_eq!(matches[0].team2, Some(teams[1].id));
    assert_eq!(matches[1].team1, Some(teams[2].id));
    assert_eq!(matches[1].team2, Some(teams[3].id));
    assert!(matches.iter().all(|m| !m.has_team(teams[4].id)));
    assert!(matches.iter().all(|m| m.round == 1));
}

#[test]
fn even_index_feeds_team1_odd_feeds_team2() {
    let winner = Uuid::new_v4();
    assert_eq!(
        resolve_advancement(1, 0, winner, 3).unwrap(),
        Some(Advancement {
            next_round: 2,
            next_match_index: 0,
            slot: Slot::Team1,
            team_id: winner,
        })
    );
    assert_eq!(
        resolve_advancement(1, 3, winner, 3).unwrap(),
        Some(Advancement {
            next_round: 2,
            next_match_index: 1,
            slot: Slot::Team2,
            team_id: winner,
        })
    );
    let semi = resolve_advancement(2, 1, winner, 3).unwrap().unwrap();
    assert_eq!((semi.next_round, semi.next_match_index, semi.slot), (3, 0, Slot::Team2));
}

#[test]
fn final_has_no_next_match() {
    assert_eq!(resolve_advancement(3, 0, Uuid::new_v4(), 3).unwrap(), None);
    assert_eq!(resolve_advancement(1, 0, Uuid::new_v4(), 1).unwrap(), None);
}

#[test]
fn resolver_rejects_positions_outside_the_bracket() {
    let winner = Uuid::new_v4();
    for (round, index) in [(0, 0), (1, 4), (2, 2), (3, 1), (4, 0)] {
        assert_eq!(
            resolve_advancement(round, index, winner, 3),
            Err(BracketError::InvalidBracketPosition { round, match_index: index })
        );
    }
}

#[test]
fn resolver_rejects_brackets_too_deep_to_exist() {
    let winner = Uuid::new_v4();
    for total in [33, 40, u32::MAX] {
        assert_eq!(
            resolve_advancement(1, 0, winner, total),
            Err(BracketError::InvalidBracketPosition { round: 1, match_index: 0 })
        );
    }
    // The final of a deep bracket is still a valid position
    assert_eq!(resolve_advancement(40, 0, winner, 40).unwrap(), None);
}

#[test]
fn matches_in_round_halves_each_round() {
    assert_eq!(matches_in_round(1, 4), 8);
    assert_eq!(matches_in_round(4, 4), 1);
    assert_eq!(matches_in_round(5, 4), 0);
    assert_eq!(matches_in_round(0, 4), 0);
    assert_eq!(matches_in_round(1, 32), 1 << 31);
    assert_eq!(matches_in_round(1, 33), 0);
}

#[test]
fn round_labels_count_back_from_final() {
    assert_eq!(round_label(4, 4), "Final");
    assert_eq!(round_label(3, 4), "Semi Final");
    assert_eq!(round_label(2, 4), "Quarter Final");
    assert_eq!(round_label(1, 4), "Round 1");
}
