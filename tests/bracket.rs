//! Integration tests for bracket generation: layout, seeding, byes.

use football_cup_web::{
    add_team_manual, confirm_team, generate_bracket, register_team, BracketStatus, MatchPhase,
    RegistrationMode, Slot, Tournament, TournamentError,
};

fn tournament_with_confirmed(capacity: u32, teams: usize) -> Tournament {
    let mut t = Tournament::new(
        "Copa Teste",
        None,
        Some("2026".to_string()),
        capacity,
        RegistrationMode::Open,
    )
    .unwrap();
    for i in 0..teams {
        add_team_manual(&mut t, &format!("Team {i}")).unwrap();
    }
    t
}

#[test]
fn full_capacity_bracket_has_fixed_layout() {
    let mut t = tournament_with_confirmed(8, 8);
    generate_bracket(&mut t).unwrap();

    assert_eq!(t.bracket_status, BracketStatus::Generated);
    assert_eq!(t.matches.len(), 7); // 4 + 2 + 1
    for (round, expected) in [(1, 4), (2, 2), (3, 1)] {
        let count = t.matches.iter().filter(|m| m.round == round).count();
        assert_eq!(count, expected, "round {round}");
    }
    // Round 1 fully paired, later rounds empty placeholders.
    for m in &t.matches {
        if m.round == 1 {
            assert_eq!(m.phase(), MatchPhase::Ready);
        } else {
            assert_eq!(m.phase(), MatchPhase::Empty);
        }
        assert!(m.score_a.is_none());
        assert!(m.winner_team_id.is_none());
    }
}

#[test]
fn every_confirmed_team_is_seeded_exactly_once() {
    let mut t = tournament_with_confirmed(8, 8);
    generate_bracket(&mut t).unwrap();

    let mut seeded: Vec<_> = t
        .matches
        .iter()
        .filter(|m| m.round == 1)
        .flat_map(|m| [m.team_a, m.team_b])
        .flatten()
        .collect();
    seeded.sort();
    seeded.dedup();
    assert_eq!(seeded.len(), 8);
}

#[test]
fn advancement_pointers_follow_pairing() {
    let mut t = tournament_with_confirmed(8, 8);
    generate_bracket(&mut t).unwrap();

    for m in t.matches.iter().filter(|m| m.round < 3) {
        let target = m.advances_to.expect("non-final match must feed somewhere");
        assert_eq!(target.round, m.round + 1);
        assert_eq!(target.match_number, (m.match_number + 1) / 2);
        let expected_slot = if m.match_number % 2 == 1 { Slot::A } else { Slot::B };
        assert_eq!(target.slot, expected_slot);
    }
    let last = t.matches.iter().find(|m| m.round == 3).unwrap();
    assert!(last.advances_to.is_none());
}

#[test]
fn regeneration_is_rejected() {
    let mut t = tournament_with_confirmed(8, 8);
    generate_bracket(&mut t).unwrap();

    assert_eq!(
        generate_bracket(&mut t),
        Err(TournamentError::AlreadyGenerated)
    );
    assert_eq!(t.matches.len(), 7);
}

#[test]
fn insufficient_teams_rejected() {
    let mut t = tournament_with_confirmed(8, 1);
    assert!(matches!(
        generate_bracket(&mut t),
        Err(TournamentError::InsufficientTeams { eligible: 1, .. })
    ));
    assert_eq!(t.bracket_status, BracketStatus::NotGenerated);
    assert!(t.matches.is_empty());
}

#[test]
fn byes_auto_advance_into_round_two() {
    // 5 teams in an 8-slot bracket: 3 byes, decided at the draw.
    let mut t = tournament_with_confirmed(8, 5);
    generate_bracket(&mut t).unwrap();

    assert_eq!(t.matches.len(), 7);
    let byes: Vec<_> = t
        .matches
        .iter()
        .filter(|m| m.round == 1 && m.team_b.is_none())
        .collect();
    assert_eq!(byes.len(), 3);
    for m in &byes {
        assert_eq!(m.phase(), MatchPhase::Decided);
        assert_eq!(m.winner_team_id, m.team_a);
        assert!(m.score_a.is_none());
    }
    // No round-1 match is left without any team.
    assert!(t
        .matches
        .iter()
        .filter(|m| m.round == 1)
        .all(|m| m.team_a.is_some()));
    // Each bye winner landed in its round-2 slot.
    let placed = t
        .matches
        .iter()
        .filter(|m| m.round == 2)
        .flat_map(|m| [m.team_a, m.team_b])
        .flatten()
        .count();
    assert_eq!(placed, 3);
}

#[test]
fn two_teams_make_a_single_final() {
    let mut t = tournament_with_confirmed(32, 2);
    generate_bracket(&mut t).unwrap();

    assert_eq!(t.matches.len(), 1);
    let m = &t.matches[0];
    assert_eq!(m.round, 1);
    assert_eq!(m.match_number, 1);
    assert_eq!(m.phase(), MatchPhase::Ready);
    assert!(m.advances_to.is_none());
}

#[test]
fn unpaid_confirmed_team_is_not_seeded() {
    let mut t = tournament_with_confirmed(8, 4);
    let unpaid = register_team(&mut t, "Sem Pagamento").unwrap();
    confirm_team(&mut t, unpaid).unwrap();

    generate_bracket(&mut t).unwrap();

    // Only the 4 paid/waived entries were drawn: a 4-slot bracket.
    assert_eq!(t.matches.len(), 3);
    let seeded_somewhere = t
        .matches
        .iter()
        .any(|m| m.team_a == Some(unpaid) || m.team_b == Some(unpaid));
    assert!(!seeded_somewhere);
}
