//! Integration tests for roster management and tournament setup.

use football_cup_web::{
    add_team_manual, confirm_team, generate_bracket, mark_team_paid, register_team, reject_team,
    shortlist_team, PaymentStatus, RegistrationMode, RegistrationType, TeamStatus, Tournament,
    TournamentError,
};
use uuid::Uuid;

fn open_tournament(capacity: u32) -> Tournament {
    Tournament::new(
        "Copa da Varzea",
        None,
        Some("2026".to_string()),
        capacity,
        RegistrationMode::Open,
    )
    .unwrap()
}

#[test]
fn capacity_must_be_a_power_of_two() {
    for bad in [0, 3, 12, 65, 128] {
        let err = Tournament::new("Copa", None, None, bad, RegistrationMode::Open).unwrap_err();
        assert_eq!(err, TournamentError::InvalidCapacity(bad));
    }
    assert!(Tournament::new("Copa", None, None, 16, RegistrationMode::Open).is_ok());
}

#[test]
fn slug_is_derived_from_the_name() {
    let t = Tournament::new(
        "Copa da Varzea 2026!",
        None,
        None,
        32,
        RegistrationMode::Open,
    )
    .unwrap();
    assert_eq!(t.slug, "copa-da-varzea-2026");
}

#[test]
fn online_registration_starts_applied_and_pending() {
    let mut t = open_tournament(8);
    let id = register_team(&mut t, "Unidos da Vila").unwrap();

    let team = t.team(id).unwrap();
    assert_eq!(team.team_status, TeamStatus::Applied);
    assert_eq!(team.payment_status, PaymentStatus::Pending);
    assert_eq!(team.registration_type, RegistrationType::Online);
}

#[test]
fn manual_team_is_confirmed_with_fee_waived() {
    let mut t = open_tournament(8);
    let id = add_team_manual(&mut t, "Convidados FC").unwrap();

    let team = t.team(id).unwrap();
    assert_eq!(team.team_status, TeamStatus::Confirmed);
    assert_eq!(team.payment_status, PaymentStatus::Waived);
    assert_eq!(team.registration_type, RegistrationType::Manual);
}

#[test]
fn closed_mode_rejects_public_registration_only() {
    let mut t = Tournament::new(
        "Copa Fechada",
        None,
        None,
        8,
        RegistrationMode::Closed,
    )
    .unwrap();

    assert_eq!(
        register_team(&mut t, "Penetra FC"),
        Err(TournamentError::RegistrationClosed)
    );
    // Admins can still fill the roster by hand.
    assert!(add_team_manual(&mut t, "Convidados FC").is_ok());
}

#[test]
fn duplicate_names_are_rejected_case_insensitively() {
    let mut t = open_tournament(8);
    register_team(&mut t, "Flamengo da Rua").unwrap();

    assert_eq!(
        register_team(&mut t, "  flamengo da rua "),
        Err(TournamentError::DuplicateTeamName)
    );
    assert_eq!(
        add_team_manual(&mut t, "FLAMENGO DA RUA"),
        Err(TournamentError::DuplicateTeamName)
    );
}

#[test]
fn empty_name_is_rejected() {
    let mut t = open_tournament(8);
    assert_eq!(register_team(&mut t, "   "), Err(TournamentError::InvalidName));
}

#[test]
fn shortlist_then_payment_confirms() {
    let mut t = open_tournament(8);
    let id = register_team(&mut t, "Unidos da Vila").unwrap();

    shortlist_team(&mut t, id).unwrap();
    assert_eq!(t.team(id).unwrap().team_status, TeamStatus::InGoal);

    mark_team_paid(&mut t, id).unwrap();
    let team = t.team(id).unwrap();
    assert_eq!(team.team_status, TeamStatus::Confirmed);
    assert_eq!(team.payment_status, PaymentStatus::Paid);
}

#[test]
fn wrong_status_transitions_are_rejected() {
    let mut t = open_tournament(8);
    let id = register_team(&mut t, "Unidos da Vila").unwrap();
    reject_team(&mut t, id).unwrap();

    assert_eq!(
        shortlist_team(&mut t, id),
        Err(TournamentError::InvalidTeamStatus)
    );
    assert_eq!(
        confirm_team(&mut t, id),
        Err(TournamentError::InvalidTeamStatus)
    );
    assert_eq!(t.team(id).unwrap().team_status, TeamStatus::Rejected);
}

#[test]
fn confirmation_is_capped_at_bracket_capacity() {
    let mut t = open_tournament(2);
    add_team_manual(&mut t, "Azul").unwrap();
    add_team_manual(&mut t, "Verde").unwrap();

    let third = register_team(&mut t, "Rubro").unwrap();
    assert_eq!(confirm_team(&mut t, third), Err(TournamentError::RosterFull));
    assert_eq!(
        add_team_manual(&mut t, "Alvinegro"),
        Err(TournamentError::RosterFull)
    );
}

#[test]
fn payment_on_a_full_roster_keeps_the_team_shortlisted() {
    let mut t = open_tournament(2);
    add_team_manual(&mut t, "Azul").unwrap();
    add_team_manual(&mut t, "Verde").unwrap();
    let third = register_team(&mut t, "Rubro").unwrap();
    shortlist_team(&mut t, third).unwrap();

    mark_team_paid(&mut t, third).unwrap();
    let team = t.team(third).unwrap();
    assert_eq!(team.payment_status, PaymentStatus::Paid);
    assert_eq!(team.team_status, TeamStatus::InGoal);
}

#[test]
fn roster_is_locked_once_the_bracket_exists() {
    let mut t = open_tournament(4);
    add_team_manual(&mut t, "Azul").unwrap();
    add_team_manual(&mut t, "Verde").unwrap();
    let applied = register_team(&mut t, "Rubro").unwrap();
    generate_bracket(&mut t).unwrap();

    assert_eq!(
        register_team(&mut t, "Atrasados FC"),
        Err(TournamentError::AlreadyGenerated)
    );
    assert_eq!(
        add_team_manual(&mut t, "Atrasados FC"),
        Err(TournamentError::AlreadyGenerated)
    );
    assert_eq!(
        confirm_team(&mut t, applied),
        Err(TournamentError::AlreadyGenerated)
    );
    assert_eq!(
        mark_team_paid(&mut t, applied),
        Err(TournamentError::AlreadyGenerated)
    );
}

#[test]
fn unknown_team_is_not_found() {
    let mut t = open_tournament(8);
    let ghost = Uuid::new_v4();
    assert_eq!(
        shortlist_team(&mut t, ghost),
        Err(TournamentError::TeamNotFound(ghost))
    );
}
