//! Roster management: public registration, shortlisting, confirmation, payment.
//!
//! Every mutation here is rejected once the bracket exists; the roster that
//! the draw saw is the roster the bracket plays with.

use crate::models::{
    BracketStatus, PaymentStatus, RegistrationMode, TeamEntryId, TeamStatus, Tournament,
    TournamentError, TournamentTeam,
};

/// Self-registration through the public form. The entry starts `applied`
/// with the fee pending; an admin reviews it later.
pub fn register_team(
    tournament: &mut Tournament,
    name: &str,
) -> Result<TeamEntryId, TournamentError> {
    ensure_roster_open(tournament)?;
    if tournament.registration_mode != RegistrationMode::Open {
        return Err(TournamentError::RegistrationClosed);
    }
    let name = valid_name(tournament, name)?;
    let team = TournamentTeam::new_online(name);
    let id = team.id;
    tournament.teams.push(team);
    Ok(id)
}

/// Admin adds a team directly: confirmed up front, fee waived.
pub fn add_team_manual(
    tournament: &mut Tournament,
    name: &str,
) -> Result<TeamEntryId, TournamentError> {
    ensure_roster_open(tournament)?;
    let name = valid_name(tournament, name)?;
    if tournament.confirmed_count() >= tournament.max_teams as usize {
        return Err(TournamentError::RosterFull);
    }
    let team = TournamentTeam::new_manual(name);
    let id = team.id;
    tournament.teams.push(team);
    Ok(id)
}

/// Shortlist an applied team: its spot is reserved while the fee is pending.
pub fn shortlist_team(
    tournament: &mut Tournament,
    team_id: TeamEntryId,
) -> Result<(), TournamentError> {
    ensure_roster_open(tournament)?;
    let team = tournament
        .team_mut(team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))?;
    if team.team_status != TeamStatus::Applied {
        return Err(TournamentError::InvalidTeamStatus);
    }
    team.team_status = TeamStatus::InGoal;
    Ok(())
}

/// Confirm a team into the draw pool. Capped at bracket capacity.
pub fn confirm_team(
    tournament: &mut Tournament,
    team_id: TeamEntryId,
) -> Result<(), TournamentError> {
    ensure_roster_open(tournament)?;
    let confirmed = tournament.confirmed_count();
    let capacity = tournament.max_teams as usize;
    let team = tournament
        .team_mut(team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))?;
    if !matches!(team.team_status, TeamStatus::Applied | TeamStatus::InGoal) {
        return Err(TournamentError::InvalidTeamStatus);
    }
    if confirmed >= capacity {
        return Err(TournamentError::RosterFull);
    }
    team.team_status = TeamStatus::Confirmed;
    Ok(())
}

/// Turn a team away.
pub fn reject_team(
    tournament: &mut Tournament,
    team_id: TeamEntryId,
) -> Result<(), TournamentError> {
    ensure_roster_open(tournament)?;
    let team = tournament
        .team_mut(team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))?;
    if !matches!(team.team_status, TeamStatus::Applied | TeamStatus::InGoal) {
        return Err(TournamentError::InvalidTeamStatus);
    }
    team.team_status = TeamStatus::Rejected;
    Ok(())
}

/// Record that the entry fee arrived (stand-in for the payment gateway
/// callback). A shortlisted team is promoted to confirmed when the bracket
/// still has room; when it is full, the payment is recorded and the team
/// keeps waiting as shortlisted.
pub fn mark_team_paid(
    tournament: &mut Tournament,
    team_id: TeamEntryId,
) -> Result<(), TournamentError> {
    ensure_roster_open(tournament)?;
    let confirmed = tournament.confirmed_count();
    let capacity = tournament.max_teams as usize;
    let team = tournament
        .team_mut(team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))?;
    team.payment_status = PaymentStatus::Paid;
    if team.team_status == TeamStatus::InGoal {
        if confirmed < capacity {
            team.team_status = TeamStatus::Confirmed;
        } else {
            log::warn!(
                "Team {} paid but the roster is full; left shortlisted",
                team.name
            );
        }
    }
    Ok(())
}

/// Roster mutations are only allowed before the draw.
fn ensure_roster_open(tournament: &Tournament) -> Result<(), TournamentError> {
    if tournament.bracket_status == BracketStatus::Generated {
        return Err(TournamentError::AlreadyGenerated);
    }
    Ok(())
}

/// Trimmed, non-empty, not already taken.
fn valid_name<'a>(tournament: &Tournament, name: &'a str) -> Result<&'a str, TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::InvalidName);
    }
    if tournament.has_team_named(name) {
        return Err(TournamentError::DuplicateTeamName);
    }
    Ok(name)
}
