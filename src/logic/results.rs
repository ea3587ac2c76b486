//! Result recording and winner advancement.

use crate::models::{MatchId, Slot, Tournament, TournamentError};
use chrono::Utc;

/// Record a played match: validate, pick the winner, eliminate the loser,
/// and place the winner into its next-round slot.
///
/// The higher score wins outright; a drawn game goes to the penalty
/// shoot-out, which must be present and decisive. Shoot-out numbers are
/// stored only when they decided the match.
///
/// Every check runs before the first write, so a rejected submission leaves
/// the tournament exactly as it was. Placement only moves the winner's team
/// reference downstream; the next match still needs its own submission.
pub fn record_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: i64,
    score_b: i64,
    penalties_a: Option<i64>,
    penalties_b: Option<i64>,
) -> Result<(), TournamentError> {
    let score_a = non_negative(score_a)?;
    let score_b = non_negative(score_b)?;
    let penalties_a = penalties_a.map(non_negative).transpose()?;
    let penalties_b = penalties_b.map(non_negative).transpose()?;

    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound)?;
    let m = &tournament.matches[idx];
    if m.winner_team_id.is_some() {
        return Err(TournamentError::MatchAlreadyDecided);
    }
    let (team_a, team_b) = match (m.team_a, m.team_b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(TournamentError::MatchNotReady),
    };

    let drawn = score_a == score_b;
    let winner_slot = if !drawn {
        if score_a > score_b { Slot::A } else { Slot::B }
    } else {
        match (penalties_a, penalties_b) {
            (Some(pa), Some(pb)) if pa != pb => {
                if pa > pb {
                    Slot::A
                } else {
                    Slot::B
                }
            }
            _ => return Err(TournamentError::TieNotResolved),
        }
    };
    let (winner, loser) = match winner_slot {
        Slot::A => (team_a, team_b),
        Slot::B => (team_b, team_a),
    };
    if tournament.team(winner).is_none() {
        return Err(TournamentError::TeamNotFound(winner));
    }
    if tournament.team(loser).is_none() {
        return Err(TournamentError::TeamNotFound(loser));
    }

    // All checks passed; write the result.
    let m = &mut tournament.matches[idx];
    m.score_a = Some(score_a);
    m.score_b = Some(score_b);
    if drawn {
        m.penalties_a = penalties_a;
        m.penalties_b = penalties_b;
    }
    m.winner_team_id = Some(winner);
    m.played_at = Some(Utc::now());
    let advances_to = m.advances_to;

    if let Some(team) = tournament.team_mut(loser) {
        team.eliminate();
    }

    if let Some(target) = advances_to {
        if let Some(next) = tournament.match_at_mut(target.round, target.match_number) {
            next.assign(target.slot, winner);
        }
    }

    Ok(())
}

fn non_negative(value: i64) -> Result<u32, TournamentError> {
    u32::try_from(value).map_err(|_| TournamentError::InvalidScore)
}
