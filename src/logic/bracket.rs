//! Bracket generation: seed confirmed teams into a single-elimination tree.

use crate::models::{
    BracketSlot, BracketStatus, Slot, TeamEntryId, Tournament, TournamentError, TournamentMatch,
};
use rand::seq::SliceRandom;

/// Minimum number of eligible teams for a draw.
const MIN_TEAMS: usize = 2;

/// Draw the bracket for a tournament.
///
/// Eligible teams are shuffled once (the draw; later rounds are never
/// re-drawn) and paired into round-1 matches. Every later round is
/// pre-created empty, each match carrying an `advances_to` pointer so
/// match `k` of round `r` feeds side A (odd `k`) or B (even `k`) of match
/// `ceil(k / 2)` in round `r + 1`.
///
/// Bracket size is the smallest power of two that fits the seeds. When the
/// seed count falls short of it, the first `size - seeds` matches in draw
/// order take a single team: a bye, auto-decided here without a scoreline.
/// Byes never reach half the first round, so no match is left empty and
/// every downstream slot eventually fills.
///
/// Nothing is written until the whole tree is built; the matches and the
/// `generated` status are published together.
pub fn generate_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.bracket_status == BracketStatus::Generated {
        return Err(TournamentError::AlreadyGenerated);
    }
    let mut seeds: Vec<TeamEntryId> = tournament
        .teams
        .iter()
        .filter(|t| t.is_eligible_seed())
        .map(|t| t.id)
        .collect();
    if seeds.len() < MIN_TEAMS {
        return Err(TournamentError::InsufficientTeams {
            eligible: seeds.len(),
            minimum: MIN_TEAMS,
        });
    }
    seeds.shuffle(&mut rand::thread_rng());

    let size = seeds.len().next_power_of_two();
    let rounds = size.trailing_zeros();
    let byes = size - seeds.len();

    let mut matches: Vec<TournamentMatch> = Vec::with_capacity(size - 1);

    // Round 1: consume the draw order pairwise; the first `byes` matches
    // take only one team.
    let mut draw = seeds.into_iter();
    for number in 1..=(size / 2) as u32 {
        let mut m = TournamentMatch::new(1, number, advance_target(1, number, rounds));
        m.team_a = draw.next();
        if number as usize > byes {
            m.team_b = draw.next();
        }
        matches.push(m);
    }

    // Later rounds: placeholders, filled one side at a time by the advancer.
    for round in 2..=rounds {
        for number in 1..=(size >> round) as u32 {
            matches.push(TournamentMatch::new(
                round,
                number,
                advance_target(round, number, rounds),
            ));
        }
    }

    // Byes advance at the draw: the sole team wins without a scoreline.
    let mut placements: Vec<(TeamEntryId, BracketSlot)> = Vec::new();
    for m in matches
        .iter_mut()
        .filter(|m| m.round == 1 && m.team_b.is_none())
    {
        if let Some(team) = m.team_a {
            m.winner_team_id = Some(team);
            if let Some(target) = m.advances_to {
                placements.push((team, target));
            }
        }
    }
    for (team, target) in placements {
        if let Some(next) = matches
            .iter_mut()
            .find(|m| m.round == target.round && m.match_number == target.match_number)
        {
            next.assign(target.slot, team);
        }
    }

    tournament.matches = matches;
    tournament.bracket_status = BracketStatus::Generated;
    Ok(())
}

/// Where the winner of a match goes. The final feeds nowhere.
fn advance_target(round: u32, match_number: u32, total_rounds: u32) -> Option<BracketSlot> {
    if round >= total_rounds {
        return None;
    }
    let slot = if match_number % 2 == 1 { Slot::A } else { Slot::B };
    Some(BracketSlot {
        round: round + 1,
        match_number: (match_number + 1) / 2,
        slot,
    })
}
