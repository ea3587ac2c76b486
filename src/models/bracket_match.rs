//! TournamentMatch: one slot in the single-elimination bracket.

use crate::models::team::TeamEntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of a match a team occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    A,
    B,
}

/// Where a match's winner goes: round, match number, and side of the target.
///
/// Stored on each match at generation time instead of being recomputed from
/// the numbering scheme, so the advancer only follows the pointer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub round: u32,
    pub match_number: u32,
    pub slot: Slot,
}

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Neither team known yet (downstream placeholder).
    Empty,
    /// One team placed, awaiting the sibling match's winner.
    HalfReady,
    /// Both teams placed, result pending.
    Ready,
    /// Winner recorded. Terminal.
    Decided,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Empty => "empty",
            MatchPhase::HalfReady => "half_ready",
            MatchPhase::Ready => "ready",
            MatchPhase::Decided => "decided",
        }
    }
}

/// A single bracket slot. Created only during generation, never deleted.
/// `(round, match_number)` is unique within a tournament by construction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentMatch {
    pub id: MatchId,
    /// 1 = first round, increasing toward the final.
    pub round: u32,
    /// 1-based position within the round.
    pub match_number: u32,
    pub team_a: Option<TeamEntryId>,
    pub team_b: Option<TeamEntryId>,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// Shoot-out results; set only when a drawn game needed one.
    pub penalties_a: Option<u32>,
    pub penalties_b: Option<u32>,
    /// Set exactly once; terminal for the match.
    pub winner_team_id: Option<TeamEntryId>,
    /// `None` for the final.
    pub advances_to: Option<BracketSlot>,
    pub played_at: Option<DateTime<Utc>>,
}

impl TournamentMatch {
    pub fn new(round: u32, match_number: u32, advances_to: Option<BracketSlot>) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            team_a: None,
            team_b: None,
            score_a: None,
            score_b: None,
            penalties_a: None,
            penalties_b: None,
            winner_team_id: None,
            advances_to,
            played_at: None,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        if self.winner_team_id.is_some() {
            MatchPhase::Decided
        } else {
            match (self.team_a, self.team_b) {
                (Some(_), Some(_)) => MatchPhase::Ready,
                (None, None) => MatchPhase::Empty,
                _ => MatchPhase::HalfReady,
            }
        }
    }

    /// Place a team into one side of this match.
    pub fn assign(&mut self, slot: Slot, team: TeamEntryId) {
        match slot {
            Slot::A => self.team_a = Some(team),
            Slot::B => self.team_b = Some(team),
        }
    }
}
