//! Data structures for the cup portal: tournaments, team entries, bracket matches.

mod bracket_match;
mod team;
mod tournament;

pub use bracket_match::{BracketSlot, MatchId, MatchPhase, Slot, TournamentMatch};
pub use team::{PaymentStatus, RegistrationType, TeamEntryId, TeamStatus, TournamentTeam};
pub use tournament::{
    slugify, BracketStatus, RegistrationMode, Tournament, TournamentError, TournamentId,
    TournamentSummary,
};
