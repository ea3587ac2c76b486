//! Amateur-football cup portal: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    add_team_manual, bracket_to_csv, confirm_team, generate_bracket, mark_team_paid,
    record_match_result, register_team, reject_team, shortlist_team,
};
pub use models::{
    BracketSlot, BracketStatus, MatchId, MatchPhase, PaymentStatus, RegistrationMode,
    RegistrationType, Slot, TeamEntryId, TeamStatus, Tournament, TournamentError, TournamentId,
    TournamentMatch, TournamentSummary, TournamentTeam,
};
