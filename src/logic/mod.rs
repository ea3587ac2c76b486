//! Tournament business logic: roster management, bracket generation, results.

mod bracket;
mod export;
mod registration;
mod results;

pub use bracket::generate_bracket;
pub use export::bracket_to_csv;
pub use registration::{
    add_team_manual, confirm_team, mark_team_paid, register_team, reject_team, shortlist_team,
};
pub use results::record_match_result;
