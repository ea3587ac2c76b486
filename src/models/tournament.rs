//! Tournament, its roster, and its bracket.

use crate::models::bracket_match::TournamentMatch;
use crate::models::team::{TeamEntryId, TeamStatus, TournamentTeam};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Bracket already exists; generation and roster changes are locked.
    AlreadyGenerated,
    /// Fewer eligible (confirmed, paid or waived) teams than the format needs.
    InsufficientTeams { eligible: usize, minimum: usize },
    /// Match not part of this tournament.
    MatchNotFound,
    /// Match already has a recorded winner.
    MatchAlreadyDecided,
    /// Match is missing one or both teams.
    MatchNotReady,
    /// Scores tied and the shoot-out result is missing or also tied.
    TieNotResolved,
    /// Negative score or penalty count.
    InvalidScore,
    /// Bracket capacity must be a power of two between 2 and 64.
    InvalidCapacity(u32),
    /// Empty tournament or team name.
    InvalidName,
    /// Another tournament already uses this slug.
    DuplicateSlug,
    /// Registration mode is closed.
    RegistrationClosed,
    /// A team with this name already registered (names are unique, case-insensitive).
    DuplicateTeamName,
    /// Team entry not found in this tournament.
    TeamNotFound(TeamEntryId),
    /// Team is not in a status that allows this transition.
    InvalidTeamStatus,
    /// Confirmed teams already at bracket capacity.
    RosterFull,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::AlreadyGenerated => write!(f, "Bracket already generated"),
            TournamentError::InsufficientTeams { eligible, minimum } => {
                write!(f, "Need at least {} confirmed teams to draw a bracket (have {})", minimum, eligible)
            }
            TournamentError::MatchNotFound => write!(f, "Match not found"),
            TournamentError::MatchAlreadyDecided => write!(f, "Match already has a recorded winner"),
            TournamentError::MatchNotReady => write!(f, "Match is still waiting for its teams"),
            TournamentError::TieNotResolved => {
                write!(f, "Drawn match needs a decisive penalty shoot-out result")
            }
            TournamentError::InvalidScore => {
                write!(f, "Scores and penalties must be non-negative integers")
            }
            TournamentError::InvalidCapacity(n) => {
                write!(f, "Unsupported bracket capacity {} (must be a power of two between 2 and 64)", n)
            }
            TournamentError::InvalidName => write!(f, "Name must not be empty"),
            TournamentError::DuplicateSlug => write!(f, "A tournament with this slug already exists"),
            TournamentError::RegistrationClosed => write!(f, "Registration is closed for this tournament"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already registered"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::InvalidTeamStatus => write!(f, "Team is not in a status that allows this action"),
            TournamentError::RosterFull => write!(f, "Confirmed teams already fill the bracket"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Whether the bracket has been drawn yet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStatus {
    #[default]
    NotGenerated,
    Generated,
}

/// Whether clubs can still register themselves.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    #[default]
    Open,
    Closed,
}

/// One cup competition: roster of team entries plus the bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// URL handle, unique across tournaments.
    pub slug: String,
    pub name: String,
    pub season: String,
    /// Bracket capacity (power of two).
    pub max_teams: u32,
    pub registration_mode: RegistrationMode,
    pub bracket_status: BracketStatus,
    pub teams: Vec<TournamentTeam>,
    pub matches: Vec<TournamentMatch>,
    pub created_at: DateTime<Utc>,
}

/// Compact listing view of a tournament (for the index endpoint).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub slug: String,
    pub name: String,
    pub season: String,
    pub max_teams: u32,
    pub registration_mode: RegistrationMode,
    pub bracket_status: BracketStatus,
    pub team_count: usize,
    pub confirmed_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament with an empty roster and no bracket.
    /// Slug defaults to a slugified name, season to the current year.
    pub fn new(
        name: impl Into<String>,
        slug: Option<String>,
        season: Option<String>,
        max_teams: u32,
        registration_mode: RegistrationMode,
    ) -> Result<Self, TournamentError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }
        if !max_teams.is_power_of_two() || !(2..=64).contains(&max_teams) {
            return Err(TournamentError::InvalidCapacity(max_teams));
        }
        let slug = slugify(slug.as_deref().unwrap_or(&name));
        if slug.is_empty() {
            return Err(TournamentError::InvalidName);
        }
        let season = season.unwrap_or_else(|| Utc::now().year().to_string());
        Ok(Self {
            id: Uuid::new_v4(),
            slug,
            name,
            season,
            max_teams,
            registration_mode,
            bracket_status: BracketStatus::NotGenerated,
            teams: Vec::new(),
            matches: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn team(&self, id: TeamEntryId) -> Option<&TournamentTeam> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_mut(&mut self, id: TeamEntryId) -> Option<&mut TournamentTeam> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn team_name(&self, id: TeamEntryId) -> Option<&str> {
        self.team(id).map(|t| t.name.as_str())
    }

    /// Name collision check (case-insensitive, matching registration rules).
    pub fn has_team_named(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn confirmed_count(&self) -> usize {
        self.teams
            .iter()
            .filter(|t| t.team_status == TeamStatus::Confirmed)
            .count()
    }

    /// Match at a bracket position; `(round, match_number)` is unique.
    pub fn match_at_mut(&mut self, round: u32, match_number: u32) -> Option<&mut TournamentMatch> {
        self.matches
            .iter_mut()
            .find(|m| m.round == round && m.match_number == match_number)
    }

    /// Number of rounds in the generated bracket (0 before generation).
    pub fn total_rounds(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id,
            slug: self.slug.clone(),
            name: self.name.clone(),
            season: self.season.clone(),
            max_teams: self.max_teams,
            registration_mode: self.registration_mode,
            bracket_status: self.bracket_status,
            team_count: self.teams.len(),
            confirmed_count: self.confirmed_count(),
            created_at: self.created_at,
        }
    }
}

/// URL handle: lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_dash = true;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
