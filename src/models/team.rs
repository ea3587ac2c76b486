//! TournamentTeam: a club's entry in one tournament.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team entry (scoped to one tournament).
pub type TeamEntryId = Uuid;

/// Where a team entry is in the registration/competition lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    /// Registered through the public form, not yet reviewed.
    Applied,
    /// Shortlisted by an admin; spot reserved while the entry fee is pending.
    InGoal,
    /// In the draw pool.
    Confirmed,
    /// Turned away by an admin.
    Rejected,
    /// Lost a bracket match.
    Eliminated,
}

/// Entry-fee state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    /// Fee handled off-platform (manual entries).
    Waived,
}

/// How the entry was created.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationType {
    /// Self-registered through the public form.
    Online,
    /// Added directly by an admin.
    Manual,
}

/// A team's entry in a tournament: registration status, payment, and origin.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentTeam {
    pub id: TeamEntryId,
    pub name: String,
    pub team_status: TeamStatus,
    pub payment_status: PaymentStatus,
    pub registration_type: RegistrationType,
    pub registered_at: DateTime<Utc>,
}

impl TournamentTeam {
    /// Entry created through the public registration form.
    pub fn new_online(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_status: TeamStatus::Applied,
            payment_status: PaymentStatus::Pending,
            registration_type: RegistrationType::Online,
            registered_at: Utc::now(),
        }
    }

    /// Entry added directly by an admin; confirmed up front, fee waived.
    pub fn new_manual(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_status: TeamStatus::Confirmed,
            payment_status: PaymentStatus::Waived,
            registration_type: RegistrationType::Manual,
            registered_at: Utc::now(),
        }
    }

    /// Confirmed and paid (or fee waived): may be seeded into a bracket.
    pub fn is_eligible_seed(&self) -> bool {
        self.team_status == TeamStatus::Confirmed && self.payment_status != PaymentStatus::Pending
    }

    /// Mark the team as knocked out of the bracket.
    pub fn eliminate(&mut self) {
        self.team_status = TeamStatus::Eliminated;
    }
}
