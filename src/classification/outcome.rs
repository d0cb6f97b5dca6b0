use super::compatibility::Compatibility;
use super::confidence::Confidence;
use super::contribution::Contribution;
use super::role::Role;
use crate::graph::ElementId;
use serde::Serialize;
use std::fmt;

/// How a decision ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// One role won and nothing else competed
    Success,
    /// One role won; losing roles are kept in [`Outcome::conflicts`]
    SuccessWithConflicts,
    /// Incompatible roles tied at the top priority; no role is assigned
    Conflict,
    /// No contribution reached the priority floor
    Unclassified,
}

impl Status {
    /// `true` when a role was assigned
    pub fn is_classified(self) -> bool {
        matches!(self, Status::Success | Status::SuccessWithConflicts)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::SuccessWithConflicts => "SUCCESS_WITH_CONFLICTS",
            Status::Conflict => "CONFLICT",
            Status::Unclassified => "UNCLASSIFIED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a losing role, derived from its compatibility with the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictSeverity {
    /// Competing role is compatible with the winner
    Warning,
    /// Competing role is incompatible with the winner
    Error,
}

/// A competing role that did not win.
///
/// For a [`Status::Conflict`] outcome no role is assigned, and conflicts are
/// recorded against the top-ranked representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub role: Role,
    /// Criterion that voted for `role`
    pub criterion: String,
    pub priority: i32,
    pub confidence: Confidence,
    pub compatibility: Compatibility,
    pub severity: ConflictSeverity,
    /// Rendered for diagnostics
    pub message: String,
}

impl Conflict {
    pub(crate) fn against(winner: &Contribution, other: &Contribution, compatibility: Compatibility) -> Self {
        let severity = match compatibility {
            Compatibility::Compatible => ConflictSeverity::Warning,
            Compatibility::Incompatible => ConflictSeverity::Error,
        };
        let message = if other.priority == winner.priority
            && compatibility == Compatibility::Incompatible
        {
            format!(
                "{} ({}, priority {}) contradicts {} ({}, priority {}) at equal priority",
                other.role, other.criterion, other.priority, winner.role, winner.criterion, winner.priority
            )
        } else {
            format!(
                "{} ({}, priority {}) is {} with winning {} (priority {})",
                other.role,
                other.criterion,
                other.priority,
                compatibility,
                winner.role,
                winner.priority
            )
        };
        Self {
            role: other.role,
            criterion: other.criterion.clone(),
            priority: other.priority,
            confidence: other.confidence,
            compatibility,
            severity,
            message,
        }
    }
}

/// Terminal classification of one element.
///
/// `winning_role`, `confidence` and `winning_criterion` are all set or all
/// `None`; they are set exactly when [`Status::is_classified`] holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub element_id: ElementId,
    pub status: Status,
    pub winning_role: Option<Role>,
    pub confidence: Option<Confidence>,
    pub winning_criterion: Option<String>,
    /// Every contribution, ranked best first, including those below the floor
    pub contributions: Vec<Contribution>,
    pub conflicts: Vec<Conflict>,
}

impl Outcome {
    pub fn is_classified(&self) -> bool {
        self.status.is_classified()
    }

    /// Any losing role was recorded, whatever the status
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// The contribution that decided the outcome
    pub fn winner(&self) -> Option<&Contribution> {
        let criterion = self.winning_criterion.as_deref()?;
        self.contributions
            .iter()
            .find(|c| c.criterion == criterion && Some(c.role) == self.winning_role)
    }

    /// Human-readable reason for the status
    pub fn justification(&self) -> String {
        match self.status {
            Status::Success | Status::SuccessWithConflicts => self
                .winner()
                .map(|c| c.justification.clone())
                .unwrap_or_else(|| "Classified".to_string()),
            Status::Conflict => {
                let roles: Vec<String> = self
                    .conflicts
                    .iter()
                    .filter(|c| c.severity == ConflictSeverity::Error)
                    .map(|c| c.role.to_string())
                    .collect();
                format!("Incompatible roles at equal priority: {}", roles.join(", "))
            }
            Status::Unclassified if self.contributions.is_empty() => {
                "No criterion matched".to_string()
            }
            Status::Unclassified => "No contribution reached the priority floor".to_string(),
        }
    }
}
