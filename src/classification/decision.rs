//! Reduces the contributions for one element into a single [`Outcome`].
//!
//! The order of the steps matters: the ranking tiebreak picks a candidate
//! winner first, and only then is every other role re-checked against it.
//! An incompatible role at exactly the winner's priority turns the element
//! into a CONFLICT instead of letting the name tiebreak hide it.

use super::compatibility::{Compatibility, CompatibilityPolicy};
use super::contribution::Contribution;
use super::criterion::DEFAULT_PRIORITY_FLOOR;
use super::outcome::{Conflict, Outcome, Status};
use super::role::Role;
use crate::graph::ElementId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionPolicy {
    floor: i32,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY_FLOOR)
    }
}

impl DecisionPolicy {
    pub fn new(floor: i32) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> i32 {
        self.floor
    }

    /// Pure and independent of the order of `contributions`.
    pub fn decide(
        &self,
        element_id: ElementId,
        mut contributions: Vec<Contribution>,
        compatibility: &dyn CompatibilityPolicy,
    ) -> Outcome {
        contributions.sort_by(Contribution::rank);

        if let Some(explicit) = contributions.iter().find(|c| c.is_explicit_override()) {
            return Outcome {
                element_id,
                status: Status::Success,
                winning_role: Some(explicit.role),
                confidence: Some(explicit.confidence),
                winning_criterion: Some(explicit.criterion.clone()),
                conflicts: Vec::new(),
                contributions,
            };
        }

        // Contributions are ranked, so the first per role is its representative.
        let mut representatives: BTreeMap<Role, &Contribution> = BTreeMap::new();
        for contribution in contributions.iter().filter(|c| c.priority >= self.floor) {
            representatives.entry(contribution.role).or_insert(contribution);
        }
        let mut ranked: Vec<&Contribution> = representatives.into_values().collect();
        ranked.sort_by(|a, b| a.rank(b));

        let Some((winner, others)) = ranked.split_first() else {
            return unclassified(element_id, contributions);
        };

        let mut contradicted = false;
        let conflicts: Vec<Conflict> = others
            .iter()
            .map(|other| {
                let compat = compatibility.compatibility(winner.role, other.role);
                if compat == Compatibility::Incompatible && other.priority == winner.priority {
                    contradicted = true;
                }
                Conflict::against(winner, other, compat)
            })
            .collect();

        let (status, winning_role, confidence, winning_criterion) = if contradicted {
            (Status::Conflict, None, None, None)
        } else if conflicts.is_empty() {
            (
                Status::Success,
                Some(winner.role),
                Some(winner.confidence),
                Some(winner.criterion.clone()),
            )
        } else {
            (
                Status::SuccessWithConflicts,
                Some(winner.role),
                Some(winner.confidence),
                Some(winner.criterion.clone()),
            )
        };

        Outcome {
            element_id,
            status,
            winning_role,
            confidence,
            winning_criterion,
            conflicts,
            contributions,
        }
    }
}

fn unclassified(element_id: ElementId, contributions: Vec<Contribution>) -> Outcome {
    Outcome {
        element_id,
        status: Status::Unclassified,
        winning_role: None,
        confidence: None,
        winning_criterion: None,
        conflicts: Vec::new(),
        contributions,
    }
}
