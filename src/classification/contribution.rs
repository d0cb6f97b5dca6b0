use super::confidence::Confidence;
use super::criterion::EXPLICIT_OVERRIDE_PRIORITY;
use super::evidence::{Evidence, EvidenceKind};
use super::role::Role;
use crate::graph::ElementId;
use serde::Serialize;
use std::cmp::Ordering;

/// Criterion name recorded on injected explicit overrides.
pub const EXPLICIT_OVERRIDE_CRITERION: &str = "explicit.configuration";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionOrigin {
    Criterion,
    ExplicitOverride,
    /// Weighted fallback applied after the domain stage
    Secondary,
}

/// One criterion's vote for a role on one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub element_id: ElementId,
    pub role: Role,
    pub priority: i32,
    pub confidence: Confidence,
    pub criterion: String,
    pub justification: String,
    pub evidence: Vec<Evidence>,
    pub origin: ContributionOrigin,
}

impl Contribution {
    /// Externally configured role, injected above every registered criterion.
    pub fn explicit_override(element_id: ElementId, role: Role) -> Self {
        Self {
            justification: format!("Configured explicitly as {}", role),
            element_id,
            role,
            priority: EXPLICIT_OVERRIDE_PRIORITY,
            confidence: Confidence::Explicit,
            criterion: EXPLICIT_OVERRIDE_CRITERION.to_string(),
            evidence: vec![Evidence::new(
                EvidenceKind::Configuration,
                "explicit classification entry",
            )],
            origin: ContributionOrigin::ExplicitOverride,
        }
    }

    pub fn is_explicit_override(&self) -> bool {
        self.origin == ContributionOrigin::ExplicitOverride
    }

    /// Total ranking order: higher priority, then higher confidence, then
    /// criterion name ascending, then role. `Less` means ranked first.
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.confidence.cmp(&self.confidence))
            .then_with(|| self.criterion.cmp(&other.criterion))
            .then_with(|| self.role.cmp(&other.role))
    }
}
