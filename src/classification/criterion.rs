//! Criteria as data: a name, a default priority, candidate roles, a confidence
//! tier and a pure predicate closure.

use super::confidence::Confidence;
use super::evidence::Evidence;
use super::role::Role;
use crate::errors::CriterionFault;
use crate::graph::ElementNode;
use std::fmt;
use std::sync::Arc;

/// Priority that turns a criterion off.
pub const DISABLED_PRIORITY: i32 = -1;
pub const MIN_PRIORITY: i32 = DISABLED_PRIORITY;
pub const MAX_PRIORITY: i32 = 999;
/// Priority of externally configured roles; above every registrable value.
pub const EXPLICIT_OVERRIDE_PRIORITY: i32 = MAX_PRIORITY + 1;
/// Minimum priority a contribution needs to become a winner.
pub const DEFAULT_PRIORITY_FLOOR: i32 = 70;

/// A positive predicate result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Chosen candidate role; `None` means the criterion's first candidate
    pub role: Option<Role>,
    pub justification: String,
    pub evidence: Vec<Evidence>,
}

impl Match {
    pub fn new(justification: impl Into<String>) -> Self {
        Self {
            role: None,
            justification: justification.into(),
            evidence: Vec::new(),
        }
    }

    pub fn as_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }
}

pub type CriterionResult = Result<Option<Match>, CriterionFault>;

type Predicate<C> = dyn Fn(&ElementNode, &C) -> CriterionResult + Send + Sync;

/// A named, weighted rule evaluated against one element within context `C`.
pub struct Criterion<C> {
    name: String,
    default_priority: i32,
    candidate_roles: Vec<Role>,
    confidence: Confidence,
    predicate: Arc<Predicate<C>>,
}

impl<C> Criterion<C> {
    pub fn new<F>(
        name: impl Into<String>,
        default_priority: i32,
        candidate_roles: &[Role],
        confidence: Confidence,
        predicate: F,
    ) -> Self
    where
        F: Fn(&ElementNode, &C) -> CriterionResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            default_priority,
            candidate_roles: candidate_roles.to_vec(),
            confidence,
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_priority(&self) -> i32 {
        self.default_priority
    }

    pub fn candidate_roles(&self) -> &[Role] {
        &self.candidate_roles
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn evaluate(&self, node: &ElementNode, context: &C) -> CriterionResult {
        (self.predicate)(node, context)
    }

    /// Resolves the role of a match, rejecting roles the criterion never declared.
    pub fn resolve_role(&self, matched: &Match) -> Result<Role, CriterionFault> {
        match matched.role {
            Some(role) if self.candidate_roles.contains(&role) => Ok(role),
            Some(role) => Err(CriterionFault::new(format!(
                "matched undeclared role {}",
                role
            ))),
            None => self
                .candidate_roles
                .first()
                .copied()
                .ok_or_else(|| CriterionFault::new("no candidate role declared")),
        }
    }
}

impl<C> Clone for Criterion<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            default_priority: self.default_priority,
            candidate_roles: self.candidate_roles.clone(),
            confidence: self.confidence,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Criterion<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criterion")
            .field("name", &self.name)
            .field("default_priority", &self.default_priority)
            .field("candidate_roles", &self.candidate_roles)
            .field("confidence", &self.confidence)
            .finish_non_exhaustive()
    }
}
