//! Criteria, registries, evaluation and decision.
//!
//! A pass through this module looks like:
//!
//! 1. [`Registry::build`] applies profile priorities to a criteria catalog.
//! 2. [`engine::evaluate`] runs every enabled criterion on every element and
//!    collects [`Contribution`]s.
//! 3. [`DecisionPolicy::decide`] reduces each element's contributions to one
//!    [`Outcome`], consulting a [`CompatibilityPolicy`].
//! 4. [`WeightedSignalClassifier`] gives UNCLASSIFIED core types a second,
//!    low-confidence chance.

pub mod cancel;
pub mod compatibility;
pub mod confidence;
pub mod context;
pub mod contribution;
pub mod criterion;
pub mod decision;
pub mod engine;
pub mod evidence;
pub mod outcome;
pub mod registry;
pub mod results;
pub mod role;
pub mod secondary;

pub use cancel::{CancelSignal, Cancelled, Uninterrupted};
pub use compatibility::{Compatibility, CompatibilityPolicy, CompatibilityTable};
pub use confidence::Confidence;
pub use context::{BoundaryContext, DomainContext};
pub use contribution::{Contribution, ContributionOrigin, EXPLICIT_OVERRIDE_CRITERION};
pub use criterion::{
    Criterion, CriterionResult, Match, DEFAULT_PRIORITY_FLOOR, DISABLED_PRIORITY,
    EXPLICIT_OVERRIDE_PRIORITY, MAX_PRIORITY, MIN_PRIORITY,
};
pub use decision::DecisionPolicy;
pub use engine::{EngineOptions, Evaluation};
pub use evidence::{Evidence, EvidenceKind};
pub use outcome::{Conflict, ConflictSeverity, Outcome, Status};
pub use registry::{RegisteredCriterion, Registry};
pub use results::{
    ClassificationResults, ClassificationSummary, Diagnostic, DiagnosticKind, DomainOutcomes,
    PortOutcomes,
};
pub use role::{Direction, Role, RoleFamily};
pub use secondary::{WeightedSignalClassifier, DEFAULT_SECONDARY_MIN_SCORE, SECONDARY_CRITERION};
