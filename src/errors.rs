//! Error types for rolemap.
//!
//! Only [`ConfigurationError`] crosses the library boundary as a hard failure.
//! It is raised while building registries or validating configuration, never
//! in the middle of a classification pass.
//!
//! [`CriterionFault`] is what a criterion predicate returns when it cannot
//! evaluate an element. The engine logs it and treats it as "no contribution",
//! so faults are visible in logs and counters but never abort a pass.
//!
//! # Example
//!
//! ```rust
//! use rolemap::errors::ConfigurationError;
//!
//! let err = ConfigurationError::unknown_criterion("domain.naming.typo");
//! assert!(err.to_string().contains("domain.naming.typo"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Setup-time failure: registry construction, profile loading or config validation.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Two criteria in the same registry share a name
    #[error("Duplicate criterion name: {name}")]
    DuplicateCriterion { name: String },

    /// A profile override references a criterion no registry knows about
    #[error("Override references unknown criterion: {name}")]
    UnknownCriterion { name: String },

    /// A default or overridden priority lies outside the documented range
    #[error("Priority {priority} for criterion '{name}' is out of range ({min}..={max})")]
    PriorityOutOfRange {
        name: String,
        priority: i32,
        min: i32,
        max: i32,
    },

    /// The unclassified floor lies outside the documented range
    #[error("Minimum priority floor {floor} is out of range ({min}..={max})")]
    InvalidPriorityFloor { floor: i32, min: i32, max: i32 },

    /// The weighted fallback threshold must be positive
    #[error("Secondary classification threshold must be at least 1, got {score}")]
    InvalidSecondaryMinScore { score: u32 },

    /// An exclude glob could not be compiled
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A profile name that is not one of the built-in profiles
    #[error("Unknown profile: '{0}'. Valid options: default, strict, annotation-only, repository-aware")]
    UnknownProfile(String),

    /// A role name in an explicit override that does not parse
    #[error("Invalid role '{role}' for '{element}'")]
    InvalidRole { element: String, role: String },

    /// A criterion declares a role outside the roles its registry classifies
    #[error("Criterion '{name}' targets role {role} which does not belong to the {registry} registry")]
    ForeignRole {
        name: String,
        role: String,
        registry: String,
    },

    /// Deserialization failure in a TOML or YAML document
    #[error("Failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// A profile or config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Several problems found in one validation run
    #[error("{} configuration errors: {}", .errors.len(), join_messages(.errors))]
    Multiple { errors: Vec<ConfigurationError> },
}

fn join_messages(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigurationError {
    pub fn duplicate_criterion(name: impl Into<String>) -> Self {
        Self::DuplicateCriterion { name: name.into() }
    }

    pub fn unknown_criterion(name: impl Into<String>) -> Self {
        Self::UnknownCriterion { name: name.into() }
    }

    pub fn parse(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Failure of a single criterion on a single element.
///
/// Never escalates: the engine converts it into zero contributions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CriterionFault {
    pub message: String,
}

impl CriterionFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
