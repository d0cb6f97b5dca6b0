//! Configuration validation with error accumulation.
//!
//! Each field check returns a stillwater [`Validation`] so that independent
//! problems accumulate instead of short-circuiting. The public
//! [`validate_config`] runs every check and only then converts the outcome
//! into a [`Result`]: a single problem is reported as itself, several as
//! [`ConfigurationError::Multiple`].
//!
//! Criterion names in priority overrides are not checked here. Custom
//! criteria are only known once a registry is built, so unknown names are
//! rejected by the registry instead.

use super::core::{ClassificationConfig, ValidatedConfig};
use super::presets::CriteriaProfile;
use crate::classification::{Role, MAX_PRIORITY, MIN_PRIORITY};
use crate::errors::{ConfigurationError, Result};
use crate::graph::ElementId;
use std::collections::BTreeMap;
use stillwater::{NonEmptyVec, Semigroup, Validation};

/// Validation that accumulates every configuration problem.
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<ConfigurationError>>;

pub fn validation_success<T>(value: T) -> ConfigValidation<T> {
    Validation::Success(value)
}

pub fn validation_failure<T>(error: ConfigurationError) -> ConfigValidation<T> {
    Validation::Failure(NonEmptyVec::new(error, Vec::new()))
}

/// Combine same-typed validations, keeping every error.
pub fn combine_validations<T>(validations: Vec<ConfigValidation<T>>) -> ConfigValidation<Vec<T>> {
    let mut successes = Vec::new();
    let mut failures: Vec<ConfigurationError> = Vec::new();

    for validation in validations {
        match validation {
            Validation::Success(value) => successes.push(value),
            Validation::Failure(errors) => failures.extend(errors),
        }
    }

    match NonEmptyVec::from_vec(failures) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(successes),
    }
}

fn map_success<T, U>(validation: ConfigValidation<T>, f: impl FnOnce(T) -> U) -> ConfigValidation<U> {
    match validation {
        Validation::Success(value) => Validation::Success(f(value)),
        Validation::Failure(errors) => Validation::Failure(errors),
    }
}

/// Pair two independent validations. Errors from both sides are kept.
fn both<A, B>(left: ConfigValidation<A>, right: ConfigValidation<B>) -> ConfigValidation<(A, B)> {
    match (left, right) {
        (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
        (Validation::Failure(errors), Validation::Success(_))
        | (Validation::Success(_), Validation::Failure(errors)) => Validation::Failure(errors),
        (Validation::Failure(left), Validation::Failure(right)) => Validation::Failure(left.combine(right)),
    }
}

/// Collapse accumulated errors at the library boundary.
pub fn run_validation<T>(validation: ConfigValidation<T>) -> Result<T> {
    match validation {
        Validation::Success(value) => Ok(value),
        Validation::Failure(errors) => {
            let mut errors = errors.into_vec();
            if errors.len() == 1 {
                Err(errors.remove(0))
            } else {
                Err(ConfigurationError::Multiple { errors })
            }
        }
    }
}

pub fn validate_config(config: &ClassificationConfig, profile: CriteriaProfile) -> Result<ValidatedConfig> {
    let priorities = profile.merged_with(&config.priority_overrides);

    let checked = both(
        both(
            validate_floor(config.min_priority),
            validate_exclude_patterns(&config.exclude),
        ),
        both(
            both(
                validate_explicit_roles(&config.explicit),
                validate_priorities(&priorities),
            ),
            validate_secondary_min_score(config.secondary_min_score),
        ),
    );
    let ((min_priority, exclude), ((explicit, ()), secondary_min_score)) = run_validation(checked)?;

    log::debug!(
        "Validated config: profile '{}', {} priorities, {} explicit, {} excludes",
        profile.name,
        priorities.len(),
        explicit.len(),
        exclude.len()
    );

    Ok(ValidatedConfig {
        profile,
        priorities,
        explicit,
        exclude,
        min_priority,
        parallel: config.parallel,
        expand_pivots: config.expand_pivots,
        infrastructure_prefixes: config.infrastructure_prefixes.clone(),
        secondary_min_score: config.secondary_classification.then_some(secondary_min_score),
        detect_anomalies: config.detect_anomalies,
    })
}

/// The floor has to be reachable by a registered criterion.
pub fn validate_floor(floor: i32) -> ConfigValidation<i32> {
    if (0..=MAX_PRIORITY).contains(&floor) {
        validation_success(floor)
    } else {
        validation_failure(ConfigurationError::InvalidPriorityFloor {
            floor,
            min: 0,
            max: MAX_PRIORITY,
        })
    }
}

/// A zero threshold would let every unclassified element through.
pub fn validate_secondary_min_score(score: u32) -> ConfigValidation<u32> {
    if score == 0 {
        validation_failure(ConfigurationError::InvalidSecondaryMinScore { score })
    } else {
        validation_success(score)
    }
}

pub fn validate_exclude_patterns(patterns: &[String]) -> ConfigValidation<Vec<glob::Pattern>> {
    let validations = patterns
        .iter()
        .map(|pattern| match glob::Pattern::new(pattern) {
            Ok(compiled) => validation_success(compiled),
            Err(source) => validation_failure(ConfigurationError::InvalidExcludePattern {
                pattern: pattern.clone(),
                source,
            }),
        })
        .collect();

    combine_validations(validations)
}

pub fn validate_explicit_roles(
    explicit: &BTreeMap<String, String>,
) -> ConfigValidation<BTreeMap<ElementId, Role>> {
    let validations = explicit
        .iter()
        .map(|(element, role)| match role.parse::<Role>() {
            Ok(parsed) => validation_success((ElementId::new(element.clone()), parsed)),
            Err(_) => validation_failure(ConfigurationError::InvalidRole {
                element: element.clone(),
                role: role.clone(),
            }),
        })
        .collect();

    map_success(combine_validations(validations), |pairs| pairs.into_iter().collect())
}

/// Every priority must lie in `MIN_PRIORITY..=MAX_PRIORITY`.
pub fn validate_priorities(priorities: &BTreeMap<String, i32>) -> ConfigValidation<()> {
    let validations = priorities
        .iter()
        .map(|(name, priority)| {
            if (MIN_PRIORITY..=MAX_PRIORITY).contains(priority) {
                validation_success(())
            } else {
                validation_failure(ConfigurationError::PriorityOutOfRange {
                    name: name.clone(),
                    priority: *priority,
                    min: MIN_PRIORITY,
                    max: MAX_PRIORITY,
                })
            }
        })
        .collect();

    map_success(combine_validations(validations), |_| ())
}
