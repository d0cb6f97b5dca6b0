//! Immutable, ordered catalog of criteria with profile priorities applied.
//!
//! A registry is built once from a default catalog and a name→priority
//! override map. All validation happens here so evaluation never has to
//! second-guess a priority.

use super::criterion::{Criterion, DISABLED_PRIORITY, MAX_PRIORITY, MIN_PRIORITY};
use super::role::RoleFamily;
use crate::errors::{ConfigurationError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// A criterion together with its effective priority.
#[derive(Debug, Clone)]
pub struct RegisteredCriterion<C> {
    pub criterion: Criterion<C>,
    pub priority: i32,
}

impl<C> RegisteredCriterion<C> {
    pub fn is_enabled(&self) -> bool {
        self.priority != DISABLED_PRIORITY
    }

    pub fn is_overridden(&self) -> bool {
        self.priority != self.criterion.default_priority()
    }
}

#[derive(Debug, Clone)]
pub struct Registry<C> {
    family: RoleFamily,
    entries: Vec<RegisteredCriterion<C>>,
}

impl<C> Registry<C> {
    /// Builds a registry, rejecting duplicate names, foreign roles,
    /// out-of-range priorities and overrides for unknown criteria.
    pub fn build(
        family: RoleFamily,
        defaults: Vec<Criterion<C>>,
        overrides: &BTreeMap<String, i32>,
    ) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for criterion in &defaults {
            if !seen.insert(criterion.name().to_string()) {
                return Err(ConfigurationError::duplicate_criterion(criterion.name()));
            }
            validate_priority(criterion.name(), criterion.default_priority())?;
            if let Some(role) = criterion
                .candidate_roles()
                .iter()
                .find(|role| role.family() != family)
            {
                return Err(ConfigurationError::ForeignRole {
                    name: criterion.name().to_string(),
                    role: role.to_string(),
                    registry: family.to_string(),
                });
            }
        }

        for (name, priority) in overrides {
            if !seen.contains(name) {
                return Err(ConfigurationError::unknown_criterion(name));
            }
            validate_priority(name, *priority)?;
        }

        let entries: Vec<_> = defaults
            .into_iter()
            .map(|criterion| {
                let priority = overrides
                    .get(criterion.name())
                    .copied()
                    .unwrap_or_else(|| criterion.default_priority());
                RegisteredCriterion { criterion, priority }
            })
            .collect();

        log::debug!(
            "Built {} registry: {} criteria, {} overridden, {} disabled",
            family,
            entries.len(),
            entries.iter().filter(|e| e.is_overridden()).count(),
            entries.iter().filter(|e| !e.is_enabled()).count()
        );

        Ok(Self { family, entries })
    }

    /// Registers a trusted catalog at its default priorities.
    ///
    /// Nothing is checked. Callers pass catalogs already known to build
    /// cleanly with no overrides.
    pub(crate) fn from_catalog(family: RoleFamily, defaults: Vec<Criterion<C>>) -> Self {
        let entries = defaults
            .into_iter()
            .map(|criterion| RegisteredCriterion {
                priority: criterion.default_priority(),
                criterion,
            })
            .collect();
        Self { family, entries }
    }

    pub fn family(&self) -> RoleFamily {
        self.family
    }

    /// All entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCriterion<C>> {
        self.entries.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &RegisteredCriterion<C>> {
        self.entries.iter().filter(|e| e.is_enabled())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.criterion.name() == name)
    }

    pub fn priority_of(&self, name: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| e.criterion.name() == name)
            .map(|e| e.priority)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.criterion.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_priority(name: &str, priority: i32) -> Result<()> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(())
    } else {
        Err(ConfigurationError::PriorityOutOfRange {
            name: name.to_string(),
            priority,
            min: MIN_PRIORITY,
            max: MAX_PRIORITY,
        })
    }
}
