//! Which role pairs may coexist on one element.

use super::role::Role;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compatibility {
    Compatible,
    Incompatible,
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compatibility::Compatible => write!(f, "compatible"),
            Compatibility::Incompatible => write!(f, "incompatible"),
        }
    }
}

/// Symmetric relation over roles. Identical roles are always compatible.
pub trait CompatibilityPolicy: Send + Sync {
    fn compatibility(&self, a: Role, b: Role) -> Compatibility;

    fn are_compatible(&self, a: Role, b: Role) -> bool {
        self.compatibility(a, b) == Compatibility::Compatible
    }
}

/// Static table of compatible unordered pairs; every other pair is incompatible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityTable {
    compatible: BTreeSet<(Role, Role)>,
    same_direction_ports: bool,
}

impl CompatibilityTable {
    /// Nothing but identical roles coexist
    pub fn none_compatible() -> Self {
        Self::default()
    }

    /// Same-direction ports coexist, cross-direction ports never do
    pub fn boundary_default() -> Self {
        Self {
            compatible: BTreeSet::new(),
            same_direction_ports: true,
        }
    }

    pub fn domain_default() -> Self {
        Self::none_compatible()
            .with_compatible(Role::AggregateRoot, Role::Entity)
            .with_compatible(Role::Saga, Role::ApplicationService)
    }

    pub fn with_compatible(mut self, a: Role, b: Role) -> Self {
        self.compatible.insert(ordered(a, b));
        self
    }
}

fn ordered(a: Role, b: Role) -> (Role, Role) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl CompatibilityPolicy for CompatibilityTable {
    fn compatibility(&self, a: Role, b: Role) -> Compatibility {
        if a == b {
            return Compatibility::Compatible;
        }
        if self.same_direction_ports {
            if let (Some(da), Some(db)) = (a.direction(), b.direction()) {
                return if da == db {
                    Compatibility::Compatible
                } else {
                    Compatibility::Incompatible
                };
            }
        }
        if a.family() != b.family() {
            return Compatibility::Incompatible;
        }
        if self.compatible.contains(&ordered(a, b)) {
            Compatibility::Compatible
        } else {
            Compatibility::Incompatible
        }
    }
}
