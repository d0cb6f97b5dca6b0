//! Default criteria catalogs.
//!
//! Criterion names are dotted identifiers (`boundary.naming.repository`,
//! `domain.semantic.saga`); profile override maps are keyed by them.

pub mod boundary;
pub mod domain;
pub mod managed;
pub mod naming;

/// Names of every default boundary criterion, in registration order.
pub fn boundary_names() -> Vec<String> {
    boundary::default_criteria()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

/// Names of every default domain criterion, in registration order.
pub fn domain_names() -> Vec<String> {
    domain::default_criteria()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

pub fn is_explicit_criterion(name: &str) -> bool {
    name.starts_with("boundary.explicit.") || name.starts_with("domain.explicit.")
}
