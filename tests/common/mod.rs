// Shared helpers for rolemap integration tests
#![allow(dead_code)]

pub mod rolemap_graphs;

use rolemap::classification::{Confidence, Contribution, ContributionOrigin, Role};

pub use rolemap_graphs::*;

/// A plain criterion vote on `app.Element`.
pub fn vote(criterion: &str, role: Role, priority: i32, confidence: Confidence) -> Contribution {
    Contribution {
        element_id: "app.Element".into(),
        role,
        priority,
        confidence,
        criterion: criterion.to_string(),
        justification: format!("{} votes {}", criterion, role),
        evidence: Vec::new(),
        origin: ContributionOrigin::Criterion,
    }
}
