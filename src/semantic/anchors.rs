//! Anchor detection: separates application core from infrastructure and
//! driving adapters before any role is assigned.
//!
//! Detection order:
//! 1. `DrivingAdapter` marker → [`Anchor::Driving`]
//! 2. `Infrastructure` marker → [`Anchor::Infrastructure`]
//! 3. infrastructure package segment (`infrastructure`, `infra`, `adapter`, ...) → [`Anchor::Infrastructure`]
//! 4. external dependency on a known infrastructure type → [`Anchor::Infrastructure`]
//! 5. otherwise [`Anchor::Domain`]
//!
//! Interfaces are never anchored; they are the boundary candidates.

use crate::graph::{ElementId, ElementNode, Marker, TypeGraph};
use im::OrdMap;
use serde::Serialize;

const INFRASTRUCTURE_SEGMENTS: &[&str] = &[
    "infrastructure",
    "infra",
    "adapter",
    "adapters",
    "persistence",
];

/// Where a non-interface element sits relative to the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Anchor {
    Domain,
    Infrastructure,
    Driving,
}

#[derive(Debug, Clone, Default)]
pub struct AnchorIndex {
    anchors: OrdMap<ElementId, Anchor>,
}

impl AnchorIndex {
    pub fn build(graph: &TypeGraph, infrastructure_prefixes: &[String]) -> Self {
        let anchors = graph
            .elements()
            .filter(|node| !node.is_interface())
            .map(|node| (node.id.clone(), detect_anchor(node, infrastructure_prefixes)))
            .collect();
        Self { anchors }
    }

    pub fn get(&self, id: &ElementId) -> Option<Anchor> {
        self.anchors.get(id).copied()
    }

    pub fn is_domain(&self, id: &ElementId) -> bool {
        self.get(id) == Some(Anchor::Domain)
    }

    /// Anchored but not in the domain set
    pub fn is_outside_domain(&self, id: &ElementId) -> bool {
        matches!(self.get(id), Some(Anchor::Infrastructure | Anchor::Driving))
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

pub fn detect_anchor(node: &ElementNode, infrastructure_prefixes: &[String]) -> Anchor {
    if node.has_marker(Marker::DrivingAdapter) {
        return Anchor::Driving;
    }
    if node.has_marker(Marker::Infrastructure) {
        return Anchor::Infrastructure;
    }
    if is_infrastructure_package(&node.id) {
        return Anchor::Infrastructure;
    }
    if node
        .external_dependencies
        .iter()
        .any(|dep| is_infrastructure_type(dep, infrastructure_prefixes))
    {
        return Anchor::Infrastructure;
    }
    Anchor::Domain
}

pub fn is_infrastructure_package(id: &ElementId) -> bool {
    id.package_segments()
        .any(|segment| INFRASTRUCTURE_SEGMENTS.contains(&segment.to_lowercase().as_str()))
}

pub fn is_infrastructure_type(qualified_name: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| qualified_name.starts_with(prefix.as_str()))
}
