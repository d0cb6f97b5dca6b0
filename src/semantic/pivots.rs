//! Pivot detection.
//!
//! A pivot is a core element that coordinates business logic through boundary
//! interfaces. What a pivot implements is inbound, what it depends on is
//! outbound; that is the whole reason the set exists.
//!
//! Seeds are domain-anchored non-interface elements that either carry the
//! `ApplicationService` marker or match the structural pattern: stateless,
//! at least one field dependency on an interface, and no inbound field usage
//! from other domain elements. Expansion then adds stateless elements that
//! are structurally indistinguishable from a pivot (same implemented
//! interface, or same interface dependency set), until nothing changes.

use super::anchors::AnchorIndex;
use crate::graph::{ElementId, ElementNode, Marker, TypeGraph};
use im::{OrdMap, OrdSet};
use serde::Serialize;

/// Markers that pin an element to a data role; such elements never pivot.
const DATA_MARKERS: [Marker; 5] = [
    Marker::AggregateRoot,
    Marker::Entity,
    Marker::ValueObject,
    Marker::Identity,
    Marker::DomainEvent,
];

/// Why an element entered the pivot set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PivotReason {
    /// Carries the orchestration marker
    Marker,
    /// Stateless, injected interface dependencies, no inbound domain usage
    Structure,
    /// Structurally indistinguishable from the given pivot
    Expansion { via: ElementId },
}

/// Read-only set of orchestration pivots for one pass.
#[derive(Debug, Clone, Default)]
pub struct PivotSet {
    pivots: OrdMap<ElementId, PivotReason>,
}

impl PivotSet {
    pub fn contains(&self, id: &ElementId) -> bool {
        self.pivots.contains_key(id)
    }

    pub fn reason(&self, id: &ElementId) -> Option<&PivotReason> {
        self.pivots.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.pivots.keys()
    }

    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }
}

pub fn detect_pivots(graph: &TypeGraph, anchors: &AnchorIndex, expand: bool) -> PivotSet {
    let mut pivots: OrdMap<ElementId, PivotReason> = graph
        .elements()
        .filter(|node| is_candidate(node, anchors))
        .filter_map(|node| seed_reason(node, graph, anchors).map(|r| (node.id.clone(), r)))
        .collect();

    if expand {
        expand_pivots(graph, anchors, &mut pivots);
    }

    log::debug!("Detected {} pivots", pivots.len());
    PivotSet { pivots }
}

fn is_candidate(node: &ElementNode, anchors: &AnchorIndex) -> bool {
    !node.is_interface()
        && anchors.is_domain(&node.id)
        && !node.shape.is_enumeration
        && !DATA_MARKERS.iter().any(|m| node.has_marker(*m))
}

fn seed_reason(node: &ElementNode, graph: &TypeGraph, anchors: &AnchorIndex) -> Option<PivotReason> {
    if node.has_marker(Marker::ApplicationService) {
        return Some(PivotReason::Marker);
    }
    let structural = node.shape.is_stateless()
        && !interface_dependencies(graph, &node.id).is_empty()
        && graph
            .dependents_of(&node.id)
            .iter()
            .all(|dependent| !anchors.is_domain(dependent));
    structural.then_some(PivotReason::Structure)
}

fn interface_dependencies(graph: &TypeGraph, id: &ElementId) -> OrdSet<ElementId> {
    graph
        .dependencies_of(id)
        .into_iter()
        .filter(|dep| graph.node(dep).is_some_and(ElementNode::is_interface))
        .collect()
}

fn expand_pivots(graph: &TypeGraph, anchors: &AnchorIndex, pivots: &mut OrdMap<ElementId, PivotReason>) {
    loop {
        let additions: Vec<(ElementId, PivotReason)> = graph
            .elements()
            .filter(|node| !pivots.contains_key(&node.id))
            .filter(|node| is_candidate(node, anchors) && node.shape.is_stateless())
            .filter_map(|node| {
                indistinguishable_pivot(node, graph, pivots)
                    .map(|via| (node.id.clone(), PivotReason::Expansion { via }))
            })
            .collect();

        if additions.is_empty() {
            break;
        }
        for (id, reason) in additions {
            pivots.insert(id, reason);
        }
    }
}

fn indistinguishable_pivot(
    node: &ElementNode,
    graph: &TypeGraph,
    pivots: &OrdMap<ElementId, PivotReason>,
) -> Option<ElementId> {
    let implemented = graph.implemented_by(&node.id);
    let dependencies = interface_dependencies(graph, &node.id);

    pivots.keys().find_map(|pivot| {
        let shares_interface = !implemented.is_empty()
            && !graph
                .implemented_by(pivot)
                .clone()
                .intersection(implemented.clone())
                .is_empty();
        let same_dependencies =
            !dependencies.is_empty() && interface_dependencies(graph, pivot) == dependencies;
        (shares_interface || same_dependencies).then(|| pivot.clone())
    })
}
