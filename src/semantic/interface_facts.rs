//! Per-interface usage and implementation facts.

use super::anchors::AnchorIndex;
use super::pivots::PivotSet;
use crate::classification::Direction;
use crate::graph::{ElementId, ElementNode, Marker, TypeGraph};
use im::OrdMap;
use serde::Serialize;

/// Name fragments that strongly suggest a port interface.
pub const PORT_NAME_PATTERNS: &[&str] = &[
    "Repository",
    "Saver",
    "Fetcher",
    "Finder",
    "Loader",
    "Store",
    "Gateway",
    "Client",
    "Adapter",
    "Publisher",
    "Sender",
    "Emitter",
    "Port",
];

/// Derived facts for one boundary-candidate interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceFacts {
    pub interface_id: ElementId,
    pub implementation_count: usize,
    pub implemented_by_pivot: bool,
    pub used_by_pivot: bool,
    /// An implementer is anchored outside the domain set
    pub has_external_implementation: bool,
    /// At least one implementer, and every implementer is domain-anchored
    pub has_only_internal_implementation: bool,
    pub has_port_indicator: bool,
    pub explicit_direction_marker: Option<Direction>,
}

impl InterfaceFacts {
    pub fn compute(
        node: &ElementNode,
        graph: &TypeGraph,
        anchors: &AnchorIndex,
        pivots: &PivotSet,
    ) -> Self {
        let implementors = graph.implementors_of(&node.id);
        let implemented_by_pivot = implementors.iter().any(|id| pivots.contains(id));
        let used_by_pivot = graph
            .dependents_of(&node.id)
            .iter()
            .any(|id| pivots.contains(id));
        let has_external_implementation =
            implementors.iter().any(|id| anchors.is_outside_domain(id));
        let has_only_internal_implementation =
            !implementors.is_empty() && implementors.iter().all(|id| anchors.is_domain(id));

        Self {
            interface_id: node.id.clone(),
            implementation_count: implementors.len(),
            implemented_by_pivot,
            used_by_pivot,
            has_external_implementation,
            has_only_internal_implementation,
            has_port_indicator: has_port_indicator(node),
            explicit_direction_marker: explicit_direction(node),
        }
    }

    pub fn is_missing_implementation(&self) -> bool {
        self.implementation_count == 0
    }

    /// Implemented by core orchestration and not called by it
    pub fn is_inbound_candidate(&self) -> bool {
        self.implemented_by_pivot && !self.used_by_pivot
    }

    /// Called by core orchestration with no real adapter behind it yet
    pub fn is_outbound_candidate(&self) -> bool {
        self.used_by_pivot
            && (self.is_missing_implementation() || self.has_only_internal_implementation)
    }

    pub fn is_outbound_by_external_implementation(&self) -> bool {
        self.has_external_implementation && !self.implemented_by_pivot
    }
}

fn has_port_indicator(node: &ElementNode) -> bool {
    let marked = [Marker::Repository, Marker::PrimaryPort, Marker::SecondaryPort]
        .iter()
        .any(|m| node.has_marker(*m));
    marked
        || node
            .id
            .package_segments()
            .any(|segment| segment.to_lowercase().contains("port"))
        || PORT_NAME_PATTERNS
            .iter()
            .any(|pattern| node.simple_name().contains(pattern))
}

fn explicit_direction(node: &ElementNode) -> Option<Direction> {
    if node.has_marker(Marker::PrimaryPort) {
        Some(Direction::Inbound)
    } else if node.has_marker(Marker::SecondaryPort) || node.has_marker(Marker::Repository) {
        Some(Direction::Outbound)
    } else {
        None
    }
}

/// Facts for every interface in the graph, keyed by interface id.
#[derive(Debug, Clone, Default)]
pub struct InterfaceFactsIndex {
    facts: OrdMap<ElementId, InterfaceFacts>,
}

impl InterfaceFactsIndex {
    pub fn build(graph: &TypeGraph, anchors: &AnchorIndex, pivots: &PivotSet) -> Self {
        let facts = graph
            .interfaces()
            .map(|node| {
                (
                    node.id.clone(),
                    InterfaceFacts::compute(node, graph, anchors, pivots),
                )
            })
            .collect();
        Self { facts }
    }

    pub fn get(&self, id: &ElementId) -> Option<&InterfaceFacts> {
        self.facts.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceFacts> {
        self.facts.values()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ElementForm, RelationshipKind};

    fn index_for(graph: &TypeGraph) -> InterfaceFactsIndex {
        let anchors = AnchorIndex::build(graph, &[]);
        let pivots = super::super::pivots::detect_pivots(graph, &anchors, true);
        InterfaceFactsIndex::build(graph, &anchors, &pivots)
    }

    fn hexagon() -> TypeGraph {
        TypeGraph::builder()
            .element(ElementNode::new("app.order.PlaceOrder", ElementForm::Interface))
            .element(ElementNode::new("app.order.Orders", ElementForm::Interface))
            .element(ElementNode::new("app.order.Payments", ElementForm::Interface))
            .element(ElementNode::new("app.order.OrderService", ElementForm::Class))
            .element(ElementNode::new("app.infrastructure.StripePayments", ElementForm::Class))
            .relationship("app.order.OrderService", "app.order.PlaceOrder", RelationshipKind::Implements)
            .relationship("app.order.OrderService", "app.order.Orders", RelationshipKind::ReferencesField)
            .relationship("app.order.OrderService", "app.order.Payments", RelationshipKind::ReferencesField)
            .relationship(
                "app.infrastructure.StripePayments",
                "app.order.Payments",
                RelationshipKind::Implements,
            )
            .build()
    }

    #[test]
    fn test_inbound_interface_facts() {
        let index = index_for(&hexagon());
        let facts = index.get(&"app.order.PlaceOrder".into()).unwrap();
        assert!(facts.implemented_by_pivot);
        assert!(!facts.used_by_pivot);
        assert!(facts.is_inbound_candidate());
        assert!(!facts.is_outbound_candidate());
    }

    #[test]
    fn test_missing_implementation_is_outbound() {
        let index = index_for(&hexagon());
        let facts = index.get(&"app.order.Orders".into()).unwrap();
        assert!(facts.used_by_pivot);
        assert!(facts.is_missing_implementation());
        assert!(facts.is_outbound_candidate());
        assert!(facts.has_port_indicator);
    }

    #[test]
    fn test_external_implementation() {
        let index = index_for(&hexagon());
        let facts = index.get(&"app.order.Payments".into()).unwrap();
        assert!(facts.has_external_implementation);
        assert!(!facts.has_only_internal_implementation);
        assert!(facts.is_outbound_by_external_implementation());
        assert!(!facts.is_outbound_candidate());
    }

    #[test]
    fn test_explicit_direction_marker() {
        let node = ElementNode::new("app.Notify", ElementForm::Interface)
            .with_marker(Marker::SecondaryPort);
        let graph = TypeGraph::builder().element(node).build();
        let index = index_for(&graph);
        let facts = index.get(&"app.Notify".into()).unwrap();
        assert_eq!(facts.explicit_direction_marker, Some(Direction::Outbound));
        assert!(facts.has_port_indicator);
    }

    #[test]
    fn test_no_pivots_yields_neutral_facts() {
        let graph = TypeGraph::builder()
            .element(ElementNode::new("app.Things", ElementForm::Interface))
            .build();
        let index = index_for(&graph);
        let facts = index.get(&"app.Things".into()).unwrap();
        assert!(!facts.is_inbound_candidate());
        assert!(!facts.is_outbound_candidate());
        assert!(!facts.has_port_indicator);
    }
}
