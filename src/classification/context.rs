//! Read-only context handed to criteria.
//!
//! Boundary criteria see the graph and the semantic index. Domain criteria
//! additionally see the complete [`PortOutcomes`]; a `DomainContext` cannot
//! be built without them, which is what orders the two stages.

use super::results::PortOutcomes;
use super::role::{Direction, Role};
use crate::graph::{ElementId, ElementNode, TypeGraph};
use crate::semantic::{InterfaceFacts, SemanticIndex};

#[derive(Debug, Clone)]
pub struct BoundaryContext {
    graph: TypeGraph,
    index: SemanticIndex,
}

impl BoundaryContext {
    pub fn new(graph: TypeGraph, index: SemanticIndex) -> Self {
        Self { graph, index }
    }

    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    pub fn index(&self) -> &SemanticIndex {
        &self.index
    }

    pub fn facts(&self, id: &ElementId) -> Option<&InterfaceFacts> {
        self.index.interface_facts.get(id)
    }

    /// Moves on to the domain stage once the boundary outcomes are final.
    pub fn into_domain(self, ports: PortOutcomes) -> DomainContext {
        DomainContext {
            graph: self.graph,
            index: self.index,
            ports,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomainContext {
    graph: TypeGraph,
    index: SemanticIndex,
    ports: PortOutcomes,
}

impl DomainContext {
    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    pub fn index(&self) -> &SemanticIndex {
        &self.index
    }

    pub fn ports(&self) -> &PortOutcomes {
        &self.ports
    }

    pub fn into_ports(self) -> PortOutcomes {
        self.ports
    }

    pub fn port_role(&self, id: &ElementId) -> Option<Role> {
        self.ports.role_of(id)
    }

    /// Interfaces implemented by `node` whose final role is in `direction`
    pub fn implemented_ports(&self, node: &ElementNode, direction: Direction) -> Vec<ElementId> {
        self.graph
            .implemented_by(&node.id)
            .into_iter()
            .filter(|id| self.port_direction(id) == Some(direction))
            .collect()
    }

    /// Interfaces `node` holds as fields whose final role is in `direction`
    pub fn dependency_ports(&self, node: &ElementNode, direction: Direction) -> Vec<ElementId> {
        self.graph
            .dependencies_of(&node.id)
            .into_iter()
            .filter(|id| self.port_direction(id) == Some(direction))
            .collect()
    }

    fn port_direction(&self, id: &ElementId) -> Option<Direction> {
        self.port_role(id).and_then(Role::direction)
    }
}
