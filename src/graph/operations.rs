//! Building the type graph snapshot and querying nodes and edges

use super::types::{ElementId, ElementNode, Relationship, RelationshipKind};
use im::{OrdMap, OrdSet, Vector};
use std::collections::{BTreeMap, BTreeSet};

/// Immutable snapshot of the analyzed elements and their relationships.
///
/// Cloning is cheap (persistent maps), iteration order is the qualified-name
/// order, and nothing mutates a snapshot once built.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: OrdMap<ElementId, ElementNode>,
    outgoing: OrdMap<ElementId, Vector<Relationship>>,
    incoming: OrdMap<ElementId, Vector<Relationship>>,
    relationship_count: usize,
}

/// Accumulates elements and relationships, then freezes them into a [`TypeGraph`].
#[derive(Debug, Default)]
pub struct TypeGraphBuilder {
    nodes: BTreeMap<ElementId, ElementNode>,
    relationships: BTreeSet<Relationship>,
}

impl TypeGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element. A later element with the same id replaces the earlier one.
    pub fn add_element(&mut self, node: ElementNode) -> &mut Self {
        self.nodes.insert(node.id.clone(), node);
        self
    }

    pub fn element(mut self, node: ElementNode) -> Self {
        self.add_element(node);
        self
    }

    pub fn add_relationship(&mut self, relationship: Relationship) -> &mut Self {
        self.relationships.insert(relationship);
        self
    }

    pub fn relationship(
        mut self,
        from: impl Into<ElementId>,
        to: impl Into<ElementId>,
        kind: RelationshipKind,
    ) -> Self {
        self.add_relationship(Relationship::new(from, to, kind));
        self
    }

    /// Freezes the graph. Relationships whose endpoints are unknown are dropped.
    pub fn build(self) -> TypeGraph {
        let mut outgoing: BTreeMap<ElementId, Vector<Relationship>> = BTreeMap::new();
        let mut incoming: BTreeMap<ElementId, Vector<Relationship>> = BTreeMap::new();
        let mut relationship_count = 0;

        for rel in self.relationships {
            if !self.nodes.contains_key(&rel.from) || !self.nodes.contains_key(&rel.to) {
                log::debug!(
                    "Dropping {:?} relationship {} -> {}: endpoint not in graph",
                    rel.kind,
                    rel.from,
                    rel.to
                );
                continue;
            }
            relationship_count += 1;
            outgoing
                .entry(rel.from.clone())
                .or_default()
                .push_back(rel.clone());
            incoming.entry(rel.to.clone()).or_default().push_back(rel);
        }

        TypeGraph {
            nodes: self.nodes.into_iter().collect(),
            outgoing: outgoing.into_iter().collect(),
            incoming: incoming.into_iter().collect(),
            relationship_count,
        }
    }
}

impl TypeGraph {
    pub fn builder() -> TypeGraphBuilder {
        TypeGraphBuilder::new()
    }

    pub fn node(&self, id: &ElementId) -> Option<&ElementNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All elements in qualified-name order
    pub fn elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.nodes.values()
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &ElementNode> {
        self.elements().filter(|n| n.is_interface())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationship_count
    }

    pub fn outgoing(&self, id: &ElementId) -> impl Iterator<Item = &Relationship> {
        self.outgoing.get(id).into_iter().flat_map(|v| v.iter())
    }

    pub fn incoming(&self, id: &ElementId) -> impl Iterator<Item = &Relationship> {
        self.incoming.get(id).into_iter().flat_map(|v| v.iter())
    }

    fn targets<'a>(
        &'a self,
        id: &ElementId,
        pred: impl Fn(RelationshipKind) -> bool + 'a,
    ) -> OrdSet<ElementId> {
        self.outgoing(id)
            .filter(|r| pred(r.kind))
            .map(|r| r.to.clone())
            .collect()
    }

    fn sources<'a>(
        &'a self,
        id: &ElementId,
        pred: impl Fn(RelationshipKind) -> bool + 'a,
    ) -> OrdSet<ElementId> {
        self.incoming(id)
            .filter(|r| pred(r.kind))
            .map(|r| r.from.clone())
            .collect()
    }

    /// Elements implementing interface `id`
    pub fn implementors_of(&self, id: &ElementId) -> OrdSet<ElementId> {
        self.sources(id, |k| k == RelationshipKind::Implements)
    }

    /// Interfaces implemented by `id`
    pub fn implemented_by(&self, id: &ElementId) -> OrdSet<ElementId> {
        self.targets(id, |k| k == RelationshipKind::Implements)
    }

    /// Field and collection-element dependencies of `id`
    pub fn dependencies_of(&self, id: &ElementId) -> OrdSet<ElementId> {
        self.targets(id, RelationshipKind::is_dependency)
    }

    /// Elements holding a field or collection of `id`
    pub fn dependents_of(&self, id: &ElementId) -> OrdSet<ElementId> {
        self.sources(id, RelationshipKind::is_dependency)
    }

    /// Direct supertypes of `id`
    pub fn supertypes_of(&self, id: &ElementId) -> OrdSet<ElementId> {
        self.targets(id, |k| k == RelationshipKind::Extends)
    }

    /// Types appearing in the method signatures of `id`
    pub fn signature_types_of(&self, id: &ElementId) -> OrdSet<ElementId> {
        self.sources(id, |k| k == RelationshipKind::UsedInMethodSignature)
    }

    /// Elements whose method signatures mention `id`
    pub fn signature_users_of(&self, id: &ElementId) -> OrdSet<ElementId> {
        self.targets(id, |k| k == RelationshipKind::UsedInMethodSignature)
    }
}
