//! Architectural anomalies in a finished classification.
//!
//! Detection runs over the *composition graph*: field and collection
//! dependencies from an aggregate root, entity or value object to an entity,
//! value object or identifier. A field from one aggregate root to another is
//! a direct reference, not composition.
//!
//! | Code | Severity |
//! |---|---|
//! | `DIRECT_AGGREGATE_REFERENCE` | warning |
//! | `COMPOSITION_CYCLE` | error |
//! | `SHARED_ENTITY` | error |
//! | `AGGREGATE_WITHOUT_REPOSITORY` | warning |
//! | `VALUE_OBJECT_WITH_IDENTITY` | warning |

use crate::classification::{ClassificationResults, Role};
use crate::criteria::managed;
use crate::graph::{ElementId, TypeGraph};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

const COMPOSERS: [Role; 3] = [Role::AggregateRoot, Role::Entity, Role::ValueObject];
const COMPOSED: [Role; 3] = [Role::Entity, Role::ValueObject, Role::Identifier];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyCode {
    DirectAggregateReference,
    CompositionCycle,
    SharedEntity,
    AggregateWithoutRepository,
    ValueObjectWithIdentity,
}

impl AnomalyCode {
    pub fn as_str(self) -> &'static str {
        match self {
            AnomalyCode::DirectAggregateReference => "DIRECT_AGGREGATE_REFERENCE",
            AnomalyCode::CompositionCycle => "COMPOSITION_CYCLE",
            AnomalyCode::SharedEntity => "SHARED_ENTITY",
            AnomalyCode::AggregateWithoutRepository => "AGGREGATE_WITHOUT_REPOSITORY",
            AnomalyCode::ValueObjectWithIdentity => "VALUE_OBJECT_WITH_IDENTITY",
        }
    }

    pub fn severity(self) -> AnomalySeverity {
        match self {
            AnomalyCode::CompositionCycle | AnomalyCode::SharedEntity => AnomalySeverity::Error,
            AnomalyCode::DirectAggregateReference
            | AnomalyCode::AggregateWithoutRepository
            | AnomalyCode::ValueObjectWithIdentity => AnomalySeverity::Warning,
        }
    }
}

impl fmt::Display for AnomalyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalySeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub code: AnomalyCode,
    pub severity: AnomalySeverity,
    /// The element the anomaly is reported on
    pub element_id: ElementId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<ElementId>,
    pub message: String,
}

impl Anomaly {
    fn new(code: AnomalyCode, element_id: ElementId, related: Vec<ElementId>, message: String) -> Self {
        Self {
            code,
            severity: code.severity(),
            element_id,
            related,
            message,
        }
    }
}

struct CompositionGraph {
    /// Composing element to composed elements
    edges: BTreeMap<ElementId, BTreeSet<ElementId>>,
    direct_references: Vec<(ElementId, ElementId)>,
}

impl CompositionGraph {
    fn build(graph: &TypeGraph, results: &ClassificationResults) -> Self {
        let mut edges: BTreeMap<ElementId, BTreeSet<ElementId>> = BTreeMap::new();
        let mut direct_references = Vec::new();

        for node in graph.elements() {
            let Some(source_role) = results.role_of(&node.id).filter(|r| COMPOSERS.contains(r)) else {
                continue;
            };
            for target in graph.dependencies_of(&node.id) {
                match results.role_of(&target) {
                    Some(Role::AggregateRoot) if source_role == Role::AggregateRoot => {
                        direct_references.push((node.id.clone(), target));
                    }
                    Some(role) if COMPOSED.contains(&role) => {
                        edges.entry(node.id.clone()).or_default().insert(target);
                    }
                    _ => {}
                }
            }
        }

        Self {
            edges,
            direct_references,
        }
    }

    /// Strongly connected components that contain a cycle, members sorted.
    fn cycles(&self) -> Vec<Vec<ElementId>> {
        let mut digraph: DiGraph<ElementId, ()> = DiGraph::new();
        let mut node_map: BTreeMap<ElementId, NodeIndex> = BTreeMap::new();
        let mut index_of = |graph: &mut DiGraph<ElementId, ()>, id: &ElementId| {
            *node_map
                .entry(id.clone())
                .or_insert_with(|| graph.add_node(id.clone()))
        };

        for (source, targets) in &self.edges {
            let from = index_of(&mut digraph, source);
            for target in targets {
                let to = index_of(&mut digraph, target);
                digraph.add_edge(from, to, ());
            }
        }

        let mut cycles: Vec<Vec<ElementId>> = tarjan_scc(&digraph)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => digraph.contains_edge(*single, *single),
                _ => true,
            })
            .map(|component| {
                let mut members: Vec<ElementId> =
                    component.into_iter().map(|index| digraph[index].clone()).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Composed entity to the set of elements composing it
    fn composers_of(&self, results: &ClassificationResults) -> BTreeMap<ElementId, BTreeSet<ElementId>> {
        let mut composers: BTreeMap<ElementId, BTreeSet<ElementId>> = BTreeMap::new();
        for (source, targets) in &self.edges {
            for target in targets.iter().filter(|t| results.role_of(t) == Some(Role::Entity)) {
                composers.entry(target.clone()).or_default().insert(source.clone());
            }
        }
        composers
    }
}

/// Runs every anomaly check. The result is ordered by code, then element.
pub fn detect(graph: &TypeGraph, results: &ClassificationResults) -> Vec<Anomaly> {
    let _span = tracing::debug_span!("detect_anomalies").entered();
    let composition = CompositionGraph::build(graph, results);

    let mut anomalies = Vec::new();
    anomalies.extend(direct_aggregate_references(&composition));
    anomalies.extend(composition_cycles(&composition));
    anomalies.extend(shared_entities(&composition, results));
    anomalies.extend(aggregates_without_repository(graph, results));
    anomalies.extend(value_objects_with_identity(graph, results));
    anomalies.sort_by(|a, b| (a.code, &a.element_id).cmp(&(b.code, &b.element_id)));

    log::debug!("Detected {} anomalies", anomalies.len());
    anomalies
}

fn direct_aggregate_references(composition: &CompositionGraph) -> Vec<Anomaly> {
    composition
        .direct_references
        .iter()
        .map(|(source, target)| {
            Anomaly::new(
                AnomalyCode::DirectAggregateReference,
                source.clone(),
                vec![target.clone()],
                format!(
                    "Aggregate root '{}' directly references aggregate root '{}'; reference it by id instead",
                    source.simple_name(),
                    target.simple_name()
                ),
            )
        })
        .collect()
}

fn composition_cycles(composition: &CompositionGraph) -> Vec<Anomaly> {
    composition
        .cycles()
        .into_iter()
        .filter_map(|members| {
            let first = members.first()?.clone();
            let names: Vec<&str> = members.iter().map(ElementId::simple_name).collect();
            Some(Anomaly::new(
                AnomalyCode::CompositionCycle,
                first,
                members.clone(),
                format!("Composition cycle through {}", names.join(", ")),
            ))
        })
        .collect()
}

fn shared_entities(composition: &CompositionGraph, results: &ClassificationResults) -> Vec<Anomaly> {
    composition
        .composers_of(results)
        .into_iter()
        .filter(|(_, composers)| composers.len() > 1)
        .map(|(entity, composers)| {
            let names: Vec<&str> = composers.iter().map(ElementId::simple_name).collect();
            let message = format!(
                "Entity '{}' is composed by {}; an entity belongs to exactly one aggregate",
                entity.simple_name(),
                names.join(", ")
            );
            Anomaly::new(AnomalyCode::SharedEntity, entity, composers.into_iter().collect(), message)
        })
        .collect()
}

fn aggregates_without_repository(graph: &TypeGraph, results: &ClassificationResults) -> Vec<Anomaly> {
    results
        .by_role(Role::AggregateRoot)
        .filter_map(|outcome| graph.node(&outcome.element_id))
        .filter(|node| managed::managing_repositories(graph, node, results.port_outcomes()).is_empty())
        .map(|node| {
            Anomaly::new(
                AnomalyCode::AggregateWithoutRepository,
                node.id.clone(),
                Vec::new(),
                format!("Aggregate root '{}' has no repository", node.simple_name()),
            )
        })
        .collect()
}

fn value_objects_with_identity(graph: &TypeGraph, results: &ClassificationResults) -> Vec<Anomaly> {
    results
        .by_role(Role::ValueObject)
        .filter_map(|outcome| graph.node(&outcome.element_id))
        .filter(|node| node.shape.has_identity_field && !node.shape.is_single_field_wrapper)
        .map(|node| {
            Anomaly::new(
                AnomalyCode::ValueObjectWithIdentity,
                node.id.clone(),
                Vec::new(),
                format!(
                    "Value object '{}' has an identity field; consider classifying it as an entity",
                    node.simple_name()
                ),
            )
        })
        .collect()
}
