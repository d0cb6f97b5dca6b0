//! Semantic index: reusable facts derived once from the graph snapshot.
//!
//! Nothing here knows about criteria or roles; it only answers structural
//! questions (who is a pivot, who implements or calls an interface) so the
//! criteria can stay small predicates.

pub mod anchors;
pub mod interface_facts;
pub mod pivots;

pub use anchors::{Anchor, AnchorIndex};
pub use interface_facts::{InterfaceFacts, InterfaceFactsIndex, PORT_NAME_PATTERNS};
pub use pivots::{PivotReason, PivotSet};

use crate::graph::TypeGraph;

/// Knobs for building the index.
#[derive(Debug, Clone)]
pub struct SemanticOptions {
    pub expand_pivots: bool,
    pub infrastructure_prefixes: Vec<String>,
}

impl Default for SemanticOptions {
    fn default() -> Self {
        Self {
            expand_pivots: true,
            infrastructure_prefixes: Vec::new(),
        }
    }
}

/// Anchors, pivots and interface facts for one classification pass.
#[derive(Debug, Clone, Default)]
pub struct SemanticIndex {
    pub anchors: AnchorIndex,
    pub pivots: PivotSet,
    pub interface_facts: InterfaceFactsIndex,
}

impl SemanticIndex {
    /// Pure function of the graph snapshot; an empty graph yields an empty index.
    pub fn build(graph: &TypeGraph, options: &SemanticOptions) -> Self {
        let _span = tracing::debug_span!("semantic_index", elements = graph.len()).entered();

        let anchors = AnchorIndex::build(graph, &options.infrastructure_prefixes);
        let pivots = pivots::detect_pivots(graph, &anchors, options.expand_pivots);
        let interface_facts = InterfaceFactsIndex::build(graph, &anchors, &pivots);

        log::debug!(
            "Semantic index: {} anchored, {} pivots, {} interfaces",
            anchors.len(),
            pivots.len(),
            interface_facts.len()
        );

        Self {
            anchors,
            pivots,
            interface_facts,
        }
    }
}
