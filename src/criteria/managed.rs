//! Which domain type a repository-shaped interface manages.
//!
//! The saved type (`save(Order)`) is authoritative. A `findById`-style
//! method is used to cross-check it, and when the two disagree the
//! repository is reported as inconsistent rather than guessed at.

use crate::classification::{PortOutcomes, Role};
use crate::graph::{ElementId, ElementNode, MethodSignature, TypeGraph};
use std::collections::BTreeSet;

const SAVE_METHODS: &[&str] = &["save", "persist", "store", "insert", "update", "upsert"];
const FIND_BY_ID_METHODS: &[&str] = &["findById", "getById", "findByIdentifier", "loadById"];
const OPTIONAL_WRAPPERS: &[&str] = &["Optional", "Option"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedType {
    /// Save and lookup agree, or only one of them is declared
    Single(ElementId),
    /// `save` and `findById` name different types
    Inconsistent { saved: ElementId, found: ElementId },
    /// Neither a single-argument save nor a by-id lookup
    Unknown,
}

impl ManagedType {
    pub fn of(node: &ElementNode) -> Self {
        let saved = node.methods.iter().find_map(saved_type);
        let found = node.methods.iter().find_map(found_type);
        match (saved, found) {
            (Some(saved), Some(found)) if saved != found => ManagedType::Inconsistent { saved, found },
            (Some(id), _) | (None, Some(id)) => ManagedType::Single(id),
            (None, None) => ManagedType::Unknown,
        }
    }

    /// The managed type, with the saved type winning an inconsistency
    pub fn managed(&self) -> Option<&ElementId> {
        match self {
            ManagedType::Single(id) => Some(id),
            ManagedType::Inconsistent { saved, .. } => Some(saved),
            ManagedType::Unknown => None,
        }
    }

    pub fn is_consistent(&self) -> bool {
        !matches!(self, ManagedType::Inconsistent { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            ManagedType::Single(id) => format!("manages {}", id.simple_name()),
            ManagedType::Inconsistent { saved, found } => format!(
                "save() and findById() manage different types: {} vs {}",
                saved.simple_name(),
                found.simple_name()
            ),
            ManagedType::Unknown => "managed type not declared".to_string(),
        }
    }
}

fn saved_type(method: &MethodSignature) -> Option<ElementId> {
    if !SAVE_METHODS.contains(&method.name.as_str()) {
        return None;
    }
    match method.parameters.as_slice() {
        [single] => Some(ElementId::new(single.clone())),
        _ => None,
    }
}

fn found_type(method: &MethodSignature) -> Option<ElementId> {
    if !FIND_BY_ID_METHODS.contains(&method.name.as_str()) || method.returns_collection {
        return None;
    }
    method.returns.as_deref().map(|returns| ElementId::new(unwrap_optional(returns)))
}

/// `Optional<com.acme.Order>` and `Option<Order>` unwrap to their argument.
fn unwrap_optional(type_name: &str) -> &str {
    let Some((outer, rest)) = type_name.split_once('<') else {
        return type_name;
    };
    let outer = outer.rsplit('.').next().unwrap_or(outer);
    match rest.strip_suffix('>') {
        Some(inner) if OPTIONAL_WRAPPERS.contains(&outer) => inner.trim(),
        _ => type_name,
    }
}

/// `OrderRepository` or `Orders` for `Order`
pub fn manages_by_name(port: &ElementId, node: &ElementNode) -> bool {
    let name = node.simple_name();
    port.simple_name()
        .strip_prefix(name)
        .is_some_and(|rest| matches!(rest, "Repository" | "s" | "es" | "Store"))
}

/// Repository ports that manage `node`: ports using it in a signature or
/// named after it, minus those whose declared managed type is another one.
pub fn managing_repositories(graph: &TypeGraph, node: &ElementNode, ports: &PortOutcomes) -> Vec<ElementId> {
    graph
        .signature_users_of(&node.id)
        .into_iter()
        .chain(
            ports
                .iter()
                .map(|o| o.element_id.clone())
                .filter(|port| manages_by_name(port, node)),
        )
        .filter(|port| ports.role_of(port) == Some(Role::Repository))
        .filter(|port| {
            graph
                .node(port)
                .map(ManagedType::of)
                .and_then(|managed| managed.managed().cloned())
                .is_none_or(|managed| managed == node.id)
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
