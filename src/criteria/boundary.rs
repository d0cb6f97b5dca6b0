//! Default criteria for boundary interfaces.

use super::managed::ManagedType;
use super::naming;
use crate::classification::{
    BoundaryContext, Confidence, Criterion, CriterionResult, Evidence, EvidenceKind, Match, Role,
};
use crate::errors::CriterionFault;
use crate::graph::{ElementNode, Marker};
use crate::semantic::InterfaceFacts;

pub const INBOUND_ROLES: [Role; 3] = [Role::UseCase, Role::Command, Role::Query];
pub const OUTBOUND_ROLES: [Role; 4] = [
    Role::Repository,
    Role::Gateway,
    Role::EventPublisher,
    Role::GenericOutbound,
];

const INBOUND_PACKAGES: &[&str] = &["inbound", "in", "api", "usecase", "usecases", "primary", "driving"];
const OUTBOUND_PACKAGES: &[&str] = &["outbound", "out", "spi", "secondary", "driven"];

pub fn default_criteria() -> Vec<Criterion<BoundaryContext>> {
    vec![
        Criterion::new(
            "boundary.explicit.repository",
            100,
            &[Role::Repository],
            Confidence::Explicit,
            |node, _| Ok(marked(node, Marker::Repository)),
        ),
        Criterion::new(
            "boundary.explicit.primaryPort",
            100,
            &[Role::UseCase],
            Confidence::Explicit,
            |node, _| Ok(marked(node, Marker::PrimaryPort)),
        ),
        Criterion::new(
            "boundary.explicit.secondaryPort",
            100,
            &OUTBOUND_ROLES,
            Confidence::Explicit,
            |node, _| {
                Ok(marked(node, Marker::SecondaryPort)
                    .map(|m| m.as_role(naming::infer_outbound_role(node))))
            },
        ),
        Criterion::new(
            "boundary.semantic.driving",
            85,
            &INBOUND_ROLES,
            Confidence::High,
            semantic_driving,
        ),
        Criterion::new(
            "boundary.semantic.driven",
            85,
            &OUTBOUND_ROLES,
            Confidence::High,
            semantic_driven,
        ),
        Criterion::new(
            "boundary.naming.repository",
            80,
            &[Role::Repository],
            Confidence::High,
            |node, _| {
                Ok(named(node, naming::is_repository_name, "repository").map(|m| {
                    match ManagedType::of(node) {
                        ManagedType::Unknown => m,
                        managed => m.with_evidence(Evidence::new(EvidenceKind::Signature, managed.describe())),
                    }
                }))
            },
        ),
        Criterion::new(
            "boundary.naming.useCase",
            80,
            &[Role::UseCase],
            Confidence::High,
            |node, _| Ok(named(node, naming::is_use_case_name, "use case")),
        ),
        Criterion::new(
            "boundary.naming.gateway",
            80,
            &[Role::Gateway],
            Confidence::High,
            |node, _| Ok(named(node, naming::is_gateway_name, "gateway")),
        ),
        Criterion::new(
            "boundary.pattern.command",
            75,
            &[Role::Command],
            Confidence::Medium,
            command_pattern,
        ),
        Criterion::new(
            "boundary.pattern.query",
            75,
            &[Role::Query],
            Confidence::Medium,
            query_pattern,
        ),
        Criterion::new(
            "boundary.relationship.injectedDependency",
            72,
            &[Role::GenericOutbound],
            Confidence::Medium,
            injected_dependency,
        ),
        Criterion::new(
            "boundary.relationship.externalImplementation",
            72,
            &OUTBOUND_ROLES,
            Confidence::Medium,
            external_implementation,
        ),
        Criterion::new(
            "boundary.signature.persistence",
            70,
            &[Role::Repository],
            Confidence::Medium,
            |node, _| {
                let consistent = ManagedType::of(node).is_consistent();
                Ok((consistent && naming::has_persistence_shape(node)).then(|| {
                    Match::new("Methods read and write whole entities").with_evidence(Evidence::new(
                        EvidenceKind::Signature,
                        persistence_methods(node),
                    ))
                }))
            },
        ),
        Criterion::new(
            "boundary.package.inbound",
            60,
            &[Role::UseCase],
            Confidence::Low,
            |node, _| Ok(in_package(node, INBOUND_PACKAGES)),
        ),
        Criterion::new(
            "boundary.package.outbound",
            60,
            &[Role::GenericOutbound],
            Confidence::Low,
            |node, _| Ok(in_package(node, OUTBOUND_PACKAGES)),
        ),
    ]
}

fn facts<'a>(node: &ElementNode, ctx: &'a BoundaryContext) -> Result<&'a InterfaceFacts, CriterionFault> {
    ctx.facts(&node.id)
        .ok_or_else(|| CriterionFault::new(format!("no interface facts for {}", node.id)))
}

fn marked(node: &ElementNode, marker: Marker) -> Option<Match> {
    node.has_marker(marker).then(|| {
        Match::new(format!("Marked {}", marker)).with_evidence(Evidence::marker(marker.to_string()))
    })
}

fn named(node: &ElementNode, matches: fn(&str) -> bool, what: &str) -> Option<Match> {
    matches(node.simple_name()).then(|| {
        Match::new(format!("Name '{}' follows the {} convention", node.simple_name(), what))
            .with_evidence(Evidence::naming(node.simple_name()))
    })
}

fn in_package(node: &ElementNode, segments: &[&str]) -> Option<Match> {
    naming::package_has_segment(&node.id, segments).then(|| {
        Match::new(format!("Declared in package {}", node.id.package())).with_evidence(
            Evidence::new(EvidenceKind::Package, node.id.package()),
        )
    })
}

fn semantic_driving(node: &ElementNode, ctx: &BoundaryContext) -> CriterionResult {
    let facts = facts(node, ctx)?;
    if !facts.is_inbound_candidate() {
        return Ok(None);
    }
    let pivots = ctx
        .graph()
        .implementors_of(&node.id)
        .into_iter()
        .filter(|id| ctx.index().pivots.contains(id));
    Ok(Some(
        Match::new("Implemented by core orchestration and never called by it")
            .as_role(naming::infer_inbound_role(node))
            .with_evidence(Evidence::relationship("implemented by pivot").with_related(pivots)),
    ))
}

fn semantic_driven(node: &ElementNode, ctx: &BoundaryContext) -> CriterionResult {
    let facts = facts(node, ctx)?;
    if !(facts.is_outbound_candidate() && facts.has_port_indicator) {
        return Ok(None);
    }
    let reason = if facts.is_missing_implementation() {
        "Called by core orchestration with no implementation"
    } else {
        "Called by core orchestration, implemented only inside the core"
    };
    Ok(Some(
        Match::new(reason)
            .as_role(naming::infer_outbound_role(node))
            .with_evidence(Evidence::relationship("used by pivot").with_related(pivot_users(node, ctx))),
    ))
}

/// Shape-only guesses are reserved for interfaces with no port naming or marker.
fn unmarked(facts: &InterfaceFacts) -> bool {
    !facts.has_port_indicator && facts.explicit_direction_marker.is_none()
}

fn command_pattern(node: &ElementNode, ctx: &BoundaryContext) -> CriterionResult {
    let facts = facts(node, ctx)?;
    Ok((unmarked(facts) && naming::has_command_shape(node)).then(|| {
        Match::new("Methods mostly change state").with_evidence(Evidence::new(
            EvidenceKind::Signature,
            format!("{} state-changing methods", node.methods.len()),
        ))
    }))
}

fn query_pattern(node: &ElementNode, ctx: &BoundaryContext) -> CriterionResult {
    let facts = facts(node, ctx)?;
    Ok((unmarked(facts) && naming::has_query_shape(node))
        .then(|| Match::new("Every method is a read")))
}

fn injected_dependency(node: &ElementNode, ctx: &BoundaryContext) -> CriterionResult {
    let facts = facts(node, ctx)?;
    Ok((facts.used_by_pivot && !facts.implemented_by_pivot).then(|| {
        Match::new("Injected into core orchestration")
            .with_evidence(Evidence::relationship("field of pivot").with_related(pivot_users(node, ctx)))
    }))
}

fn external_implementation(node: &ElementNode, ctx: &BoundaryContext) -> CriterionResult {
    let facts = facts(node, ctx)?;
    if !facts.is_outbound_by_external_implementation() {
        return Ok(None);
    }
    let adapters = ctx
        .graph()
        .implementors_of(&node.id)
        .into_iter()
        .filter(|id| ctx.index().anchors.is_outside_domain(id));
    Ok(Some(
        Match::new("Implemented by an infrastructure adapter")
            .as_role(naming::infer_outbound_role(node))
            .with_evidence(Evidence::relationship("implemented outside the core").with_related(adapters)),
    ))
}

fn pivot_users(node: &ElementNode, ctx: &BoundaryContext) -> Vec<crate::graph::ElementId> {
    ctx.graph()
        .dependents_of(&node.id)
        .into_iter()
        .filter(|id| ctx.index().pivots.contains(id))
        .collect()
}

fn persistence_methods(node: &ElementNode) -> String {
    node.methods
        .iter()
        .filter(|m| naming::is_persistence_method(m))
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
