//! Default criteria for domain elements and orchestration actors.
//!
//! The orchestration-actor criteria and `repositoryDominant` are the only ones
//! that look at boundary outcomes, through [`DomainContext::ports`].

use super::{managed, naming};
use crate::classification::{
    Confidence, Criterion, CriterionResult, Direction, DomainContext, Evidence, Match, Role,
};
use crate::graph::{ElementForm, ElementId, ElementNode, Marker};

const DATA_ROLES: [Role; 6] = [
    Role::AggregateRoot,
    Role::Entity,
    Role::ValueObject,
    Role::Identifier,
    Role::DomainEvent,
    Role::DomainService,
];

/// Marker, criterion suffix and role for each explicit domain marker.
const EXPLICIT_MARKERS: [(Marker, &str, Role); 7] = [
    (Marker::AggregateRoot, "aggregateRoot", Role::AggregateRoot),
    (Marker::Entity, "entity", Role::Entity),
    (Marker::ValueObject, "valueObject", Role::ValueObject),
    (Marker::Identity, "identifier", Role::Identifier),
    (Marker::DomainEvent, "domainEvent", Role::DomainEvent),
    (Marker::DomainService, "domainService", Role::DomainService),
    (Marker::ApplicationService, "applicationService", Role::ApplicationService),
];

pub fn default_criteria() -> Vec<Criterion<DomainContext>> {
    let mut criteria: Vec<Criterion<DomainContext>> = EXPLICIT_MARKERS
        .iter()
        .map(|&(marker, suffix, role)| explicit(marker, suffix, role))
        .collect();

    criteria.extend([
        Criterion::new(
            "domain.structural.repositoryDominant",
            80,
            &[Role::AggregateRoot],
            Confidence::High,
            repository_dominant,
        ),
        Criterion::new(
            "domain.structural.recordSingleId",
            80,
            &[Role::Identifier],
            Confidence::High,
            record_single_id,
        ),
        Criterion::new(
            "domain.structural.inheritedClassification",
            75,
            &DATA_ROLES,
            Confidence::High,
            inherited_classification,
        ),
        Criterion::new("domain.semantic.saga", 74, &[Role::Saga], Confidence::High, saga),
        Criterion::new(
            "domain.semantic.applicationService",
            72,
            &[Role::ApplicationService],
            Confidence::High,
            application_service,
        ),
        Criterion::new(
            "domain.semantic.inboundOnly",
            70,
            &[Role::InboundOnly],
            Confidence::Medium,
            inbound_only,
        ),
        Criterion::new(
            "domain.semantic.outboundOnly",
            70,
            &[Role::OutboundOnly],
            Confidence::Medium,
            outbound_only,
        ),
        Criterion::new(
            "domain.structural.embeddedValueObject",
            70,
            &[Role::ValueObject],
            Confidence::Medium,
            embedded_value_object,
        ),
        Criterion::new(
            "domain.structural.enumeration",
            70,
            &[Role::ValueObject],
            Confidence::Medium,
            |node, ctx| {
                let enumeration = node.shape.is_enumeration || node.form == ElementForm::Enum;
                Ok((in_core(node, ctx) && enumeration)
                    .then(|| Match::new("Closed set of constants").with_evidence(Evidence::structure("enumeration"))))
            },
        ),
        Criterion::new(
            "domain.naming.domainEvent",
            70,
            &[Role::DomainEvent],
            Confidence::Medium,
            |node, ctx| {
                let immutable = node.shape.is_immutable || node.form == ElementForm::Record;
                Ok((in_core(node, ctx) && immutable && naming::is_domain_event_name(node.simple_name()))
                    .then(|| {
                        Match::new(format!("Immutable and named like an event: {}", node.simple_name()))
                            .with_evidence(Evidence::naming(node.simple_name()))
                    }))
            },
        ),
        Criterion::new(
            "domain.structural.hasIdentity",
            70,
            &[Role::Entity],
            Confidence::Medium,
            |node, ctx| {
                Ok((in_core(node, ctx) && node.shape.has_identity_field).then(|| {
                    Match::new("Has an identity field").with_evidence(Evidence::structure("identity field"))
                }))
            },
        ),
        Criterion::new(
            "domain.naming.domainService",
            50,
            &[Role::DomainService],
            Confidence::Low,
            |node, ctx| {
                Ok((in_core(node, ctx)
                    && node.shape.is_stateless()
                    && naming::is_domain_service_name(node.simple_name()))
                .then(|| {
                    Match::new(format!("Stateless and named like a service: {}", node.simple_name()))
                        .with_evidence(Evidence::naming(node.simple_name()))
                }))
            },
        ),
    ]);
    criteria
}

fn explicit(marker: Marker, suffix: &str, role: Role) -> Criterion<DomainContext> {
    Criterion::new(
        format!("domain.explicit.{}", suffix),
        100,
        &[role],
        Confidence::Explicit,
        move |node: &ElementNode, _: &DomainContext| {
            Ok(node.has_marker(marker).then(|| {
                Match::new(format!("Marked {}", marker)).with_evidence(Evidence::marker(marker.to_string()))
            }))
        },
    )
}

fn in_core(node: &ElementNode, ctx: &DomainContext) -> bool {
    ctx.index().anchors.is_domain(&node.id)
}

fn repository_dominant(node: &ElementNode, ctx: &DomainContext) -> CriterionResult {
    if !in_core(node, ctx) || !node.shape.has_identity_field {
        return Ok(None);
    }
    let repositories = managed::managing_repositories(ctx.graph(), node, ctx.ports());
    if repositories.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        Match::new("Managed by a repository boundary")
            .with_evidence(Evidence::relationship("repository manages this type").with_related(repositories)),
    ))
}

fn record_single_id(node: &ElementNode, ctx: &DomainContext) -> CriterionResult {
    let shaped = node.form == ElementForm::Record || node.shape.is_single_field_wrapper;
    let ok = in_core(node, ctx)
        && shaped
        && !node.shape.has_identity_field
        && naming::is_identifier_name(node.simple_name());
    Ok(ok.then(|| {
        Match::new(format!("Single-value record named {}", node.simple_name()))
            .with_evidence(Evidence::structure("single field wrapper"))
            .with_evidence(Evidence::naming(node.simple_name()))
    }))
}

fn inherited_classification(node: &ElementNode, ctx: &DomainContext) -> CriterionResult {
    let inherited = ctx.graph().supertypes_of(&node.id).into_iter().find_map(|parent| {
        let parent_node = ctx.graph().node(&parent)?;
        EXPLICIT_MARKERS
            .iter()
            .filter(|(_, _, role)| DATA_ROLES.contains(role))
            .find(|(marker, _, _)| parent_node.has_marker(*marker))
            .map(|&(marker, _, role)| (parent, marker, role))
    });
    Ok(inherited.map(|(parent, marker, role)| {
        Match::new(format!("Extends {} marked {}", parent, marker))
            .as_role(role)
            .with_evidence(Evidence::relationship("supertype marker").with_related([parent]))
    }))
}

struct PortUsage {
    inbound: Vec<ElementId>,
    outbound: Vec<ElementId>,
}

fn port_usage(node: &ElementNode, ctx: &DomainContext) -> Option<PortUsage> {
    if !in_core(node, ctx) {
        return None;
    }
    Some(PortUsage {
        inbound: ctx.implemented_ports(node, Direction::Inbound),
        outbound: ctx.dependency_ports(node, Direction::Outbound),
    })
}

fn saga(node: &ElementNode, ctx: &DomainContext) -> CriterionResult {
    Ok(port_usage(node, ctx)
        .filter(|u| !u.inbound.is_empty() && !u.outbound.is_empty() && node.shape.has_mutable_state)
        .map(|u| {
            Match::new("Long-running coordinator: implements inbound, calls outbound, holds state")
                .with_evidence(Evidence::relationship("implements inbound").with_related(u.inbound))
                .with_evidence(Evidence::relationship("depends on outbound").with_related(u.outbound))
        }))
}

fn application_service(node: &ElementNode, ctx: &DomainContext) -> CriterionResult {
    Ok(port_usage(node, ctx)
        .filter(|u| !u.inbound.is_empty() && !u.outbound.is_empty() && !node.shape.has_mutable_state)
        .map(|u| {
            Match::new("Implements an inbound boundary and calls outbound boundaries")
                .with_evidence(Evidence::relationship("implements inbound").with_related(u.inbound))
                .with_evidence(Evidence::relationship("depends on outbound").with_related(u.outbound))
        }))
}

fn inbound_only(node: &ElementNode, ctx: &DomainContext) -> CriterionResult {
    Ok(port_usage(node, ctx)
        .filter(|u| !u.inbound.is_empty() && u.outbound.is_empty())
        .map(|u| {
            Match::new("Implements inbound boundaries without outbound dependencies")
                .with_evidence(Evidence::relationship("implements inbound").with_related(u.inbound))
        }))
}

fn outbound_only(node: &ElementNode, ctx: &DomainContext) -> CriterionResult {
    Ok(port_usage(node, ctx)
        .filter(|u| u.inbound.is_empty() && !u.outbound.is_empty() && node.shape.is_stateless())
        .map(|u| {
            Match::new("Calls outbound boundaries without implementing an inbound one")
                .with_evidence(Evidence::relationship("depends on outbound").with_related(u.outbound))
        }))
}

fn embedded_value_object(node: &ElementNode, ctx: &DomainContext) -> CriterionResult {
    let immutable = node.shape.is_immutable || node.form == ElementForm::Record;
    if !in_core(node, ctx) || !immutable || node.shape.has_identity_field || node.shape.is_enumeration {
        return Ok(None);
    }
    let owners: Vec<ElementId> = ctx
        .graph()
        .dependents_of(&node.id)
        .into_iter()
        .filter(|id| {
            ctx.graph()
                .node(id)
                .is_some_and(|owner| owner.shape.has_identity_field)
        })
        .collect();
    if owners.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        Match::new("Immutable, no identity, embedded in an entity")
            .with_evidence(Evidence::relationship("embedded in").with_related(owners)),
    ))
}
