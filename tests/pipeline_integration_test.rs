//! End-to-end classification through the two-stage pipeline.

mod common;

use common::{
    class, hexagon_graph, interface, notifications_graph, orchestration_graph, synthetic_graph,
    unmarked_orders_graph,
};
use pretty_assertions::assert_eq;
use rolemap::classification::{Confidence, DiagnosticKind, Role, Status};
use rolemap::config::{ClassificationConfig, ProfileName};
use rolemap::graph::{ElementId, RelationshipKind, TypeGraph};
use rolemap::semantic::{SemanticIndex, SemanticOptions};
use rolemap::Classifier;
use std::sync::atomic::AtomicBool;

fn id(name: &str) -> ElementId {
    ElementId::new(name)
}

fn classifier(config: ClassificationConfig) -> Classifier {
    Classifier::from_config(&config).unwrap()
}

#[test]
fn hexagon_ports_are_classified_by_direction() {
    let results = Classifier::default().classify(&hexagon_graph());

    let use_case = results.get(&id("shop.order.PlaceOrderUseCase")).unwrap();
    assert_eq!(use_case.winning_role, Some(Role::UseCase));
    assert_eq!(use_case.confidence, Some(Confidence::High));
    assert_eq!(
        use_case.winning_criterion.as_deref(),
        Some("boundary.semantic.driving")
    );

    let repository = results.get(&id("shop.order.OrderRepository")).unwrap();
    assert_eq!(repository.winning_role, Some(Role::Repository));
    assert_eq!(repository.status, Status::SuccessWithConflicts);

    let gateway = results.get(&id("shop.order.PaymentGateway")).unwrap();
    assert_eq!(gateway.winning_role, Some(Role::Gateway));
    assert!(gateway
        .contributions
        .iter()
        .any(|c| c.criterion == "boundary.relationship.externalImplementation"));
}

#[test]
fn hexagon_domain_elements_see_final_port_roles() {
    let results = Classifier::default().classify(&hexagon_graph());

    let expectations = [
        ("shop.order.OrderApplicationService", Role::ApplicationService),
        ("shop.order.Order", Role::AggregateRoot),
        ("shop.order.OrderId", Role::Identifier),
        ("shop.order.Money", Role::ValueObject),
        ("shop.order.OrderPlaced", Role::DomainEvent),
        ("shop.order.OrderStatus", Role::ValueObject),
        ("shop.order.Customer", Role::Entity),
    ];
    for (element, role) in expectations {
        assert_eq!(results.role_of(&id(element)), Some(role), "{}", element);
    }

    let order = results.get(&id("shop.order.Order")).unwrap();
    assert_eq!(order.status, Status::SuccessWithConflicts);
    assert_eq!(
        order.winning_criterion.as_deref(),
        Some("domain.structural.repositoryDominant")
    );
}

#[test]
fn infrastructure_adapters_stay_unclassified() {
    let results = Classifier::default().classify(&hexagon_graph());
    let adapter = results.get(&id("shop.infrastructure.StripePaymentGateway")).unwrap();
    assert_eq!(adapter.status, Status::Unclassified);
    assert!(results
        .unclassified()
        .any(|o| o.element_id == id("shop.infrastructure.StripePaymentGateway")));
}

#[test]
fn every_element_gets_exactly_one_outcome() {
    let graph = hexagon_graph();
    let results = Classifier::default().classify(&graph);

    assert_eq!(results.len(), graph.len());
    assert_eq!(results.port_outcomes().len(), graph.interfaces().count());
    let ids: Vec<&ElementId> = results.iter().map(|o| &o.element_id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(ids, sorted);
}

#[test]
fn unmarked_persistence_interface_reads_as_command_by_default() {
    let results = Classifier::default().classify(&unmarked_orders_graph());
    let orders = results.get(&id("shop.order.Orders")).unwrap();

    assert_eq!(orders.winning_role, Some(Role::Command));
    assert_eq!(orders.status, Status::SuccessWithConflicts);
    assert!(orders.conflicts.iter().any(|c| c.role == Role::Repository));
}

#[test]
fn repository_aware_profile_resolves_unmarked_persistence_interface() {
    let results = classifier(ClassificationConfig::default().with_profile(ProfileName::RepositoryAware))
        .classify(&unmarked_orders_graph());
    let orders = results.get(&id("shop.order.Orders")).unwrap();

    assert_eq!(orders.winning_role, Some(Role::Repository));
    assert_eq!(orders.confidence, Some(Confidence::Medium));
    assert_eq!(
        orders.winning_criterion.as_deref(),
        Some("boundary.signature.persistence")
    );
    assert!(orders.is_classified());
}

#[test]
fn domain_stage_follows_the_boundary_decision() {
    // The entity behind `Orders` only becomes an aggregate root once `Orders`
    // is a repository.
    let default_results = Classifier::default().classify(&unmarked_orders_graph());
    assert_eq!(default_results.role_of(&id("shop.order.Order")), Some(Role::Entity));

    let aware_results =
        classifier(ClassificationConfig::default().with_profile(ProfileName::RepositoryAware))
            .classify(&unmarked_orders_graph());
    assert_eq!(
        aware_results.role_of(&id("shop.order.Order")),
        Some(Role::AggregateRoot)
    );
}

#[test]
fn explicit_configuration_overrides_every_criterion() {
    let config = ClassificationConfig::default()
        .with_explicit("shop.order.Money", Role::Identifier)
        .with_explicit("shop.order.Orders", Role::Repository);
    let results = classifier(config).classify(&unmarked_orders_graph_with_money());

    let money = results.get(&id("shop.order.Money")).unwrap();
    assert_eq!(money.winning_role, Some(Role::Identifier));
    assert_eq!(money.confidence, Some(Confidence::Explicit));
    assert_eq!(money.status, Status::Success);

    let orders = results.get(&id("shop.order.Orders")).unwrap();
    assert_eq!(orders.winning_role, Some(Role::Repository));
    assert_eq!(
        orders.winning_criterion.as_deref(),
        Some("explicit.configuration")
    );
    // The override is visible to domain criteria
    assert_eq!(results.role_of(&id("shop.order.Order")), Some(Role::AggregateRoot));
}

fn unmarked_orders_graph_with_money() -> TypeGraph {
    let mut builder = TypeGraph::builder();
    for node in unmarked_orders_graph().elements() {
        builder.add_element(node.clone());
    }
    builder.add_element(class("shop.order.Money"));
    builder
        .relationship("shop.order.OrderService", "shop.order.Orders", RelationshipKind::ReferencesField)
        .relationship("shop.order.Order", "shop.order.Orders", RelationshipKind::UsedInMethodSignature)
        .build()
}

#[test]
fn excluded_elements_get_no_outcome() {
    let config = ClassificationConfig::default().with_exclude("shop.infrastructure.*");
    let graph = hexagon_graph();
    let results = classifier(config).classify(&graph);

    assert_eq!(results.get(&id("shop.infrastructure.StripePaymentGateway")), None);
    assert_eq!(results.excluded_count(), 1);
    assert_eq!(results.len(), graph.len() - 1);
    // The adapter still informs the gateway's facts
    assert!(results
        .get(&id("shop.order.PaymentGateway"))
        .unwrap()
        .contributions
        .iter()
        .any(|c| c.criterion == "boundary.relationship.externalImplementation"));
}

#[test]
fn parallel_and_sequential_passes_agree() {
    let graph = synthetic_graph(40);
    let parallel = Classifier::default().classify(&graph);
    let sequential = classifier(ClassificationConfig::default().sequential()).classify(&graph);

    let left: Vec<_> = parallel.iter().cloned().collect();
    let right: Vec<_> = sequential.iter().cloned().collect();
    assert_eq!(left, right);
}

#[test]
fn repeated_passes_are_identical() {
    let graph = hexagon_graph();
    let classifier = Classifier::default();
    let first: Vec<_> = classifier.classify(&graph).iter().cloned().collect();
    let second: Vec<_> = classifier.classify(&graph).iter().cloned().collect();
    assert_eq!(first, second);
}

#[test]
fn raised_cancel_flag_yields_no_results() {
    let cancel = AtomicBool::new(true);
    assert!(Classifier::default()
        .classify_cancellable(&synthetic_graph(5), &cancel)
        .is_none());
}

#[test]
fn empty_graph_yields_empty_results() {
    let results = Classifier::default().classify(&TypeGraph::default());
    assert!(results.is_empty());
    assert_eq!(results.summary().total, 0);
}

#[test]
fn interface_without_any_signal_is_unclassified() {
    let graph = TypeGraph::builder().element(interface("shop.misc.Thing")).build();
    let results = Classifier::default().classify(&graph);
    let outcome = results.get(&id("shop.misc.Thing")).unwrap();
    assert_eq!(outcome.status, Status::Unclassified);
    assert_eq!(outcome.justification(), "No criterion matched");
}

#[test]
fn annotation_only_profile_ignores_heuristics() {
    let results = classifier(ClassificationConfig::default().with_profile(ProfileName::AnnotationOnly))
        .classify(&hexagon_graph());

    assert_eq!(results.role_of(&id("shop.order.Customer")), Some(Role::Entity));
    assert_eq!(results.role_of(&id("shop.order.OrderRepository")), None);
    assert_eq!(results.role_of(&id("shop.order.Order")), None);
}

#[test]
fn diagnostics_cover_conflicts_and_unclassified_elements() {
    let results = Classifier::default().classify(&hexagon_graph());
    let diagnostics = results.diagnostics();

    assert!(diagnostics
        .iter()
        .any(|d| d.element_id == id("shop.order.OrderId") && d.kind == DiagnosticKind::ConflictError));
    assert!(diagnostics
        .iter()
        .any(|d| d.element_id == id("shop.order.Order") && d.kind == DiagnosticKind::ConflictWarning));

    let summary = results.summary();
    assert_eq!(summary.total, results.len());
    assert_eq!(summary.fault_count, 0);
    assert!(summary.classification_rate() > 0.8);
}

#[test]
fn service_held_by_a_domain_entity_is_not_a_pivot() {
    let free = notifications_graph(false);
    let held = notifications_graph(true);
    let service = id("shop.billing.BillingService");
    let notifications = id("shop.billing.Notifications");

    assert!(SemanticIndex::build(&free, &SemanticOptions::default())
        .pivots
        .contains(&service));
    assert!(!SemanticIndex::build(&held, &SemanticOptions::default())
        .pivots
        .contains(&service));

    let free_results = Classifier::default().classify(&free);
    let port = free_results.get(&notifications).unwrap();
    assert_eq!(port.winning_role, Some(Role::GenericOutbound));
    assert_eq!(
        port.winning_criterion.as_deref(),
        Some("boundary.relationship.injectedDependency")
    );
    assert_eq!(free_results.role_of(&service), Some(Role::OutboundOnly));

    // Without a pivot using it, nothing marks the interface as outbound
    let held_results = Classifier::default().classify(&held);
    assert_eq!(held_results.get(&notifications).unwrap().status, Status::Unclassified);
    assert_eq!(held_results.role_of(&service), None);
    assert_eq!(held_results.role_of(&id("shop.billing.Invoice")), Some(Role::Entity));
}

#[test]
fn orchestration_actors_are_told_apart_by_ports_and_state() {
    let results = Classifier::default().classify(&orchestration_graph());

    let expectations = [
        ("shop.shipping.ShipOrderUseCase", Role::UseCase, "boundary.naming.useCase"),
        ("shop.shipping.CarrierGateway", Role::Gateway, "boundary.semantic.driven"),
        ("shop.shipping.ShippingSaga", Role::Saga, "domain.semantic.saga"),
        ("shop.shipping.TrackShipmentHandler", Role::InboundOnly, "domain.semantic.inboundOnly"),
        ("shop.shipping.TrackingPoller", Role::OutboundOnly, "domain.semantic.outboundOnly"),
    ];
    for (element, role, criterion) in expectations {
        let outcome = results.get(&id(element)).unwrap();
        assert_eq!(outcome.winning_role, Some(role), "{}", element);
        assert_eq!(outcome.winning_criterion.as_deref(), Some(criterion), "{}", element);
    }
    assert_eq!(
        results.get(&id("shop.shipping.ShippingSaga")).unwrap().status,
        Status::Success
    );
}

#[test]
fn explicit_entry_for_an_absent_element_changes_nothing() {
    let graph = hexagon_graph();
    let config = ClassificationConfig::default().with_explicit("shop.order.Ghost", Role::Entity);
    let results = classifier(config).classify(&graph);

    assert_eq!(results.get(&id("shop.order.Ghost")), None);
    assert_eq!(results.len(), graph.len());

    let baseline: Vec<_> = Classifier::default().classify(&graph).iter().cloned().collect();
    let with_ghost: Vec<_> = results.iter().cloned().collect();
    assert_eq!(with_ghost, baseline);
}

#[test]
fn flipping_outbound_ports_inbound_changes_domain_roles() {
    let config = ClassificationConfig::default()
        .with_explicit("shop.order.OrderRepository", Role::Query)
        .with_explicit("shop.order.PaymentGateway", Role::Query);
    let results = classifier(config).classify(&hexagon_graph());

    assert_eq!(results.role_of(&id("shop.order.OrderRepository")), Some(Role::Query));
    // No outbound dependency is left for the service
    assert_eq!(
        results.role_of(&id("shop.order.OrderApplicationService")),
        Some(Role::InboundOnly)
    );
    // No repository manages the order any more
    let order = results.get(&id("shop.order.Order")).unwrap();
    assert_eq!(order.winning_role, Some(Role::Entity));
    assert_eq!(
        order.winning_criterion.as_deref(),
        Some("domain.structural.hasIdentity")
    );
}
