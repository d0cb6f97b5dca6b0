//! Profiles, config files and setup-time validation.

mod common;

use common::{hexagon_graph, unmarked_orders_graph};
use indoc::indoc;
use pretty_assertions::assert_eq;
use rolemap::classification::{
    BoundaryContext, Confidence, Criterion, DomainContext, Match, Role,
};
use rolemap::config::{load_config, ClassificationConfig, CriteriaProfile, ProfileName};
use rolemap::criteria;
use rolemap::{Classifier, ConfigurationError};
use std::fs;
use tempfile::TempDir;

#[test]
fn yaml_profile_file_drives_classification() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("persistence-first.yaml");
    fs::write(
        &path,
        indoc! {"
            priorities:
              boundary.signature.persistence: 82
              boundary.pattern.command: 60
        "},
    )
    .unwrap();

    let profile = CriteriaProfile::from_path(&path).unwrap();
    assert_eq!(profile.name, "persistence-first");
    assert_eq!(profile.priority("boundary.pattern.command"), Some(60));

    let config = ClassificationConfig::default()
        .validate_with_profile(profile)
        .unwrap();
    let results = Classifier::new(config).unwrap().classify(&unmarked_orders_graph());
    let orders = results.get(&"shop.order.Orders".into()).unwrap();
    assert_eq!(orders.winning_role, Some(Role::Repository));
    assert_eq!(orders.confidence, Some(Confidence::Medium));
}

#[test]
fn toml_config_file_round_trips_into_a_classifier() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rolemap.toml");
    fs::write(
        &path,
        indoc! {r#"
            profile = "strict"
            min_priority = 60
            exclude = ["shop.infrastructure.*"]

            [explicit]
            "shop.order.Money" = "value-object"
        "#},
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.profile, ProfileName::Strict);

    let classifier = Classifier::from_config(&config).unwrap();
    assert_eq!(classifier.config().profile_name(), "strict");
    assert_eq!(
        classifier.boundary_registry().priority_of("boundary.package.inbound"),
        Some(-1)
    );
    assert_eq!(
        classifier.domain_registry().priority_of("domain.structural.hasIdentity"),
        Some(60)
    );

    let results = classifier.classify(&hexagon_graph());
    assert_eq!(results.excluded_count(), 1);
    assert_eq!(results.role_of(&"shop.order.Money".into()), Some(Role::ValueObject));
}

#[test]
fn strict_profile_demotes_naming_heuristics() {
    let strict = Classifier::from_config(&ClassificationConfig::default().with_profile(ProfileName::Strict))
        .unwrap();
    let registry = strict.boundary_registry();

    for name in criteria::boundary_names().iter().filter(|n| n.contains(".naming.")) {
        assert_eq!(registry.priority_of(name), Some(40), "{}", name);
    }
    assert!(registry.enabled().all(|entry| !entry.criterion.name().contains(".package.")));
}

#[test]
fn unknown_criterion_override_is_rejected() {
    let err = Classifier::from_config(
        &ClassificationConfig::default().with_override("boundary.naming.typo", 75),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownCriterion { .. }));
    assert!(err.to_string().contains("boundary.naming.typo"));
}

#[test]
fn custom_criterion_priority_can_be_overridden() {
    let by_name = Criterion::<DomainContext>::new(
        "domain.custom.aggregateByName",
        60,
        &[Role::AggregateRoot],
        Confidence::Medium,
        |node, _| {
            Ok(node
                .simple_name()
                .ends_with("Order")
                .then(|| Match::new("named like the aggregate")))
        },
    );
    let mut domain = criteria::domain::default_criteria();
    domain.push(by_name);

    let config = ClassificationConfig::default()
        .with_override("domain.custom.aggregateByName", 90)
        .validate()
        .unwrap();
    let classifier = Classifier::with_criteria(config, criteria::boundary::default_criteria(), domain)
        .unwrap();
    assert_eq!(
        classifier.domain_registry().priority_of("domain.custom.aggregateByName"),
        Some(90)
    );

    let results = classifier.classify(&unmarked_orders_graph());
    let order = results.get(&"shop.order.Order".into()).unwrap();
    assert_eq!(order.winning_role, Some(Role::AggregateRoot));
    assert_eq!(
        order.winning_criterion.as_deref(),
        Some("domain.custom.aggregateByName")
    );
}

#[test]
fn out_of_range_override_is_rejected() {
    let err = ClassificationConfig::default()
        .with_override("boundary.naming.repository", 1000)
        .validate()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::PriorityOutOfRange { priority: 1000, .. }));
}

#[test]
fn every_validation_problem_is_reported_at_once() {
    let mut config = ClassificationConfig::default()
        .with_override("domain.naming.domainService", 1001)
        .with_exclude("[unclosed");
    config.min_priority = -5;

    match config.validate().unwrap_err() {
        ConfigurationError::Multiple { errors } => assert_eq!(errors.len(), 3),
        other => panic!("expected accumulated errors, got {}", other),
    }
}

#[test]
fn invalid_explicit_role_is_rejected() {
    let mut config = ClassificationConfig::default();
    config
        .explicit
        .insert("shop.order.Order".to_string(), "CONTROLLER".to_string());
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidRole { .. }));
}

#[test]
fn missing_profile_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = CriteriaProfile::from_path(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigurationError::Io { .. }));
}

#[test]
fn malformed_yaml_profile_is_a_parse_error() {
    let err = CriteriaProfile::from_yaml_str("broken", "priorities: [1, 2").unwrap_err();
    assert!(matches!(err, ConfigurationError::Parse { .. }));
}

#[test]
fn duplicate_custom_criteria_are_rejected() {
    let dup = || {
        Criterion::<DomainContext>::new(
            "domain.custom.same",
            80,
            &[Role::Entity],
            Confidence::High,
            |_, _| Ok(None),
        )
    };
    let err = Classifier::with_criteria(
        ClassificationConfig::default().validate().unwrap(),
        criteria::boundary::default_criteria(),
        vec![dup(), dup()],
    )
    .unwrap_err();
    assert!(matches!(err, ConfigurationError::DuplicateCriterion { .. }));
}

#[test]
fn foreign_role_in_boundary_catalog_is_rejected() {
    let stray = Criterion::<BoundaryContext>::new(
        "boundary.custom.entity",
        80,
        &[Role::Entity],
        Confidence::High,
        |_, _| Ok(None),
    );
    let err = Classifier::with_criteria(
        ClassificationConfig::default().validate().unwrap(),
        vec![stray],
        criteria::domain::default_criteria(),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigurationError::ForeignRole { .. }));
}

#[test]
fn faulty_custom_criterion_is_counted_not_fatal() {
    let panicking = Criterion::<DomainContext>::new(
        "domain.custom.panics",
        90,
        &[Role::Entity],
        Confidence::High,
        |node, _| {
            if node.simple_name() == "Order" {
                panic!("boom");
            }
            Ok(Some(Match::new("always")))
        },
    );
    let mut domain = criteria::domain::default_criteria();
    domain.push(panicking);

    let classifier = Classifier::with_criteria(
        ClassificationConfig::default().validate().unwrap(),
        criteria::boundary::default_criteria(),
        domain,
    )
    .unwrap();
    let results = classifier.classify(&unmarked_orders_graph());

    assert_eq!(results.fault_count(), 1);
    // The other criteria still classify the faulting element
    assert_eq!(results.role_of(&"shop.order.Order".into()), Some(Role::Entity));
    assert_eq!(
        results.role_of(&"shop.order.OrderService".into()),
        Some(Role::Entity)
    );
}
