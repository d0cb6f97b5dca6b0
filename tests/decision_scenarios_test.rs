//! Decision policy behaviour on hand-built contribution sets.

mod common;

use common::vote;
use pretty_assertions::assert_eq;
use rolemap::classification::{
    CompatibilityTable, Confidence, ConflictSeverity, Contribution, DecisionPolicy, Role, Status,
};

fn decide(contributions: Vec<Contribution>) -> rolemap::Outcome {
    DecisionPolicy::default().decide(
        "app.Element".into(),
        contributions,
        &CompatibilityTable::domain_default(),
    )
}

#[test]
fn explicit_marker_beats_naming_heuristic() {
    let outcome = decide(vec![
        vote("domain.naming.domainService", Role::DomainService, 50, Confidence::Low),
        vote("domain.explicit.aggregateRoot", Role::AggregateRoot, 100, Confidence::Explicit),
    ]);

    assert_eq!(outcome.status, Status::Success);
    assert_eq!(outcome.winning_role, Some(Role::AggregateRoot));
    assert_eq!(outcome.confidence, Some(Confidence::Explicit));
    assert_eq!(outcome.contributions.len(), 2);
    assert!(outcome.conflicts.is_empty());
}

#[test]
fn incompatible_tie_at_equal_priority_is_a_conflict() {
    let outcome = decide(vec![
        vote("BValueCriterion", Role::ValueObject, 80, Confidence::High),
        vote("AEntityCriterion", Role::Entity, 80, Confidence::High),
    ]);

    assert_eq!(outcome.status, Status::Conflict);
    assert_eq!(outcome.winning_role, None);
    assert_eq!(outcome.confidence, None);
    assert_eq!(outcome.conflicts.len(), 1);
    assert_eq!(outcome.conflicts[0].severity, ConflictSeverity::Error);
    assert!(outcome.justification().contains("equal priority"));
}

#[test]
fn identical_roles_at_equal_priority_agree() {
    let outcome = decide(vec![
        vote("domain.structural.repositoryDominant", Role::AggregateRoot, 85, Confidence::High),
        vote("custom.aggregateByName", Role::AggregateRoot, 85, Confidence::High),
    ]);

    assert_eq!(outcome.status, Status::Success);
    assert_eq!(outcome.winning_role, Some(Role::AggregateRoot));
    assert!(outcome.conflicts.is_empty());
}

#[test]
fn compatible_runner_up_is_a_warning() {
    let outcome = decide(vec![
        vote("domain.structural.repositoryDominant", Role::AggregateRoot, 80, Confidence::High),
        vote("domain.structural.hasIdentity", Role::Entity, 70, Confidence::Medium),
    ]);

    assert_eq!(outcome.status, Status::SuccessWithConflicts);
    assert_eq!(outcome.winning_role, Some(Role::AggregateRoot));
    assert_eq!(outcome.conflicts[0].severity, ConflictSeverity::Warning);
}

#[test]
fn compatible_tie_at_equal_priority_still_resolves() {
    let outcome = decide(vec![
        vote("b.entity", Role::Entity, 80, Confidence::High),
        vote("a.aggregate", Role::AggregateRoot, 80, Confidence::High),
    ]);

    assert_eq!(outcome.status, Status::SuccessWithConflicts);
    assert_eq!(outcome.winning_role, Some(Role::AggregateRoot));
    assert_eq!(outcome.winning_criterion.as_deref(), Some("a.aggregate"));
}

#[test]
fn higher_confidence_breaks_incompatible_priority_tie_only_in_ranking() {
    // Confidence picks the candidate, but the incompatible equal-priority
    // vote still turns the outcome into a conflict.
    let outcome = decide(vec![
        vote("a.value", Role::ValueObject, 80, Confidence::Medium),
        vote("b.entity", Role::Entity, 80, Confidence::High),
    ]);
    assert_eq!(outcome.status, Status::Conflict);
    assert_eq!(outcome.conflicts[0].role, Role::ValueObject);
}

#[test]
fn floor_leaves_low_priority_elements_unclassified() {
    let outcome = decide(vec![vote("domain.naming.domainService", Role::DomainService, 50, Confidence::Low)]);

    assert_eq!(outcome.status, Status::Unclassified);
    assert_eq!(outcome.winning_role, None);
    assert_eq!(outcome.contributions.len(), 1);
    assert_eq!(
        outcome.justification(),
        "No contribution reached the priority floor"
    );
}

#[test]
fn lowered_floor_admits_weak_contributions() {
    let outcome = DecisionPolicy::new(40).decide(
        "app.Element".into(),
        vec![vote("domain.naming.domainService", Role::DomainService, 50, Confidence::Low)],
        &CompatibilityTable::domain_default(),
    );
    assert_eq!(outcome.winning_role, Some(Role::DomainService));
    assert_eq!(outcome.confidence, Some(Confidence::Low));
}

#[test]
fn explicit_override_wins_over_a_conflict() {
    let outcome = decide(vec![
        vote("a.value", Role::ValueObject, 80, Confidence::High),
        vote("b.entity", Role::Entity, 80, Confidence::High),
        Contribution::explicit_override("app.Element".into(), Role::Identifier),
    ]);

    assert_eq!(outcome.status, Status::Success);
    assert_eq!(outcome.winning_role, Some(Role::Identifier));
    assert_eq!(outcome.confidence, Some(Confidence::Explicit));
    assert_eq!(outcome.contributions.len(), 3);
    assert!(outcome.contributions[0].is_explicit_override());
}

#[test]
fn no_contributions_is_unclassified() {
    let outcome = decide(Vec::new());
    assert_eq!(outcome.status, Status::Unclassified);
    assert_eq!(outcome.justification(), "No criterion matched");
}
