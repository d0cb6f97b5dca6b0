//! Weighted fallback for domain types that no criterion could place.
//!
//! Each candidate role collects points from naming and form signals. The best
//! score wins if it reaches the threshold; ties resolve aggregate root, then
//! entity, then value object. Only core, non-interface elements left
//! UNCLASSIFIED by the domain stage are considered, so a decided outcome is
//! never touched.

use super::confidence::Confidence;
use super::contribution::{Contribution, ContributionOrigin};
use super::evidence::Evidence;
use super::outcome::{Outcome, Status};
use super::role::Role;
use crate::graph::{ElementForm, ElementNode};
use crate::semantic::AnchorIndex;

pub const DEFAULT_SECONDARY_MIN_SCORE: u32 = 7;

/// Criterion name recorded on fallback contributions.
pub const SECONDARY_CRITERION: &str = "secondary.weightedSignals";

const AGGREGATE_SUFFIXES: &[&str] = &["Order", "Account", "Invoice", "Booking"];
const VALUE_SUFFIXES: &[&str] = &["Dto", "Info", "Data", "Spec"];
const VALUE_NAMES: &[&str] = &["Money", "Address", "Email", "Phone"];

/// One signal that fired, with its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub weight: u32,
    pub description: &'static str,
}

/// Accumulated score for one candidate role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleScore {
    pub role: Role,
    pub signals: Vec<Signal>,
}

impl RoleScore {
    fn new(role: Role) -> Self {
        Self {
            role,
            signals: Vec::new(),
        }
    }

    fn add(&mut self, fired: bool, weight: u32, description: &'static str) {
        if fired {
            self.signals.push(Signal { weight, description });
        }
    }

    pub fn total(&self) -> u32 {
        self.signals.iter().map(|s| s.weight).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedSignalClassifier {
    min_score: u32,
}

impl Default for WeightedSignalClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDARY_MIN_SCORE)
    }
}

impl WeightedSignalClassifier {
    pub fn new(min_score: u32) -> Self {
        Self { min_score }
    }

    pub fn min_score(&self) -> u32 {
        self.min_score
    }

    /// Scores in tie-break order: aggregate root, entity, value object.
    pub fn scores(&self, node: &ElementNode) -> [RoleScore; 3] {
        let name = node.simple_name();

        let mut aggregate = RoleScore::new(Role::AggregateRoot);
        aggregate.add(
            name.contains("Aggregate") || name.ends_with("Root"),
            4,
            "name contains 'Aggregate' or ends with 'Root'",
        );
        aggregate.add(
            ends_with_any(name, AGGREGATE_SUFFIXES),
            3,
            "name follows a common aggregate pattern",
        );

        let mut entity = RoleScore::new(Role::Entity);
        entity.add(name.ends_with("Entity"), 4, "name ends with 'Entity'");
        entity.add(
            name.ends_with("Item") || name.ends_with("Line"),
            2,
            "name follows a common child entity pattern",
        );

        let mut value = RoleScore::new(Role::ValueObject);
        value.add(node.form == ElementForm::Record, 5, "declared as a record");
        value.add(
            name.ends_with("Value") || name.ends_with("VO"),
            4,
            "name ends with 'Value' or 'VO'",
        );
        value.add(
            ends_with_any(name, VALUE_SUFFIXES),
            3,
            "name follows a common data carrier pattern",
        );
        value.add(
            VALUE_NAMES.contains(&name) || name.ends_with("Amount") || name.ends_with("Quantity"),
            3,
            "name is a common domain value",
        );

        [aggregate, entity, value]
    }

    /// Highest score at or above the threshold.
    pub fn best(&self, node: &ElementNode) -> Option<RoleScore> {
        let scores = self.scores(node);
        let max = scores.iter().map(RoleScore::total).max()?;
        if max < self.min_score {
            return None;
        }
        scores.into_iter().find(|s| s.total() == max)
    }

    /// Re-decides an UNCLASSIFIED core outcome; anything else is returned as is.
    pub fn reclassify(
        &self,
        outcome: Outcome,
        node: &ElementNode,
        anchors: &AnchorIndex,
        priority: i32,
    ) -> Outcome {
        if outcome.status != Status::Unclassified || node.is_interface() || !anchors.is_domain(&node.id) {
            return outcome;
        }
        let Some(best) = self.best(node) else {
            return outcome;
        };

        log::debug!(
            "Secondary classification: {} as {} (score {})",
            node.id,
            best.role,
            best.total()
        );

        let contribution = Contribution {
            element_id: node.id.clone(),
            role: best.role,
            priority,
            confidence: Confidence::Low,
            criterion: SECONDARY_CRITERION.to_string(),
            justification: format!("Weighted signals score {} as {}", best.total(), best.role),
            evidence: best
                .signals
                .iter()
                .map(|s| Evidence::naming(format!("+{} {}", s.weight, s.description)))
                .collect(),
            origin: ContributionOrigin::Secondary,
        };

        let mut contributions = vec![contribution];
        contributions.extend(outcome.contributions);
        Outcome {
            element_id: outcome.element_id,
            status: Status::Success,
            winning_role: Some(best.role),
            confidence: Some(Confidence::Low),
            winning_criterion: Some(SECONDARY_CRITERION.to_string()),
            contributions,
            conflicts: Vec::new(),
        }
    }
}

fn ends_with_any(name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| name.ends_with(suffix))
}
