//! Outcome maps, the merged results handed to callers, and their summaries.

use super::confidence::Confidence;
use super::outcome::{ConflictSeverity, Outcome, Status};
use super::role::Role;
use crate::anomalies::{Anomaly, AnomalyCode, AnomalySeverity};
use crate::graph::ElementId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Complete boundary-stage outcomes.
///
/// Only a finished boundary stage can produce one, so anything holding a
/// `PortOutcomes` sees final boundary roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PortOutcomes {
    outcomes: BTreeMap<ElementId, Outcome>,
}

impl PortOutcomes {
    pub(crate) fn from_outcomes(outcomes: BTreeMap<ElementId, Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn get(&self, id: &ElementId) -> Option<&Outcome> {
        self.outcomes.get(id)
    }

    /// Winning boundary role, if the interface was classified
    pub fn role_of(&self, id: &ElementId) -> Option<Role> {
        self.outcomes.get(id).and_then(|o| o.winning_role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.values()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Domain-stage outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DomainOutcomes {
    outcomes: BTreeMap<ElementId, Outcome>,
}

impl DomainOutcomes {
    pub(crate) fn from_outcomes(outcomes: BTreeMap<ElementId, Outcome>) -> Self {
        Self { outcomes }
    }

    pub(crate) fn into_outcomes(self) -> BTreeMap<ElementId, Outcome> {
        self.outcomes
    }

    pub fn get(&self, id: &ElementId) -> Option<&Outcome> {
        self.outcomes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.values()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Final result of a completed classification pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResults {
    ports: PortOutcomes,
    domain: DomainOutcomes,
    excluded: usize,
    fault_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    anomalies: Vec<Anomaly>,
}

impl ClassificationResults {
    pub(crate) fn complete(
        ports: PortOutcomes,
        domain: DomainOutcomes,
        excluded: usize,
        fault_count: usize,
    ) -> Self {
        Self {
            ports,
            domain,
            excluded,
            fault_count,
            anomalies: Vec::new(),
        }
    }

    pub(crate) fn with_anomalies(mut self, anomalies: Vec<Anomaly>) -> Self {
        self.anomalies = anomalies;
        self
    }

    pub fn get(&self, id: &ElementId) -> Option<&Outcome> {
        self.ports.get(id).or_else(|| self.domain.get(id))
    }

    pub fn role_of(&self, id: &ElementId) -> Option<Role> {
        self.get(id).and_then(|o| o.winning_role)
    }

    /// All outcomes ordered by element id
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        let mut all: Vec<&Outcome> = self.ports.iter().chain(self.domain.iter()).collect();
        all.sort_by(|a, b| a.element_id.cmp(&b.element_id));
        all.into_iter()
    }

    pub fn len(&self) -> usize {
        self.ports.len() + self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn port_outcomes(&self) -> &PortOutcomes {
        &self.ports
    }

    pub fn domain_outcomes(&self) -> &DomainOutcomes {
        &self.domain
    }

    pub fn unclassified(&self) -> impl Iterator<Item = &Outcome> {
        self.iter().filter(|o| o.status == Status::Unclassified)
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &Outcome> {
        self.iter().filter(|o| o.status == Status::Conflict)
    }

    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &Outcome> {
        self.iter().filter(move |o| o.winning_role == Some(role))
    }

    /// Elements removed by exclude patterns before classification
    pub fn excluded_count(&self) -> usize {
        self.excluded
    }

    /// Criterion faults swallowed during the pass
    pub fn fault_count(&self) -> usize {
        self.fault_count
    }

    /// Anomalies found after classification, empty when detection is off
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn summary(&self) -> ClassificationSummary {
        let mut summary = ClassificationSummary {
            total: self.len(),
            excluded: self.excluded,
            fault_count: self.fault_count,
            anomalies: self.anomalies.len(),
            ..Default::default()
        };
        for outcome in self.iter() {
            *summary.by_status.entry(outcome.status).or_default() += 1;
            if let Some(role) = outcome.winning_role {
                *summary.by_role.entry(role).or_default() += 1;
            }
            if let Some(confidence) = outcome.confidence {
                *summary.by_confidence.entry(confidence).or_default() += 1;
            }
        }
        summary
    }

    /// One line per contribution, per conflict and per anomaly, for audit output.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut lines: Vec<Diagnostic> = self.iter().flat_map(outcome_diagnostics).collect();
        lines.extend(self.anomalies.iter().map(|anomaly| Diagnostic {
            element_id: anomaly.element_id.clone(),
            kind: match anomaly.severity {
                AnomalySeverity::Warning => DiagnosticKind::AnomalyWarning,
                AnomalySeverity::Error => DiagnosticKind::AnomalyError,
            },
            message: anomaly.message.clone(),
            code: Some(anomaly.code),
        }));
        lines
    }

    /// Pretty JSON with port and domain outcomes under separate keys.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn outcome_diagnostics(outcome: &Outcome) -> Vec<Diagnostic> {
    let mut lines = vec![Diagnostic {
        element_id: outcome.element_id.clone(),
        kind: DiagnosticKind::Decision,
        message: match outcome.winning_role {
            Some(role) => format!("{} as {}: {}", outcome.status, role, outcome.justification()),
            None => format!("{}: {}", outcome.status, outcome.justification()),
        },
        code: None,
    }];
    lines.extend(outcome.contributions.iter().map(|c| {
        let evidence: Vec<String> = c.evidence.iter().map(ToString::to_string).collect();
        Diagnostic {
            element_id: outcome.element_id.clone(),
            kind: DiagnosticKind::Contribution,
            message: format!(
                "{} -> {} (priority {}, {}): {}{}",
                c.criterion,
                c.role,
                c.priority,
                c.confidence,
                c.justification,
                if evidence.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", evidence.join("; "))
                }
            ),
            code: None,
        }
    }));
    lines.extend(outcome.conflicts.iter().map(|conflict| Diagnostic {
        element_id: outcome.element_id.clone(),
        kind: match conflict.severity {
            ConflictSeverity::Warning => DiagnosticKind::ConflictWarning,
            ConflictSeverity::Error => DiagnosticKind::ConflictError,
        },
        message: conflict.message.clone(),
        code: None,
    }));
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Decision,
    Contribution,
    ConflictWarning,
    ConflictError,
    AnomalyWarning,
    AnomalyError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub element_id: ElementId,
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<AnomalyCode>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            DiagnosticKind::Decision => "decision",
            DiagnosticKind::Contribution => "vote",
            DiagnosticKind::ConflictWarning => "warning",
            DiagnosticKind::ConflictError => "error",
            DiagnosticKind::AnomalyWarning => "anomaly-warning",
            DiagnosticKind::AnomalyError => "anomaly-error",
        };
        match self.code {
            Some(code) => write!(f, "{} [{} {}] {}", self.element_id, tag, code, self.message),
            None => write!(f, "{} [{}] {}", self.element_id, tag, self.message),
        }
    }
}

/// Counts per status, role and confidence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    pub total: usize,
    pub excluded: usize,
    pub fault_count: usize,
    pub anomalies: usize,
    pub by_status: BTreeMap<Status, usize>,
    pub by_role: BTreeMap<Role, usize>,
    pub by_confidence: BTreeMap<Confidence, usize>,
}

impl ClassificationSummary {
    pub fn count(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn classified(&self) -> usize {
        self.count(Status::Success) + self.count(Status::SuccessWithConflicts)
    }

    /// Share of elements with a definite role, 0.0 for an empty pass
    pub fn classification_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.classified() as f64 / self.total as f64
        }
    }

    /// True when nothing is unresolved (no CONFLICT, no UNCLASSIFIED)
    pub fn is_clean(&self) -> bool {
        self.count(Status::Conflict) == 0 && self.count(Status::Unclassified) == 0
    }
}

impl fmt::Display for ClassificationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} elements, {} classified ({:.1}%), {} excluded, {} criterion faults",
            self.total,
            self.classified(),
            self.classification_rate() * 100.0,
            self.excluded,
            self.fault_count
        )?;
        for (status, count) in &self.by_status {
            writeln!(f, "  {:<24} {}", status.as_str(), count)?;
        }
        for (role, count) in &self.by_role {
            writeln!(f, "  {:<24} {}", role.as_str(), count)?;
        }
        Ok(())
    }
}
