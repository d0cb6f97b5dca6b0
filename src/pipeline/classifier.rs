//! Two-phase orchestrator.
//!
//! Boundary interfaces are classified first. Their outcomes become part of the
//! domain stage's context, so domain criteria only ever see final boundary
//! roles. The stage boundary is a plain function composition: the domain stage
//! takes the boundary stage's output by value. An optional weighted fallback
//! and anomaly detection follow the domain stage.

use super::stage::Stage;
use super::stages::{BoundaryStage, DomainStage, SecondaryStage, StageSettings};
use crate::anomalies;
use crate::classification::{
    BoundaryContext, CancelSignal, ClassificationResults, CompatibilityTable, Criterion,
    DecisionPolicy, DomainContext, EngineOptions, Registry, RoleFamily, Uninterrupted,
    WeightedSignalClassifier,
};
use crate::config::{ClassificationConfig, ValidatedConfig};
use crate::criteria;
use crate::errors::{ConfigurationError, Result};
use crate::graph::{ElementId, TypeGraph};
use crate::semantic::{SemanticIndex, SemanticOptions};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::AtomicBool;

/// Classifies type graphs with one fixed set of registries and policies.
///
/// Building a classifier performs all configuration validation; classifying
/// never fails.
///
/// # Example
///
/// ```rust
/// use rolemap::graph::{ElementForm, ElementNode, Marker, TypeGraph};
/// use rolemap::{ClassificationConfig, Classifier, Role};
///
/// let graph = TypeGraph::builder()
///     .element(ElementNode::new("shop.Order", ElementForm::Class).with_marker(Marker::AggregateRoot))
///     .build();
/// let classifier = Classifier::from_config(&ClassificationConfig::default()).unwrap();
/// let results = classifier.classify(&graph);
/// assert_eq!(results.role_of(&"shop.Order".into()), Some(Role::AggregateRoot));
/// ```
#[derive(Debug)]
pub struct Classifier {
    config: ValidatedConfig,
    boundary: Registry<BoundaryContext>,
    domain: Registry<DomainContext>,
    boundary_compatibility: CompatibilityTable,
    domain_compatibility: CompatibilityTable,
    decision: DecisionPolicy,
}

impl Classifier {
    /// Builds a classifier with the default criteria catalogs.
    pub fn new(config: ValidatedConfig) -> Result<Self> {
        Self::with_criteria(
            config,
            criteria::boundary::default_criteria(),
            criteria::domain::default_criteria(),
        )
    }

    pub fn from_config(config: &ClassificationConfig) -> Result<Self> {
        Self::new(config.validate()?)
    }

    /// Builds a classifier over custom catalogs. Profile priorities are routed
    /// to whichever catalog declares the criterion.
    pub fn with_criteria(
        config: ValidatedConfig,
        boundary_criteria: Vec<Criterion<BoundaryContext>>,
        domain_criteria: Vec<Criterion<DomainContext>>,
    ) -> Result<Self> {
        let boundary_names: BTreeSet<&str> = boundary_criteria.iter().map(|c| c.name()).collect();
        let domain_names: BTreeSet<&str> = domain_criteria.iter().map(|c| c.name()).collect();

        let mut boundary_overrides = BTreeMap::new();
        let mut domain_overrides = BTreeMap::new();
        for (name, priority) in config.priorities() {
            if boundary_names.contains(name.as_str()) {
                boundary_overrides.insert(name.clone(), *priority);
            } else if domain_names.contains(name.as_str()) {
                domain_overrides.insert(name.clone(), *priority);
            } else {
                return Err(ConfigurationError::unknown_criterion(name));
            }
        }

        let boundary = Registry::build(RoleFamily::Boundary, boundary_criteria, &boundary_overrides)?;
        let domain = Registry::build(RoleFamily::Domain, domain_criteria, &domain_overrides)?;
        Ok(Self::from_parts(config, boundary, domain))
    }

    fn from_parts(
        config: ValidatedConfig,
        boundary: Registry<BoundaryContext>,
        domain: Registry<DomainContext>,
    ) -> Self {
        let decision = DecisionPolicy::new(config.min_priority());
        Self {
            config,
            boundary,
            domain,
            boundary_compatibility: CompatibilityTable::boundary_default(),
            domain_compatibility: CompatibilityTable::domain_default(),
            decision,
        }
    }

    /// Replaces the compatibility tables.
    pub fn with_compatibility(mut self, boundary: CompatibilityTable, domain: CompatibilityTable) -> Self {
        self.boundary_compatibility = boundary;
        self.domain_compatibility = domain;
        self
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn boundary_registry(&self) -> &Registry<BoundaryContext> {
        &self.boundary
    }

    pub fn domain_registry(&self) -> &Registry<DomainContext> {
        &self.domain
    }

    /// Runs a complete pass.
    pub fn classify(&self, graph: &TypeGraph) -> ClassificationResults {
        match self.run(graph, &Uninterrupted) {
            Ok(results) => results,
            Err(never) => match never {},
        }
    }

    /// Runs a pass that can be abandoned by raising `cancel`.
    ///
    /// Returns `None` if the flag was raised before the pass completed; no
    /// partial results are exposed.
    pub fn classify_cancellable(
        &self,
        graph: &TypeGraph,
        cancel: &AtomicBool,
    ) -> Option<ClassificationResults> {
        self.run(graph, cancel).ok()
    }

    /// Runs a pass polling `cancel` between elements.
    pub fn run<S: CancelSignal>(
        &self,
        graph: &TypeGraph,
        cancel: &S,
    ) -> std::result::Result<ClassificationResults, S::Cancelled> {
        let _span = tracing::debug_span!("classify", elements = graph.len()).entered();

        let excluded = graph
            .elements()
            .filter(|node| self.config.is_excluded(&node.id))
            .count();
        for id in self.config.explicit().keys().filter(|id| !graph.contains(id)) {
            log::debug!("Explicit classification for {} matches no element", id);
        }

        let index = SemanticIndex::build(
            graph,
            &SemanticOptions {
                expand_pivots: self.config.expand_pivots(),
                infrastructure_prefixes: self.config.infrastructure_prefixes().to_vec(),
            },
        );

        let is_excluded = |id: &ElementId| self.config.is_excluded(id);
        let settings = StageSettings {
            explicit: self.config.explicit(),
            is_excluded: &is_excluded,
            decision: self.decision,
            engine: EngineOptions {
                parallel: self.config.parallel(),
            },
        };

        let boundary_stage = BoundaryStage {
            registry: &self.boundary,
            compatibility: &self.boundary_compatibility,
            settings: &settings,
            cancel,
        };
        let domain_stage = DomainStage {
            registry: &self.domain,
            compatibility: &self.domain_compatibility,
            settings: &settings,
            cancel,
        };

        let boundary = boundary_stage.execute(BoundaryContext::new(graph.clone(), index))?;
        log::debug!("Stage '{}' complete", boundary_stage.name());
        let mut domain = domain_stage.execute(boundary.value)?;
        log::debug!("Stage '{}' complete", domain_stage.name());

        if let Some(min_score) = self.config.secondary_min_score() {
            let secondary_stage = SecondaryStage {
                classifier: WeightedSignalClassifier::new(min_score),
                priority: self.config.min_priority(),
                cancel,
            };
            let fault_count = domain.fault_count;
            domain = secondary_stage.execute(domain.value)?;
            domain.fault_count += fault_count;
            log::debug!("Stage '{}' complete", secondary_stage.name());
        }

        let (context, domain_outcomes) = domain.value;
        let results = ClassificationResults::complete(
            context.into_ports(),
            domain_outcomes,
            excluded,
            boundary.fault_count + domain.fault_count,
        );
        let results = if self.config.detect_anomalies() {
            let found = anomalies::detect(graph, &results);
            results.with_anomalies(found)
        } else {
            results
        };

        log::debug!(
            "Classified {} elements ({} excluded, {} criterion faults, {} anomalies)",
            results.len(),
            excluded,
            results.fault_count(),
            results.anomalies().len()
        );
        Ok(results)
    }
}

impl Default for Classifier {
    /// Default config over the built-in catalogs.
    fn default() -> Self {
        Self::from_parts(
            ValidatedConfig::default(),
            Registry::from_catalog(RoleFamily::Boundary, criteria::boundary::default_criteria()),
            Registry::from_catalog(RoleFamily::Domain, criteria::domain::default_criteria()),
        )
    }
}
