//! The boundary, domain and secondary stages.

use super::stage::{Stage, StageOutput};
use crate::classification::engine::{self, EngineOptions};
use crate::classification::{
    BoundaryContext, CancelSignal, CompatibilityPolicy, Contribution, DecisionPolicy, DomainContext,
    DomainOutcomes, Outcome, PortOutcomes, Registry, Role, Status, WeightedSignalClassifier,
};
use crate::graph::{ElementId, ElementNode};
use std::collections::BTreeMap;

/// Settings shared by both stages.
pub(crate) struct StageSettings<'a> {
    pub explicit: &'a BTreeMap<ElementId, Role>,
    pub is_excluded: &'a (dyn Fn(&ElementId) -> bool + Sync),
    pub decision: DecisionPolicy,
    pub engine: EngineOptions,
}

/// Classifies every interface and hands the finished outcomes to the domain stage.
pub(crate) struct BoundaryStage<'a, S> {
    pub registry: &'a Registry<BoundaryContext>,
    pub compatibility: &'a dyn CompatibilityPolicy,
    pub settings: &'a StageSettings<'a>,
    pub cancel: &'a S,
}

impl<S: CancelSignal> Stage for BoundaryStage<'_, S> {
    type Input = BoundaryContext;
    type Output = DomainContext;
    type Error = S::Cancelled;

    fn execute(&self, context: BoundaryContext) -> Result<StageOutput<DomainContext>, S::Cancelled> {
        let _span = tracing::debug_span!("boundary_stage").entered();

        let elements: Vec<&ElementNode> = context
            .graph()
            .interfaces()
            .filter(|node| !(self.settings.is_excluded)(&node.id))
            .collect();

        let output = classify_elements(
            self.registry,
            &elements,
            &context,
            self.compatibility,
            self.settings,
            self.cancel,
        )?;
        log::debug!(
            "Boundary stage: {} interfaces, {} faults",
            output.value.len(),
            output.fault_count
        );

        Ok(output.map(|outcomes| context.into_domain(PortOutcomes::from_outcomes(outcomes))))
    }

    fn name(&self) -> &str {
        "boundary"
    }
}

/// Classifies every remaining element with the final boundary outcomes in view.
pub(crate) struct DomainStage<'a, S> {
    pub registry: &'a Registry<DomainContext>,
    pub compatibility: &'a dyn CompatibilityPolicy,
    pub settings: &'a StageSettings<'a>,
    pub cancel: &'a S,
}

impl<S: CancelSignal> Stage for DomainStage<'_, S> {
    type Input = DomainContext;
    type Output = (DomainContext, DomainOutcomes);
    type Error = S::Cancelled;

    fn execute(
        &self,
        context: DomainContext,
    ) -> Result<StageOutput<(DomainContext, DomainOutcomes)>, S::Cancelled> {
        let _span = tracing::debug_span!("domain_stage", ports = context.ports().len()).entered();

        let elements: Vec<&ElementNode> = context
            .graph()
            .elements()
            .filter(|node| !node.is_interface() && !(self.settings.is_excluded)(&node.id))
            .collect();

        let output = classify_elements(
            self.registry,
            &elements,
            &context,
            self.compatibility,
            self.settings,
            self.cancel,
        )?;
        log::debug!(
            "Domain stage: {} elements, {} faults",
            output.value.len(),
            output.fault_count
        );

        Ok(output.map(|outcomes| (context, DomainOutcomes::from_outcomes(outcomes))))
    }

    fn name(&self) -> &str {
        "domain"
    }
}

/// Weighted fallback for domain elements the domain stage left unclassified.
pub(crate) struct SecondaryStage<'a, S> {
    pub classifier: WeightedSignalClassifier,
    /// Priority recorded on fallback contributions
    pub priority: i32,
    pub cancel: &'a S,
}

impl<S: CancelSignal> Stage for SecondaryStage<'_, S> {
    type Input = (DomainContext, DomainOutcomes);
    type Output = (DomainContext, DomainOutcomes);
    type Error = S::Cancelled;

    fn execute(
        &self,
        (context, outcomes): (DomainContext, DomainOutcomes),
    ) -> Result<StageOutput<(DomainContext, DomainOutcomes)>, S::Cancelled> {
        let _span = tracing::debug_span!("secondary_stage", min_score = self.classifier.min_score()).entered();

        let mut rescued = 0;
        let mut reclassified = BTreeMap::new();
        for (id, outcome) in outcomes.into_outcomes() {
            self.cancel.check()?;
            let outcome = match context.graph().node(&id) {
                Some(node) if outcome.status == Status::Unclassified => {
                    let decided = self
                        .classifier
                        .reclassify(outcome, node, &context.index().anchors, self.priority);
                    if decided.is_classified() {
                        rescued += 1;
                    }
                    decided
                }
                _ => outcome,
            };
            reclassified.insert(id, outcome);
        }
        log::debug!("Secondary stage: {} elements classified by weighted signals", rescued);

        Ok(StageOutput::new(
            (context, DomainOutcomes::from_outcomes(reclassified)),
            0,
        ))
    }

    fn name(&self) -> &str {
        "secondary"
    }
}

/// Evaluate, inject explicit overrides, decide.
fn classify_elements<C: Sync, S: CancelSignal>(
    registry: &Registry<C>,
    elements: &[&ElementNode],
    context: &C,
    compatibility: &dyn CompatibilityPolicy,
    settings: &StageSettings<'_>,
    cancel: &S,
) -> Result<StageOutput<BTreeMap<ElementId, Outcome>>, S::Cancelled> {
    let evaluation = engine::evaluate_with(registry, elements, context, settings.engine, cancel)?;

    let outcomes = evaluation
        .contributions
        .into_iter()
        .map(|(id, mut contributions)| {
            if let Some(role) = settings.explicit.get(&id) {
                contributions.push(Contribution::explicit_override(id.clone(), *role));
            }
            let outcome = settings.decision.decide(id.clone(), contributions, compatibility);
            (id, outcome)
        })
        .collect();

    Ok(StageOutput::new(outcomes, evaluation.fault_count))
}
