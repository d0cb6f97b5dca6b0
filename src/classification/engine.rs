//! Evaluates every enabled criterion against every element.
//!
//! Each element is evaluated independently, so the per-element work runs on
//! rayon when parallelism is on. Results are collected in element order and
//! contributions per element come out in registry order, which keeps the
//! output identical to a sequential run.

use super::cancel::{CancelSignal, Uninterrupted};
use super::contribution::{Contribution, ContributionOrigin};
use super::registry::{RegisteredCriterion, Registry};
use crate::errors::CriterionFault;
use crate::graph::{ElementId, ElementNode};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::AtomicBool;

/// Contributions per element plus the number of swallowed criterion faults.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub contributions: BTreeMap<ElementId, Vec<Contribution>>,
    pub fault_count: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub parallel: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

pub fn evaluate<C: Sync>(
    registry: &Registry<C>,
    elements: &[&ElementNode],
    context: &C,
    options: EngineOptions,
) -> Evaluation {
    match evaluate_with(registry, elements, context, options, &Uninterrupted) {
        Ok(evaluation) => evaluation,
        Err(never) => match never {},
    }
}

/// Returns `None` if `cancel` is raised before every element was evaluated.
pub fn evaluate_cancellable<C: Sync>(
    registry: &Registry<C>,
    elements: &[&ElementNode],
    context: &C,
    options: EngineOptions,
    cancel: &AtomicBool,
) -> Option<Evaluation> {
    evaluate_with(registry, elements, context, options, cancel).ok()
}

/// Evaluates every element, polling `cancel` before each one.
pub fn evaluate_with<C: Sync, S: CancelSignal>(
    registry: &Registry<C>,
    elements: &[&ElementNode],
    context: &C,
    options: EngineOptions,
    cancel: &S,
) -> Result<Evaluation, S::Cancelled> {
    let per_element = |node: &&ElementNode| -> Result<(ElementId, Vec<Contribution>, usize), S::Cancelled> {
        cancel.check()?;
        let (contributions, faults) = evaluate_element(registry, node, context);
        Ok((node.id.clone(), contributions, faults))
    };

    let evaluated = if options.parallel {
        elements.par_iter().map(per_element).collect::<Result<Vec<_>, _>>()
    } else {
        elements.iter().map(per_element).collect::<Result<Vec<_>, _>>()
    };
    let evaluated = evaluated.and_then(|evaluated| cancel.check().map(|()| evaluated));
    let evaluated = match evaluated {
        Ok(evaluated) => evaluated,
        Err(cancelled) => {
            log::debug!("Evaluation cancelled over {} elements", elements.len());
            return Err(cancelled);
        }
    };

    let mut evaluation = Evaluation::default();
    for (id, contributions, faults) in evaluated {
        evaluation.fault_count += faults;
        evaluation.contributions.insert(id, contributions);
    }
    Ok(evaluation)
}

/// Evaluates one element against every enabled criterion.
pub fn evaluate_element<C>(
    registry: &Registry<C>,
    node: &ElementNode,
    context: &C,
) -> (Vec<Contribution>, usize) {
    let mut contributions = Vec::new();
    let mut faults = 0;

    for entry in registry.enabled() {
        match run_criterion(entry, node, context) {
            Ok(Some(contribution)) => contributions.push(contribution),
            Ok(None) => {}
            Err(fault) => {
                faults += 1;
                log::warn!(
                    "Criterion '{}' failed on {}: {}",
                    entry.criterion.name(),
                    node.id,
                    fault
                );
            }
        }
    }
    (contributions, faults)
}

fn run_criterion<C>(
    entry: &RegisteredCriterion<C>,
    node: &ElementNode,
    context: &C,
) -> Result<Option<Contribution>, CriterionFault> {
    let criterion = &entry.criterion;
    let matched = panic::catch_unwind(AssertUnwindSafe(|| criterion.evaluate(node, context)))
        .map_err(|payload| CriterionFault::new(panic_message(payload.as_ref())))??;

    let Some(matched) = matched else {
        return Ok(None);
    };
    let role = criterion.resolve_role(&matched)?;

    Ok(Some(Contribution {
        element_id: node.id.clone(),
        role,
        priority: entry.priority,
        confidence: criterion.confidence(),
        criterion: criterion.name().to_string(),
        justification: matched.justification,
        evidence: matched.evidence,
        origin: ContributionOrigin::Criterion,
    }))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked".to_string()
    }
}
