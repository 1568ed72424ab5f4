//! Deletion filtering for irreducible infeasible subsystems.
//!
//! The filter probes each element in turn: a Con's coverage requirement is
//! dropped, or a Pro's resource limit is lifted. If the relaxed instance
//! stays infeasible the element is discarded for good; otherwise it is
//! necessary and kept. Cons are probed before Pros, smallest deficit
//! first.

use tracing::{debug, error, info, warn};
use tradeoff_config::EnvironmentMode;
use tradeoff_core::{
    CertificateOrigin, Delta, InfeasibilityCertificate, Instance, MatchMode, Result,
    TradeoffError,
};

use crate::matching::{self, is_valid_pair, Problem, SearchContext, Step};
use crate::termination::Termination;

/// Verdict of one relaxed feasibility probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Sat,
    Unsat,
    Unknown,
}

impl Probe {
    fn label(self) -> &'static str {
        match self {
            Probe::Sat => "sat",
            Probe::Unsat => "unsat",
            Probe::Unknown => "unknown",
        }
    }
}

/// Which constraints are still enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Active {
    strict_pros: Vec<bool>,
    required_cons: Vec<bool>,
}

impl Active {
    fn all(problem: &Problem) -> Self {
        Self {
            strict_pros: vec![true; problem.pros.len()],
            required_cons: vec![true; problem.cons.len()],
        }
    }

    fn set(&mut self, element: Element, active: bool) {
        match element {
            Element::Pro(p) => self.strict_pros[p] = active,
            Element::Con(c) => self.required_cons[c] = active,
        }
    }

    fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        let pros = (0..self.strict_pros.len())
            .filter(|&p| self.strict_pros[p])
            .map(Element::Pro);
        let cons = (0..self.required_cons.len())
            .filter(|&c| self.required_cons[c])
            .map(Element::Con);
        pros.chain(cons)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Pro(usize),
    Con(usize),
}

/// Extracts an infeasibility certificate for an instance the search
/// reported `Unsat` under `mode`.
///
/// Every probe runs as its own search under `termination`. A probe that
/// runs out of budget keeps its element and marks the certificate as not
/// proven irreducible. Under [`EnvironmentMode::FullAssert`] the finished
/// certificate is re-checked element by element.
///
/// # Errors
///
/// `InvariantViolation` if the instance has no elements at all, or if
/// re-checking contradicts the certificate.
pub fn extract_certificate<T: Termination + ?Sized>(
    mode: MatchMode,
    instance: &Instance,
    termination: &T,
    environment_mode: EnvironmentMode,
) -> Result<InfeasibilityCertificate> {
    let pros = instance.pros();
    let cons = instance.cons();
    match (pros.is_empty(), cons.is_empty()) {
        (true, true) => {
            return Err(TradeoffError::InvariantViolation(
                "an empty instance is always explainable".to_string(),
            ))
        }
        (true, false) | (false, true) => {
            return Ok(InfeasibilityCertificate::one_sided(mode, pros, cons))
        }
        (false, false) => {}
    }

    let problem = Problem::from_instance(instance);
    let mut active = Active::all(&problem);
    let mut irreducible = true;

    for element in deletion_order(&problem) {
        active.set(element, false);
        let probe = probe(mode, &problem, &active, termination);
        debug!(
            event = "certificate_trial",
            mode = mode.label(),
            element = %describe(instance, element),
            outcome = probe.label(),
        );
        match probe {
            Probe::Unsat => {}
            Probe::Sat => active.set(element, true),
            Probe::Unknown => {
                active.set(element, true);
                irreducible = false;
            }
        }
    }

    if !irreducible {
        warn!(
            event = "budget_exhausted",
            mode = mode.label(),
            "certificate kept elements without proof of necessity"
        );
    }
    if environment_mode.is_asserted() {
        assert_certificate(mode, instance, &problem, &active, termination, irreducible)?;
    }

    let certificate = InfeasibilityCertificate::new(
        mode,
        (0..pros.len())
            .filter(|&p| active.strict_pros[p])
            .map(|p| pros[p].clone())
            .collect(),
        (0..cons.len())
            .filter(|&c| active.required_cons[c])
            .map(|c| cons[c].clone())
            .collect(),
        CertificateOrigin::DeletionFilter,
        irreducible,
    );
    info!(
        event = "certificate_end",
        mode = mode.label(),
        size = certificate.len(),
        irreducible,
    );
    Ok(certificate)
}

/// Cons first, smallest deficit first; then Pros, smallest value first.
fn deletion_order(problem: &Problem) -> Vec<Element> {
    let mut cons: Vec<usize> = (0..problem.cons.len()).collect();
    cons.sort_by_key(|&c| problem.need(c));
    let mut pros: Vec<usize> = (0..problem.pros.len()).collect();
    pros.sort_by_key(|&p| problem.pros[p]);

    cons.into_iter()
        .map(Element::Con)
        .chain(pros.into_iter().map(Element::Pro))
        .collect()
}

fn describe(instance: &Instance, element: Element) -> String {
    match element {
        Element::Pro(p) => format!("pro {}", instance.pros()[p]),
        Element::Con(c) => format!("con {}", instance.cons()[c]),
    }
}

/// Decides feasibility with only the `active` constraints enforced.
fn probe<T: Termination + ?Sized>(
    mode: MatchMode,
    problem: &Problem,
    active: &Active,
    termination: &T,
) -> Probe {
    let Some(residual) = relaxed_residual(mode, problem, active) else {
        return Probe::Sat;
    };
    let mut ctx = SearchContext::new(termination);
    match matching::feasible(mode, &residual, &mut ctx) {
        Step::Found(_) => Probe::Sat,
        Step::Exhausted => Probe::Unsat,
        Step::Terminated => Probe::Unknown,
    }
}

/// Folds lifted Pro limits into a smaller strict problem.
///
/// Returns `None` when the relaxation is trivially satisfiable:
/// - no Con still requires coverage
/// - OneToOne: every required Con is offset alone by some lifted Pro,
///   which may now serve any number of Cons
/// - OneToMany and Combined: a Pro with unlimited strength leads a group
///   holding every required Con
/// - ManyToOne: the lifted Pros, joining every group, offset every Con
fn relaxed_residual(mode: MatchMode, problem: &Problem, active: &Active) -> Option<Problem> {
    let strict: Vec<Delta> = (0..problem.pros.len())
        .filter(|&p| active.strict_pros[p])
        .map(|p| problem.pros[p])
        .collect();
    let lifted: Vec<Delta> = (0..problem.pros.len())
        .filter(|&p| !active.strict_pros[p])
        .map(|p| problem.pros[p])
        .collect();
    let required = (0..problem.cons.len())
        .filter(|&c| active.required_cons[c])
        .map(|c| problem.cons[c]);

    let cons: Vec<Delta> = match mode {
        MatchMode::OneToOne => required
            .filter(|&con| !lifted.iter().any(|&pro| is_valid_pair(pro, con)))
            .collect(),
        MatchMode::OneToMany | MatchMode::Combined => {
            if !lifted.is_empty() {
                return None;
            }
            required.collect()
        }
        MatchMode::ManyToOne => {
            let bonus: Delta = lifted.iter().sum();
            required
                .map(|con| con + bonus)
                .filter(Delta::is_con)
                .collect()
        }
    };

    if cons.is_empty() {
        None
    } else {
        Some(Problem::new(strict, cons))
    }
}

/// Re-checks a finished certificate: infeasible as a whole, and feasible
/// once any single proven-necessary element is relaxed.
fn assert_certificate<T: Termination + ?Sized>(
    mode: MatchMode,
    instance: &Instance,
    problem: &Problem,
    active: &Active,
    termination: &T,
    irreducible: bool,
) -> Result<()> {
    if probe(mode, problem, active, termination) == Probe::Sat {
        let message = format!("{} certificate is satisfiable as a whole", mode.label());
        error!(event = "invariant_violation", mode = mode.label(), message = %message);
        return Err(TradeoffError::InvariantViolation(message));
    }
    if !irreducible {
        return Ok(());
    }

    let elements: Vec<Element> = active.elements().collect();
    for element in elements {
        let mut relaxed = active.clone();
        relaxed.set(element, false);
        if probe(mode, problem, &relaxed, termination) == Probe::Unsat {
            let message = format!(
                "relaxing {} leaves the {} certificate infeasible",
                describe(instance, element),
                mode.label()
            );
            error!(event = "invariant_violation", mode = mode.label(), message = %message);
            return Err(TradeoffError::InvariantViolation(message));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
