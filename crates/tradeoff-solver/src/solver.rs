//! Entry point of the exact search.

use std::time::Duration;

use tracing::{debug, error, warn};
use tradeoff_core::{Group, Instance, MatchMode, Result, Solution};

use crate::matching::{self, Assignment, Problem, SearchContext, Step};
use crate::termination::Termination;
use crate::verify::verify_solution;

/// Verdict of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A verified explanation.
    Feasible(Solution),
    /// The search space was exhausted: no explanation exists.
    Unsat,
    /// The budget ran out before feasibility was decided.
    Unknown,
}

impl SearchOutcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, SearchOutcome::Feasible(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SearchOutcome::Unsat)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SearchOutcome::Unknown)
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Feasible(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Feasible(_) => "feasible",
            SearchOutcome::Unsat => "unsat",
            SearchOutcome::Unknown => "unknown",
        }
    }
}

/// Outcome plus search statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub outcome: SearchOutcome,
    pub nodes_explored: u64,
    pub elapsed: Duration,
}

/// Decides whether `instance` has an explanation under `mode`.
///
/// Both sides empty yields an empty solution; exactly one side empty is
/// `Unsat`. Otherwise the mode's exact search runs under `termination`,
/// and a budget cut short yields `Unknown`, never `Unsat`.
///
/// # Errors
///
/// `InvariantViolation` if a found solution fails verification.
///
/// # Examples
///
/// ```
/// use tradeoff_core::{Contribution, Instance, MatchMode};
/// use tradeoff_solver::solve;
/// use tradeoff_solver::termination::NoTermination;
///
/// let instance = Instance::from_contributions([
///     Contribution::new("A", 32),
///     Contribution::new("C", -28),
/// ]);
/// let outcome = solve(MatchMode::OneToOne, &instance, &NoTermination).unwrap();
/// assert_eq!(outcome.solution().map(|s| s.len()), Some(1));
/// ```
pub fn solve<T: Termination + ?Sized>(
    mode: MatchMode,
    instance: &Instance,
    termination: &T,
) -> Result<SearchOutcome> {
    solve_with_report(mode, instance, termination).map(|report| report.outcome)
}

/// Like [`solve`], also returning node count and elapsed time.
pub fn solve_with_report<T: Termination + ?Sized>(
    mode: MatchMode,
    instance: &Instance,
    termination: &T,
) -> Result<SolveReport> {
    let pro_count = instance.pros().len();
    let con_count = instance.cons().len();
    debug!(
        event = "solve_start",
        mode = mode.label(),
        pro_count,
        con_count,
    );

    let mut ctx = SearchContext::new(termination);
    let outcome = match (pro_count, con_count) {
        _ if instance.is_tie() => SearchOutcome::Feasible(Solution::empty(mode)),
        (0, _) | (_, 0) => SearchOutcome::Unsat,
        _ => {
            let problem = Problem::from_instance(instance);
            match matching::optimise(mode, &problem, &mut ctx) {
                Step::Found(raw) => SearchOutcome::Feasible(
                    to_solution(mode, instance, raw.assignments)
                        .with_proven_minimal(raw.proven_minimal),
                ),
                Step::Exhausted => SearchOutcome::Unsat,
                Step::Terminated => SearchOutcome::Unknown,
            }
        }
    };

    match &outcome {
        SearchOutcome::Feasible(solution) => {
            if let Err(err) = verify_solution(instance, solution) {
                error!(event = "invariant_violation", mode = mode.label(), error = %err);
                return Err(err);
            }
            if !solution.is_proven_minimal() {
                warn!(
                    event = "budget_exhausted",
                    mode = mode.label(),
                    "explanation found but not proven minimal"
                );
            }
        }
        SearchOutcome::Unknown => {
            warn!(event = "budget_exhausted", mode = mode.label(), "feasibility undecided");
        }
        SearchOutcome::Unsat => {}
    }

    let report = SolveReport {
        outcome,
        nodes_explored: ctx.scope().total_node_count(),
        elapsed: ctx.scope().elapsed().unwrap_or_default(),
    };
    debug!(
        event = "solve_end",
        mode = mode.label(),
        outcome = report.outcome.label(),
        nodes = report.nodes_explored,
        duration_ms = report.elapsed.as_millis() as u64,
    );
    Ok(report)
}

/// Maps index-based assignments back onto the instance's contributions.
pub(crate) fn to_solution(
    mode: MatchMode,
    instance: &Instance,
    assignments: Vec<Assignment>,
) -> Solution {
    let pros = instance.pros();
    let cons = instance.cons();
    let groups = assignments
        .into_iter()
        .map(|assignment| match assignment {
            Assignment::Pair { pro, con } => Group::Pair {
                pro: pros[pro].clone(),
                con: cons[con].clone(),
            },
            Assignment::Leader { pro, cons: members } => Group::Leader {
                pro: pros[pro].clone(),
                cons: members.iter().map(|&c| cons[c].clone()).collect(),
            },
            Assignment::Absorbed { pros: members, con } => Group::Absorbed {
                pros: members.iter().map(|&p| pros[p].clone()).collect(),
                con: cons[con].clone(),
            },
        })
        .collect();
    Solution::new(mode, groups)
}
