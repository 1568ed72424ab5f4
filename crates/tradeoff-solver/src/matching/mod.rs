//! Exact search for explanations under each match mode.
//!
//! Searches work on index-based [`Problem`]s holding bare values; the
//! solver maps the resulting [`Assignment`]s back onto contributions.

mod bounds;
mod combined;
mod cover;
mod edge;
mod many_to_one;
mod one_to_many;
mod one_to_one;

use tracing::debug;
use tradeoff_core::{Delta, Instance, MatchMode};

use crate::scope::SearchScope;
use crate::termination::Termination;

pub use edge::{is_valid_pair, FeasibilityGraph};

/// Result of one bounded search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step<T> {
    /// A witness was found.
    Found(T),
    /// The search space was fully explored without a witness.
    Exhausted,
    /// The budget ran out first.
    Terminated,
}

impl<T> Step<T> {
    pub(crate) fn is_exhausted(&self) -> bool {
        matches!(self, Step::Exhausted)
    }
}

/// Index-based group: indices refer to [`Problem::pros`] and [`Problem::cons`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Assignment {
    Pair { pro: usize, con: usize },
    Leader { pro: usize, cons: Vec<usize> },
    Absorbed { pros: Vec<usize>, con: usize },
}

impl Assignment {
    /// Smallest Con index in the group, used to order output groups.
    pub(crate) fn first_con(&self) -> usize {
        match self {
            Assignment::Pair { con, .. } | Assignment::Absorbed { con, .. } => *con,
            Assignment::Leader { cons, .. } => cons.iter().copied().min().unwrap_or(usize::MAX),
        }
    }
}

/// A found explanation in index form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSolution {
    pub assignments: Vec<Assignment>,
    pub proven_minimal: bool,
}

/// Values of the Pros and Cons a search ranges over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Problem {
    pub pros: Vec<Delta>,
    pub cons: Vec<Delta>,
}

impl Problem {
    pub(crate) fn new(pros: Vec<Delta>, cons: Vec<Delta>) -> Self {
        Self { pros, cons }
    }

    pub(crate) fn from_instance(instance: &Instance) -> Self {
        Self::new(
            instance.pros().iter().map(|p| p.value()).collect(),
            instance.cons().iter().map(|c| c.value()).collect(),
        )
    }

    /// Positive amount Con `con` needs offset.
    pub(crate) fn need(&self, con: usize) -> Delta {
        -self.cons[con]
    }

    /// Con indices, largest deficit first. Ties keep instance order.
    pub(crate) fn cons_by_deficit(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.cons.len()).collect();
        order.sort_by_key(|&c| self.cons[c]);
        order
    }

    pub(crate) fn supply(&self) -> Delta {
        self.pros.iter().sum()
    }

    pub(crate) fn demand(&self) -> Delta {
        -self.cons.iter().sum::<Delta>()
    }
}

/// Scope plus termination for one search, checked at every node.
pub(crate) struct SearchContext<'t, T: ?Sized> {
    scope: SearchScope,
    termination: &'t T,
    terminated: bool,
}

impl<'t, T: Termination + ?Sized> SearchContext<'t, T> {
    pub(crate) fn new(termination: &'t T) -> Self {
        let mut scope = SearchScope::new();
        scope.start_search();
        Self {
            scope,
            termination,
            terminated: false,
        }
    }

    /// Records a node. Returns false once the budget is spent; stays false.
    pub(crate) fn tick(&mut self) -> bool {
        if self.terminated {
            return false;
        }
        self.scope.increment_node_count();
        if self.termination.is_terminated(&self.scope) {
            self.terminated = true;
        }
        !self.terminated
    }

    pub(crate) fn scope(&self) -> &SearchScope {
        &self.scope
    }
}

/// Decides whether any explanation exists, without optimising it.
pub(crate) fn feasible<T: Termination + ?Sized>(
    mode: MatchMode,
    problem: &Problem,
    ctx: &mut SearchContext<'_, T>,
) -> Step<Vec<Assignment>> {
    match mode {
        MatchMode::OneToOne => one_to_one::search(problem, ctx),
        MatchMode::OneToMany => one_to_many::search(problem, ctx),
        MatchMode::ManyToOne => many_to_one::search(problem, problem.pros.len(), ctx),
        MatchMode::Combined => combined::search(problem, problem.cons.len(), ctx),
    }
}

/// Finds an explanation, minimal under the mode's criterion where it has one.
pub(crate) fn optimise<T: Termination + ?Sized>(
    mode: MatchMode,
    problem: &Problem,
    ctx: &mut SearchContext<'_, T>,
) -> Step<RawSolution> {
    match mode {
        MatchMode::OneToOne | MatchMode::OneToMany => match feasible(mode, problem, ctx) {
            Step::Found(assignments) => Step::Found(RawSolution {
                assignments,
                proven_minimal: true,
            }),
            Step::Exhausted => Step::Exhausted,
            Step::Terminated => Step::Terminated,
        },
        MatchMode::ManyToOne => {
            let lower = many_to_one::lower_bound(problem);
            deepen(mode, problem, ctx, lower, |p, budget, ctx| {
                many_to_one::search(p, budget, ctx)
            })
        }
        MatchMode::Combined => deepen(mode, problem, ctx, 1, |p, budget, ctx| {
            combined::search(p, budget, ctx)
        }),
    }
}

/// Iterative deepening on a cost budget.
///
/// A full-budget probe settles feasibility first; budgets then grow from
/// `lower` until one succeeds. The first success is minimal. If the budget
/// runs out while deepening, the probe's solution is returned unproven.
fn deepen<T, F>(
    mode: MatchMode,
    problem: &Problem,
    ctx: &mut SearchContext<'_, T>,
    lower: usize,
    search: F,
) -> Step<RawSolution>
where
    T: Termination + ?Sized,
    F: Fn(&Problem, usize, &mut SearchContext<'_, T>) -> Step<Vec<Assignment>>,
{
    let probe = match feasible(mode, problem, ctx) {
        Step::Found(assignments) => assignments,
        Step::Exhausted => return Step::Exhausted,
        Step::Terminated => return Step::Terminated,
    };
    let best_cost = cost(mode, &probe);

    for budget in lower..best_cost {
        debug!(event = "deepening", mode = mode.label(), budget, best_cost);
        match search(problem, budget, ctx) {
            Step::Found(assignments) => {
                return Step::Found(RawSolution {
                    assignments,
                    proven_minimal: true,
                })
            }
            Step::Exhausted => continue,
            Step::Terminated => {
                return Step::Found(RawSolution {
                    assignments: probe,
                    proven_minimal: false,
                })
            }
        }
    }

    Step::Found(RawSolution {
        assignments: probe,
        proven_minimal: true,
    })
}

/// The quantity each mode minimises: pairs for ManyToOne, groups otherwise.
pub(crate) fn cost(mode: MatchMode, assignments: &[Assignment]) -> usize {
    match mode {
        MatchMode::ManyToOne => assignments
            .iter()
            .map(|a| match a {
                Assignment::Absorbed { pros, .. } => pros.len(),
                Assignment::Pair { .. } => 1,
                Assignment::Leader { cons, .. } => cons.len(),
            })
            .sum(),
        _ => assignments.len(),
    }
}

#[cfg(test)]
mod tests;
