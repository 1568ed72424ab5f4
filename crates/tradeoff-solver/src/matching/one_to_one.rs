//! OneToOne: Con-saturating bipartite matching by augmenting paths.

use tracing::trace;

use super::edge::FeasibilityGraph;
use super::{Assignment, Problem, SearchContext, Step};
use crate::termination::Termination;

/// Matches every Con to a distinct Pro that offsets it alone.
///
/// Cons are processed largest deficit first. If no augmenting path exists
/// for a Con when it is processed, none appears later, so the maximum
/// matching leaves that Con uncovered and the search reports `Exhausted`.
pub(crate) fn search<T: Termination + ?Sized>(
    problem: &Problem,
    ctx: &mut SearchContext<'_, T>,
) -> Step<Vec<Assignment>> {
    if problem.cons.len() > problem.pros.len() {
        return Step::Exhausted;
    }

    let graph = FeasibilityGraph::build(&problem.pros, &problem.cons);
    if graph.isolated_cons().next().is_some() {
        return Step::Exhausted;
    }

    let mut matcher = Matcher {
        graph: &graph,
        pro_match: vec![None; problem.pros.len()],
        visited: vec![false; problem.pros.len()],
    };

    for con in problem.cons_by_deficit() {
        matcher.visited.fill(false);
        match matcher.augment(con, ctx) {
            Some(true) => {}
            Some(false) => {
                trace!(con, "no augmenting path");
                return Step::Exhausted;
            }
            None => return Step::Terminated,
        }
    }

    let mut pairs: Vec<Assignment> = matcher
        .pro_match
        .iter()
        .enumerate()
        .filter_map(|(pro, con)| con.map(|con| Assignment::Pair { pro, con }))
        .collect();
    pairs.sort_by_key(Assignment::first_con);
    Step::Found(pairs)
}

struct Matcher<'g> {
    graph: &'g FeasibilityGraph,
    pro_match: Vec<Option<usize>>,
    visited: Vec<bool>,
}

impl Matcher<'_> {
    /// Kuhn's augmenting step. `None` when the budget ran out.
    fn augment<T: Termination + ?Sized>(
        &mut self,
        con: usize,
        ctx: &mut SearchContext<'_, T>,
    ) -> Option<bool> {
        if !ctx.tick() {
            return None;
        }
        for &pro in self.graph.candidates(con) {
            if self.visited[pro] {
                continue;
            }
            self.visited[pro] = true;

            let free = match self.pro_match[pro] {
                None => true,
                Some(other) => self.augment(other, ctx)?,
            };
            if free {
                self.pro_match[pro] = Some(con);
                return Some(true);
            }
        }
        Some(false)
    }
}
