//! OneToMany: each Con joins the group of exactly one leader Pro.

use smallvec::SmallVec;
use tradeoff_core::Delta;

use super::bounds::usable_surplus;
use super::{Assignment, Problem, SearchContext, Step};
use crate::termination::Termination;

/// Backtracking over Con-to-leader assignments.
///
/// Cons are placed largest deficit first onto a Pro whose running balance
/// still absorbs them, tightest fit first. Pros with equal running balances
/// are interchangeable, so only one of them is tried per Con.
pub(crate) fn search<T: Termination + ?Sized>(
    problem: &Problem,
    ctx: &mut SearchContext<'_, T>,
) -> Step<Vec<Assignment>> {
    let order = problem.cons_by_deficit();
    let smallest_need = order
        .last()
        .map(|&c| problem.need(c))
        .unwrap_or(Delta::ZERO);

    let mut search = OneToMany {
        problem,
        order,
        smallest_need,
        balances: problem.pros.clone(),
        leader_of: vec![None; problem.cons.len()],
        remaining_demand: problem.demand(),
    };

    match search.assign(0, ctx) {
        Step::Found(()) => Step::Found(search.assignments()),
        Step::Exhausted => Step::Exhausted,
        Step::Terminated => Step::Terminated,
    }
}

struct OneToMany<'p> {
    problem: &'p Problem,
    order: Vec<usize>,
    smallest_need: Delta,
    balances: Vec<Delta>,
    leader_of: Vec<Option<usize>>,
    remaining_demand: Delta,
}

impl OneToMany<'_> {
    fn assign<T: Termination + ?Sized>(
        &mut self,
        depth: usize,
        ctx: &mut SearchContext<'_, T>,
    ) -> Step<()> {
        if depth == self.order.len() {
            return Step::Found(());
        }
        if !ctx.tick() {
            return Step::Terminated;
        }
        if usable_surplus(self.balances.iter().copied(), self.smallest_need) < self.remaining_demand {
            return Step::Exhausted;
        }

        let con = self.order[depth];
        let need = self.problem.need(con);

        let mut leaders: SmallVec<[usize; 16]> = (0..self.balances.len())
            .filter(|&p| self.balances[p] >= need)
            .collect();
        leaders.sort_by_key(|&p| (self.balances[p], p));
        let balances = &self.balances;
        leaders.dedup_by_key(|p| balances[*p]);

        for pro in leaders {
            self.balances[pro] -= need;
            self.remaining_demand -= need;
            self.leader_of[con] = Some(pro);

            // a found assignment stays in place for `assignments`
            let step = self.assign(depth + 1, ctx);
            if !step.is_exhausted() {
                return step;
            }

            self.leader_of[con] = None;
            self.remaining_demand += need;
            self.balances[pro] += need;
        }
        Step::Exhausted
    }

    fn assignments(&self) -> Vec<Assignment> {
        let mut groups: Vec<Assignment> = Vec::new();
        for pro in 0..self.problem.pros.len() {
            let cons: Vec<usize> = (0..self.problem.cons.len())
                .filter(|&c| self.leader_of[c] == Some(pro))
                .collect();
            if !cons.is_empty() {
                groups.push(Assignment::Leader { pro, cons });
            }
        }
        groups.sort_by_key(Assignment::first_con);
        groups
    }
}
