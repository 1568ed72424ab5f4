//! Combined: every Con either joins a leader's group or is the target of
//! a disjoint Pro subset. A leader never joins a subset.

use smallvec::SmallVec;
use tradeoff_core::Delta;

use super::bounds::usable_surplus;
use super::cover::{CoverPool, CoverSink};
use super::{Assignment, Problem, SearchContext, Step};
use crate::termination::Termination;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Placement {
    Open,
    Joined(usize),
    Absorbed(SmallVec<[usize; 4]>),
}

/// Looks for a Combined explanation with at most `budget` groups.
///
/// Per Con, in order: join an existing leader (free), open a new leader,
/// or become the target of a subset of at least two unused Pros. A single
/// Pro covering a single Con is always expressed as a leader, which keeps
/// room for later Cons at the same group cost.
pub(crate) fn search<T: Termination + ?Sized>(
    problem: &Problem,
    budget: usize,
    ctx: &mut SearchContext<'_, T>,
) -> Step<Vec<Assignment>> {
    let order = problem.cons_by_deficit();
    let smallest_need = order
        .last()
        .map(|&c| problem.need(c))
        .unwrap_or(Delta::ZERO);

    let mut search = Combined {
        problem,
        order,
        smallest_need,
        budget,
        depth: 0,
        groups: 0,
        used: vec![false; problem.pros.len()],
        leader_balance: vec![None; problem.pros.len()],
        placement: vec![Placement::Open; problem.cons.len()],
        ctx,
    };

    match search.assign() {
        Step::Found(()) => Step::Found(search.assignments()),
        Step::Exhausted => Step::Exhausted,
        Step::Terminated => Step::Terminated,
    }
}

struct Combined<'p, 'c, 't, T: ?Sized> {
    problem: &'p Problem,
    order: Vec<usize>,
    smallest_need: Delta,
    budget: usize,
    depth: usize,
    groups: usize,
    used: Vec<bool>,
    leader_balance: Vec<Option<Delta>>,
    placement: Vec<Placement>,
    ctx: &'c mut SearchContext<'t, T>,
}

impl<T: Termination + ?Sized> Combined<'_, '_, '_, T> {
    fn assign(&mut self) -> Step<()> {
        if self.depth == self.order.len() {
            return Step::Found(());
        }
        if !self.ctx.tick() {
            return Step::Terminated;
        }

        let demand: Delta = self.order[self.depth..]
            .iter()
            .map(|&c| self.problem.need(c))
            .sum();
        let slack = usable_surplus(self.leader_balance.iter().flatten().copied(), self.smallest_need);
        let unused: Delta = (0..self.problem.pros.len())
            .filter(|&p| !self.used[p])
            .map(|p| self.problem.pros[p])
            .sum();
        if slack + unused < demand {
            return Step::Exhausted;
        }

        let con = self.order[self.depth];
        let need = self.problem.need(con);

        let step = self.join_leader(con, need);
        if !step.is_exhausted() || self.groups >= self.budget {
            return step;
        }

        let step = self.open_leader(con, need);
        if !step.is_exhausted() {
            return step;
        }

        let pool = CoverPool::new(
            (0..self.problem.pros.len())
                .filter(|&p| !self.used[p])
                .map(|p| (p, self.problem.pros[p])),
        );
        pool.for_each_cover(need, 2, usize::MAX, self)
    }

    fn join_leader(&mut self, con: usize, need: Delta) -> Step<()> {
        let mut leaders: SmallVec<[(Delta, usize); 16]> = self
            .leader_balance
            .iter()
            .enumerate()
            .filter_map(|(p, balance)| balance.filter(|&b| b >= need).map(|b| (b, p)))
            .collect();
        leaders.sort();
        leaders.dedup_by_key(|(b, _)| *b);

        for (balance, pro) in leaders {
            self.leader_balance[pro] = Some(balance - need);
            self.placement[con] = Placement::Joined(pro);
            self.depth += 1;

            let step = self.assign();
            if !step.is_exhausted() {
                return step;
            }

            self.depth -= 1;
            self.placement[con] = Placement::Open;
            self.leader_balance[pro] = Some(balance);
        }
        Step::Exhausted
    }

    fn open_leader(&mut self, con: usize, need: Delta) -> Step<()> {
        let mut fresh: SmallVec<[(Delta, usize); 16]> = (0..self.problem.pros.len())
            .filter(|&p| !self.used[p] && self.problem.pros[p] >= need)
            .map(|p| (self.problem.pros[p], p))
            .collect();
        fresh.sort();
        fresh.dedup_by_key(|(v, _)| *v);

        for (value, pro) in fresh {
            self.used[pro] = true;
            self.leader_balance[pro] = Some(value - need);
            self.placement[con] = Placement::Joined(pro);
            self.groups += 1;
            self.depth += 1;

            let step = self.assign();
            if !step.is_exhausted() {
                return step;
            }

            self.depth -= 1;
            self.groups -= 1;
            self.placement[con] = Placement::Open;
            self.leader_balance[pro] = None;
            self.used[pro] = false;
        }
        Step::Exhausted
    }

    fn assignments(&self) -> Vec<Assignment> {
        let mut groups: Vec<Assignment> = Vec::new();
        for (pro, balance) in self.leader_balance.iter().enumerate() {
            if balance.is_none() {
                continue;
            }
            let cons: Vec<usize> = (0..self.problem.cons.len())
                .filter(|&c| self.placement[c] == Placement::Joined(pro))
                .collect();
            groups.push(Assignment::Leader { pro, cons });
        }
        for (con, placement) in self.placement.iter().enumerate() {
            if let Placement::Absorbed(pros) = placement {
                let mut pros = pros.to_vec();
                pros.sort_unstable();
                groups.push(Assignment::Absorbed { pros, con });
            }
        }
        groups.sort_by_key(Assignment::first_con);
        groups
    }
}

impl<T: Termination + ?Sized> CoverSink for Combined<'_, '_, '_, T> {
    fn on_cover(&mut self, pros: &[usize]) -> Step<()> {
        let con = self.order[self.depth];
        for &p in pros {
            self.used[p] = true;
        }
        self.placement[con] = Placement::Absorbed(pros.iter().copied().collect());
        self.groups += 1;
        self.depth += 1;

        let step = self.assign();
        if !step.is_exhausted() {
            return step;
        }

        self.depth -= 1;
        self.groups -= 1;
        self.placement[con] = Placement::Open;
        for &p in pros {
            self.used[p] = false;
        }
        Step::Exhausted
    }
}
