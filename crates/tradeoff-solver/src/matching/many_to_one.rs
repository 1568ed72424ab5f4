//! ManyToOne: disjoint Pro subsets each cover one target Con.

use smallvec::SmallVec;
use tradeoff_core::Delta;

use super::bounds::min_cover_size;
use super::cover::{CoverPool, CoverSink};
use super::{Assignment, Problem, SearchContext, Step};
use crate::termination::Termination;

/// Fewest pairs any ManyToOne explanation can use.
///
/// Each Con needs at least as many Pros as the largest available values
/// take to reach its deficit, and groups are disjoint, so the per-Con
/// minima add up.
pub(crate) fn lower_bound(problem: &Problem) -> usize {
    let mut pool = problem.pros.clone();
    pool.sort_by(|a, b| b.cmp(a));
    let bound: usize = (0..problem.cons.len())
        .filter_map(|c| min_cover_size(&pool, problem.need(c)))
        .sum();
    bound.max(problem.cons.len())
}

/// Looks for a ManyToOne explanation using at most `budget` pairs.
pub(crate) fn search<T: Termination + ?Sized>(
    problem: &Problem,
    budget: usize,
    ctx: &mut SearchContext<'_, T>,
) -> Step<Vec<Assignment>> {
    let mut search = ManyToOne {
        problem,
        order: problem.cons_by_deficit(),
        budget,
        depth: 0,
        pairs_used: 0,
        used: vec![false; problem.pros.len()],
        covers: vec![SmallVec::new(); problem.cons.len()],
        ctx,
    };

    match search.assign() {
        Step::Found(()) => Step::Found(search.assignments()),
        Step::Exhausted => Step::Exhausted,
        Step::Terminated => Step::Terminated,
    }
}

struct ManyToOne<'p, 'c, 't, T: ?Sized> {
    problem: &'p Problem,
    order: Vec<usize>,
    budget: usize,
    depth: usize,
    pairs_used: usize,
    used: Vec<bool>,
    covers: Vec<SmallVec<[usize; 4]>>,
    ctx: &'c mut SearchContext<'t, T>,
}

impl<T: Termination + ?Sized> ManyToOne<'_, '_, '_, T> {
    fn assign(&mut self) -> Step<()> {
        if self.depth == self.order.len() {
            return Step::Found(());
        }
        if !self.ctx.tick() {
            return Step::Terminated;
        }

        let pool = CoverPool::new(
            (0..self.problem.pros.len())
                .filter(|&p| !self.used[p])
                .map(|p| (p, self.problem.pros[p])),
        );

        let con = self.order[self.depth];
        let need = self.problem.need(con);
        let max_size = {
            let remaining = &self.order[self.depth..];
            let demand: Delta = remaining.iter().map(|&c| self.problem.need(c)).sum();
            if pool.total() < demand {
                return Step::Exhausted;
            }

            let values = pool.values();
            let mut lower = 0;
            let mut own = 0;
            for &c in remaining {
                match min_cover_size(&values, self.problem.need(c)) {
                    Some(k) if c == con => {
                        own = k;
                        lower += k;
                    }
                    Some(k) => lower += k,
                    None => return Step::Exhausted,
                }
            }
            if self.pairs_used + lower > self.budget {
                return Step::Exhausted;
            }
            // leave room for the other Cons' minimum covers
            self.budget - self.pairs_used - (lower - own)
        };

        pool.for_each_cover(need, 1, max_size, self)
    }

    fn assignments(&self) -> Vec<Assignment> {
        (0..self.problem.cons.len())
            .map(|con| {
                let mut pros = self.covers[con].to_vec();
                pros.sort_unstable();
                Assignment::Absorbed { pros, con }
            })
            .collect()
    }
}

impl<T: Termination + ?Sized> CoverSink for ManyToOne<'_, '_, '_, T> {
    fn on_cover(&mut self, pros: &[usize]) -> Step<()> {
        let con = self.order[self.depth];
        for &p in pros {
            self.used[p] = true;
        }
        self.covers[con] = pros.iter().copied().collect();
        self.pairs_used += pros.len();
        self.depth += 1;

        let step = self.assign();
        if !step.is_exhausted() {
            return step;
        }

        self.depth -= 1;
        self.pairs_used -= pros.len();
        self.covers[con].clear();
        for &p in pros {
            self.used[p] = false;
        }
        Step::Exhausted
    }
}
