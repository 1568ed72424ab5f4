//! Enumeration of minimal covering Pro subsets.

use smallvec::SmallVec;
use tradeoff_core::Delta;

use super::bounds::min_cover_size;
use super::Step;

/// Receives each covering subset; returns how the search below it ended.
pub(crate) trait CoverSink {
    fn on_cover(&mut self, pros: &[usize]) -> Step<()>;
}

/// Snapshot of available Pros, sorted by value descending.
///
/// Subsets are built largest value first and closed as soon as they reach
/// the need, so every emitted subset is minimal: dropping any member leaves
/// it short. Equal values at the same position are tried once.
#[derive(Debug, Clone)]
pub(crate) struct CoverPool {
    items: SmallVec<[(usize, Delta); 16]>,
    // suffix[i] = sum of values from position i on
    suffix: SmallVec<[Delta; 17]>,
}

impl CoverPool {
    pub(crate) fn new(available: impl Iterator<Item = (usize, Delta)>) -> Self {
        let mut items: SmallVec<[(usize, Delta); 16]> = available.collect();
        items.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut suffix: SmallVec<[Delta; 17]> = SmallVec::with_capacity(items.len() + 1);
        suffix.push(Delta::ZERO);
        for &(_, value) in items.iter().rev() {
            let last = suffix[suffix.len() - 1];
            suffix.push(last + value);
        }
        suffix.reverse();

        Self { items, suffix }
    }

    /// Sum of every available value.
    pub(crate) fn total(&self) -> Delta {
        self.suffix[0]
    }

    pub(crate) fn values(&self) -> SmallVec<[Delta; 16]> {
        self.items.iter().map(|&(_, v)| v).collect()
    }

    /// Fewest Pros of this pool that could cover `need`.
    pub(crate) fn min_cover_size(&self, need: Delta) -> Option<usize> {
        min_cover_size(&self.values(), need)
    }

    /// Feeds every minimal covering subset of size `min_size..=max_size` to
    /// `sink` until one of them yields something other than `Exhausted`.
    pub(crate) fn for_each_cover<S: CoverSink>(
        &self,
        need: Delta,
        min_size: usize,
        max_size: usize,
        sink: &mut S,
    ) -> Step<()> {
        let mut chosen: SmallVec<[usize; 8]> = SmallVec::new();
        self.extend(0, need, min_size, max_size, &mut chosen, sink)
    }

    fn extend<S: CoverSink>(
        &self,
        start: usize,
        need: Delta,
        min_size: usize,
        max_size: usize,
        chosen: &mut SmallVec<[usize; 8]>,
        sink: &mut S,
    ) -> Step<()> {
        for pos in start..self.items.len() {
            if chosen.len() >= max_size || self.suffix[pos] < need {
                break;
            }
            let (pro, value) = self.items[pos];
            if pos > start && value == self.items[pos - 1].1 {
                continue;
            }

            chosen.push(pro);
            let step = if value >= need {
                if chosen.len() >= min_size {
                    sink.on_cover(chosen)
                } else {
                    Step::Exhausted
                }
            } else {
                self.extend(pos + 1, need - value, min_size, max_size, chosen, sink)
            };
            chosen.pop();

            if !step.is_exhausted() {
                return step;
            }
        }
        Step::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collect(Vec<Vec<usize>>);

    impl CoverSink for Collect {
        fn on_cover(&mut self, pros: &[usize]) -> Step<()> {
            let mut subset = pros.to_vec();
            subset.sort_unstable();
            self.0.push(subset);
            Step::Exhausted
        }
    }

    fn pool(values: &[i64]) -> CoverPool {
        CoverPool::new(values.iter().enumerate().map(|(i, &v)| (i, Delta::of(v))))
    }

    #[test]
    fn test_minimal_covers() {
        // values 32, 36, 48 at indices 0, 1, 2
        let pool = pool(&[32, 36, 48]);
        let mut sink = Collect(Vec::new());
        pool.for_each_cover(Delta::of(42), 1, 3, &mut sink);

        assert_eq!(sink.0, vec![vec![2], vec![0, 1]]);
    }

    #[test]
    fn test_equal_values_tried_once() {
        let pool = pool(&[5, 5, 5]);
        let mut sink = Collect(Vec::new());
        pool.for_each_cover(Delta::of(8), 1, 3, &mut sink);

        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].len(), 2);
    }

    #[test]
    fn test_size_limits() {
        let pool = pool(&[32, 36, 48]);

        let mut sink = Collect(Vec::new());
        pool.for_each_cover(Delta::of(42), 2, 3, &mut sink);
        assert_eq!(sink.0, vec![vec![0, 1]]);

        let mut sink = Collect(Vec::new());
        pool.for_each_cover(Delta::of(60), 1, 1, &mut sink);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_stops_on_found() {
        struct First;
        impl CoverSink for First {
            fn on_cover(&mut self, _pros: &[usize]) -> Step<()> {
                Step::Found(())
            }
        }
        let pool = pool(&[10, 20]);
        assert_eq!(pool.for_each_cover(Delta::of(5), 1, 2, &mut First), Step::Found(()));
        assert_eq!(pool.total(), Delta::of(30));
        assert_eq!(pool.min_cover_size(Delta::of(25)), Some(2));
    }
}
