//! Admissible bounds shared by the backtracking searches.
//!
//! Every bound here is optimistic: it never prunes a subtree that contains
//! a feasible completion.

use tradeoff_core::Delta;

/// Surplus held by balances large enough to absorb at least `smallest_need`.
///
/// Slack on a Pro whose balance is below every outstanding need can never
/// be spent, so it is left out.
pub(crate) fn usable_surplus(balances: impl Iterator<Item = Delta>, smallest_need: Delta) -> Delta {
    balances.filter(|&b| b >= smallest_need).sum()
}

/// Fewest values from `pool_desc` (sorted descending) whose sum reaches
/// `need`, or `None` if even the whole pool falls short.
pub(crate) fn min_cover_size(pool_desc: &[Delta], need: Delta) -> Option<usize> {
    let mut sum = Delta::ZERO;
    for (taken, &value) in pool_desc.iter().enumerate() {
        sum += value;
        if sum >= need {
            return Some(taken + 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_surplus_skips_small_balances() {
        let balances = [Delta::of(4), Delta::of(30), Delta::of(12)];
        assert_eq!(
            usable_surplus(balances.into_iter(), Delta::of(10)),
            Delta::of(42)
        );
    }

    #[test]
    fn test_min_cover_size() {
        let pool = [Delta::of(48), Delta::of(36), Delta::of(32)];
        assert_eq!(min_cover_size(&pool, Delta::of(42)), Some(1));
        assert_eq!(min_cover_size(&pool, Delta::of(49)), Some(2));
        assert_eq!(min_cover_size(&pool, Delta::of(116)), Some(3));
        assert_eq!(min_cover_size(&pool, Delta::of(117)), None);
    }
}
