//! Pairwise edge filter for OneToOne matching.

use tradeoff_core::Delta;

/// A Pro can offset a Con on its own iff their sum is non-negative.
///
/// # Examples
///
/// ```
/// use tradeoff_core::Delta;
/// use tradeoff_solver::is_valid_pair;
///
/// assert!(is_valid_pair(Delta::of(32), Delta::of(-28)));
/// assert!(is_valid_pair(Delta::of(35), Delta::of(-35)));
/// assert!(!is_valid_pair(Delta::of(32), Delta::of(-35)));
/// ```
#[inline]
pub fn is_valid_pair(pro: Delta, con: Delta) -> bool {
    (pro + con).is_balanced()
}

/// Bipartite graph of valid (Pro, Con) pairs, stored per Con.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibilityGraph {
    candidates: Vec<Vec<usize>>,
}

impl FeasibilityGraph {
    /// Builds the graph. Each Con's candidate Pros are listed tightest fit
    /// first, leaving larger Pros free for larger deficits.
    pub fn build(pros: &[Delta], cons: &[Delta]) -> Self {
        let candidates = cons
            .iter()
            .map(|&con| {
                let mut fits: Vec<usize> = (0..pros.len())
                    .filter(|&p| is_valid_pair(pros[p], con))
                    .collect();
                fits.sort_by_key(|&p| pros[p]);
                fits
            })
            .collect();
        Self { candidates }
    }

    /// Pros that can offset `con` alone.
    pub fn candidates(&self, con: usize) -> &[usize] {
        &self.candidates[con]
    }

    /// Cons no single Pro can offset.
    pub fn isolated_cons(&self) -> impl Iterator<Item = usize> + '_ {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, fits)| fits.is_empty())
            .map(|(con, _)| con)
    }
}
