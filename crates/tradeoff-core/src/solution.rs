//! Explanatory groups and solutions.

use std::fmt;

use crate::delta::Delta;
use crate::domain::Contribution;
use crate::mode::MatchMode;

/// One explanatory unit of a solution.
///
/// The balance of a group, the sum of all its contribution values, is
/// non-negative in every solution returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Group {
    /// A single Pro offsets a single Con.
    Pair { pro: Contribution, con: Contribution },
    /// A leader Pro offsets every Con of its set.
    Leader {
        pro: Contribution,
        cons: Vec<Contribution>,
    },
    /// A set of Pros jointly offsets one target Con.
    Absorbed {
        pros: Vec<Contribution>,
        con: Contribution,
    },
}

impl Group {
    /// Sum of all contribution values in the group.
    pub fn balance(&self) -> Delta {
        self.pros().chain(self.cons()).map(Contribution::value).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.balance().is_balanced()
    }

    /// Pro members of the group.
    pub fn pros(&self) -> impl Iterator<Item = &Contribution> {
        let pros: &[Contribution] = match self {
            Group::Pair { pro, .. } | Group::Leader { pro, .. } => std::slice::from_ref(pro),
            Group::Absorbed { pros, .. } => pros,
        };
        pros.iter()
    }

    /// Con members of the group.
    pub fn cons(&self) -> impl Iterator<Item = &Contribution> {
        let cons: &[Contribution] = match self {
            Group::Pair { con, .. } | Group::Absorbed { con, .. } => std::slice::from_ref(con),
            Group::Leader { cons, .. } => cons,
        };
        cons.iter()
    }

    /// Number of (Pro, Con) pairs this group asserts.
    pub fn pair_count(&self) -> usize {
        self.pros().count() * self.cons().count()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Pair { pro, con } => write!(f, "{} offsets {}", pro, con)?,
            Group::Leader { pro, cons } => write!(f, "{} covers [{}]", pro, join(cons))?,
            Group::Absorbed { pros, con } => {
                write!(f, "{} is covered by [{}]", con, join(pros))?
            }
        }
        write!(f, " (balance {:+})", self.balance())
    }
}

fn join(items: &[Contribution]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// An ordered set of groups explaining a comparison under one mode.
///
/// Built by the search engine only; immutable once returned. Serializes for
/// reports but never deserializes, so every `Solution` a caller holds came
/// out of a verified search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution {
    mode: MatchMode,
    groups: Vec<Group>,
    proven_minimal: bool,
}

impl Solution {
    /// Assembles a solution from raw groups without checking them.
    ///
    /// Engine-internal: the solver runs `verify_solution` on everything it
    /// builds here. Anything assembled elsewhere must go through the same
    /// check before it is treated as an explanation.
    #[doc(hidden)]
    pub fn new(mode: MatchMode, groups: Vec<Group>) -> Self {
        Self {
            mode,
            groups,
            proven_minimal: true,
        }
    }

    /// Marks whether the search proved this solution minimal for its mode.
    #[doc(hidden)]
    pub fn with_proven_minimal(mut self, proven: bool) -> Self {
        self.proven_minimal = proven;
        self
    }

    /// False when the budget ran out while deepening towards a smaller
    /// solution. Modes without a minimality criterion always report true.
    pub fn is_proven_minimal(&self) -> bool {
        self.proven_minimal
    }

    /// The explanation of a tie: no groups at all.
    pub fn empty(mode: MatchMode) -> Self {
        Self::new(mode, Vec::new())
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of (Pro, Con) pairs across groups.
    pub fn pair_count(&self) -> usize {
        self.groups.iter().map(Group::pair_count).sum()
    }

    /// Sum of group balances.
    pub fn total_balance(&self) -> Delta {
        self.groups.iter().map(Group::balance).sum()
    }

    /// Every Pro appearing in the solution, in group order.
    pub fn used_pros(&self) -> impl Iterator<Item = &Contribution> {
        self.groups.iter().flat_map(Group::pros)
    }

    /// Every Con appearing in the solution, in group order.
    pub fn used_cons(&self) -> impl Iterator<Item = &Contribution> {
        self.groups.iter().flat_map(Group::cons)
    }

    /// Number of leader groups, for combined-mode summaries.
    pub fn leader_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| matches!(g, Group::Leader { .. }))
            .count()
    }

    /// Number of absorbed groups, for combined-mode summaries.
    pub fn absorbed_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| matches!(g, Group::Absorbed { .. }))
            .count()
    }
}
