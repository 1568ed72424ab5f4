//! Per-criterion contributions and the classified instance.

use std::collections::BTreeSet;
use std::fmt;

use super::{Alternative, WeightTable};
use crate::delta::Delta;
use crate::error::{Result, TradeoffError};

/// Sign classification of a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Polarity {
    /// The first alternative does better on this criterion.
    Pro,
    /// The first alternative does worse on this criterion.
    Con,
    /// Both alternatives score the same; never matched.
    Neutral,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Pro => write!(f, "Pro"),
            Polarity::Con => write!(f, "Con"),
            Polarity::Neutral => write!(f, "Neutral"),
        }
    }
}

/// The signed contribution of one criterion to the score difference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contribution {
    criterion: String,
    value: Delta,
}

impl Contribution {
    pub fn new(criterion: impl Into<String>, value: impl Into<Delta>) -> Self {
        Self {
            criterion: criterion.into(),
            value: value.into(),
        }
    }

    pub fn criterion(&self) -> &str {
        &self.criterion
    }

    pub fn value(&self) -> Delta {
        self.value
    }

    pub fn polarity(&self) -> Polarity {
        self.value.polarity()
    }
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:+})", self.criterion, self.value)
    }
}

/// A classified comparison: the Pro set, the Con set and the neutrals.
///
/// The three lists partition the compared criteria and keep their
/// declaration order. Neutral contributions never reach the search engine.
///
/// # Examples
///
/// ```
/// use tradeoff_core::{Contribution, Instance};
///
/// let instance = Instance::from_contributions(vec![
///     Contribution::new("A", 32),
///     Contribution::new("B", 0),
///     Contribution::new("C", -28),
/// ]);
///
/// assert_eq!(instance.pros().len(), 1);
/// assert_eq!(instance.cons().len(), 1);
/// assert_eq!(instance.neutrals().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    pros: Vec<Contribution>,
    cons: Vec<Contribution>,
    neutrals: Vec<Contribution>,
}

impl Instance {
    /// Classifies contributions by the sign of their value.
    pub fn from_contributions(contributions: impl IntoIterator<Item = Contribution>) -> Self {
        let mut instance = Instance::default();
        for contribution in contributions {
            match contribution.polarity() {
                Polarity::Pro => instance.pros.push(contribution),
                Polarity::Con => instance.cons.push(contribution),
                Polarity::Neutral => instance.neutrals.push(contribution),
            }
        }
        instance
    }

    /// Computes and classifies `weight × (gradeA − gradeB)` per criterion.
    ///
    /// # Errors
    ///
    /// - `MismatchedCriteria` if `a` and `b` grade different criterion sets
    /// - `NonPositiveWeight` if any weight is `<= 0`
    /// - `MissingGrade` if a weighted criterion has no grade
    /// - `UnweightedCriterion` if a grade names a criterion without weight
    /// - `ValueOverflow` if a weighted value, or the sum of all Pros or all
    ///   Cons, leaves the decimal range
    pub fn from_alternatives(
        weights: &WeightTable,
        a: &Alternative,
        b: &Alternative,
    ) -> Result<Self> {
        let left: BTreeSet<&str> = a.criteria().collect();
        let right: BTreeSet<&str> = b.criteria().collect();
        if left != right {
            return Err(TradeoffError::MismatchedCriteria {
                left: a.name().to_string(),
                right: b.name().to_string(),
                only_left: left.difference(&right).map(|s| s.to_string()).collect(),
                only_right: right.difference(&left).map(|s| s.to_string()).collect(),
            });
        }

        weights.validate()?;

        if let Some(extra) = left.iter().find(|id| !weights.contains(id)) {
            return Err(TradeoffError::UnweightedCriterion {
                alternative: a.name().to_string(),
                criterion: extra.to_string(),
            });
        }

        let contributions = weights
            .iter()
            .map(|criterion| {
                let grade = |alt: &Alternative| {
                    alt.grade(criterion.id())
                        .ok_or_else(|| TradeoffError::MissingGrade {
                            alternative: alt.name().to_string(),
                            criterion: criterion.id().to_string(),
                        })
                };
                let value = Delta::checked_weighted(criterion.weight(), grade(a)?, grade(b)?)
                    .ok_or_else(|| TradeoffError::ValueOverflow {
                        criterion: criterion.id().to_string(),
                    })?;
                Ok(Contribution::new(criterion.id(), value))
            })
            .collect::<Result<Vec<_>>>()?;

        let instance = Self::from_contributions(contributions);
        side_total(&instance.pros)?;
        side_total(&instance.cons)?;
        Ok(instance)
    }

    pub fn pros(&self) -> &[Contribution] {
        &self.pros
    }

    pub fn cons(&self) -> &[Contribution] {
        &self.cons
    }

    pub fn neutrals(&self) -> &[Contribution] {
        &self.neutrals
    }

    /// Sum over every contribution, the weighted total-score difference.
    pub fn total(&self) -> Delta {
        self.pros
            .iter()
            .chain(&self.cons)
            .chain(&self.neutrals)
            .map(Contribution::value)
            .sum()
    }

    /// Returns true if neither side has any contribution.
    pub fn is_tie(&self) -> bool {
        self.pros.is_empty() && self.cons.is_empty()
    }
}

/// Sum of one side. Every subset sum the search forms is bounded by it.
fn side_total(side: &[Contribution]) -> Result<Delta> {
    side.iter().try_fold(Delta::ZERO, |acc, c| {
        acc.checked_add(c.value)
            .ok_or_else(|| TradeoffError::ValueOverflow {
                criterion: c.criterion.clone(),
            })
    })
}
