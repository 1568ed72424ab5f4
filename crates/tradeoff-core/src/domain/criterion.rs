//! Criteria and their weights.

use rust_decimal::Decimal;

use super::Alternative;
use crate::error::{Result, TradeoffError};

/// A weighted criterion of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Criterion {
    id: String,
    weight: Decimal,
}

impl Criterion {
    pub fn new(id: impl Into<String>, weight: impl Into<Decimal>) -> Self {
        Self {
            id: id.into(),
            weight: weight.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> Decimal {
        self.weight
    }
}

/// The weights of a weighted-sum ranking, in declaration order.
///
/// # Examples
///
/// ```
/// use tradeoff_core::{Alternative, WeightTable};
/// use rust_decimal::Decimal;
///
/// let weights = WeightTable::new().with("A", 8).with("B", 7);
/// let x = Alternative::new("x").with_grade("A", 85).with_grade("B", 81);
///
/// assert_eq!(weights.weighted_score(&x).unwrap(), Decimal::from(8 * 85 + 7 * 81));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightTable {
    criteria: Vec<Criterion>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion, replacing the weight if the id is already present.
    pub fn with(mut self, id: impl Into<String>, weight: impl Into<Decimal>) -> Self {
        self.insert(id, weight);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, weight: impl Into<Decimal>) {
        let criterion = Criterion::new(id, weight);
        match self.criteria.iter_mut().find(|c| c.id == criterion.id) {
            Some(existing) => existing.weight = criterion.weight,
            None => self.criteria.push(criterion),
        }
    }

    pub fn weight(&self, id: &str) -> Option<Decimal> {
        self.criteria
            .iter()
            .find(|c| c.id == id)
            .map(Criterion::weight)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.criteria.iter().any(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Rejects any criterion whose weight is not strictly positive.
    pub fn validate(&self) -> Result<()> {
        match self.criteria.iter().find(|c| c.weight <= Decimal::ZERO) {
            Some(c) => Err(TradeoffError::NonPositiveWeight {
                criterion: c.id.clone(),
                weight: c.weight,
            }),
            None => Ok(()),
        }
    }

    /// Returns `Σ weight × grade` for the alternative.
    ///
    /// # Errors
    ///
    /// - `MissingGrade` if the alternative does not grade a criterion
    /// - `ValueOverflow` if a term or the running total leaves the decimal
    ///   range
    pub fn weighted_score(&self, alternative: &Alternative) -> Result<Decimal> {
        self.criteria.iter().try_fold(Decimal::ZERO, |acc, c| {
            let grade = alternative
                .grade(&c.id)
                .ok_or_else(|| TradeoffError::MissingGrade {
                    alternative: alternative.name().to_string(),
                    criterion: c.id.clone(),
                })?;
            c.weight
                .checked_mul(grade)
                .and_then(|term| acc.checked_add(term))
                .ok_or_else(|| TradeoffError::ValueOverflow {
                    criterion: c.id.clone(),
                })
        })
    }
}

impl FromIterator<(String, Decimal)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        let mut table = WeightTable::new();
        for (id, weight) in iter {
            table.insert(id, weight);
        }
        table
    }
}
