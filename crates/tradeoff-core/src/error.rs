//! Error types for trade-off explanations

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for comparison operations.
///
/// Input errors are fatal to one comparison only; callers running batches
/// keep going with the remaining comparisons.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TradeoffError {
    /// The two alternatives do not grade the same criteria.
    #[error(
        "Alternatives '{left}' and '{right}' grade different criteria \
         (only in '{left}': {only_left:?}, only in '{right}': {only_right:?})"
    )]
    MismatchedCriteria {
        left: String,
        right: String,
        only_left: Vec<String>,
        only_right: Vec<String>,
    },

    /// A criterion weight is zero or negative.
    #[error("Criterion '{criterion}' has non-positive weight {weight}")]
    NonPositiveWeight { criterion: String, weight: Decimal },

    /// An alternative lacks a grade for a weighted criterion.
    #[error("Alternative '{alternative}' has no grade for criterion '{criterion}'")]
    MissingGrade {
        alternative: String,
        criterion: String,
    },

    /// An alternative grades a criterion absent from the weight table.
    #[error("Alternative '{alternative}' grades unweighted criterion '{criterion}'")]
    UnweightedCriterion {
        alternative: String,
        criterion: String,
    },

    /// A weighted value, or the sum of one side, leaves the decimal range.
    #[error("Weighted value of criterion '{criterion}' is out of the decimal range")]
    ValueOverflow { criterion: String },

    /// A dataset lookup named an alternative that does not exist.
    #[error("Unknown alternative: {0}")]
    UnknownAlternative(String),

    /// Error in explainer configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A report or certificate file could not be written.
    #[error("Output error: {0}")]
    Output(String),

    /// An internally constructed result broke an engine invariant.
    ///
    /// This signals a programming defect, never a property of the input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl TradeoffError {
    /// Returns true for errors caused by the supplied weights or grades.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TradeoffError::MismatchedCriteria { .. }
                | TradeoffError::NonPositiveWeight { .. }
                | TradeoffError::MissingGrade { .. }
                | TradeoffError::UnweightedCriterion { .. }
                | TradeoffError::ValueOverflow { .. }
                | TradeoffError::UnknownAlternative(_)
        )
    }
}

/// Result type alias for comparison operations
pub type Result<T> = std::result::Result<T, TradeoffError>;
