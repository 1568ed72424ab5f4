//! Tradeoff - explains weighted-sum rankings
//!
//! Given a weight table and two graded alternatives, finds criteria where
//! the first alternative does better (Pros) whose advantage offsets every
//! criterion where it does worse (Cons), or proves that no such
//! explanation exists.
//!
//! # Example
//!
//! ```rust
//! use tradeoff::prelude::*;
//!
//! let weights = WeightTable::new().with("A", 8).with("C", 7).with("F", 5);
//! let x = Alternative::new("x").with_grade("A", 85).with_grade("C", 71).with_grade("F", 81);
//! let y = Alternative::new("y").with_grade("A", 81).with_grade("C", 75).with_grade("F", 88);
//!
//! // A(+32) cannot offset both C(-28) and F(-35) on its own.
//! let verdict = compare(&weights, &x, &y, MatchMode::OneToOne, &NoTermination).unwrap();
//! let certificate = verdict.certificate().unwrap();
//! assert!(certificate.contains("F"));
//! ```

// Domain and result types
pub use tradeoff_core::{
    Alternative, CertificateOrigin, Contribution, Criterion, Decimal, Delta, Group,
    InfeasibilityCertificate, Instance, MatchMode, Polarity, Result, Solution, TradeoffError,
    WeightTable,
};

// Configuration and data sources
pub use tradeoff_config::{
    CertificateConfig, ConfigError, Dataset, EnvironmentMode, ExplainerConfig, TerminationConfig,
};

// Search budgets
pub use tradeoff_solver::termination;
pub use tradeoff_solver::{solve, solve_with_report, SearchOutcome, SolveReport};

mod compare;
mod explainer;
pub mod report;

#[cfg(feature = "console")]
pub mod console;

pub use compare::{compare, compare_batch, compare_detailed, Comparison, Verdict};
pub use explainer::Explainer;

pub mod prelude {
    pub use super::termination::{NoTermination, StepCountTermination, TimeTermination};
    pub use super::{compare, compare_batch, compare_detailed, Comparison, Explainer, Verdict};
    pub use super::{Alternative, Dataset, ExplainerConfig, MatchMode, WeightTable};
}
