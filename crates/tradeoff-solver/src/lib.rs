//! Tradeoff Solver - Exact explanation search
//!
//! This crate provides the engine behind every comparison:
//! - Termination conditions and the per-search scope
//! - The pairwise edge filter
//! - Exact searches for the four match modes
//! - Deletion filtering for infeasibility certificates
//! - Invariant checks on every returned solution

pub mod termination;

mod certificate;
mod matching;
mod scope;
mod solver;
mod verify;

pub use certificate::extract_certificate;
pub use matching::{is_valid_pair, FeasibilityGraph};
pub use scope::SearchScope;
pub use solver::{solve, solve_with_report, SearchOutcome, SolveReport};
pub use termination::Termination;
pub use verify::verify_solution;

#[cfg(test)]
mod tests;
