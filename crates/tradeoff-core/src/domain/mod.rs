//! Domain types for a pairwise comparison.
//!
//! - [`WeightTable`] and [`Criterion`] - the weighted-sum ranking
//! - [`Alternative`] - a named set of grades
//! - [`Contribution`] and [`Instance`] - classified per-criterion deltas

mod alternative;
mod contribution;
mod criterion;


pub use alternative::Alternative;
pub use contribution::{Contribution, Instance, Polarity};
pub use criterion::{Criterion, WeightTable};
