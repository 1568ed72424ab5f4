//! Shared test fixtures for tradeoff crates.
//!
//! This crate provides data and pure functions for testing. It does NOT
//! depend on `tradeoff-solver`, so the solver can use it as an independent
//! reference.
//!
//! - [`grades`] - the reference weight and grade table
//! - [`oracle`] - exhaustive brute-force answers for every match mode
//! - [`random`] - seeded random instances
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! tradeoff-test = { workspace = true }
//! ```

pub mod grades;
pub mod oracle;
pub mod random;

pub use grades::{instance, instance_of, weights, ALTERNATIVES};
