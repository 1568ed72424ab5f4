//! Tradeoff Core - Core types for explaining weighted-sum rankings
//!
//! This crate provides the fundamental abstractions shared by the engine:
//! - [`Delta`] for exact signed contribution values
//! - Domain types for criteria, alternatives and classified instances
//! - [`MatchMode`] topologies and the [`Group`]/[`Solution`] they produce
//! - [`InfeasibilityCertificate`] for proven non-existence of an explanation

pub mod certificate;
pub mod delta;
pub mod domain;
pub mod error;
pub mod mode;
pub mod solution;

pub use certificate::{CertificateOrigin, InfeasibilityCertificate};
pub use delta::Delta;
pub use domain::{Alternative, Contribution, Criterion, Instance, Polarity, WeightTable};
pub use error::{Result, TradeoffError};
pub use mode::{MatchMode, ParseModeError};
pub use solution::{Group, Solution};

pub use rust_decimal::Decimal;
