//! Colorful console output for comparisons.
//!
//! Re-exports the `tradeoff-console` layer. Call [`init`] once at startup;
//! later calls have no effect.

pub use tradeoff_console::{init, TradeoffConsoleLayer};
