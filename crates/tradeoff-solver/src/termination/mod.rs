//! Termination conditions for the exact search.
//!
//! Every search node consults the active termination. A search cut short
//! by its budget reports `Unknown`, never `Unsat`.

mod composite;
mod deadline;
mod step_count;
mod time;

use std::fmt::Debug;

use tradeoff_config::TerminationConfig;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use deadline::DeadlineTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
///
/// Implementations must be `Sync` so one budget can be shared by the
/// comparisons of a parallel batch.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

/// Never terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        false
    }
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

impl<T: Termination + ?Sized> Termination for &T {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        (**self).is_terminated(scope)
    }
}

/// Termination built from a [`TerminationConfig`].
pub type ConfiguredTermination = OrTermination<(Option<TimeTermination>, Option<StepCountTermination>)>;

/// Builds the per-search budget described by a configuration.
///
/// Missing limits never fire, so `None` yields an unbounded search.
pub fn from_config(config: Option<&TerminationConfig>) -> ConfiguredTermination {
    let time = config.and_then(TerminationConfig::time_limit).map(TimeTermination::new);
    let steps = config
        .and_then(|c| c.step_count_limit)
        .map(StepCountTermination::new);
    OrTermination::new((time, steps))
}

#[cfg(test)]
mod tests;
