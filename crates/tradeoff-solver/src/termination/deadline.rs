//! Wall-clock deadline termination.

use std::time::{Duration, Instant};

use super::Termination;
use crate::scope::SearchScope;

/// Terminates at a fixed instant, independent of when the search started.
///
/// Unlike [`TimeTermination`](super::TimeTermination), one deadline bounds a
/// whole sequence of searches, such as the probes of certificate extraction.
#[derive(Debug, Clone)]
pub struct DeadlineTermination {
    deadline: Instant,
}

impl DeadlineTermination {
    pub fn new(deadline: Instant) -> Self {
        Self { deadline }
    }

    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self::new(Instant::now() + budget)
    }
}

impl Termination for DeadlineTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        Instant::now() >= self.deadline
    }
}
