//! Search node count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a maximum number of search nodes.
///
/// The count is deterministic, which makes this the budget of choice for
/// reproducible `Unknown` outcomes in tests.
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.total_node_count() >= self.limit
    }
}
