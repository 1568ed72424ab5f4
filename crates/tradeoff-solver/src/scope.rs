//! Search-level scope.

use std::time::{Duration, Instant};

/// Bookkeeping shared by every node of one `solve` call.
///
/// Termination conditions read from this scope; the search writes to it.
#[derive(Debug, Clone)]
pub struct SearchScope {
    start_time: Option<Instant>,
    node_count: u64,
}

impl SearchScope {
    pub fn new() -> Self {
        Self {
            start_time: None,
            node_count: 0,
        }
    }

    /// Marks the start of the search and resets counters.
    pub fn start_search(&mut self) {
        self.start_time = Some(Instant::now());
        self.node_count = 0;
    }

    /// Time since [`start_search`](Self::start_search), if started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn increment_node_count(&mut self) {
        self.node_count += 1;
    }

    /// Number of search nodes explored so far.
    pub fn total_node_count(&self) -> u64 {
        self.node_count
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_resets_counters() {
        let mut scope = SearchScope::new();
        assert!(scope.elapsed().is_none());

        scope.increment_node_count();
        scope.start_search();
        assert_eq!(scope.total_node_count(), 0);
        assert!(scope.elapsed().is_some());
    }
}
