//! Tests for termination conditions.

use std::time::Duration;

use super::*;

fn started_scope() -> SearchScope {
    let mut scope = SearchScope::new();
    scope.start_search();
    scope
}

#[test]
fn test_step_count_termination() {
    let mut scope = started_scope();
    let term = StepCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_node_count();
    scope.increment_node_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_node_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination_unstarted_scope() {
    let scope = SearchScope::new();
    let term = TimeTermination::millis(0);
    assert!(!term.is_terminated(&scope));
}

#[test]
fn test_time_termination_zero_limit() {
    let scope = started_scope();
    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_deadline_termination() {
    let scope = SearchScope::new();
    assert!(DeadlineTermination::after(Duration::ZERO).is_terminated(&scope));
    assert!(!DeadlineTermination::after(Duration::from_secs(3600)).is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let mut scope = started_scope();
    let term = OrTermination::new((TimeTermination::seconds(3600), StepCountTermination::new(1)));

    assert!(!term.is_terminated(&scope));
    scope.increment_node_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_option_termination() {
    let scope = started_scope();
    let absent: Option<StepCountTermination> = None;
    assert!(!absent.is_terminated(&scope));
    assert!(Some(StepCountTermination::new(0)).is_terminated(&scope));
}

#[test]
fn test_from_config() {
    let mut scope = started_scope();
    let config = TerminationConfig {
        step_count_limit: Some(2),
        ..TerminationConfig::default()
    };
    let term = from_config(Some(&config));

    scope.increment_node_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_node_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_from_missing_config_never_fires() {
    let mut scope = started_scope();
    let term = from_config(None);
    for _ in 0..1000 {
        scope.increment_node_count();
    }
    assert!(!term.is_terminated(&scope));
}
