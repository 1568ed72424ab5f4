//! End-to-end solver tests over the reference grade table.

use tradeoff_core::{Delta, Group, Instance, MatchMode};
use tradeoff_test::{instance, instance_of, oracle, random, ALTERNATIVES};

use crate::termination::{NoTermination, StepCountTermination};
use crate::{solve, solve_with_report, verify_solution, SearchOutcome};

fn solution_of(outcome: SearchOutcome) -> tradeoff_core::Solution {
    match outcome {
        SearchOutcome::Feasible(solution) => solution,
        other => panic!("expected a solution, got {}", other.label()),
    }
}

#[test]
fn test_scenario_one_to_one() {
    let instance = instance("x", "y");
    let solution = solution_of(solve(MatchMode::OneToOne, &instance, &NoTermination).unwrap());

    assert!(oracle::one_to_one(&instance));
    assert_eq!(solution.len(), 3);
    let rendered: Vec<String> = solution.groups().iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "A(+32) offsets C(-28) (balance +4)",
            "D(+36) offsets F(-35) (balance +1)",
            "E(+48) offsets G(-42) (balance +6)",
        ]
    );
}

#[test]
fn test_scenario_one_to_many() {
    let instance = instance("x", "y");
    let solution = solution_of(solve(MatchMode::OneToMany, &instance, &NoTermination).unwrap());

    assert!(oracle::one_to_many(&instance));
    assert!(solution
        .groups()
        .iter()
        .all(|g| matches!(g, Group::Leader { .. }) && g.is_balanced()));
    assert_eq!(solution.used_cons().count(), 3);
}

#[test]
fn test_scenario_many_to_one_minimal_pairs() {
    for (a, b) in [("x", "y"), ("y", "z"), ("x", "v"), ("t", "u")] {
        let instance = instance(a, b);
        let outcome = solve(MatchMode::ManyToOne, &instance, &NoTermination).unwrap();
        let pairs = outcome.solution().map(|s| s.pair_count());
        assert_eq!(pairs, oracle::min_pairs(&instance), "{} vs {}", a, b);
        if let Some(solution) = outcome.solution() {
            assert!(solution.is_proven_minimal());
        }
    }
}

#[test]
fn test_combined_minimal_groups() {
    let instance = instance("z", "t");
    let solution = solution_of(solve(MatchMode::Combined, &instance, &NoTermination).unwrap());
    assert_eq!(solution.len(), 2);
    assert_eq!(solution.leader_count(), 1);
    assert_eq!(solution.absorbed_count(), 1);
}

#[test]
fn test_every_reference_pair_agrees_with_oracle() {
    for a in ALTERNATIVES {
        for b in ALTERNATIVES {
            if a == b {
                continue;
            }
            let instance = instance(a, b);
            for mode in MatchMode::ALL {
                let outcome = solve(mode, &instance, &NoTermination).unwrap();
                assert_eq!(
                    outcome.is_feasible(),
                    oracle::feasible(mode, &instance),
                    "{} vs {} in {}",
                    a,
                    b,
                    mode
                );
            }
        }
    }
}

#[test]
fn test_both_sides_empty() {
    let tie = instance_of(&[("B", 0)]);
    for mode in MatchMode::ALL {
        let solution = solution_of(solve(mode, &tie, &NoTermination).unwrap());
        assert!(solution.is_empty());
        assert_eq!(solution.mode(), mode);
    }
}

#[test]
fn test_one_side_empty_is_unsat() {
    let cons_only = instance_of(&[("C", -28)]);
    let pros_only = instance_of(&[("A", 32)]);
    for mode in MatchMode::ALL {
        assert!(solve(mode, &cons_only, &NoTermination).unwrap().is_unsat());
        assert!(solve(mode, &pros_only, &NoTermination).unwrap().is_unsat());
    }
}

#[test]
fn test_neutrals_never_grouped() {
    let instance = instance("x", "y");
    for mode in MatchMode::ALL {
        let outcome = solve(mode, &instance, &NoTermination).unwrap();
        if let Some(solution) = outcome.solution() {
            assert!(solution.used_pros().chain(solution.used_cons()).all(|c| c.criterion() != "B"));
        }
    }
}

#[test]
fn test_budget_yields_unknown_not_unsat() {
    let instance = instance("z", "t");
    let report = solve_with_report(
        MatchMode::ManyToOne,
        &instance,
        &StepCountTermination::new(1),
    )
    .unwrap();
    assert!(report.outcome.is_unknown());
    assert_eq!(report.nodes_explored, 1);
}

#[test]
fn test_report_counts_nodes() {
    let report = solve_with_report(MatchMode::Combined, &instance("x", "y"), &NoTermination).unwrap();
    assert!(report.outcome.is_feasible());
    assert!(report.nodes_explored > 0);
}

#[test]
fn test_monotonicity() {
    let mut rng = random::seeded(11);
    for _ in 0..200 {
        let instance: Instance = random::instance(&mut rng, 5, 4);
        if solve(MatchMode::OneToOne, &instance, &NoTermination).unwrap().is_feasible() {
            for mode in [MatchMode::OneToMany, MatchMode::ManyToOne, MatchMode::Combined] {
                assert!(solve(mode, &instance, &NoTermination).unwrap().is_feasible());
            }
        }
    }
}

#[test]
fn test_solutions_verify() {
    let mut rng = random::seeded(5);
    for _ in 0..200 {
        let instance = random::instance(&mut rng, 5, 5);
        for mode in MatchMode::ALL {
            if let SearchOutcome::Feasible(solution) = solve(mode, &instance, &NoTermination).unwrap() {
                assert!(verify_solution(&instance, &solution).is_ok());
                assert_eq!(
                    solution.total_balance(),
                    solution.used_pros().chain(solution.used_cons()).map(|c| c.value()).sum::<Delta>()
                );
            }
        }
    }
}
