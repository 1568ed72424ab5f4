//! Search tests against the brute-force oracles.

use tradeoff_core::MatchMode;
use tradeoff_test::{instance, instance_of, oracle, random};

use super::*;
use crate::termination::{NoTermination, StepCountTermination};

fn run(mode: MatchMode, problem: &Problem) -> Step<RawSolution> {
    let mut ctx = SearchContext::new(&NoTermination);
    optimise(mode, problem, &mut ctx)
}

fn found(step: Step<RawSolution>) -> RawSolution {
    match step {
        Step::Found(raw) => raw,
        other => panic!("expected a solution, got {:?}", other),
    }
}

#[test]
fn test_one_to_one_reference_pair() {
    let problem = Problem::from_instance(&instance("x", "y"));
    let raw = found(run(MatchMode::OneToOne, &problem));

    // cons C, F, G against pros A, D, E: only E covers G, then D covers F
    assert_eq!(
        raw.assignments,
        vec![
            Assignment::Pair { pro: 0, con: 0 },
            Assignment::Pair { pro: 1, con: 1 },
            Assignment::Pair { pro: 2, con: 2 },
        ]
    );
}

#[test]
fn test_one_to_one_swaps_along_path() {
    // con 0 takes the tight pro 0; con 1 then reroutes it to pro 1
    let problem = Problem::new(
        vec![Delta::of(20), Delta::of(25)],
        vec![Delta::of(-20), Delta::of(-20)],
    );
    let raw = found(run(MatchMode::OneToOne, &problem));
    assert_eq!(
        raw.assignments,
        vec![
            Assignment::Pair { pro: 1, con: 0 },
            Assignment::Pair { pro: 0, con: 1 },
        ]
    );
}

#[test]
fn test_one_to_one_more_cons_than_pros() {
    let problem = Problem::new(vec![Delta::of(100)], vec![Delta::of(-1), Delta::of(-1)]);
    assert_eq!(run(MatchMode::OneToOne, &problem), Step::Exhausted);
}

#[test]
fn test_one_to_many_shares_a_leader() {
    let problem = Problem::new(vec![Delta::of(63)], vec![Delta::of(-28), Delta::of(-35)]);
    let raw = found(run(MatchMode::OneToMany, &problem));
    assert_eq!(
        raw.assignments,
        vec![Assignment::Leader { pro: 0, cons: vec![0, 1] }]
    );
}

#[test]
fn test_many_to_one_minimises_pairs() {
    // each Con takes 60 alone or 40 with one of the small Pros
    let problem = Problem::new(
        vec![Delta::of(60), Delta::of(40), Delta::of(15), Delta::of(12)],
        vec![Delta::of(-50), Delta::of(-52)],
    );
    let raw = found(run(MatchMode::ManyToOne, &problem));
    assert_eq!(cost(MatchMode::ManyToOne, &raw.assignments), 3);
    assert!(raw.proven_minimal);
}

#[test]
fn test_combined_mixes_regimes() {
    let problem = Problem::from_instance(&instance("z", "t"));
    let raw = found(run(MatchMode::Combined, &problem));
    assert_eq!(raw.assignments.len(), 2);
    assert!(raw
        .assignments
        .iter()
        .any(|a| matches!(a, Assignment::Absorbed { .. })));
    assert!(raw
        .assignments
        .iter()
        .any(|a| matches!(a, Assignment::Leader { .. })));
}

#[test]
fn test_unsat_reference_pair() {
    let problem = Problem::from_instance(&instance("z", "t"));
    for mode in [MatchMode::OneToOne, MatchMode::OneToMany, MatchMode::ManyToOne] {
        assert_eq!(run(mode, &problem), Step::Exhausted, "{}", mode);
    }
}

#[test]
fn test_step_budget_terminates() {
    let problem = Problem::from_instance(&instance("x", "y"));
    let termination = StepCountTermination::new(1);
    for mode in MatchMode::ALL {
        let mut ctx = SearchContext::new(&termination);
        assert_eq!(optimise(mode, &problem, &mut ctx), Step::Terminated, "{}", mode);
    }
}

#[test]
fn test_deepening_keeps_probe_when_budget_runs_out() {
    let problem = Problem::from_instance(&instance("y", "z"));
    let mut ctx = SearchContext::new(&NoTermination);
    let probe = feasible(MatchMode::ManyToOne, &problem, &mut ctx);
    let probe_nodes = ctx.scope().total_node_count();
    assert!(matches!(probe, Step::Found(_)));

    // enough for the probe, not for the deepening that follows
    let termination = StepCountTermination::new(probe_nodes + 1);
    let mut ctx = SearchContext::new(&termination);
    match optimise(MatchMode::ManyToOne, &problem, &mut ctx) {
        Step::Found(raw) => {
            if !raw.proven_minimal {
                assert!(cost(MatchMode::ManyToOne, &raw.assignments) >= 4);
            }
        }
        other => panic!("expected the probe solution, got {:?}", other),
    }
}

#[test]
fn test_zero_balance_groups_are_valid() {
    let problem = Problem::from_instance(&instance_of(&[("A", 35), ("F", -35)]));
    for mode in MatchMode::ALL {
        assert!(matches!(run(mode, &problem), Step::Found(_)), "{}", mode);
    }
}

#[test]
fn test_feasibility_agrees_with_oracle() {
    let mut rng = random::seeded(0x7ade_0ff);
    for round in 0..300 {
        let instance = random::instance(&mut rng, 5, 4);
        if instance.pros().is_empty() || instance.cons().is_empty() {
            continue;
        }
        let problem = Problem::from_instance(&instance);
        for mode in MatchMode::ALL {
            let expected = oracle::feasible(mode, &instance);
            let step = run(mode, &problem);
            assert_eq!(
                matches!(step, Step::Found(_)),
                expected,
                "round {} mode {} instance {:?}",
                round,
                mode,
                instance
            );
        }
    }
}

#[test]
fn test_minimal_costs_agree_with_oracle() {
    let mut rng = random::seeded(42);
    for round in 0..200 {
        let instance = random::instance(&mut rng, 5, 4);
        if instance.pros().is_empty() || instance.cons().is_empty() {
            continue;
        }
        let problem = Problem::from_instance(&instance);

        let pairs = match run(MatchMode::ManyToOne, &problem) {
            Step::Found(raw) => Some(cost(MatchMode::ManyToOne, &raw.assignments)),
            _ => None,
        };
        assert_eq!(pairs, oracle::min_pairs(&instance), "round {} pairs", round);

        let groups = match run(MatchMode::Combined, &problem) {
            Step::Found(raw) => Some(cost(MatchMode::Combined, &raw.assignments)),
            _ => None,
        };
        assert_eq!(groups, oracle::min_groups(&instance), "round {} groups", round);
    }
}

#[test]
fn test_lower_bound_is_admissible() {
    let mut rng = random::seeded(9);
    for _ in 0..100 {
        let instance = random::instance(&mut rng, 5, 4);
        if let Some(pairs) = oracle::min_pairs(&instance) {
            if !instance.cons().is_empty() {
                assert!(many_to_one::lower_bound(&Problem::from_instance(&instance)) <= pairs);
            }
        }
    }
}
