//! Certificate tests: reference pairs and oracle-checked irreducibility.

use tradeoff_core::{Contribution, Instance};
use tradeoff_test::{instance, instance_of, oracle, random};

use super::*;
use crate::solver::solve;
use crate::termination::{NoTermination, StepCountTermination};

fn certify(mode: MatchMode, instance: &Instance) -> InfeasibilityCertificate {
    extract_certificate(mode, instance, &NoTermination, EnvironmentMode::FullAssert).unwrap()
}

#[test]
fn test_one_to_one_isolated_con() {
    // D (-108) exceeds every single Pro
    let cert = certify(MatchMode::OneToOne, &instance("y", "z"));

    assert_eq!(cert.constraint_names(), vec!["cover_D"]);
    assert_eq!(cert.origin(), CertificateOrigin::DeletionFilter);
    assert!(cert.is_irreducible());
}

#[test]
fn test_many_to_one_reference_pair() {
    let cert = certify(MatchMode::ManyToOne, &instance("z", "t"));
    assert_eq!(
        cert.constraint_names(),
        vec![
            "pro_disjoint_B",
            "pro_disjoint_F",
            "cover_C",
            "cover_D",
            "cover_E",
        ]
    );
}

#[test]
fn test_strength_limits_are_all_needed() {
    let cert = certify(MatchMode::OneToMany, &instance("y", "z"));
    assert_eq!(cert.pros().len(), 4);
    assert_eq!(cert.cons().len(), 1);
    assert!(cert.contains("D"));
}

#[test]
fn test_one_sided_instances() {
    let cons_only = instance_of(&[("C", -28), ("F", -35)]);
    let cert = certify(MatchMode::Combined, &cons_only);
    assert_eq!(cert.origin(), CertificateOrigin::OneSided);
    assert_eq!(cert.cons(), cons_only.cons());

    let pros_only = instance_of(&[("A", 32)]);
    let cert = certify(MatchMode::OneToOne, &pros_only);
    assert_eq!(cert.pros(), pros_only.pros());
    assert!(cert.is_irreducible());
}

#[test]
fn test_empty_instance_is_rejected() {
    let result = extract_certificate(
        MatchMode::OneToOne,
        &Instance::default(),
        &NoTermination,
        EnvironmentMode::NonAsserted,
    );
    assert!(matches!(result, Err(TradeoffError::InvariantViolation(_))));
}

#[test]
fn test_budget_keeps_elements() {
    let instance = instance("z", "t");
    let cert = extract_certificate(
        MatchMode::ManyToOne,
        &instance,
        &StepCountTermination::new(1),
        EnvironmentMode::NonAsserted,
    )
    .unwrap();

    assert!(!cert.is_irreducible());
    assert!(cert.len() >= 5);
}

#[test]
fn test_relaxed_residual_many_to_one_bonus() {
    let problem = Problem::new(
        vec![Delta::of(30), Delta::of(10)],
        vec![Delta::of(-25), Delta::of(-5)],
    );
    let mut active = Active::all(&problem);
    active.set(Element::Pro(1), false);

    let residual = relaxed_residual(MatchMode::ManyToOne, &problem, &active).unwrap();
    assert_eq!(residual.pros, vec![Delta::of(30)]);
    assert_eq!(residual.cons, vec![Delta::of(-15)]);
}

#[test]
fn test_relaxed_residual_trivial_cases() {
    let problem = Problem::new(vec![Delta::of(30)], vec![Delta::of(-25)]);
    let mut active = Active::all(&problem);
    active.set(Element::Pro(0), false);

    assert!(relaxed_residual(MatchMode::OneToOne, &problem, &active).is_none());
    assert!(relaxed_residual(MatchMode::OneToMany, &problem, &active).is_none());
    assert!(relaxed_residual(MatchMode::Combined, &problem, &active).is_none());

    let mut active = Active::all(&problem);
    active.set(Element::Con(0), false);
    assert!(relaxed_residual(MatchMode::ManyToOne, &problem, &active).is_none());
}

/// Oracle feasibility of `instance` with only the certificate's constraints.
///
/// Pros outside `strict` have their limit lifted and Cons outside
/// `required` need no coverage.
fn oracle_relaxed(
    mode: MatchMode,
    instance: &Instance,
    strict: &[&Contribution],
    required: &[&Contribution],
) -> bool {
    let lifted: Vec<&Contribution> = instance
        .pros()
        .iter()
        .filter(|p| !strict.contains(p))
        .collect();
    let cons: Vec<Contribution> = match mode {
        MatchMode::OneToOne => required
            .iter()
            .filter(|c| !lifted.iter().any(|p| is_valid_pair(p.value(), c.value())))
            .map(|c| (*c).clone())
            .collect(),
        MatchMode::OneToMany | MatchMode::Combined => {
            if !lifted.is_empty() {
                return true;
            }
            required.iter().map(|c| (*c).clone()).collect()
        }
        MatchMode::ManyToOne => {
            let bonus: Delta = lifted.iter().map(|p| p.value()).sum();
            required
                .iter()
                .map(|c| Contribution::new(c.criterion(), c.value() + bonus))
                .filter(|c| c.value().is_con())
                .collect()
        }
    };
    if cons.is_empty() {
        return true;
    }
    let residual = Instance::from_contributions(strict.iter().map(|p| (*p).clone()).chain(cons));
    oracle::feasible(mode, &residual)
}

#[test]
fn test_certificates_are_irreducible() {
    let mut rng = random::seeded(2024);
    let mut checked = 0;
    for _ in 0..300 {
        let instance = random::instance(&mut rng, 4, 4);
        if instance.pros().is_empty() || instance.cons().is_empty() {
            continue;
        }
        for mode in MatchMode::ALL {
            if !solve(mode, &instance, &NoTermination).unwrap().is_unsat() {
                continue;
            }
            let cert = certify(mode, &instance);
            let strict: Vec<&Contribution> = cert.pros().iter().collect();
            let required: Vec<&Contribution> = cert.cons().iter().collect();
            assert!(
                !oracle_relaxed(mode, &instance, &strict, &required),
                "{} certificate {} is feasible for {:?}",
                mode,
                cert,
                instance
            );

            for i in 0..strict.len() {
                let mut fewer = strict.clone();
                fewer.remove(i);
                assert!(oracle_relaxed(mode, &instance, &fewer, &required), "{}", cert);
            }
            for i in 0..required.len() {
                let mut fewer = required.clone();
                fewer.remove(i);
                assert!(oracle_relaxed(mode, &instance, &strict, &fewer), "{}", cert);
            }
            checked += 1;
        }
    }
    assert!(checked > 0);
}
