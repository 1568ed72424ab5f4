//! End-to-end comparisons over the reference grade table.

use tradeoff::prelude::*;
use tradeoff::{CertificateOrigin, Decimal, Delta, TradeoffError};
use tradeoff_test::grades::alternative;
use tradeoff_test::weights;

fn run(a: &str, b: &str, mode: MatchMode) -> Comparison {
    compare_detailed(&weights(), &alternative(a), &alternative(b), mode, &NoTermination)
        .unwrap()
}

#[test]
fn test_scores_and_classification() {
    let comparison = run("x", "y", MatchMode::OneToOne);

    assert_eq!(comparison.score_a(), Decimal::from(3541));
    assert_eq!(comparison.score_b(), Decimal::from(3530));
    assert_eq!(comparison.total_delta(), Delta::of(11));
    assert_eq!(comparison.instance().total(), comparison.total_delta());
    assert_eq!(comparison.pros().len(), 3);
    assert_eq!(comparison.cons().len(), 3);
    assert_eq!(comparison.neutrals()[0].criterion(), "B");
}

#[test]
fn test_one_to_one_explanation() {
    let verdict = run("x", "y", MatchMode::OneToOne).into_verdict();
    let solution = verdict.solution().unwrap();

    assert_eq!(solution.len(), 3);
    assert!(solution.groups().iter().all(|g| g.is_balanced()));
}

#[test]
fn test_one_to_one_certificate() {
    let verdict = run("y", "z", MatchMode::OneToOne).into_verdict();
    let certificate = verdict.certificate().unwrap();

    assert_eq!(certificate.constraint_names(), vec!["cover_D"]);
    assert!(certificate.is_irreducible());
}

#[test]
fn test_many_to_one_certificate() {
    let verdict = run("z", "t", MatchMode::ManyToOne).into_verdict();
    let certificate = verdict.certificate().unwrap();

    assert_eq!(
        certificate.constraint_names(),
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
fn test_combined_rescues_many_to_one() {
    let comparison = run("z", "t", MatchMode::Combined);
    let solution = comparison.verdict().solution().unwrap();

    assert_eq!(solution.len(), 2);
    assert!(solution.is_proven_minimal());
}

#[test]
fn test_mismatched_criteria_rejected() {
    let x = alternative("x");
    let partial = Alternative::new("p").with_grade("A", 80);
    let err = compare(&weights(), &x, &partial, MatchMode::Combined, &NoTermination).unwrap_err();

    assert!(matches!(err, TradeoffError::MismatchedCriteria { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_non_positive_weight_rejected() {
    let weights = WeightTable::new().with("A", 0);
    let a = Alternative::new("a").with_grade("A", 1);
    let b = Alternative::new("b").with_grade("A", 2);
    let err = compare(&weights, &a, &b, MatchMode::OneToOne, &NoTermination).unwrap_err();

    assert!(matches!(err, TradeoffError::NonPositiveWeight { .. }));
}

#[test]
fn test_batch_isolates_failures() {
    let huge = alternative("x").with_grade("A", Decimal::from_i128_with_scale(10i128.pow(28), 0));
    let pairs = vec![
        (alternative("x"), alternative("y")),
        (alternative("x"), Alternative::new("broken")),
        (huge, alternative("x")),
        (alternative("z"), alternative("t")),
    ];
    let results = compare_batch(&weights(), &pairs, MatchMode::ManyToOne, &NoTermination);

    assert_eq!(results.len(), 4);
    assert!(results[0].as_ref().unwrap().is_feasible());
    assert!(results[1].is_err());
    assert!(matches!(
        results[2],
        Err(TradeoffError::ValueOverflow { ref criterion }) if criterion == "A"
    ));
    assert!(results[3].as_ref().unwrap().is_infeasible());
}

#[test]
fn test_out_of_range_values_rejected() {
    let weights = WeightTable::new().with("A", Decimal::from(10_000_000_000_000_000_000u64));
    let a = Alternative::new("a").with_grade("A", 10_000_000_000i64);
    let b = Alternative::new("b").with_grade("A", -10_000_000_000i64);
    let err = compare(&weights, &a, &b, MatchMode::OneToOne, &NoTermination).unwrap_err();

    assert!(matches!(err, TradeoffError::ValueOverflow { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_budget_yields_unknown() {
    let verdict = compare(
        &weights(),
        &alternative("z"),
        &alternative("t"),
        MatchMode::ManyToOne,
        &StepCountTermination::new(1),
    )
    .unwrap();

    assert!(verdict.is_unknown());
}

#[test]
fn test_tie_has_empty_explanation() {
    let verdict = compare(
        &weights(),
        &alternative("u"),
        &alternative("u"),
        MatchMode::Combined,
        &NoTermination,
    )
    .unwrap();

    assert!(verdict.solution().unwrap().is_empty());
}

#[test]
fn test_one_sided_certificate_lists_cons() {
    let weights = WeightTable::new().with("A", 2).with("B", 3);
    let a = Alternative::new("a").with_grade("A", 1).with_grade("B", 1);
    let b = Alternative::new("b").with_grade("A", 2).with_grade("B", 3);
    let verdict = compare(&weights, &a, &b, MatchMode::OneToMany, &NoTermination).unwrap();
    let certificate = verdict.certificate().unwrap();

    assert_eq!(certificate.origin(), CertificateOrigin::OneSided);
    assert_eq!(certificate.constraint_names(), vec!["cover_A", "cover_B"]);
}
