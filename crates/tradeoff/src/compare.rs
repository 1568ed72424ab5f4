//! Pairwise comparison entry points.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::info;
use tradeoff_config::EnvironmentMode;
use tradeoff_core::{
    Alternative, Contribution, Decimal, Delta, InfeasibilityCertificate, Instance, MatchMode,
    Result, Solution, TradeoffError, WeightTable,
};
use tradeoff_solver::termination::{DeadlineTermination, OrTermination, Termination};
use tradeoff_solver::{extract_certificate, solve_with_report, SearchOutcome};

/// Terminal outcome of one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A verified explanation.
    Feasible(Solution),
    /// No explanation exists; the certificate says why.
    Infeasible(InfeasibilityCertificate),
    /// The budget ran out before the search decided.
    Unknown,
}

impl Verdict {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Verdict::Feasible(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, Verdict::Infeasible(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Verdict::Unknown)
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Verdict::Feasible(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn certificate(&self) -> Option<&InfeasibilityCertificate> {
        match self {
            Verdict::Infeasible(certificate) => Some(certificate),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Feasible(_) => "feasible",
            Verdict::Infeasible(_) => "infeasible",
            Verdict::Unknown => "unknown",
        }
    }
}

/// A verdict together with the scores and classified contributions it
/// was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    alternative_a: String,
    alternative_b: String,
    mode: MatchMode,
    score_a: Decimal,
    score_b: Decimal,
    instance: Instance,
    verdict: Verdict,
    nodes_explored: u64,
    elapsed: Duration,
}

impl Comparison {
    pub fn alternative_a(&self) -> &str {
        &self.alternative_a
    }

    pub fn alternative_b(&self) -> &str {
        &self.alternative_b
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Weighted total of the first alternative.
    pub fn score_a(&self) -> Decimal {
        self.score_a
    }

    /// Weighted total of the second alternative.
    pub fn score_b(&self) -> Decimal {
        self.score_b
    }

    /// `score_a - score_b`, which equals the sum of all contributions.
    pub fn total_delta(&self) -> Delta {
        Delta::new(self.score_a - self.score_b)
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn pros(&self) -> &[Contribution] {
        self.instance.pros()
    }

    pub fn cons(&self) -> &[Contribution] {
        self.instance.cons()
    }

    pub fn neutrals(&self) -> &[Contribution] {
        self.instance.neutrals()
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn into_verdict(self) -> Verdict {
        self.verdict
    }

    /// Search nodes visited while deciding feasibility.
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    /// Wall time of the whole comparison, certificate included.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// How an `Unsat` search is turned into a certificate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CertificatePolicy {
    pub(crate) reduce: bool,
    pub(crate) environment_mode: EnvironmentMode,
    /// Wall-clock budget shared by all deletion probes of one comparison.
    pub(crate) time_limit: Option<Duration>,
}

impl Default for CertificatePolicy {
    fn default() -> Self {
        Self {
            reduce: true,
            environment_mode: EnvironmentMode::NonAsserted,
            time_limit: None,
        }
    }
}

/// Explains why `a` outscores (or fails to outscore) `b` under `mode`.
///
/// Input errors are returned before any search runs. `Infeasible` always
/// carries an irreducible certificate unless a deletion probe ran out of
/// budget, in which case the certificate is still infeasible but marked as
/// not proven irreducible.
///
/// # Examples
///
/// ```
/// use tradeoff::{compare, Alternative, MatchMode, WeightTable};
/// use tradeoff::termination::NoTermination;
///
/// let weights = WeightTable::new().with("A", 8).with("C", 7);
/// let x = Alternative::new("x").with_grade("A", 85).with_grade("C", 71);
/// let y = Alternative::new("y").with_grade("A", 81).with_grade("C", 75);
///
/// let verdict = compare(&weights, &x, &y, MatchMode::OneToOne, &NoTermination).unwrap();
/// assert!(verdict.is_feasible());
/// ```
pub fn compare<T: Termination + ?Sized>(
    weights: &WeightTable,
    a: &Alternative,
    b: &Alternative,
    mode: MatchMode,
    termination: &T,
) -> Result<Verdict> {
    compare_detailed(weights, a, b, mode, termination).map(Comparison::into_verdict)
}

/// Like [`compare`], also returning scores, contributions and statistics.
pub fn compare_detailed<T: Termination + ?Sized>(
    weights: &WeightTable,
    a: &Alternative,
    b: &Alternative,
    mode: MatchMode,
    termination: &T,
) -> Result<Comparison> {
    run(weights, a, b, mode, termination, CertificatePolicy::default())
}

/// Runs independent comparisons on the rayon pool.
///
/// Results keep the order of `pairs`; an error or `Unknown` in one entry
/// never affects the others.
pub fn compare_batch<T: Termination + ?Sized>(
    weights: &WeightTable,
    pairs: &[(Alternative, Alternative)],
    mode: MatchMode,
    termination: &T,
) -> Vec<Result<Verdict>> {
    pairs
        .par_iter()
        .map(|(a, b)| compare(weights, a, b, mode, termination))
        .collect()
}

pub(crate) fn run<T: Termination + ?Sized>(
    weights: &WeightTable,
    a: &Alternative,
    b: &Alternative,
    mode: MatchMode,
    termination: &T,
    policy: CertificatePolicy,
) -> Result<Comparison> {
    let started = Instant::now();

    let instance = Instance::from_alternatives(weights, a, b)?;
    let score_a = weights.weighted_score(a)?;
    let score_b = weights.weighted_score(b)?;
    if instance.total() != Delta::new(score_a - score_b) {
        return Err(TradeoffError::InvariantViolation(format!(
            "contributions of '{}' against '{}' sum to {}, scores differ by {}",
            a.name(),
            b.name(),
            instance.total(),
            score_a - score_b
        )));
    }

    info!(
        event = "compare_start",
        mode = mode.label(),
        alternative_a = a.name(),
        alternative_b = b.name(),
        pro_count = instance.pros().len(),
        con_count = instance.cons().len(),
    );

    let report = solve_with_report(mode, &instance, termination)?;
    let verdict = match report.outcome {
        SearchOutcome::Feasible(solution) => Verdict::Feasible(solution),
        SearchOutcome::Unknown => Verdict::Unknown,
        SearchOutcome::Unsat => Verdict::Infeasible(certify(mode, &instance, termination, policy)?),
    };

    let elapsed = started.elapsed();
    let group_count = verdict.solution().map_or(0, Solution::len);
    info!(
        event = "compare_end",
        mode = mode.label(),
        alternative_a = a.name(),
        alternative_b = b.name(),
        verdict = verdict.label(),
        group_count,
        nodes = report.nodes_explored,
        duration_ms = elapsed.as_millis() as u64,
    );

    Ok(Comparison {
        alternative_a: a.name().to_string(),
        alternative_b: b.name().to_string(),
        mode,
        score_a,
        score_b,
        instance,
        verdict,
        nodes_explored: report.nodes_explored,
        elapsed,
    })
}

fn certify<T: Termination + ?Sized>(
    mode: MatchMode,
    instance: &Instance,
    termination: &T,
    policy: CertificatePolicy,
) -> Result<InfeasibilityCertificate> {
    let one_sided = instance.pros().is_empty() || instance.cons().is_empty();
    if policy.reduce || one_sided {
        let deadline = policy.time_limit.map(DeadlineTermination::after);
        let bounded = OrTermination::new((termination, deadline));
        extract_certificate(mode, instance, &bounded, policy.environment_mode)
    } else {
        Ok(InfeasibilityCertificate::unfiltered(
            mode,
            instance.pros(),
            instance.cons(),
        ))
    }
}
