//! JSON views of comparison results.

use owo_colors::OwoColorize;
use serde::Serialize;
use tradeoff::{
    Comparison, Contribution, Decimal, Delta, InfeasibilityCertificate, MatchMode, Solution,
    TradeoffError, Verdict,
};

#[derive(Debug, Serialize)]
pub struct ComparisonJson<'a> {
    pub alternative_a: &'a str,
    pub alternative_b: &'a str,
    pub mode: MatchMode,
    pub score_a: Decimal,
    pub score_b: Decimal,
    pub total_delta: Delta,
    pub pros: &'a [Contribution],
    pub cons: &'a [Contribution],
    pub neutrals: &'a [Contribution],
    pub verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<&'a Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<&'a InfeasibilityCertificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
    pub nodes_explored: u64,
    pub elapsed_ms: u64,
}

impl<'a> From<&'a Comparison> for ComparisonJson<'a> {
    fn from(comparison: &'a Comparison) -> Self {
        let certificate = comparison.verdict().certificate();
        Self {
            alternative_a: comparison.alternative_a(),
            alternative_b: comparison.alternative_b(),
            mode: comparison.mode(),
            score_a: comparison.score_a(),
            score_b: comparison.score_b(),
            total_delta: comparison.total_delta(),
            pros: comparison.pros(),
            cons: comparison.cons(),
            neutrals: comparison.neutrals(),
            verdict: comparison.verdict().label(),
            solution: comparison.verdict().solution(),
            certificate,
            constraints: certificate.map(InfeasibilityCertificate::constraint_names),
            nodes_explored: comparison.nodes_explored(),
            elapsed_ms: comparison.elapsed().as_millis() as u64,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankingJson {
    pub name: String,
    pub score: Decimal,
}

/// One cell of the pairwise matrix.
#[derive(Debug, Serialize)]
pub struct MatrixEntryJson {
    pub alternative_a: String,
    pub alternative_b: String,
    pub mode: MatchMode,
    pub verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatrixEntryJson {
    pub fn new(
        a: &str,
        b: &str,
        mode: MatchMode,
        result: Result<Comparison, TradeoffError>,
    ) -> Self {
        let mut entry = Self {
            alternative_a: a.to_string(),
            alternative_b: b.to_string(),
            mode,
            verdict: "error",
            groups: None,
            constraints: None,
            error: None,
        };
        match result {
            Ok(comparison) => {
                entry.verdict = comparison.verdict().label();
                match comparison.verdict() {
                    Verdict::Feasible(solution) => entry.groups = Some(solution.len()),
                    Verdict::Infeasible(certificate) => {
                        entry.constraints = Some(certificate.constraint_names())
                    }
                    Verdict::Unknown => {}
                }
            }
            Err(err) => entry.error = Some(err.to_string()),
        }
        entry
    }

    /// Coloured one-line summary for text output.
    pub fn line(&self) -> String {
        let pair = format!(
            "{} vs {} ({})",
            self.alternative_a,
            self.alternative_b,
            self.mode.label()
        );
        match self.verdict {
            "feasible" => format!(
                "{} {}: {} groups",
                "✓".bright_green(),
                pair,
                self.groups.unwrap_or(0)
            ),
            "infeasible" => format!(
                "{} {}: {}",
                "✗".bright_red(),
                pair,
                self.constraints.as_deref().unwrap_or_default().join(", ")
            ),
            "unknown" => format!("{} {}: budget exhausted", "?".yellow(), pair),
            _ => format!(
                "{} {}: {}",
                "!".bright_red().bold(),
                pair,
                self.error.as_deref().unwrap_or("")
            ),
        }
    }
}
