//! Configured comparisons.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tradeoff_config::{Dataset, ExplainerConfig};
use tradeoff_core::{Alternative, MatchMode, Result, TradeoffError, WeightTable};
use tradeoff_solver::termination::{self, ConfiguredTermination};

use crate::compare::{run, CertificatePolicy, Comparison};
use crate::report;

/// Runs comparisons with the mode, budget and certificate settings of an
/// [`ExplainerConfig`].
///
/// # Examples
///
/// ```
/// use tradeoff::{Explainer, ExplainerConfig, MatchMode};
/// use tradeoff::Dataset;
///
/// let dataset = Dataset::from_toml_str(r#"
///     [weights]
///     A = 8
///     C = 7
///
///     [alternatives.x]
///     A = 85
///     C = 71
///
///     [alternatives.y]
///     A = 81
///     C = 75
/// "#).unwrap();
///
/// let explainer = Explainer::new(ExplainerConfig::new().with_mode(MatchMode::OneToOne));
/// let comparison = explainer.compare_in(&dataset, "x", "y").unwrap();
/// assert!(comparison.verdict().is_feasible());
/// assert_eq!(comparison.total_delta().to_string(), "4");
/// ```
#[derive(Debug)]
pub struct Explainer {
    config: ExplainerConfig,
    termination: ConfiguredTermination,
}

impl Explainer {
    pub fn new(config: ExplainerConfig) -> Self {
        let termination = termination::from_config(config.termination.as_ref());
        Self {
            config,
            termination,
        }
    }

    /// Loads the configuration file, falling back to defaults if it is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file exists but cannot be parsed.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(ExplainerConfig::load_or_default(path)?))
    }

    pub fn config(&self) -> &ExplainerConfig {
        &self.config
    }

    /// Compares under the configured default mode.
    pub fn compare(
        &self,
        weights: &WeightTable,
        a: &Alternative,
        b: &Alternative,
    ) -> Result<Comparison> {
        self.compare_with_mode(weights, a, b, self.config.mode)
    }

    pub fn compare_with_mode(
        &self,
        weights: &WeightTable,
        a: &Alternative,
        b: &Alternative,
        mode: MatchMode,
    ) -> Result<Comparison> {
        run(weights, a, b, mode, &self.termination, self.policy())
    }

    /// Compares two alternatives of a dataset, looked up by name.
    pub fn compare_in(&self, dataset: &Dataset, a: &str, b: &str) -> Result<Comparison> {
        self.compare_in_with_mode(dataset, a, b, self.config.mode)
    }

    pub fn compare_in_with_mode(
        &self,
        dataset: &Dataset,
        a: &str,
        b: &str,
        mode: MatchMode,
    ) -> Result<Comparison> {
        let weights = dataset.weight_table();
        let a = dataset.alternative(a)?;
        let b = dataset.alternative(b)?;
        self.compare_with_mode(&weights, &a, &b, mode)
    }

    /// Runs independent comparisons in parallel, one result per pair.
    pub fn compare_batch(
        &self,
        weights: &WeightTable,
        pairs: &[(Alternative, Alternative)],
    ) -> Vec<Result<Comparison>> {
        self.compare_batch_with_mode(weights, pairs, self.config.mode)
    }

    pub fn compare_batch_with_mode(
        &self,
        weights: &WeightTable,
        pairs: &[(Alternative, Alternative)],
        mode: MatchMode,
    ) -> Vec<Result<Comparison>> {
        pairs
            .par_iter()
            .map(|(a, b)| self.compare_with_mode(weights, a, b, mode))
            .collect()
    }

    /// Writes the certificate of an infeasible comparison into the
    /// configured output directory.
    ///
    /// Returns `None` if the comparison is not infeasible or no output
    /// directory is configured.
    ///
    /// # Errors
    ///
    /// Returns `Output` if the directory or file cannot be written.
    pub fn write_certificate(&self, comparison: &Comparison) -> Result<Option<PathBuf>> {
        let Some(dir) = &self.config.certificate.output_dir else {
            return Ok(None);
        };
        report::write_certificate(dir, comparison)
            .map_err(|e| TradeoffError::Output(format!("{}: {e}", dir.display())))
    }

    fn policy(&self) -> CertificatePolicy {
        CertificatePolicy {
            reduce: self.config.certificate.enabled,
            environment_mode: self.config.environment_mode,
            time_limit: self.config.certificate.time_limit(),
        }
    }
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new(ExplainerConfig::default())
    }
}
