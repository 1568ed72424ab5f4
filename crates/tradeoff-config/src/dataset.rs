//! Weight and grade tables loaded from files.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeoff_core::{Alternative, TradeoffError, WeightTable};

use crate::ConfigError;

/// A weight table plus any number of graded alternatives.
///
/// # Examples
///
/// ```
/// use tradeoff_config::Dataset;
///
/// let dataset = Dataset::from_toml_str(r#"
///     [weights]
///     A = 8
///     B = 7
///
///     [alternatives.x]
///     A = 85
///     B = 81
///
///     [alternatives.y]
///     A = 81
///     B = 81.5
/// "#).unwrap();
///
/// assert_eq!(dataset.weight_table().len(), 2);
/// assert_eq!(dataset.alternative_names().collect::<Vec<_>>(), vec!["x", "y"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Dataset {
    /// Criterion id to weight.
    pub weights: BTreeMap<String, Decimal>,

    /// Alternative name to (criterion id to grade).
    #[serde(default)]
    pub alternatives: BTreeMap<String, BTreeMap<String, Decimal>>,
}

impl Dataset {
    /// Loads a dataset, choosing the format from the file extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Builds the weight table in criterion-id order.
    pub fn weight_table(&self) -> WeightTable {
        self.weights
            .iter()
            .map(|(id, weight)| (id.clone(), *weight))
            .collect()
    }

    /// Looks up an alternative by name.
    pub fn alternative(&self, name: &str) -> Result<Alternative, TradeoffError> {
        self.alternatives
            .get(name)
            .map(|grades| Alternative::with_grades(name, grades.clone()))
            .ok_or_else(|| TradeoffError::UnknownAlternative(name.to_string()))
    }

    pub fn alternative_names(&self) -> impl Iterator<Item = &str> {
        self.alternatives.keys().map(String::as_str)
    }

    /// Every ordered pair of distinct alternatives.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let names: Vec<&String> = self.alternatives.keys().collect();
        names
            .iter()
            .flat_map(|a| {
                names
                    .iter()
                    .filter(move |b| a != *b)
                    .map(move |b| ((*a).clone(), (*b).clone()))
            })
            .collect()
    }
}
