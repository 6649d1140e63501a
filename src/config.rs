use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MiningError, Result};

pub mod defaults {
    pub const DEFAULT_MIN_SUPPORT: f64 = 0.05;
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.30;
    pub const DEFAULT_MIN_LIFT: f64 = 1.1;

    pub const DEFAULT_INPUT: &str = "data/processed/cleaned_transactions.csv";
    pub const DEFAULT_ITEMSETS_OUTPUT: &str = "data/results/frequent_itemsets.csv";
    pub const DEFAULT_RULES_OUTPUT: &str = "data/results/association_rules.csv";

    pub const DEFAULT_ITEM_DELIMITER: &str = ",";
    pub const DEFAULT_OUTPUT_DELIMITER: &str = ", ";
}

/// How the support of a multi-item candidate is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SupportStrategy {
    /// Linear scan over every transaction.
    Scan,
    /// Intersect per-item transaction id lists.
    #[default]
    Index,
}

/// Thresholds and evaluation knobs for one mining run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum fraction of transactions an itemset must appear in.
    pub min_support: f64,
    /// Minimum confidence a rule must reach to be kept.
    pub min_confidence: f64,
    /// Minimum lift a rule must reach to be kept.
    pub min_lift: f64,
    pub strategy: SupportStrategy,
    /// Evaluate a level's candidates on the rayon pool.
    pub parallel: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: defaults::DEFAULT_MIN_SUPPORT,
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            min_lift: defaults::DEFAULT_MIN_LIFT,
            strategy: SupportStrategy::default(),
            parallel: false,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: f64, min_confidence: f64, min_lift: f64) -> Self {
        Self {
            min_support,
            min_confidence,
            min_lift,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: SupportStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_fraction("min_support", self.min_support)?;
        if self.min_support == 0.0 {
            return Err(invalid("min_support must be greater than 0"));
        }
        check_fraction("min_confidence", self.min_confidence)?;
        if !self.min_lift.is_finite() || self.min_lift < 0.0 {
            return Err(invalid(format!(
                "min_lift must be a finite value >= 0, got {}",
                self.min_lift
            )));
        }
        Ok(())
    }
}

/// Paths, delimiters and thresholds for a full load-mine-write run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub itemsets_output: PathBuf,
    pub rules_output: PathBuf,
    /// Separator between item labels inside an input cell.
    pub item_delimiter: String,
    /// Separator used when rendering item lists in the output tables.
    pub output_delimiter: String,
    pub mining: MiningConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(defaults::DEFAULT_INPUT),
            itemsets_output: PathBuf::from(defaults::DEFAULT_ITEMSETS_OUTPUT),
            rules_output: PathBuf::from(defaults::DEFAULT_RULES_OUTPUT),
            item_delimiter: defaults::DEFAULT_ITEM_DELIMITER.to_string(),
            output_delimiter: defaults::DEFAULT_OUTPUT_DELIMITER.to_string(),
            mining: MiningConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self> {
        toml::from_str(raw).map_err(|source| MiningError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw, path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.item_delimiter.is_empty() {
            return Err(invalid("item_delimiter must not be empty"));
        }
        if self.output_delimiter.is_empty() {
            return Err(invalid("output_delimiter must not be empty"));
        }
        self.mining.validate()
    }
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(invalid(format!("{name} must be within [0, 1], got {value}")));
    }
    Ok(())
}

fn invalid(reason: impl Into<String>) -> MiningError {
    MiningError::InvalidConfig {
        reason: reason.into(),
    }
}
