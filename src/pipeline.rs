//! Load, mine and write: the batch stage run by the command-line binary.

use crate::apriori::{self, projection, MiningOutcome};
use crate::config::PipelineConfig;
use crate::error::{MiningError, Result};
use std::fmt;
use tracing::{info, warn};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub transactions: usize,
    pub skipped_rows: usize,
    /// Number of frequent itemsets per size, starting at size 1.
    pub itemsets_per_level: Vec<usize>,
    pub itemsets: usize,
    pub rules: usize,
    pub skipped_zero_consequent: usize,
    pub min_support: f64,
    pub min_confidence: f64,
    pub min_lift: f64,
}

impl RunSummary {
    /// Why no rows came out, if that is the case.
    pub fn empty_reason(&self) -> Option<String> {
        if self.itemsets == 0 {
            Some(format!(
                "no item reaches min_support={} across {} transactions",
                self.min_support, self.transactions
            ))
        } else if self.rules == 0 {
            Some(format!(
                "no rule reaches min_confidence={} and min_lift={}",
                self.min_confidence, self.min_lift
            ))
        } else {
            None
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "transactions: {} ({} skipped)",
            self.transactions, self.skipped_rows
        )?;
        writeln!(f, "frequent itemsets: {}", self.itemsets)?;
        for (idx, count) in self.itemsets_per_level.iter().enumerate() {
            writeln!(f, "  size {}: {}", idx + 1, count)?;
        }
        write!(f, "association rules: {}", self.rules)?;
        if let Some(reason) = self.empty_reason() {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;

    let loaded = apriori::load_transactions(&config.input, &config.item_delimiter)?;
    info!(
        transactions = loaded.transactions.len(),
        skipped = loaded.skipped_rows,
        input = %config.input.display(),
        "transactions loaded"
    );
    if loaded.transactions.is_empty() {
        return Err(MiningError::EmptyTransactionSet);
    }

    let MiningOutcome { table, rules } = apriori::mine(&loaded.transactions, &config.mining)?;
    if rules.zero_consequent_support > 0 {
        warn!(
            skipped = rules.zero_consequent_support,
            "rules skipped for zero consequent support"
        );
    }

    let itemset_rows =
        projection::project_itemsets(&table, &loaded.transactions, &config.output_delimiter);
    let rule_rows =
        projection::project_rules(&rules.rules, &loaded.transactions, &config.output_delimiter);
    projection::write_tables(
        &config.itemsets_output,
        &itemset_rows,
        &config.rules_output,
        &rule_rows,
    )?;

    let summary = RunSummary {
        transactions: loaded.transactions.len(),
        skipped_rows: loaded.skipped_rows,
        itemsets_per_level: table.levels().iter().map(|level| level.len()).collect(),
        itemsets: table.len(),
        rules: rules.rules.len(),
        skipped_zero_consequent: rules.zero_consequent_support,
        min_support: config.mining.min_support,
        min_confidence: config.mining.min_confidence,
        min_lift: config.mining.min_lift,
    };
    info!(
        itemsets = summary.itemsets,
        rules = summary.rules,
        itemsets_output = %config.itemsets_output.display(),
        rules_output = %config.rules_output.display(),
        "results written"
    );
    Ok(summary)
}
