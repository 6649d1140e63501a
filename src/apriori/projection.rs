use super::rules::AssociationRule;
use super::storage::FrequentTable;
use super::transactions::{Itemset, TransactionSet};
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::warn;

const DECIMALS: f64 = 10_000.0;

pub fn round4(value: f64) -> f64 {
    (value * DECIMALS).round() / DECIMALS
}

/// One row of the frequent-itemsets table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsetRecord {
    pub itemset: String,
    pub support: f64,
}

/// One row of the association-rules table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRecord {
    pub antecedent: String,
    pub consequent: String,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

fn join_labels(transactions: &TransactionSet, itemset: &Itemset, delimiter: &str) -> String {
    transactions.labels_of(itemset).join(delimiter)
}

/// Itemsets by support descending; ties ordered by item ids.
pub fn project_itemsets(
    table: &FrequentTable,
    transactions: &TransactionSet,
    delimiter: &str,
) -> Vec<ItemsetRecord> {
    let mut entries: Vec<(&Itemset, f64)> = table.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .map(|(itemset, support)| ItemsetRecord {
            itemset: join_labels(transactions, itemset, delimiter),
            support: round4(support),
        })
        .collect()
}

/// Rules by lift descending; ties ordered by antecedent then consequent ids.
pub fn rules_by_lift(rules: &[AssociationRule]) -> Vec<&AssociationRule> {
    let mut ordered: Vec<&AssociationRule> = rules.iter().collect();
    ordered.sort_by(|a, b| {
        b.lift
            .total_cmp(&a.lift)
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
    ordered
}

pub fn project_rules(
    rules: &[AssociationRule],
    transactions: &TransactionSet,
    delimiter: &str,
) -> Vec<RuleRecord> {
    rules_by_lift(rules)
        .into_iter()
        .map(|rule| RuleRecord {
            antecedent: join_labels(transactions, &rule.antecedent, delimiter),
            consequent: join_labels(transactions, &rule.consequent, delimiter),
            support: round4(rule.support),
            confidence: round4(rule.confidence),
            lift: round4(rule.lift),
        })
        .collect()
}

/// Writes `records` with a header row into a temp file next to `path`.
/// Nothing appears at `path` until the returned file is persisted.
pub fn stage_table<T: Serialize>(path: &Path, header: &[&str], records: &[T]) -> Result<NamedTempFile> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        // Header written by hand so an empty table still carries its columns.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp_file.as_file_mut());
        writer.write_record(header)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    temp_file.as_file_mut().flush()?;
    Ok(temp_file)
}

pub const ITEMSET_HEADER: [&str; 2] = ["itemset", "support"];
pub const RULE_HEADER: [&str; 5] = ["antecedent", "consequent", "support", "confidence", "lift"];

/// Stages both tables and only then moves them into place. If the rules table
/// cannot be moved, the itemsets table already in place is removed again.
pub fn write_tables(
    itemsets_path: &Path,
    itemsets: &[ItemsetRecord],
    rules_path: &Path,
    rules: &[RuleRecord],
) -> Result<()> {
    let staged_itemsets = stage_table(itemsets_path, &ITEMSET_HEADER, itemsets)?;
    let staged_rules = stage_table(rules_path, &RULE_HEADER, rules)?;

    staged_itemsets
        .persist(itemsets_path)
        .map_err(|e| e.error)?;
    if let Err(err) = staged_rules.persist(rules_path) {
        if let Err(cleanup) = fs::remove_file(itemsets_path) {
            warn!(path = %itemsets_path.display(), %cleanup, "could not remove itemsets table");
        }
        return Err(err.error.into());
    }
    Ok(())
}
