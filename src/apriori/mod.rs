pub mod combinations;
pub mod loader;
pub mod mining;
pub mod projection;
pub mod rules;
pub mod storage;
pub mod support;
pub mod transactions;


pub use loader::{load_transactions, read_transactions, LoadedTransactions};
pub use mining::{mine_frequent_itemsets, mine_with};
pub use projection::{project_itemsets, project_rules, ItemsetRecord, RuleRecord};
pub use rules::{generate_rules, generate_rules_with, AssociationRule, RuleSet};
pub use storage::{FrequentLevel, FrequentTable};
pub use support::{support, ScanEvaluator, SupportEvaluator, TidListIndex};
pub use transactions::{ItemId, Itemset, TransactionSet};

use crate::config::MiningConfig;
use crate::error::{MiningError, Result};

/// Frequent itemsets and the rules derived from them for one transaction set.
#[derive(Debug, Clone)]
pub struct MiningOutcome {
    pub table: FrequentTable,
    pub rules: RuleSet,
}

/// Mines itemsets then rules, sharing one support evaluator between both passes.
pub fn mine(transactions: &TransactionSet, config: &MiningConfig) -> Result<MiningOutcome> {
    config.validate()?;
    if transactions.is_empty() {
        return Err(MiningError::EmptyTransactionSet);
    }
    let evaluator = support::evaluator(transactions, config.strategy)?;
    let table = mine_with(transactions, evaluator.as_ref(), config);
    let rules = generate_rules_with(
        &table,
        evaluator.as_ref(),
        config.min_confidence,
        config.min_lift,
    );
    Ok(MiningOutcome { table, rules })
}
