use super::storage::FrequentTable;
use super::support::{evaluator, ratio, SupportEvaluator};
use super::transactions::{Itemset, TransactionSet};
use crate::config::MiningConfig;
use crate::error::{MiningError, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info};

/// Levelwise search for every itemset whose support reaches `config.min_support`.
pub fn mine_frequent_itemsets(
    transactions: &TransactionSet,
    config: &MiningConfig,
) -> Result<FrequentTable> {
    if transactions.is_empty() {
        return Err(MiningError::EmptyTransactionSet);
    }
    let evaluator = evaluator(transactions, config.strategy)?;
    Ok(mine_with(transactions, evaluator.as_ref(), config))
}

/// Same search as [`mine_frequent_itemsets`] using a caller-supplied evaluator.
/// `transactions` must be non-empty.
pub fn mine_with(
    transactions: &TransactionSet,
    evaluator: &dyn SupportEvaluator,
    config: &MiningConfig,
) -> FrequentTable {
    let mut table = FrequentTable::new();

    let mut current = frequent_singletons(transactions, config.min_support);
    info!(itemsets = current.len(), "frequent single items found");

    let mut k = 2;
    while !current.is_empty() {
        let candidates = generate_candidates(&current, k);
        table.push_level(std::mem::take(&mut current));

        debug!(k, candidates = candidates.len(), "evaluating candidates");
        if candidates.is_empty() {
            break;
        }

        let next = evaluate_candidates(candidates, evaluator, config);
        if next.is_empty() {
            break;
        }
        info!(k, itemsets = next.len(), "frequent itemsets found");
        current = next;
        k += 1;
    }

    table
}

/// Direct occurrence counting for level 1.
pub fn frequent_singletons(transactions: &TransactionSet, min_support: f64) -> Vec<(Itemset, f64)> {
    let mut item_counts = vec![0usize; transactions.num_items()];
    for transaction in transactions.iter() {
        for &item in transaction {
            item_counts[item] += 1;
        }
    }

    item_counts
        .iter()
        .enumerate()
        .filter_map(|(item, &count)| {
            let support = ratio(count, transactions.len());
            if count > 0 && support >= min_support {
                Some((Itemset::singleton(item), support))
            } else {
                None
            }
        })
        .collect()
}

/// Unions every unordered pair of `previous` and keeps those of exactly `k` items.
///
/// Candidates are not checked for all of their (k-1)-subsets being frequent;
/// every survivor is validated by an exact support count instead.
pub fn generate_candidates(previous: &[(Itemset, f64)], k: usize) -> Vec<Itemset> {
    let mut seen: HashSet<Itemset> = HashSet::new();
    let mut candidates = Vec::new();

    for (i, (left, _)) in previous.iter().enumerate() {
        for (right, _) in &previous[i + 1..] {
            let union = left.union(right);
            if union.len() == k && seen.insert(union.clone()) {
                candidates.push(union);
            }
        }
    }

    candidates.sort_unstable();
    candidates
}

fn evaluate_candidates(
    candidates: Vec<Itemset>,
    evaluator: &dyn SupportEvaluator,
    config: &MiningConfig,
) -> Vec<(Itemset, f64)> {
    let min_support = config.min_support;
    let keep = |candidate: Itemset| {
        let support = evaluator.support(&candidate);
        (support >= min_support).then_some((candidate, support))
    };

    if config.parallel {
        candidates.into_par_iter().filter_map(keep).collect()
    } else {
        candidates.into_iter().filter_map(keep).collect()
    }
}
