use super::combinations::for_each_proper_subset;
use super::storage::FrequentTable;
use super::support::{evaluator, SupportEvaluator};
use super::transactions::{Itemset, TransactionSet};
use crate::config::MiningConfig;
use crate::error::Result;
use tracing::{debug, warn};

/// An association rule `antecedent -> consequent` split from one frequent itemset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    /// Support of antecedent and consequent together.
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl AssociationRule {
    pub fn itemset(&self) -> Itemset {
        self.antecedent.union(&self.consequent)
    }
}

/// Rules kept by a generation pass plus the candidates it had to drop.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<AssociationRule>,
    /// Antecedents missing from the frequent table.
    pub missing_antecedents: usize,
    /// Candidates whose consequent never occurs, leaving lift undefined.
    pub zero_consequent_support: usize,
}

pub fn generate_rules(
    table: &FrequentTable,
    transactions: &TransactionSet,
    config: &MiningConfig,
) -> Result<RuleSet> {
    if table.is_empty() {
        return Ok(RuleSet::default());
    }
    let evaluator = evaluator(transactions, config.strategy)?;
    Ok(generate_rules_with(
        table,
        evaluator.as_ref(),
        config.min_confidence,
        config.min_lift,
    ))
}

/// Splits every multi-item itemset of `table` into antecedent/consequent pairs
/// and keeps those reaching both thresholds.
///
/// Antecedent support comes from the table; consequent support is counted
/// afresh with `evaluator` since the consequent need not be in the table.
pub fn generate_rules_with(
    table: &FrequentTable,
    evaluator: &dyn SupportEvaluator,
    min_confidence: f64,
    min_lift: f64,
) -> RuleSet {
    let mut result = RuleSet::default();

    for level in table.levels().iter().skip(1) {
        for (items, support_ab) in level.iter() {
            let Some(whole) = Itemset::new(items.to_vec()) else {
                continue;
            };
            for_each_proper_subset(items, |antecedent_items| {
                let Some(support_a) = table.support(antecedent_items) else {
                    debug!(?antecedent_items, "antecedent not in frequent table, skipping");
                    result.missing_antecedents += 1;
                    return;
                };
                let (Some(antecedent), Some(consequent)) = (
                    Itemset::new(antecedent_items.to_vec()),
                    whole.difference(antecedent_items),
                ) else {
                    return;
                };

                let confidence = support_ab / support_a;
                let support_b = evaluator.support(&consequent);
                if support_b == 0.0 {
                    warn!(
                        antecedent = ?antecedent.items(),
                        consequent = ?consequent.items(),
                        "consequent never occurs, lift undefined; skipping rule"
                    );
                    result.zero_consequent_support += 1;
                    return;
                }
                let lift = confidence / support_b;

                if confidence >= min_confidence && lift >= min_lift {
                    result.rules.push(AssociationRule {
                        antecedent,
                        consequent,
                        support: support_ab,
                        confidence,
                        lift,
                    });
                }
            });
        }
    }

    result
}
