use apriori_rules::apriori::{
    mine_frequent_itemsets, project_itemsets, project_rules, support, ItemId, Itemset,
    TransactionSet,
};
use apriori_rules::{mine, MiningConfig, SupportStrategy};
use proptest::prelude::*;
use std::collections::HashMap;

const UNIVERSE: [&str; 6] = ["apple", "bread", "cheese", "dates", "eggs", "figs"];

fn transactions_strategy() -> impl Strategy<Value = TransactionSet> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), UNIVERSE.len()), 1..24).prop_map(
        |rows| {
            let records: Vec<Vec<&str>> = rows
                .iter()
                .map(|mask| {
                    mask.iter()
                        .zip(UNIVERSE)
                        .filter(|(present, _)| **present)
                        .map(|(_, label)| label)
                        .collect()
                })
                .collect();
            TransactionSet::from_records(records)
        },
    )
}

fn min_support_strategy() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.05, 0.1, 0.2, 0.25, 0.3, 0.5, 0.75])
}

/// Every non-empty itemset over the item universe, with its support by direct count.
fn brute_force_supports(transactions: &TransactionSet) -> HashMap<Itemset, f64> {
    let n = transactions.num_items();
    let mut supports = HashMap::new();
    for mask in 1u32..(1 << n) {
        let ids: Vec<ItemId> = (0..n).filter(|bit| mask & (1 << bit) != 0).collect();
        let count = transactions
            .iter()
            .filter(|row| ids.iter().all(|id| row.contains(id)))
            .count();
        let itemset = Itemset::new(ids).unwrap();
        supports.insert(itemset, count as f64 / transactions.len() as f64);
    }
    supports
}

// ── Support matches brute-force counting ─────────────────────────────────

proptest! {
    #[test]
    fn support_matches_brute_force(transactions in transactions_strategy()) {
        prop_assume!(!transactions.is_empty());
        for (itemset, expected) in brute_force_supports(&transactions) {
            let actual = support(&itemset, &transactions).unwrap();
            prop_assert_eq!(actual, expected, "itemset {:?}", itemset);
        }
    }
}

// ── Mined table equals the brute-force frequent set ──────────────────────

proptest! {
    #[test]
    fn mining_is_complete_and_exact(
        transactions in transactions_strategy(),
        min_support in min_support_strategy(),
    ) {
        prop_assume!(!transactions.is_empty());
        let config = MiningConfig::new(min_support, 0.0, 0.0);
        let table = mine_frequent_itemsets(&transactions, &config).unwrap();

        let expected: HashMap<Itemset, f64> = brute_force_supports(&transactions)
            .into_iter()
            .filter(|(_, support)| *support >= min_support)
            .collect();

        prop_assert_eq!(table.len(), expected.len());
        for (itemset, support) in &expected {
            prop_assert_eq!(table.support(itemset.items()), Some(*support), "itemset {:?}", itemset);
        }
    }

    #[test]
    fn frequent_table_is_anti_monotone(
        transactions in transactions_strategy(),
        min_support in min_support_strategy(),
    ) {
        prop_assume!(!transactions.is_empty());
        let config = MiningConfig::new(min_support, 0.0, 0.0);
        let table = mine_frequent_itemsets(&transactions, &config).unwrap();

        for (itemset, support) in table.iter() {
            let items = itemset.items();
            for mask in 1u32..((1 << items.len()) - 1) {
                let subset: Vec<ItemId> = items
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, &item)| item)
                    .collect();
                let subset_support = table.support(&subset);
                prop_assert!(subset_support.is_some(), "subset {:?} of {:?} missing", subset, items);
                prop_assert!(subset_support.unwrap() >= support);
            }
        }
    }
}

// ── Rules partition a table itemset and honour thresholds ────────────────

proptest! {
    #[test]
    fn rules_are_well_formed(
        transactions in transactions_strategy(),
        min_support in min_support_strategy(),
        min_confidence in 0.0f64..1.0,
        min_lift in 0.0f64..2.0,
    ) {
        prop_assume!(!transactions.is_empty());
        let config = MiningConfig::new(min_support, min_confidence, min_lift);
        let outcome = mine(&transactions, &config).unwrap();

        for rule in &outcome.rules.rules {
            for item in rule.antecedent.items() {
                prop_assert!(!rule.consequent.contains(*item));
            }
            let union = rule.itemset();
            prop_assert_eq!(union.len(), rule.antecedent.len() + rule.consequent.len());
            prop_assert_eq!(outcome.table.support(union.items()), Some(rule.support));
            prop_assert!((0.0..=1.0).contains(&rule.support));
            prop_assert!(rule.confidence <= 1.0 + 1e-12);
            prop_assert!(rule.confidence >= min_confidence);
            prop_assert!(rule.lift >= min_lift);
            prop_assert!(rule.lift >= 0.0);
        }
    }
}

// ── Same input and config, same result ───────────────────────────────────

proptest! {
    #[test]
    fn mining_is_idempotent_across_strategies(
        transactions in transactions_strategy(),
        min_support in min_support_strategy(),
    ) {
        prop_assume!(!transactions.is_empty());
        let config = MiningConfig::new(min_support, 0.2, 1.0);

        let first = mine(&transactions, &config).unwrap();
        let second = mine(&transactions, &config).unwrap();
        let scanned = mine(
            &transactions,
            &config.clone().with_strategy(SupportStrategy::Scan).with_parallel(true),
        )
        .unwrap();

        let itemsets = project_itemsets(&first.table, &transactions, ",");
        let rules = project_rules(&first.rules.rules, &transactions, ",");

        prop_assert_eq!(&itemsets, &project_itemsets(&second.table, &transactions, ","));
        prop_assert_eq!(&rules, &project_rules(&second.rules.rules, &transactions, ","));
        prop_assert_eq!(&itemsets, &project_itemsets(&scanned.table, &transactions, ","));
        prop_assert_eq!(&rules, &project_rules(&scanned.rules.rules, &transactions, ","));
    }
}
