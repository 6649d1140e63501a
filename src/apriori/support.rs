use super::transactions::{ItemId, Itemset, TransactionSet};
use crate::config::SupportStrategy;
use crate::error::{MiningError, Result};

/// Fraction of `transactions` that contain every item of `itemset`.
pub fn support(itemset: &Itemset, transactions: &TransactionSet) -> Result<f64> {
    if transactions.is_empty() {
        return Err(MiningError::EmptyTransactionSet);
    }
    let count = transactions
        .iter()
        .filter(|transaction| itemset.is_subset_of(transaction))
        .count();
    Ok(ratio(count, transactions.len()))
}

pub(crate) fn ratio(count: usize, total: usize) -> f64 {
    count as f64 / total as f64
}

/// Computes itemset support over a fixed, non-empty transaction set.
pub trait SupportEvaluator: Sync {
    fn count(&self, itemset: &Itemset) -> usize;

    fn num_transactions(&self) -> usize;

    fn support(&self, itemset: &Itemset) -> f64 {
        ratio(self.count(itemset), self.num_transactions())
    }
}

/// Linear scan over every transaction per query.
pub struct ScanEvaluator<'a> {
    transactions: &'a TransactionSet,
}

impl<'a> ScanEvaluator<'a> {
    pub fn new(transactions: &'a TransactionSet) -> Result<Self> {
        if transactions.is_empty() {
            return Err(MiningError::EmptyTransactionSet);
        }
        Ok(Self { transactions })
    }
}

impl SupportEvaluator for ScanEvaluator<'_> {
    fn count(&self, itemset: &Itemset) -> usize {
        self.transactions
            .iter()
            .filter(|transaction| itemset.is_subset_of(transaction))
            .count()
    }

    fn num_transactions(&self) -> usize {
        self.transactions.len()
    }
}

/// Inverted index from item to the sorted ids of the transactions holding it.
pub struct TidListIndex {
    tid_lists: Vec<Vec<usize>>,
    num_transactions: usize,
}

impl TidListIndex {
    pub fn build(transactions: &TransactionSet) -> Result<Self> {
        if transactions.is_empty() {
            return Err(MiningError::EmptyTransactionSet);
        }
        let mut tid_lists = vec![Vec::new(); transactions.num_items()];
        for (tid, transaction) in transactions.iter().enumerate() {
            for &item in transaction {
                tid_lists[item].push(tid);
            }
        }
        Ok(Self {
            tid_lists,
            num_transactions: transactions.len(),
        })
    }

    pub fn tid_list(&self, item: ItemId) -> &[usize] {
        self.tid_lists.get(item).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl SupportEvaluator for TidListIndex {
    fn count(&self, itemset: &Itemset) -> usize {
        // Start from the rarest item so the running intersection stays small.
        let mut lists: Vec<&[usize]> = itemset.items().iter().map(|&item| self.tid_list(item)).collect();
        lists.sort_unstable_by_key(|list| list.len());

        let Some((first, rest)) = lists.split_first() else {
            return 0;
        };
        let mut common: Vec<usize> = first.to_vec();
        for list in rest {
            if common.is_empty() {
                break;
            }
            common = intersect_sorted(&common, list);
        }
        common.len()
    }

    fn num_transactions(&self) -> usize {
        self.num_transactions
    }
}

fn intersect_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Builds the evaluator selected by `strategy`.
pub fn evaluator<'a>(
    transactions: &'a TransactionSet,
    strategy: SupportStrategy,
) -> Result<Box<dyn SupportEvaluator + 'a>> {
    Ok(match strategy {
        SupportStrategy::Scan => Box::new(ScanEvaluator::new(transactions)?),
        SupportStrategy::Index => Box::new(TidListIndex::build(transactions)?),
    })
}
