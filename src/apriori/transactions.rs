use ndarray::ArrayView2;
use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap};

pub type ItemId = usize;

/// A non-empty set of item ids, kept sorted so equality and hashing are by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset(Vec<ItemId>);

impl Itemset {
    /// Sorts and deduplicates `items`. Returns `None` for an empty set.
    pub fn new(mut items: Vec<ItemId>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        items.sort_unstable();
        items.dedup();
        Some(Self(items))
    }

    pub fn singleton(item: ItemId) -> Self {
        Self(vec![item])
    }

    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// Sorted merge of two itemsets.
    pub fn union(&self, other: &Itemset) -> Itemset {
        let (a, b) = (&self.0, &other.0);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        Itemset(merged)
    }

    /// Items of `self` not in `other`, or `None` when nothing is left.
    pub fn difference(&self, other: &[ItemId]) -> Option<Itemset> {
        let rest: Vec<ItemId> = self
            .0
            .iter()
            .copied()
            .filter(|item| other.binary_search(item).is_err())
            .collect();
        if rest.is_empty() {
            None
        } else {
            Some(Itemset(rest))
        }
    }

    /// True when every item of `self` appears in the sorted `transaction`.
    pub fn is_subset_of(&self, transaction: &[ItemId]) -> bool {
        if self.0.len() > transaction.len() {
            return false;
        }
        let mut rest = transaction;
        for item in &self.0 {
            match rest.binary_search(item) {
                Ok(pos) => rest = &rest[pos + 1..],
                Err(_) => return false,
            }
        }
        true
    }
}

impl Borrow<[ItemId]> for Itemset {
    fn borrow(&self) -> &[ItemId] {
        &self.0
    }
}

/// The immutable batch of transactions a mining run works on.
#[derive(Debug, Clone, Default)]
pub struct TransactionSet {
    labels: Vec<String>,
    ids: HashMap<String, ItemId>,
    transactions: Vec<Vec<ItemId>>,
}

impl TransactionSet {
    /// Builds a set from label lists. Labels are trimmed, blanks dropped and
    /// duplicates collapsed; transactions left with no items are discarded.
    /// Item ids follow lexicographic label order.
    pub fn from_records<R, S>(records: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<BTreeSet<String>> = records
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .map(|label| label.as_ref().trim().to_string())
                    .filter(|label| !label.is_empty())
                    .collect::<BTreeSet<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        let vocabulary: BTreeSet<&String> = rows.iter().flatten().collect();
        let labels: Vec<String> = vocabulary.into_iter().cloned().collect();
        let ids: HashMap<String, ItemId> = labels
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();

        // BTreeSet iteration is sorted and ids are assigned in label order,
        // so each mapped row is already sorted.
        let transactions = rows
            .iter()
            .map(|row| row.iter().map(|label| ids[label]).collect())
            .collect();

        Self {
            labels,
            ids,
            transactions,
        }
    }

    /// Builds a set from a one-hot matrix: rows are transactions, columns are
    /// items, and any non-zero cell marks membership. Item ids are column
    /// indices; all-zero rows still count as transactions.
    pub fn from_matrix(matrix: ArrayView2<i32>) -> Self {
        let num_items = matrix.shape()[1];
        let labels: Vec<String> = (0..num_items).map(|col| col.to_string()).collect();
        let ids = labels
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();
        let transactions = matrix
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &cell)| cell != 0)
                    .map(|(col, _)| col)
                    .collect()
            })
            .collect();

        Self {
            labels,
            ids,
            transactions,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn num_items(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, item: ItemId) -> &str {
        &self.labels[item]
    }

    pub fn item_id(&self, label: &str) -> Option<ItemId> {
        self.ids.get(label).copied()
    }

    /// Resolves labels to an itemset; `None` if any label is unknown or the list is empty.
    pub fn itemset<S: AsRef<str>>(&self, labels: &[S]) -> Option<Itemset> {
        let ids = labels
            .iter()
            .map(|label| self.item_id(label.as_ref()))
            .collect::<Option<Vec<_>>>()?;
        Itemset::new(ids)
    }

    pub fn labels_of(&self, itemset: &Itemset) -> Vec<&str> {
        itemset.items().iter().map(|&item| self.label(item)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[ItemId]> {
        self.transactions.iter().map(Vec::as_slice)
    }
}
