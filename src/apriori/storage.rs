use super::transactions::{ItemId, Itemset};
use ndarray::Array2;
use std::collections::HashMap;

/// Flat storage for itemsets of one size together with their supports.
#[derive(Debug, Clone, Default)]
pub struct ItemsetStorage {
    items: Vec<ItemId>,
    offsets: Vec<(usize, usize)>,
    supports: Vec<f64>,
}

/// The frequent itemsets retained at one level of the search.
#[derive(Debug, Clone)]
pub struct FrequentLevel {
    pub(crate) storage: ItemsetStorage,
    pub itemset_size: usize,
}

impl ItemsetStorage {
    pub fn with_capacity(estimated_items: usize, estimated_itemsets: usize) -> Self {
        Self {
            items: Vec::with_capacity(estimated_items),
            offsets: Vec::with_capacity(estimated_itemsets),
            supports: Vec::with_capacity(estimated_itemsets),
        }
    }

    pub fn add_itemset(&mut self, itemset: &Itemset, support: f64) -> usize {
        let start = self.items.len();
        self.items.extend_from_slice(itemset.items());
        self.offsets.push((start, itemset.len()));
        self.supports.push(support);
        self.offsets.len() - 1
    }

    pub fn get_itemset(&self, idx: usize) -> &[ItemId] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub fn support(&self, idx: usize) -> f64 {
        self.supports[idx]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }
}

impl FrequentLevel {
    pub fn with_capacity(itemset_size: usize, estimated_itemsets: usize) -> Self {
        let estimated_items = estimated_itemsets * itemset_size;
        Self {
            storage: ItemsetStorage::with_capacity(estimated_items, estimated_itemsets),
            itemset_size,
        }
    }

    pub fn add_itemset(&mut self, itemset: &Itemset, support: f64) -> usize {
        debug_assert_eq!(itemset.len(), self.itemset_size);
        self.storage.add_itemset(itemset, support)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    pub fn get_itemset(&self, idx: usize) -> &[ItemId] {
        self.storage.get_itemset(idx)
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[ItemId]> {
        (0..self.storage.len()).map(move |idx| self.get_itemset(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[ItemId], f64)> {
        (0..self.storage.len()).map(move |idx| (self.get_itemset(idx), self.storage.support(idx)))
    }

    /// One row per itemset, `itemset_size` columns of item ids.
    pub fn to_matrix(&self) -> Array2<ItemId> {
        Array2::from_shape_fn((self.len(), self.itemset_size), |(row, col)| {
            self.get_itemset(row)[col]
        })
    }
}

/// Every frequent itemset found by a run, grouped by size and keyed by content.
#[derive(Debug, Clone, Default)]
pub struct FrequentTable {
    levels: Vec<FrequentLevel>,
    lookup: HashMap<Itemset, f64>,
}

impl FrequentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next level. Levels must arrive in increasing size order.
    pub(crate) fn push_level(&mut self, retained: Vec<(Itemset, f64)>) {
        let itemset_size = self.levels.len() + 1;
        let mut level = FrequentLevel::with_capacity(itemset_size, retained.len());
        for (itemset, support) in retained {
            level.add_itemset(&itemset, support);
            self.lookup.insert(itemset, support);
        }
        self.levels.push(level);
    }

    pub fn support(&self, itemset: &[ItemId]) -> Option<f64> {
        self.lookup.get(itemset).copied()
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn levels(&self) -> &[FrequentLevel] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> {
        self.lookup.iter().map(|(itemset, &support)| (itemset, support))
    }
}
