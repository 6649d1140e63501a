use super::transactions::ItemId;

/// Calls `callback` with every non-empty proper subset of `items`, smallest first.
pub fn for_each_proper_subset<F>(items: &[ItemId], mut callback: F)
where
    F: FnMut(&[ItemId]),
{
    for k in 1..items.len() {
        generate_combinations_recursive(items, k, 0, &mut Vec::with_capacity(k), &mut callback);
    }
}

pub fn generate_combinations_recursive<F>(
    items: &[ItemId],
    k: usize,
    start: usize,
    current: &mut Vec<ItemId>,
    callback: &mut F,
) where
    F: FnMut(&[ItemId]),
{
    if current.len() == k {
        callback(current);
        return;
    }

    // Stop early once too few items remain to fill the combination.
    let needed = k - current.len();
    for i in start..=items.len().saturating_sub(needed) {
        if i >= items.len() {
            break;
        }
        current.push(items[i]);
        generate_combinations_recursive(items, k, i + 1, current, callback);
        current.pop();
    }
}
