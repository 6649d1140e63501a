use apriori_rules::TransactionSet;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0x5eed_ba5e;

/// Seeded one-hot baskets drawn from a catalogue of `catalogue` items.
///
/// Each basket draws between `mean_len / 2` and `mean_len * 3 / 2` distinct
/// items and keeps each draw with probability `fill_rate`, so baskets may
/// come out empty.
pub fn random_baskets(
    baskets: usize,
    catalogue: usize,
    mean_len: usize,
    fill_rate: f64,
) -> TransactionSet {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut matrix = Array2::<i32>::zeros((baskets, catalogue));

    for mut row in matrix.rows_mut() {
        let len = rng
            .gen_range(mean_len / 2..=mean_len + mean_len / 2)
            .min(catalogue);
        for item in sample(&mut rng, catalogue, len) {
            if rng.gen_bool(fill_rate) {
                row[item] = 1;
            }
        }
    }

    TransactionSet::from_matrix(matrix.view())
}
