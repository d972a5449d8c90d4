//! Seeded row partitioning shared by table splits and validation hold-outs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Partition `0..n` into `(held_out, remainder)` by a seeded shuffle.
///
/// The held-out part has `round(n * fraction)` indices. Both parts are
/// returned in ascending order, and the same seed always picks the same
/// indices.
pub fn split_indices(n: usize, fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let held_out = ((n as f64) * fraction.clamp(0.0, 1.0)).round() as usize;

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let mut first = order[..held_out].to_vec();
    let mut second = order[held_out..].to_vec();
    first.sort_unstable();
    second.sort_unstable();
    (first, second)
}
