//! Seeded random permutations of input indices, one per epoch.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces Fisher–Yates permutations from a generator seeded once per run.
///
/// The k-th permutation drawn is fully determined by the seed, `k` and `n`.
pub struct PermutationGenerator {
    rng: StdRng,
}

impl PermutationGenerator {
    /// Create a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw the next permutation of `0..n`.
    pub fn next_permutation(&mut self, n: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            let j = self.rng.gen_range(0..=i);
            indices.swap(i, j);
        }
        indices
    }
}
