//! Shuffled train/test partitioning of sample indices.

use tinyrand::{Seeded, StdRand};

use crate::random::shuffle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Number of held-out samples: `⌈fraction · samples⌉`, leaving at least one training sample.
pub fn test_size(samples: usize, fraction: f64) -> usize {
    if samples == 0 {
        return 0;
    }
    let size = (fraction * samples as f64).ceil() as usize;
    size.min(samples - 1)
}

/// Shuffles `0..samples` with a generator seeded by `seed`, then holds out the first
/// [test_size] indices.
pub fn train_test_split(samples: usize, fraction: f64, seed: u64) -> Split {
    let mut indices: Vec<_> = (0..samples).collect();
    shuffle(&mut indices, &mut StdRand::seed(seed));
    let train = indices.split_off(test_size(samples, fraction));
    Split {
        train,
        test: indices,
    }
}
