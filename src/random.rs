//! Sampling primitives over [Rand].

use tinyrand::Rand;

/// A uniform sample in `[0, 1]`.
#[inline]
pub fn random_f64(rand: &mut impl Rand) -> f64 {
    rand.next_u64() as f64 / u64::MAX as f64
}

/// A uniform index in `0..bound`. `bound` must be positive.
#[inline]
pub fn random_index(rand: &mut impl Rand, bound: usize) -> usize {
    debug_assert!(bound > 0);
    ((rand.next_u64() as u128 * bound as u128) >> 64) as usize
}

/// Fisher–Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rand: &mut impl Rand) {
    for i in (1..items.len()).rev() {
        let j = random_index(rand, i + 1);
        items.swap(i, j);
    }
}
