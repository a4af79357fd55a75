//! Execution order and its randomization between iterations.
//!
//! The shuffle performs exactly `N` random transpositions over an order of
//! length `N`. It does not produce a uniform distribution over permutations:
//! some orders are favoured and an element keeps its place with noticeable
//! probability. Suites that rely on reproducible orders only depend on it
//! being a permutation and on it being a pure function of the random source.

use rand::Rng;

/// Returns the identity order `[0, len)`.
#[must_use]
pub fn identity(len: usize) -> Vec<usize> {
    (0..len).collect()
}

/// Permutes `order` in place with `order.len()` random transpositions.
///
/// Each transposition draws two independent uniform positions and swaps
/// them; equal positions leave the order unchanged.
///
/// # Examples
///
/// ```
/// use casekit::shuffle::{identity, transposition_shuffle};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut order = identity(6);
/// transposition_shuffle(&mut order, &mut StdRng::seed_from_u64(7));
/// let mut sorted = order.clone();
/// sorted.sort_unstable();
/// assert_eq!(sorted, identity(6));
/// ```
pub fn transposition_shuffle<R: Rng + ?Sized>(order: &mut [usize], rng: &mut R) {
    let len = order.len();
    if len == 0 {
        return;
    }
    for _ in 0..len {
        let source = rng.gen_range(0..len);
        let destination = rng.gen_range(0..len);
        order.swap(source, destination);
    }
}
