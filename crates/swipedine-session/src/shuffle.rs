//! Presentation-order randomizer.

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a uniformly distributed permutation of `items`, leaving the input
/// untouched.
///
/// Fisher–Yates via [`SliceRandom::shuffle`], so every permutation is equally
/// likely. (A comparator returning random orderings does not have that
/// property and is exactly the defect this function replaces.)
#[must_use]
pub fn shuffle_queue<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_queue_with(items, &mut rand::rng())
}

/// [`shuffle_queue`] with a caller-supplied RNG, for deterministic tests.
#[must_use]
pub fn shuffle_queue_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
