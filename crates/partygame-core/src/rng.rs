//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests and replays,
//! a seeded or recorded implementation is injected. Every random decision
//! the engine makes is drawn through this trait so a session can be replayed
//! from a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG backed by `rand`'s `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRngSource(StdRng);

impl StdRngSource {
    /// Seeds from the operating system's entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates a reproducible source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdRngSource {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }
}

/// Draws a uniformly distributed index into a collection of `len` items.
///
/// Returns `None` for an empty collection. Indices the RNG reports outside
/// the requested range are clamped to the last element.
#[allow(clippy::cast_possible_truncation)]
pub fn choose_index(len: usize, rng: &mut dyn DeterministicRng) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let max = u32::try_from(len - 1).unwrap_or(u32::MAX);
    let drawn = rng.next_u32_range(0, max) as usize;
    Some(drawn.min(len - 1))
}

/// Shuffles `items` in place with the Fisher–Yates algorithm.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        if let Some(j) = choose_index(i + 1, rng) {
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of draws, ignoring the requested range.
    struct Replay(Vec<u32>);

    impl DeterministicRng for Replay {
        fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_choose_index_returns_none_for_empty_collection() {
        let mut rng = Replay(vec![]);

        assert_eq!(choose_index(0, &mut rng), None);
    }

    #[test]
    fn test_choose_index_clamps_out_of_range_draws() {
        let mut rng = Replay(vec![7]);

        assert_eq!(choose_index(3, &mut rng), Some(2));
    }

    #[test]
    fn test_shuffle_swaps_from_the_back() {
        // i=3 swaps with 0, i=2 with 2, i=1 with 0.
        let mut items = vec!['a', 'b', 'c', 'd'];
        let mut rng = Replay(vec![0, 2, 0]);

        shuffle(&mut items, &mut rng);

        assert_eq!(items, vec!['b', 'd', 'c', 'a']);
    }

    #[test]
    fn test_shuffle_leaves_single_element_untouched() {
        let mut items = vec![42];
        let mut rng = Replay(vec![]);

        shuffle(&mut items, &mut rng);

        assert_eq!(items, vec![42]);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut first = StdRngSource::seeded(7);
        let mut second = StdRngSource::seeded(7);

        let a: Vec<u32> = (0..8).map(|_| first.next_u32_range(0, 100)).collect();
        let b: Vec<u32> = (0..8).map(|_| second.next_u32_range(0, 100)).collect();

        assert_eq!(a, b);
        assert!(a.iter().all(|v| *v <= 100));
    }

    #[test]
    fn test_seeded_source_keeps_shuffle_a_permutation() {
        let mut rng = StdRngSource::seeded(99);
        let mut items: Vec<u32> = (1..=10).collect();

        shuffle(&mut items, &mut rng);
        items.sort_unstable();

        assert_eq!(items, (1..=10).collect::<Vec<_>>());
    }
}
