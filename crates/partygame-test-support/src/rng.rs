//! Deterministic `DeterministicRng` implementations for tests.

use partygame_core::rng::DeterministicRng;

/// Always answers with the low end of the range. Every uniform choice picks
/// the first candidate and every shuffle becomes a left rotation by one.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays a scripted list of draws, so a test can say which candidate is
/// picked at each step (which player goes next, which prompt is chosen).
///
/// Scripted values are clamped into the requested range. Running past the
/// end of the script panics, which flags a test that draws more often than
/// it expects.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let Some(&value) = self.values.get(self.index) else {
            panic!(
                "SequenceRng script exhausted after {} draws",
                self.values.len()
            );
        };
        self.index += 1;
        value.clamp(min, max.max(min))
    }
}
