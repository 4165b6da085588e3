use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

pub const DEFAULT_RANGE: Range<i32> = 20..40;

/// Fake temperature probe, uniformly distributed over a half-open range.
pub struct Thermometer<R: Rng> {
    rng: R,
    range: Range<i32>,
}

impl Thermometer<StdRng> {
    pub fn from_entropy(range: Range<i32>) -> Self {
        Self::new(StdRng::from_entropy(), range)
    }
}

impl<R: Rng> Thermometer<R> {
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn new(rng: R, range: Range<i32>) -> Self {
        assert!(
            range.start < range.end,
            "empty thermometer range {}..{}",
            range.start,
            range.end
        );
        Self { rng, range }
    }

    pub fn read(&mut self) -> i32 {
        self.rng.gen_range(self.range.clone())
    }

    pub fn range(&self) -> &Range<i32> {
        &self.range
    }
}
