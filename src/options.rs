use crate::error::{Error, Result};

/// Default number of levels: `2^32` comfortably exceeds any in-memory set.
pub const DEFAULT_MAX_LEVELS: usize = 32;

/// Default chance of promoting a node one level up.
pub const DEFAULT_LEVEL_JUMP_PROBABILITY: f32 = 0.5;

/// Default inclusive lower bound for keys.
pub const DEFAULT_MIN_KEY: i64 = 0;

/// Options for [`SkipList`](crate::SkipList) and [`RankedSet`](crate::RankedSet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    max_levels: usize,
    level_jump_probability: f32,
    min_key: i64,
}

impl Default for Options {
    #[inline]
    fn default() -> Options {
        Options::new()
    }
}

impl Options {
    /// Creates a new set of options with the default values.
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            level_jump_probability: DEFAULT_LEVEL_JUMP_PROBABILITY,
            min_key: DEFAULT_MIN_KEY,
        }
    }

    /// Sets the upper bound on the number of levels a node may occupy.
    #[inline]
    pub const fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Sets the probability that a node present at level `i` also reaches `i + 1`.
    #[inline]
    pub const fn with_level_jump_probability(mut self, p: f32) -> Self {
        self.level_jump_probability = p;
        self
    }

    /// Sets the inclusive lower bound for keys.
    #[inline]
    pub const fn with_min_key(mut self, min_key: i64) -> Self {
        self.min_key = min_key;
        self
    }

    #[inline]
    pub const fn max_levels(&self) -> usize {
        self.max_levels
    }

    #[inline]
    pub const fn level_jump_probability(&self) -> f32 {
        self.level_jump_probability
    }

    #[inline]
    pub const fn min_key(&self) -> i64 {
        self.min_key
    }

    /// Checks that the options describe a usable skiplist.
    pub fn validate(&self) -> Result<()> {
        if self.max_levels < 1 {
            return Err(Error::InvalidMaxLevels(self.max_levels));
        }
        if !(0.0..=1.0).contains(&self.level_jump_probability) {
            return Err(Error::InvalidProbability(self.level_jump_probability));
        }
        Ok(())
    }
}
