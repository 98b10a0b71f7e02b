/// Precondition violations reported by the skiplist and the ranked set.
///
/// These are caller bugs, not data conditions: a missing member or an
/// empty rank is reported through ordinary return values instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The skiplist needs at least one level.
    #[error("maximum number of levels must be at least 1, got {0}")]
    InvalidMaxLevels(usize),

    /// The level jump probability must lie in `[0, 1]`.
    #[error("level jump probability must be within [0, 1], got {0}")]
    InvalidProbability(f32),

    /// A key (rank) fell below the configured minimum.
    #[error("key {key} is below the minimum key {min}")]
    KeyBelowMinimum { key: i64, min: i64 },

    /// A half-open range whose lower bound is not below its upper bound.
    #[error("range start {min} must be less than range end {max}")]
    InvalidRange { min: i64, max: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
