//! An in-memory ranked sorted set, the kind of structure behind a
//! leaderboard or a Redis `ZSET`.
//!
//! [`RankedSet`] maps unique members to `i64` ranks. Ranks are indexed by a
//! probabilistic [`SkipList`] whose nodes live in an arena and link by index,
//! members by a [`Dictionary`]. Insert, delete, point lookup and half-open
//! range queries are `O(log n)` on average, and the whole set sits behind
//! one reader/writer lock.
//!
//! ```
//! use ranked_set::{Error, RankedSet};
//!
//! let board = RankedSet::new();
//! board.add("alice".to_string(), 30).unwrap();
//! board.add("bob".to_string(), 10).unwrap();
//! board.add("carol".to_string(), 20).unwrap();
//!
//! assert_eq!(board.get_range(10, 30).unwrap(), vec!["bob", "carol"]);
//! assert_eq!(board.get_rank("alice"), 30);
//! assert_eq!(board.get_rank("dave"), -1);
//! assert_eq!(
//!     board.get_range(30, 10),
//!     Err(Error::InvalidRange { min: 30, max: 10 })
//! );
//! ```

mod dict;
mod error;
mod iter;
mod options;
mod ranked_set;
#[cfg(feature = "serde_support")]
mod serde_impl;
mod skiplist;

pub use crate::dict::Dictionary;
pub use crate::error::{Error, Result};
pub use crate::iter::Range;
pub use crate::options::{
    Options, DEFAULT_LEVEL_JUMP_PROBABILITY, DEFAULT_MAX_LEVELS, DEFAULT_MIN_KEY,
};
pub use crate::ranked_set::RankedSet;
pub use crate::skiplist::{DeleteOutcome, SkipList};
