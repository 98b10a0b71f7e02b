use crate::dict::Dictionary;
use crate::error::Result;
use crate::options::Options;
use crate::skiplist::{DeleteOutcome, SkipList};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::trace;

pub(crate) struct Inner<M, R> {
    pub(crate) dict: Dictionary<M>,
    pub(crate) index: SkipList<HashSet<M>, R>,
}

/// A thread-safe sorted set mapping unique members to integer ranks.
///
/// Several members may share a rank. Lookups by member go through a
/// dictionary, lookups by rank through a skiplist whose nodes hold the
/// members at that rank. Both live behind a single reader/writer lock,
/// so readers never see one updated without the other.
///
/// ```
/// use ranked_set::RankedSet;
///
/// let set = RankedSet::new();
/// assert!(set.add("Hello", 5).unwrap());
/// assert!(set.add("World", 5).unwrap());
/// assert!(set.add("World2", 6).unwrap());
///
/// let mut at_five = set.get(5).unwrap();
/// at_five.sort();
/// assert_eq!(at_five, vec!["Hello", "World"]);
/// assert_eq!(set.get_range(5, 7).unwrap().len(), 3);
/// assert_eq!(set.get_rank("World2"), 6);
/// ```
pub struct RankedSet<M = String, R = StdRng> {
    pub(crate) inner: RwLock<Inner<M, R>>,
}

impl<M: Hash + Eq + Clone> Default for RankedSet<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Hash + Eq + Clone> RankedSet<M> {
    /// Creates an empty set accepting ranks `>= 0`.
    pub fn new() -> Self {
        Self::from_index(SkipList::new())
    }

    /// Creates an empty set with custom skiplist options, seeded from entropy.
    pub fn with_options(opts: Options) -> Result<Self> {
        Self::with_options_and_rng(opts, StdRng::from_entropy())
    }
}

impl<M: Hash + Eq + Clone, R: Rng> RankedSet<M, R> {
    /// Reported by [`RankedSet::get_rank`] for absent members.
    pub const NOT_FOUND: i64 = -1;

    /// Creates an empty set whose skiplist levels are drawn from `rng`.
    pub fn with_options_and_rng(opts: Options, rng: R) -> Result<Self> {
        SkipList::with_options_and_rng(opts, rng).map(Self::from_index)
    }

    fn from_index(index: SkipList<HashSet<M>, R>) -> Self {
        RankedSet {
            inner: RwLock::new(Inner {
                dict: Dictionary::new(),
                index,
            }),
        }
    }

    /// Adds `member` at `rank`.
    ///
    /// Returns `Ok(false)` and leaves the set untouched if the member is
    /// already present, whatever its rank.
    pub fn add(&self, member: M, rank: i64) -> Result<bool> {
        let mut inner = self.inner.write();
        inner.index.check_key(rank)?;
        if inner.dict.contains(&member) {
            trace!(rank, "member already present");
            return Ok(false);
        }

        let mut fresh = HashSet::with_capacity(1);
        fresh.insert(member.clone());
        let merged = member.clone();
        inner.index.insert_or_update(
            rank,
            fresh,
            Some(move |mut members: HashSet<M>| {
                members.insert(merged);
                members
            }),
        )?;
        inner.dict.insert(member, rank);
        trace!(rank, members = inner.dict.len(), "added member");
        Ok(true)
    }

    /// Removes `member`, dropping its rank's node once no member is left there.
    pub fn remove<Q>(&self, member: &Q) -> bool
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.write();
        let rank = match inner.dict.remove(member) {
            Some(rank) => rank,
            None => return false,
        };
        let outcome = inner.index.delete_or_update(
            rank,
            Some(|mut members: HashSet<M>| {
                members.remove(member);
                (members.is_empty(), members)
            }),
        );
        debug_assert!(
            matches!(outcome, Ok(DeleteOutcome::Deleted) | Ok(DeleteOutcome::Updated)),
            "member indexed under missing rank {}",
            rank
        );
        trace!(rank, ?outcome, "removed member");
        true
    }

    /// Members stored at `rank`, in no particular order.
    pub fn get(&self, rank: i64) -> Result<Vec<M>> {
        let inner = self.inner.read();
        let members = inner
            .index
            .get(rank)?
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default();
        Ok(members)
    }

    /// Members with a rank in `[rank_min, rank_max)`, lowest rank first.
    pub fn get_range(&self, rank_min: i64, rank_max: i64) -> Result<Vec<M>> {
        let inner = self.inner.read();
        let members = inner
            .index
            .range_iter(rank_min, rank_max)?
            .flat_map(|(_, members)| members.iter().cloned())
            .collect();
        Ok(members)
    }

    pub fn exists<Q>(&self, member: &Q) -> bool
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().dict.contains(member)
    }

    /// Rank of `member`, or [`RankedSet::NOT_FOUND`] when absent.
    pub fn get_rank<Q>(&self, member: &Q) -> i64
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.rank(member).unwrap_or(Self::NOT_FOUND)
    }

    pub fn rank<Q>(&self, member: &Q) -> Option<i64>
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().dict.get(member)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.inner.read().dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn min_rank(&self) -> i64 {
        self.inner.read().index.min_key()
    }

    /// Ranks held by each skiplist level, see [`SkipList::debug_levels`].
    pub fn debug_levels(&self) -> Vec<String> {
        self.inner.read().index.debug_levels()
    }

    /// Panics unless the skiplist is well formed and agrees with the dictionary.
    #[doc(hidden)]
    pub fn ensure_invariants(&self) {
        let inner = self.inner.read();
        inner.index.ensure_invariants();

        let mut indexed = 0;
        for (rank, members) in inner.index.iter() {
            assert!(!members.is_empty(), "rank {} kept with no members", rank);
            for member in members {
                assert_eq!(inner.dict.get(member), Some(rank));
            }
            indexed += members.len();
        }
        assert_eq!(indexed, inner.dict.len());

        for (member, rank) in inner.dict.iter() {
            let members = inner.index.get(rank).ok().flatten();
            assert!(members.map_or(false, |m| m.contains(member)));
        }
    }
}
