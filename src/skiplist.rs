use crate::error::{Error, Result};
use crate::iter::Range;
use crate::options::Options;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;
use std::mem;
use tracing::{debug, warn};

/// Stable index of a node inside the arena.
pub(crate) type NodeId = usize;

/// Where a descent currently stands: `None` is the header sentinel.
type Cursor = Option<NodeId>;

pub(crate) struct Node<V> {
    pub(crate) key: i64,
    pub(crate) value: V,
    /// One link per level; entries above the node's own level stay `None`.
    pub(crate) forward: Box<[Option<NodeId>]>,
}

impl<V> Node<V> {
    fn new(key: i64, value: V, max_levels: usize) -> Self {
        Node {
            key,
            value,
            forward: vec![None; max_levels].into_boxed_slice(),
        }
    }
}

/// What [`SkipList::delete_or_update`] did with the node at a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No node holds the key.
    NotFound,
    /// The node was kept and its value replaced in place.
    Updated,
    /// The node was unlinked from every level.
    Deleted,
}

/// A probabilistic skiplist keyed by `i64`, storing one `V` per key.
///
/// Nodes live in an arena and link to each other by index. The header
/// sentinel is kept apart from the arena as a plain row of links, one per
/// level, and sits below every valid key.
///
/// ```text
/// <head> ----------> [2] ----------------------------------> [9] ->
/// <head> ----------> [2] ------------------> [7] ----------> [9] ->
/// <head> --> [1] --> [2] --> [4] --> [5] --> [7] --> [8] --> [9] ->
/// ```
///
/// Level selection draws from the injected random source `R`, so a
/// seeded generator gives a reproducible shape.
pub struct SkipList<V, R = StdRng> {
    head: Box<[Option<NodeId>]>,
    nodes: Vec<Option<Node<V>>>,
    free: Vec<NodeId>,
    current_level: Option<usize>,
    len: usize,
    opts: Options,
    rng: R,
}

impl<V> Default for SkipList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SkipList<V> {
    /// Creates an empty skiplist with default [`Options`], seeded from entropy.
    pub fn new() -> Self {
        Self::build(Options::new(), StdRng::from_entropy())
    }

    /// Creates an empty skiplist, seeded from entropy.
    pub fn with_options(opts: Options) -> Result<Self> {
        Self::with_options_and_rng(opts, StdRng::from_entropy())
    }
}

impl<V, R> SkipList<V, R> {
    /// Creates an empty skiplist drawing levels from `rng`.
    pub fn with_options_and_rng(opts: Options, rng: R) -> Result<Self> {
        opts.validate()?;
        Ok(Self::build(opts, rng))
    }

    fn build(opts: Options, rng: R) -> Self {
        SkipList {
            head: vec![None; opts.max_levels()].into_boxed_slice(),
            nodes: Vec::new(),
            free: Vec::new(),
            current_level: None,
            len: 0,
            opts,
            rng,
        }
    }

    /// Number of keys (nodes) in the skiplist.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest level holding at least one node, or `None` when empty.
    #[inline]
    pub fn current_level(&self) -> Option<usize> {
        self.current_level
    }

    #[inline]
    pub fn max_levels(&self) -> usize {
        self.opts.max_levels()
    }

    #[inline]
    pub fn min_key(&self) -> i64 {
        self.opts.min_key()
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub(crate) fn check_key(&self, key: i64) -> Result<()> {
        let min = self.opts.min_key();
        if key < min {
            warn!(key, min, "key below minimum");
            return Err(Error::KeyBelowMinimum { key, min });
        }
        Ok(())
    }

    pub(crate) fn check_range(&self, min: i64, max: i64) -> Result<()> {
        self.check_key(min)?;
        self.check_key(max)?;
        if min >= max {
            warn!(min, max, "empty or inverted range");
            return Err(Error::InvalidRange { min, max });
        }
        Ok(())
    }

    #[inline]
    fn active_levels(&self) -> usize {
        self.current_level.map_or(0, |top| top + 1)
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<V> {
        self.nodes[id].as_ref().expect("link to a released node")
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        self.nodes[id].as_mut().expect("link to a released node")
    }

    #[inline]
    fn links(&self, at: Cursor) -> &[Option<NodeId>] {
        match at {
            None => &self.head,
            Some(id) => &self.node(id).forward,
        }
    }

    #[inline]
    fn links_mut(&mut self, at: Cursor) -> &mut [Option<NodeId>] {
        match at {
            None => &mut self.head,
            Some(id) => &mut self.node_mut(id).forward,
        }
    }

    /// Rightmost node with a key below `key`, at every level.
    ///
    /// Levels above the current top keep the header as their predecessor.
    fn predecessors(&self, key: i64) -> Vec<Cursor> {
        let mut update = vec![None; self.opts.max_levels()];
        let mut at: Cursor = None;
        for level in (0..self.active_levels()).rev() {
            while let Some(next) = self.links(at)[level] {
                if self.node(next).key >= key {
                    break;
                }
                at = Some(next);
            }
            update[level] = at;
        }
        update
    }

    /// Node following `pred` on level 0, if it holds exactly `key`.
    #[inline]
    fn matching_successor(&self, pred: Cursor, key: i64) -> Option<NodeId> {
        self.links(pred)[0].filter(|&id| self.node(id).key == key)
    }

    fn find(&self, key: i64) -> Option<NodeId> {
        let mut at: Cursor = None;
        for level in (0..self.active_levels()).rev() {
            while let Some(next) = self.links(at)[level] {
                let next_key = self.node(next).key;
                if next_key == key {
                    return Some(next);
                }
                if next_key > key {
                    break;
                }
                at = Some(next);
            }
        }
        None
    }

    fn alloc(&mut self, node: Node<V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<V> {
        let node = self.nodes[id].take().expect("released a node twice");
        self.free.push(id);
        node
    }

    /// Returns the value stored at `key`.
    pub fn get(&self, key: i64) -> Result<Option<&V>> {
        self.check_key(key)?;
        Ok(self.find(key).map(|id| &self.node(id).value))
    }

    /// Looks up `key` and, when present, replaces its value with
    /// `modify(current)` if a modifier is supplied.
    pub fn get_or_update<F>(&mut self, key: i64, modify: Option<F>) -> Result<Option<&V>>
    where
        F: FnOnce(V) -> V,
        V: Default,
    {
        self.check_key(key)?;
        let id = match self.find(key) {
            Some(id) => id,
            None => return Ok(None),
        };
        let node = self.node_mut(id);
        if let Some(modify) = modify {
            let current = mem::take(&mut node.value);
            node.value = modify(current);
        }
        Ok(Some(&node.value))
    }

    /// Decides the fate of the node at `key`.
    ///
    /// `decide` receives the current value and returns whether to delete
    /// the node together with the value to keep otherwise. Without `decide`
    /// the node is deleted outright.
    pub fn delete_or_update<F>(&mut self, key: i64, decide: Option<F>) -> Result<DeleteOutcome>
    where
        F: FnOnce(V) -> (bool, V),
        V: Default,
    {
        self.check_key(key)?;
        let update = self.predecessors(key);
        let id = match self.matching_successor(update[0], key) {
            Some(id) => id,
            None => return Ok(DeleteOutcome::NotFound),
        };
        if let Some(decide) = decide {
            let node = self.node_mut(id);
            let (delete, value) = decide(mem::take(&mut node.value));
            node.value = value;
            if !delete {
                return Ok(DeleteOutcome::Updated);
            }
        }
        self.unlink(&update, id);
        Ok(DeleteOutcome::Deleted)
    }

    /// Removes the node at `key`, returning its value.
    pub fn remove(&mut self, key: i64) -> Result<Option<V>> {
        self.check_key(key)?;
        let update = self.predecessors(key);
        Ok(self
            .matching_successor(update[0], key)
            .map(|id| self.unlink(&update, id)))
    }

    fn unlink(&mut self, update: &[Cursor], id: NodeId) -> V {
        for (level, &pred) in update.iter().enumerate().take(self.active_levels()) {
            if self.links(pred)[level] != Some(id) {
                break;
            }
            let next = self.node(id).forward[level];
            self.links_mut(pred)[level] = next;
        }
        self.shrink_levels();
        self.len -= 1;
        let node = self.release(id);
        debug!(key = node.key, len = self.len, "unlinked node");
        node.value
    }

    /// Lowers `current_level` past every level the header no longer reaches.
    ///
    /// Scans all levels from the old top down, so several emptied top
    /// levels collapse in one pass.
    fn shrink_levels(&mut self) {
        let top = match self.current_level {
            Some(top) => top,
            None => return,
        };
        let mut new_level = self.current_level;
        for level in (0..=top).rev() {
            if self.head[level].is_none() {
                new_level = level.checked_sub(1);
            }
        }
        if new_level != self.current_level {
            debug!(from = top, to = ?new_level, "shrinking current level");
            self.current_level = new_level;
        }
    }

    /// Values of every node with a key in `[min, max)`, ascending by key.
    pub fn range(&self, min: i64, max: i64) -> Result<Vec<&V>> {
        Ok(self.range_iter(min, max)?.map(|(_, value)| value).collect())
    }

    /// Lazy form of [`SkipList::range`], yielding `(key, value)` pairs.
    pub fn range_iter(&self, min: i64, max: i64) -> Result<Range<'_, V>> {
        self.check_range(min, max)?;
        let mut at: Cursor = None;
        for level in (0..self.active_levels()).rev() {
            while let Some(next) = self.links(at)[level] {
                if self.node(next).key >= min {
                    break;
                }
                at = Some(next);
            }
        }
        Ok(Range::new(&self.nodes, self.links(at)[0], Some(max)))
    }

    /// Every `(key, value)` pair in ascending key order.
    pub fn iter(&self) -> Range<'_, V> {
        Range::new(&self.nodes, self.head[0], None)
    }

    /// One line per active level listing its keys, e.g. `"0:5,6,7,"`.
    pub fn debug_levels(&self) -> Vec<String> {
        (0..self.active_levels())
            .map(|level| {
                let mut row = format!("{}:", level);
                let mut at = self.head[level];
                while let Some(id) = at {
                    let node = self.node(id);
                    row.push_str(&node.key.to_string());
                    row.push(',');
                    at = node.forward[level];
                }
                row
            })
            .collect()
    }

    /// Panics if any structural invariant is broken.
    #[doc(hidden)]
    pub fn ensure_invariants(&self) {
        let max_levels = self.opts.max_levels();
        let active = self.active_levels();
        assert!(active <= max_levels);
        if let Some(top) = self.current_level {
            assert!(self.head[top].is_some(), "top level {} is empty", top);
        }
        assert!(self.head[active..].iter().all(Option::is_none));

        let mut rows: Vec<HashSet<NodeId>> = Vec::with_capacity(active);
        for level in 0..active {
            let mut row = HashSet::new();
            let mut prev: Option<i64> = None;
            let mut at = self.head[level];
            while let Some(id) = at {
                let node = self.node(id);
                assert!(node.key >= self.opts.min_key());
                if let Some(prev) = prev {
                    assert!(prev < node.key, "level {} unordered at {}", level, node.key);
                }
                if level > 0 {
                    assert!(rows[level - 1].contains(&id), "key {} skips level {}", node.key, level - 1);
                }
                row.insert(id);
                prev = Some(node.key);
                at = node.forward[level];
            }
            rows.push(row);
        }

        let live = self.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.len);
        assert_eq!(rows.first().map_or(0, HashSet::len), self.len);
        for (id, node) in self.nodes.iter().enumerate() {
            if let Some(node) = node {
                let height = rows.iter().filter(|row| row.contains(&id)).count();
                assert!(node.forward[height..].iter().all(Option::is_none));
            }
        }
    }
}

impl<V, R: Rng> SkipList<V, R> {
    /// Draws a geometric level in `0..max_levels`.
    fn random_level(&mut self) -> usize {
        let threshold = self.opts.level_jump_probability() * f32::from(u16::MAX);
        let cap = self.opts.max_levels() - 1;
        let mut level = 0;
        while level < cap && f32::from(self.rng.gen::<u16>()) < threshold {
            level += 1;
        }
        level
    }

    /// Inserts `value` at `key`, or updates the node already there.
    ///
    /// An existing node gets `merge(current)` when `merge` is supplied and
    /// `value` otherwise. Returns `true` when a new node was created.
    pub fn insert_or_update<F>(&mut self, key: i64, value: V, merge: Option<F>) -> Result<bool>
    where
        F: FnOnce(V) -> V,
    {
        self.check_key(key)?;
        let update = self.predecessors(key);
        if let Some(id) = self.matching_successor(update[0], key) {
            let node = self.node_mut(id);
            match merge {
                Some(merge) => {
                    let current = mem::replace(&mut node.value, value);
                    node.value = merge(current);
                }
                None => node.value = value,
            }
            return Ok(false);
        }

        let level = self.random_level();
        if self.current_level.map_or(true, |top| level > top) {
            debug!(from = ?self.current_level, to = level, "raising current level");
            self.current_level = Some(level);
        }
        let id = self.alloc(Node::new(key, value, self.opts.max_levels()));
        for (lvl, &pred) in update.iter().enumerate().take(level + 1) {
            let next = self.links(pred)[lvl];
            self.node_mut(id).forward[lvl] = next;
            self.links_mut(pred)[lvl] = Some(id);
        }
        self.len += 1;
        debug!(key, level, len = self.len, "spliced node");
        Ok(true)
    }

    /// Inserts or overwrites the value at `key`.
    pub fn insert(&mut self, key: i64, value: V) -> Result<bool> {
        self.insert_or_update(key, value, None::<fn(V) -> V>)
    }
}

impl<V: fmt::Debug, R> fmt::Debug for SkipList<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SkipList(current_level: {:?}, len: {}), and table:",
            self.current_level, self.len
        )?;
        for level in (0..self.active_levels()).rev() {
            write!(f, "{:>2}: <head>", level)?;
            let mut at = self.head[level];
            while let Some(id) = at {
                let node = self.node(id);
                write!(f, " -> [{}]", node.key)?;
                at = node.forward[level];
            }
            writeln!(f)?;
        }
        for (key, value) in self.iter() {
            writeln!(f, "  {} => {:?}", key, value)?;
        }
        Ok(())
    }
}
