use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Member to rank lookup, answering "is it there, and where" without
/// touching the skiplist.
#[derive(Debug, Clone)]
pub struct Dictionary<M> {
    ranks: HashMap<M, i64>,
}

impl<M> Default for Dictionary<M> {
    fn default() -> Self {
        Dictionary {
            ranks: HashMap::new(),
        }
    }
}

impl<M: Hash + Eq> Dictionary<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `member` at `rank`, returning its previous rank.
    #[inline]
    pub fn insert(&mut self, member: M, rank: i64) -> Option<i64> {
        self.ranks.insert(member, rank)
    }

    #[inline]
    pub fn remove<Q>(&mut self, member: &Q) -> Option<i64>
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ranks.remove(member)
    }

    #[inline]
    pub fn get<Q>(&self, member: &Q) -> Option<i64>
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ranks.get(member).copied()
    }

    #[inline]
    pub fn contains<Q>(&self, member: &Q) -> bool
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ranks.contains_key(member)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&M, i64)> + '_ {
        self.ranks.iter().map(|(member, &rank)| (member, rank))
    }
}

#[cfg(test)]
mod tests {
    use super::Dictionary;

    #[test]
    fn tracks_ranks() {
        let mut dict = Dictionary::new();
        assert!(dict.is_empty());
        assert_eq!(dict.insert("a".to_string(), 4), None);
        assert_eq!(dict.insert("b".to_string(), 9), None);
        assert_eq!(dict.get("a"), Some(4));
        assert!(dict.contains("b"));
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.remove("a"), Some(4));
        assert_eq!(dict.remove("a"), None);
        assert_eq!(dict.get("a"), None);
        assert_eq!(dict.iter().collect::<Vec<_>>(), vec![(&"b".to_string(), 9)]);
    }
}
