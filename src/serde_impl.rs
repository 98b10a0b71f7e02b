use crate::RankedSet;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

impl<M: Serialize + Hash + Eq + Clone, R> Serialize for RankedSet<M, R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let inner = self.inner.read();
        serializer.collect_map(inner.dict.iter())
    }
}

impl<'de, M: Deserialize<'de> + Hash + Eq + Clone> Deserialize<'de> for RankedSet<M> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ranks: HashMap<M, i64> = Deserialize::deserialize(deserializer)?;
        let set = RankedSet::new();
        for (member, rank) in ranks {
            set.add(member, rank).map_err(D::Error::custom)?;
        }
        Ok(set)
    }
}
