use crate::skiplist::{Node, NodeId};

/// Walks level 0 of a [`SkipList`](crate::SkipList) in ascending key order,
/// stopping before the first key at or past `end`.
pub struct Range<'a, V> {
    nodes: &'a [Option<Node<V>>],
    next: Option<NodeId>,
    end: Option<i64>,
}

impl<'a, V> Range<'a, V> {
    pub(crate) fn new(nodes: &'a [Option<Node<V>>], next: Option<NodeId>, end: Option<i64>) -> Self {
        Self { nodes, next, end }
    }
}

impl<'a, V> Iterator for Range<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = nodes[self.next?].as_ref()?;
        if self.end.map_or(false, |end| node.key >= end) {
            self.next = None;
            return None;
        }
        self.next = node.forward[0];
        Some((node.key, &node.value))
    }
}
