// ============================================================================
// Skip List Cursor and Iterator
// Read-only ordered views over the index
// ============================================================================

use super::skip_list::{KeyComparator, NodeId, SkipList};

/// Bidirectional cursor over a [`SkipList`].
///
/// Forward steps follow level 0 links. Backward steps re-descend from the
/// head, so `prev` costs O(log n).
pub struct Cursor<'a, K, C> {
    list: &'a SkipList<K, C>,
    node: Option<NodeId>,
}

impl<'a, K, C: KeyComparator<K>> Cursor<'a, K, C> {
    /// Create an unpositioned cursor.
    pub fn new(list: &'a SkipList<K, C>) -> Self {
        Self { list, node: None }
    }

    #[inline]
    pub fn valid(&self) -> bool {
        self.node.is_some()
    }

    /// Key under the cursor, `None` when unpositioned.
    pub fn key(&self) -> Option<&'a K> {
        let list = self.list;
        self.node.map(|id| list.key(id))
    }

    /// Step to the successor. No-op when unpositioned.
    pub fn next(&mut self) {
        if let Some(id) = self.node {
            self.node = self.list.successor(id);
        }
    }

    /// Step to the predecessor. No-op when unpositioned.
    pub fn prev(&mut self) {
        if let Some(id) = self.node {
            self.node = self.list.find_less_than(self.list.key(id));
        }
    }

    /// Position at the first entry not less than `target`.
    pub fn seek(&mut self, target: &K) {
        self.node = self.list.find_greater_or_equal(target, None);
    }

    pub fn seek_to_first(&mut self) {
        self.node = self.list.first_node();
    }

    pub fn seek_to_last(&mut self) {
        self.node = self.list.find_last();
    }
}

/// Ascending iterator over the keys of a [`SkipList`].
pub struct Iter<'a, K, C> {
    list: &'a SkipList<K, C>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, C: KeyComparator<K>> Iter<'a, K, C> {
    pub(crate) fn new(list: &'a SkipList<K, C>) -> Self {
        Self {
            list,
            next: list.first_node(),
            remaining: list.len(),
        }
    }
}

impl<'a, K, C: KeyComparator<K>> Iterator for Iter<'a, K, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        let id = self.next?;
        self.next = list.successor(id);
        self.remaining -= 1;
        Some(list.key(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, C: KeyComparator<K>> ExactSizeIterator for Iter<'_, K, C> {}

impl<'a, K, C: KeyComparator<K>> IntoIterator for &'a SkipList<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
