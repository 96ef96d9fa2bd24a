// ============================================================================
// Arena Skip List
// Rating-ordered multi-level index with a bounded outward match search
// ============================================================================
//
// Nodes live in a slab arena and link to each other by `NodeId`. The head
// sentinel is not stored in the arena: it is `Position::Head`, owning its own
// `MAX_HEIGHT` forward links, so it never needs a placeholder key.
//
// Level 2:  HEAD ──────────────────────► 30 ─────────────────► ∅
// Level 1:  HEAD ──────────► 10 ───────► 30 ─────────────────► ∅
// Level 0:  HEAD ──────────► 10 ──► 20 ─► 30 ──────────► 40 ──► ∅
//
// ============================================================================

use arrayvec::ArrayVec;
use slab::Slab;
use std::cmp::Ordering;
use std::fmt;

use super::cursor::{Cursor, Iter};
use super::random::{LevelRng, ParkMiller};

/// Hard upper bound on node height.
pub const MAX_HEIGHT: usize = 12;

/// Default per-level promotion divisor: P(height >= k) = 4^-(k-1).
pub const DEFAULT_BRANCHING: u32 = 4;

/// Default cap on outward match rounds. This is a latency ceiling.
pub const DEFAULT_MAX_ROUNDS: usize = 100;

/// Slab key of a node.
pub type NodeId = usize;

// ============================================================================
// Seams
// ============================================================================

/// Total order used by the index.
///
/// `Ordering::Equal` means "same logical entry", which is what insert
/// deduplicates on and what remove deletes by.
pub trait KeyComparator<K>: Send {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K, F> KeyComparator<K> for F
where
    F: Fn(&K, &K) -> Ordering + Send,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Pairing predicate evaluated during the outward search.
pub trait Matchable {
    /// Whether `self` may be paired with `peer` given a distance `limit`.
    fn is_compatible(&self, peer: &Self, limit: u64) -> bool;
}

// ============================================================================
// Nodes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    Node(NodeId),
}

#[derive(Debug)]
struct Node<K> {
    key: K,
    next: ArrayVec<Option<NodeId>, MAX_HEIGHT>,
}

impl<K> Node<K> {
    fn new(key: K, height: usize) -> Self {
        let mut next = ArrayVec::new();
        for _ in 0..height {
            next.push(None);
        }
        Self { key, next }
    }
}

/// Result of one bounded match search.
#[derive(Debug, PartialEq, Eq)]
pub enum Probe<'a, K> {
    /// A compatible waiting entry was found. It is still in the index.
    Matched { peer: &'a K, rounds: usize },
    /// No compatible entry; the searched key has been inserted.
    /// `exhausted` is set when the round cap, not the pool, ended the search.
    Admitted { rounds: usize, exhausted: bool },
}

enum Search {
    Found { node: NodeId, rounds: usize },
    Drained { rounds: usize },
    Exhausted,
}

// ============================================================================
// Skip List
// ============================================================================

pub struct SkipList<K, C> {
    nodes: Slab<Node<K>>,
    head: [Option<NodeId>; MAX_HEIGHT],
    /// Number of levels currently in use (>= 1)
    height: usize,
    max_height: usize,
    branching: u32,
    max_rounds: usize,
    compare: C,
    rng: Box<dyn LevelRng>,
}

impl<K, C: KeyComparator<K>> SkipList<K, C> {
    /// Create an empty list using the default deterministic level source.
    pub fn new(compare: C) -> Self {
        Self {
            nodes: Slab::new(),
            head: [None; MAX_HEIGHT],
            height: 1,
            max_height: MAX_HEIGHT,
            branching: DEFAULT_BRANCHING,
            max_rounds: DEFAULT_MAX_ROUNDS,
            compare,
            rng: Box::new(ParkMiller::default()),
        }
    }

    /// Builder method: replace the level source
    pub fn with_rng(mut self, rng: Box<dyn LevelRng>) -> Self {
        self.rng = rng;
        self
    }

    /// Builder method: cap node height, clamped to `1..=MAX_HEIGHT`
    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height.clamp(1, MAX_HEIGHT);
        self
    }

    /// Builder method: set the promotion divisor (at least 2)
    pub fn with_branching(mut self, branching: u32) -> Self {
        self.branching = branching.max(2);
        self
    }

    /// Builder method: set the outward search round cap (at least 1)
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    /// Pre-allocate arena slots
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.nodes.reserve(capacity);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels currently linked from the head.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert `key`. Returns `false` without touching the list when an
    /// equal key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        // Levels above the current height keep the head as predecessor.
        let mut prev = [Position::Head; MAX_HEIGHT];
        let found = self.find_greater_or_equal(&key, Some(&mut prev));
        if found.is_some_and(|id| self.is_equal(&key, self.key(id))) {
            return false;
        }

        let height = self.random_height();
        if height > self.height {
            self.height = height;
        }

        let id = self.nodes.insert(Node::new(key, height));
        for (level, pred) in prev.iter().copied().enumerate().take(height) {
            let successor = self.next(pred, level);
            self.nodes[id].next[level] = successor;
            self.set_next(pred, level, Some(id));
        }
        true
    }

    /// Remove the entry equal to `key`, returning its snapshot.
    /// Absent keys are a silent no-op.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let mut prev = [Position::Head; MAX_HEIGHT];
        let id = self.find_greater_or_equal(key, Some(&mut prev))?;
        if !self.is_equal(key, self.key(id)) {
            return None;
        }

        let node = self.nodes.remove(id);
        for (level, successor) in node.next.iter().copied().enumerate() {
            self.set_next(prev[level], level, successor);
        }
        while self.height > 1 && self.head[self.height - 1].is_none() {
            self.height -= 1;
        }
        Some(node.key)
    }

    /// Drop every entry, keeping the configured parameters and level source.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = [None; MAX_HEIGHT];
        self.height = 1;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn contains(&self, key: &K) -> bool {
        self.find_greater_or_equal(key, None)
            .is_some_and(|id| self.is_equal(key, self.key(id)))
    }

    /// Smallest entry.
    pub fn first(&self) -> Option<&K> {
        self.head[0].map(|id| self.key(id))
    }

    /// Largest entry.
    pub fn last(&self) -> Option<&K> {
        self.find_last().map(|id| self.key(id))
    }

    pub fn iter(&self) -> Iter<'_, K, C> {
        Iter::new(self)
    }

    pub fn cursor(&self) -> Cursor<'_, K, C> {
        Cursor::new(self)
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Search outward from `key` for a compatible entry within `limit`.
    ///
    /// Each round checks the nearest lower candidate, then the nearest upper
    /// one, and widens both by one step. The search stops after
    /// `max_rounds` rounds. When nothing matches, a copy of `key` is
    /// inserted and `Probe::Admitted` is returned. A match is reported but
    /// left in place; the caller removes it.
    pub fn match_or_insert(&mut self, key: &K, limit: u64) -> Probe<'_, K>
    where
        K: Matchable + Clone,
    {
        match self.search(key, limit) {
            Search::Found { node, rounds } => Probe::Matched {
                peer: self.key(node),
                rounds,
            },
            Search::Drained { rounds } => {
                self.insert(key.clone());
                Probe::Admitted {
                    rounds,
                    exhausted: false,
                }
            },
            Search::Exhausted => {
                self.insert(key.clone());
                Probe::Admitted {
                    rounds: self.max_rounds,
                    exhausted: true,
                }
            },
        }
    }

    fn search(&self, key: &K, limit: u64) -> Search
    where
        K: Matchable,
    {
        let mut lt = self.find_less_than(key);
        let mut gt = match lt {
            Some(id) => self.nodes[id].next[0],
            None => self.find_greater_or_equal(key, None),
        };
        // The key itself may already be waiting; never pair it with itself.
        if let Some(id) = gt {
            if self.is_equal(self.key(id), key) {
                gt = self.nodes[id].next[0];
            }
        }

        for round in 0..self.max_rounds {
            if lt.is_none() && gt.is_none() {
                return Search::Drained { rounds: round };
            }
            if let Some(id) = lt {
                if key.is_compatible(self.key(id), limit) {
                    return Search::Found {
                        node: id,
                        rounds: round + 1,
                    };
                }
            }
            if let Some(id) = gt {
                if key.is_compatible(self.key(id), limit) {
                    return Search::Found {
                        node: id,
                        rounds: round + 1,
                    };
                }
            }

            gt = gt.and_then(|id| self.nodes[id].next[0]);
            lt = lt.and_then(|id| self.find_less_than(self.key(id)));
        }
        Search::Exhausted
    }

    // ========================================================================
    // Descent helpers
    // ========================================================================

    /// First node whose key is not less than `key`, recording per level the
    /// node the walk stepped down from.
    pub(crate) fn find_greater_or_equal(
        &self,
        key: &K,
        mut prev: Option<&mut [Position; MAX_HEIGHT]>,
    ) -> Option<NodeId> {
        let mut x = Position::Head;
        let mut level = self.height - 1;
        loop {
            let next = self.next(x, level);
            match next {
                Some(id) if self.is_before(self.key(id), key) => x = Position::Node(id),
                _ => {
                    if let Some(prev) = prev.as_mut() {
                        prev[level] = x;
                    }
                    if level == 0 {
                        return next;
                    }
                    level -= 1;
                },
            }
        }
    }

    /// Last node whose key is strictly less than `key`.
    pub(crate) fn find_less_than(&self, key: &K) -> Option<NodeId> {
        let mut x = Position::Head;
        let mut level = self.height - 1;
        loop {
            match self.next(x, level) {
                Some(id) if self.is_before(self.key(id), key) => x = Position::Node(id),
                _ => {
                    if level == 0 {
                        return match x {
                            Position::Head => None,
                            Position::Node(id) => Some(id),
                        };
                    }
                    level -= 1;
                },
            }
        }
    }

    pub(crate) fn find_last(&self) -> Option<NodeId> {
        let mut x = Position::Head;
        let mut level = self.height - 1;
        loop {
            match self.next(x, level) {
                Some(id) => x = Position::Node(id),
                None => {
                    if level == 0 {
                        return match x {
                            Position::Head => None,
                            Position::Node(id) => Some(id),
                        };
                    }
                    level -= 1;
                },
            }
        }
    }

    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.nodes[id].key
    }

    #[inline]
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].next[0]
    }

    #[inline]
    pub(crate) fn first_node(&self) -> Option<NodeId> {
        self.head[0]
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn random_height(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_height && self.rng.next_u32() % self.branching == 0 {
            height += 1;
        }
        debug_assert!((1..=MAX_HEIGHT).contains(&height));
        height
    }

    #[inline]
    fn next(&self, pos: Position, level: usize) -> Option<NodeId> {
        match pos {
            Position::Head => self.head[level],
            Position::Node(id) => self.nodes[id].next[level],
        }
    }

    #[inline]
    fn set_next(&mut self, pos: Position, level: usize, target: Option<NodeId>) {
        match pos {
            Position::Head => self.head[level] = target,
            Position::Node(id) => self.nodes[id].next[level] = target,
        }
    }

    #[inline]
    fn is_before(&self, a: &K, b: &K) -> bool {
        self.compare.compare(a, b) == Ordering::Less
    }

    #[inline]
    fn is_equal(&self, a: &K, b: &K) -> bool {
        self.compare.compare(a, b) == Ordering::Equal
    }
}

impl<K: fmt::Debug, C: KeyComparator<K>> fmt::Debug for SkipList<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipList")
            .field("len", &self.len())
            .field("height", &self.height)
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
