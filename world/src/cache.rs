//! Bounded least-recently-used memo of accessibility verdicts.

use std::{collections::HashMap, sync::Arc};

use pick_up_sticks_core::{BlockingSet, CellCoord};

/// Default number of verdicts retained before eviction starts.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Memo of accessibility verdicts keyed by `(blocking set, candidate)`.
///
/// Blocking sets are snapshotted into shared immutable [`Arc`]s on insertion,
/// so later mutations of the caller's live set never change a stored key.
/// Every candidate tested against the same set shares one snapshot.
///
/// Recency is tracked with a doubly-linked list threaded through a slab of
/// nodes, giving constant-time lookup, promotion and eviction.
#[derive(Debug)]
pub struct AccessibilityCache {
    capacity: usize,
    buckets: HashMap<Arc<BlockingSet>, HashMap<Option<CellCoord>, usize>>,
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

#[derive(Debug)]
struct Node {
    snapshot: Arc<BlockingSet>,
    candidate: Option<CellCoord>,
    verdict: bool,
    prev: Option<usize>,
    next: Option<usize>,
}

impl AccessibilityCache {
    /// Creates an empty cache holding at most `capacity` verdicts.
    ///
    /// A capacity of zero disables memoisation entirely.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            buckets: HashMap::new(),
            nodes: Vec::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            head: None,
            tail: None,
        }
    }

    /// Maximum number of verdicts retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of verdicts currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reports whether the cache holds no verdicts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the memoised verdict and marks the key most recently used.
    ///
    /// `None` signals a miss, never a negative verdict.
    pub fn get(&mut self, blocking: &BlockingSet, candidate: Option<CellCoord>) -> Option<bool> {
        let slot = self.slot(blocking, candidate)?;
        self.promote(slot);
        Some(self.nodes[slot].verdict)
    }

    /// Reports whether a verdict is stored without touching its recency.
    #[must_use]
    pub fn contains(&self, blocking: &BlockingSet, candidate: Option<CellCoord>) -> bool {
        self.slot(blocking, candidate).is_some()
    }

    /// Stores `verdict` under a frozen snapshot of `blocking` and `candidate`.
    ///
    /// An existing key is promoted to most recently used and keeps its stored
    /// verdict. A new key evicts the least recently used entry once the cache
    /// is full.
    pub fn put(&mut self, blocking: &BlockingSet, candidate: Option<CellCoord>, verdict: bool) {
        if self.capacity == 0 {
            return;
        }

        if let Some(slot) = self.slot(blocking, candidate) {
            debug_assert_eq!(
                self.nodes[slot].verdict, verdict,
                "verdicts are deterministic for a given key"
            );
            self.promote(slot);
            return;
        }

        let snapshot = match self.buckets.get_key_value(blocking) {
            Some((existing, _)) => Arc::clone(existing),
            None => Arc::new(blocking.clone()),
        };

        let slot = if self.nodes.len() >= self.capacity {
            let Some(victim) = self.tail else {
                return;
            };
            self.unlink(victim);
            self.forget(victim);
            self.nodes[victim] = Node {
                snapshot: Arc::clone(&snapshot),
                candidate,
                verdict,
                prev: None,
                next: None,
            };
            victim
        } else {
            self.nodes.push(Node {
                snapshot: Arc::clone(&snapshot),
                candidate,
                verdict,
                prev: None,
                next: None,
            });
            self.nodes.len() - 1
        };

        let _ = self
            .buckets
            .entry(snapshot)
            .or_default()
            .insert(candidate, slot);
        self.push_front(slot);
    }

    /// Drops every stored verdict.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn slot(&self, blocking: &BlockingSet, candidate: Option<CellCoord>) -> Option<usize> {
        self.buckets
            .get(blocking)
            .and_then(|bucket| bucket.get(&candidate))
            .copied()
    }

    fn forget(&mut self, slot: usize) {
        let node = &self.nodes[slot];
        let candidate = node.candidate;
        let snapshot = Arc::clone(&node.snapshot);
        let emptied = match self.buckets.get_mut(snapshot.as_ref()) {
            Some(bucket) => {
                let _ = bucket.remove(&candidate);
                bucket.is_empty()
            }
            None => false,
        };
        if emptied {
            let _ = self.buckets.remove(snapshot.as_ref());
        }
    }

    fn promote(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.unlink(slot);
        self.push_front(slot);
    }

    fn unlink(&mut self, slot: usize) {
        let prev = self.nodes[slot].prev;
        let next = self.nodes[slot].next;

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }

        self.nodes[slot].prev = None;
        self.nodes[slot].next = None;
    }

    fn push_front(&mut self, slot: usize) {
        self.nodes[slot].prev = None;
        self.nodes[slot].next = self.head;
        if let Some(head) = self.head {
            self.nodes[head].prev = Some(slot);
        }
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }
}

impl Default for AccessibilityCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
