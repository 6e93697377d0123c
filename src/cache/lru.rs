//! Recency List Module
//!
//! Doubly linked list that keeps cache entries ordered from most recently
//! used (front) to least recently used (back).

use crate::cache::CacheEntry;

// == Node Handle ==
/// Stable handle to a node in a [`RecencyList`].
///
/// Handles stay valid until the node is removed. A removed node's slot may be
/// reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const HEAD: NodeId = NodeId(0);
const TAIL: NodeId = NodeId(1);

/// A list node. Sentinels and free slots have no entry.
#[derive(Debug)]
struct Node<K, V> {
    entry: Option<CacheEntry<K, V>>,
    prev: NodeId,
    next: NodeId,
}

impl<K, V> Node<K, V> {
    fn vacant(prev: NodeId, next: NodeId) -> Self {
        Self {
            entry: None,
            prev,
            next,
        }
    }
}

// == Recency List ==
/// Arena-backed doubly linked list with head and tail sentinels.
///
/// - Slot 0 is the head sentinel; `head.next` is the MRU entry.
/// - Slot 1 is the tail sentinel; `tail.prev` is the LRU entry.
///
/// Every operation that takes a [`NodeId`] runs in O(1): no operation walks
/// the list except [`RecencyList::iter`].
#[derive(Debug)]
pub struct RecencyList<K, V> {
    nodes: Vec<Node<K, V>>,
    /// Slots released by `remove`, reused before the arena grows
    free: Vec<NodeId>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node::vacant(HEAD, TAIL));
        nodes.push(Node::vacant(HEAD, TAIL));
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry at the MRU position and returns its handle.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) -> NodeId {
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.0].entry = Some(entry);
                id
            }
            None => {
                self.nodes.push(Node::vacant(HEAD, TAIL));
                let id = NodeId(self.nodes.len() - 1);
                self.nodes[id.0].entry = Some(entry);
                id
            }
        };
        self.link_after_head(id);
        self.len += 1;
        id
    }

    // == Move To Front ==
    /// Promotes an existing node to the MRU position.
    pub fn move_to_front(&mut self, id: NodeId) {
        if !self.is_live(id) || self.nodes[HEAD.0].next == id {
            return;
        }
        self.unlink(id);
        self.link_after_head(id);
    }

    // == Remove ==
    /// Unlinks a node and returns its entry, releasing the slot for reuse.
    pub fn remove(&mut self, id: NodeId) -> Option<CacheEntry<K, V>> {
        if !self.is_live(id) {
            return None;
        }
        self.unlink(id);
        let entry = self.nodes[id.0].entry.take();
        self.free.push(id);
        self.len -= 1;
        entry
    }

    // == Pop Back ==
    /// Removes and returns the LRU entry, or None if the list is empty.
    pub fn pop_back(&mut self) -> Option<CacheEntry<K, V>> {
        let lru = self.nodes[TAIL.0].prev;
        self.remove(lru)
    }

    // == Peek Back ==
    /// Returns the LRU entry without removing or promoting it.
    pub fn back(&self) -> Option<&CacheEntry<K, V>> {
        self.get(self.nodes[TAIL.0].prev)
    }

    // == Accessors ==
    pub fn get(&self, id: NodeId) -> Option<&CacheEntry<K, V>> {
        self.nodes.get(id.0).and_then(|node| node.entry.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut CacheEntry<K, V>> {
        self.nodes.get_mut(id.0).and_then(|node| node.entry.as_mut())
    }

    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates entries from MRU to LRU.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD.0].next,
            remaining: self.len,
        }
    }

    // == Link Helpers ==
    fn is_live(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    fn unlink(&mut self, id: NodeId) {
        let (prev, next) = {
            let node = &self.nodes[id.0];
            (node.prev, node.next)
        };
        self.nodes[prev.0].next = next;
        self.nodes[next.0].prev = prev;
    }

    fn link_after_head(&mut self, id: NodeId) {
        let first = self.nodes[HEAD.0].next;
        {
            let node = &mut self.nodes[id.0];
            node.prev = HEAD;
            node.next = first;
        }
        self.nodes[first.0].prev = id;
        self.nodes[HEAD.0].next = id;
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// MRU-to-LRU iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: NodeId,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a CacheEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.cursor == TAIL {
            return None;
        }
        let node = &self.list.nodes[self.cursor.0];
        self.cursor = node.next;
        self.remaining -= 1;
        node.entry.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
