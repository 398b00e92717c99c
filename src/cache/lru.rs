//! Generic capacity-bounded LRU store.
//!
//! String keys, arbitrary payloads, strict recency ordering. The hash index
//! and the recency list live behind a single mutex so they are never observed
//! out of sync, and `get`/`put`/`remove` are O(1) amortized.
//!
//! The recency list is a doubly-linked list threaded through a dense `Vec` of
//! nodes by index. Removal compacts the vector with `swap_remove` and patches
//! the links of the node that moved, so no slot is ever left holding a dead
//! payload.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Sentinel index marking the end of the recency list.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<V> {
    key: String,
    payload: V,
    /// Neighbor toward the most recently used end.
    newer: usize,
    /// Neighbor toward the least recently used end.
    older: usize,
}

#[derive(Debug)]
struct Inner<V> {
    index: HashMap<String, usize>,
    nodes: Vec<Node<V>>,
    /// Most recently used node, `NIL` when empty.
    head: usize,
    /// Least recently used node, `NIL` when empty.
    tail: usize,
}

impl<V> Inner<V> {
    fn detach(&mut self, idx: usize) {
        let (newer, older) = (self.nodes[idx].newer, self.nodes[idx].older);
        if newer == NIL {
            self.head = older;
        } else {
            self.nodes[newer].older = older;
        }
        if older == NIL {
            self.tail = newer;
        } else {
            self.nodes[older].newer = newer;
        }
        self.nodes[idx].newer = NIL;
        self.nodes[idx].older = NIL;
    }

    fn attach_front(&mut self, idx: usize) {
        self.nodes[idx].newer = NIL;
        self.nodes[idx].older = self.head;
        if self.head == NIL {
            self.tail = idx;
        } else {
            self.nodes[self.head].newer = idx;
        }
        self.head = idx;
    }

    fn touch(&mut self, idx: usize) {
        if self.head != idx {
            self.detach(idx);
            self.attach_front(idx);
        }
    }

    /// Removes the node at `idx`. The node must already be detached from the
    /// recency list and absent from the index.
    fn discard(&mut self, idx: usize) {
        self.nodes.swap_remove(idx);
        let moved = self.nodes.len();
        if idx == moved {
            return;
        }
        // The former last node now lives at `idx`; patch everything that
        // pointed at its old slot.
        self.index.insert(self.nodes[idx].key.clone(), idx);
        let (newer, older) = (self.nodes[idx].newer, self.nodes[idx].older);
        if newer == NIL {
            self.head = idx;
        } else {
            self.nodes[newer].older = idx;
        }
        if older == NIL {
            self.tail = idx;
        } else {
            self.nodes[older].newer = idx;
        }
    }

    fn remove_key(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(idx) => {
                self.detach(idx);
                self.discard(idx);
                true
            }
            None => false,
        }
    }
}

/// Capacity-bounded LRU store with interior locking.
///
/// Shared behind an `Arc`, all operations take `&self`.
#[derive(Debug)]
pub struct LruStore<V> {
    capacity: usize,
    inner: Mutex<Inner<V>>,
}

impl<V> LruStore<V> {
    /// Creates a store holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            inner: Mutex::new(Inner {
                index: HashMap::with_capacity(capacity),
                nodes: Vec::new(),
                head: NIL,
                tail: NIL,
            }),
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    /// Returns `true` when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts or replaces the payload for `key`, making it most recently used.
    ///
    /// A new key arriving at capacity first evicts the least recently used
    /// entry, so the store never exceeds its capacity.
    pub fn put(&self, key: impl Into<String>, payload: V) {
        let key = key.into();
        let mut inner = self.inner.lock();
        if let Some(&idx) = inner.index.get(&key) {
            inner.nodes[idx].payload = payload;
            inner.touch(idx);
            return;
        }
        if inner.index.len() >= self.capacity {
            let tail = inner.tail;
            let oldest = inner.nodes[tail].key.clone();
            inner.remove_key(&oldest);
        }
        let idx = inner.nodes.len();
        inner.nodes.push(Node {
            key: key.clone(),
            payload,
            newer: NIL,
            older: NIL,
        });
        inner.index.insert(key, idx);
        inner.attach_front(idx);
    }

    /// Existence check. Does not alter recency.
    pub fn has(&self, key: &str) -> bool {
        self.inner.lock().index.contains_key(key)
    }

    /// Promotes `key` to most recently used without replacing its payload.
    pub fn update_access(&self, key: &str) {
        let mut inner = self.inner.lock();
        if let Some(&idx) = inner.index.get(key) {
            inner.touch(idx);
        }
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.inner.lock().remove_key(key)
    }

    /// All keys currently held, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().index.keys().cloned().collect()
    }

    /// Drops all entries.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.index.clear();
        inner.nodes.clear();
        inner.head = NIL;
        inner.tail = NIL;
    }
}

impl<V: Clone> LruStore<V> {
    /// Returns the payload for `key` and promotes it to most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.inner.lock();
        let idx = *inner.index.get(key)?;
        inner.touch(idx);
        Some(inner.nodes[idx].payload.clone())
    }

    /// Returns the least recently used payload without evicting or promoting.
    pub fn get_oldest(&self) -> Option<V> {
        let inner = self.inner.lock();
        if inner.tail == NIL {
            return None;
        }
        Some(inner.nodes[inner.tail].payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let store = LruStore::new(4);
        store.put("a", 1);

        assert_eq!(store.get("a"), Some(1));
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_replaces_without_growing() {
        let store = LruStore::new(2);
        store.put("a", 1);
        store.put("a", 2);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some(2));
    }

    #[test]
    fn test_capacity_invariant() {
        let store = LruStore::new(3);
        for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            store.put(*key, i);
            assert!(store.len() <= 3);
        }

        assert_eq!(store.len(), 3);
        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["c", "d", "e"]);
    }

    #[test]
    fn test_eviction_order_is_least_recently_used() {
        let store = LruStore::new(3);
        store.put("k1", 1);
        store.put("k2", 2);
        store.put("k3", 3);

        // Promote k1, so k2 becomes the oldest.
        assert_eq!(store.get("k1"), Some(1));
        store.put("k4", 4);

        assert!(store.has("k1"));
        assert!(!store.has("k2"));
        assert!(store.has("k3"));
        assert!(store.has("k4"));
    }

    #[test]
    fn test_has_does_not_promote() {
        let store = LruStore::new(2);
        store.put("old", 1);
        store.put("new", 2);

        assert!(store.has("old"));
        store.put("third", 3);

        // A promoting check would have kept "old" and evicted "new".
        assert!(!store.has("old"));
        assert!(store.has("new"));
    }

    #[test]
    fn test_update_access_promotes() {
        let store = LruStore::new(2);
        store.put("old", 1);
        store.put("new", 2);

        store.update_access("old");
        store.put("third", 3);

        assert!(store.has("old"));
        assert!(!store.has("new"));
    }

    #[test]
    fn test_get_oldest_peeks_only() {
        let store: LruStore<i32> = LruStore::new(3);
        assert_eq!(store.get_oldest(), None);

        store.put("a", 1);
        store.put("b", 2);

        assert_eq!(store.get_oldest(), Some(1));
        // Peeking twice returns the same entry: no promotion, no eviction.
        assert_eq!(store.get_oldest(), Some(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove() {
        let store = LruStore::new(3);
        store.put("a", 1);
        store.put("b", 2);

        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some(2));
    }

    #[test]
    fn test_remove_middle_keeps_order() {
        let store = LruStore::new(4);
        store.put("a", 1);
        store.put("b", 2);
        store.put("c", 3);

        assert!(store.remove("b"));
        assert_eq!(store.get_oldest(), Some(1));

        store.put("d", 4);
        store.put("e", 5);
        // Capacity reached: "a" is the oldest and must go first.
        store.put("f", 6);

        assert!(!store.has("a"));
        assert!(store.has("c"));
    }

    #[test]
    fn test_clear() {
        let store = LruStore::new(3);
        store.put("a", 1);
        store.put("b", 2);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get_oldest(), None);

        // The store stays usable after a reset.
        store.put("c", 3);
        assert_eq!(store.get("c"), Some(3));
    }

    #[test]
    fn test_capacity_of_one() {
        let store = LruStore::new(1);
        store.put("a", 1);
        store.put("b", 2);

        assert_eq!(store.len(), 1);
        assert!(!store.has("a"));
        assert_eq!(store.get("b"), Some(2));
    }

    #[test]
    fn test_concurrent_puts_respect_capacity() {
        use std::sync::Arc;

        let store = Arc::new(LruStore::new(8));
        let mut handles = Vec::new();
        for t in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    store.put(format!("k{t}-{i}"), i);
                    store.get(&format!("k{t}-{i}"));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 8);
    }
}
