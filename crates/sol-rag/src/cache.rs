//! Bounded least-recently-used cache

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Fixed-capacity map that evicts the least recently used entry when full.
///
/// Both `get` hits and `put` count as a use.
#[derive(Debug)]
pub struct LruCache<K, V> {
    entries: HashMap<K, V>,
    access_order: VecDeque<K>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V: Clone> LruCache<K, V> {
    /// Create an empty cache. A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            access_order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Cached value for `key`, marking it most recently used
    pub fn get(&mut self, key: &K) -> Option<V> {
        let value = self.entries.get(key).cloned()?;
        self.mark_accessed(key);
        Some(value)
    }

    /// Insert or replace `key`, evicting the least recently used entry if full
    pub fn put(&mut self, key: K, value: V) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key.clone(), value);
            self.mark_accessed(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(evicted) = self.access_order.pop_front() {
                self.entries.remove(&evicted);
            }
        }

        self.entries.insert(key.clone(), value);
        self.access_order.push_back(key);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Move `key` to the most-recently-used end
    fn mark_accessed(&mut self, key: &K) {
        if let Some(idx) = self.access_order.iter().position(|k| k == key) {
            if let Some(k) = self.access_order.remove(idx) {
                self.access_order.push_back(k);
            }
        }
    }
}
