// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const INITIAL_BUCKETS: usize = 8;
const MAX_LOAD_FACTOR: f64 = 0.5;

/// A chained hash table with amortized O(1) insertion and lookup.
///
/// Keys are distributed over buckets by their [Hash] value; each bucket
/// chains its entries in a plain vector. Once the ratio of stored keys to
/// buckets exceeds the maximum load factor, the bucket count doubles and
/// every key is rehashed into the new table.
///
/// The table does not support removal.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
}

impl<K: Hash + Eq, V> ChainedHashMap<K, V> {
    pub fn new() -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(INITIAL_BUCKETS, Vec::new);
        Self { buckets, len: 0 }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Retrieves the value associated with a key, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Retrieves a mutable reference to the value associated with a key, if any.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let bucket = self.bucket_of(key);
        self.buckets[bucket]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Associates a value with a key, replacing any previous value.
    pub fn insert(&mut self, key: K, value: V) {
        let bucket = self.bucket_of(&key);
        if let Some(entry) = self.buckets[bucket].iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
            return;
        }

        self.buckets[bucket].push((key, value));
        self.len += 1;
        if self.len as f64 / self.buckets.len() as f64 > MAX_LOAD_FACTOR {
            self.grow();
        }
    }

    fn bucket_of(&self, key: &K) -> usize {
        hash_of(key) as usize % self.buckets.len()
    }

    fn grow(&mut self) {
        let doubled = self.buckets.len() * 2;
        let mut next: Vec<Vec<(K, V)>> = Vec::new();
        next.resize_with(doubled, Vec::new);

        for (key, value) in std::mem::take(&mut self.buckets).into_iter().flatten() {
            next[hash_of(&key) as usize % doubled].push((key, value));
        }
        self.buckets = next;
    }
}

impl<K: Hash + Eq, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_of<K: Hash>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
