//! Ordered set of queues believed to hold pending frames.
//!
//! Entries are kept in a `BTreeMap` keyed by an insertion stamp, with a hash
//! index from queue to stamp. Moving a queue to the tail gives it a fresh
//! stamp, so a caller walking a snapshot of keys is never disturbed by
//! removals or reinsertions it performs along the way.

use std::collections::{BTreeMap, HashMap};

use crate::core::{ClassMap, QueueKey, TrafficClass};

/// Active queue registry with O(1) membership and round-robin order.
#[derive(Debug, Default)]
pub struct ActiveRegistry {
    order: BTreeMap<u64, QueueKey>,
    index: HashMap<QueueKey, u64>,
    per_class: ClassMap<usize>,
    next_stamp: u64,
}

impl ActiveRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active queues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no queue is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of active queues of `class`.
    #[must_use]
    pub fn count(&self, class: TrafficClass) -> usize {
        self.per_class[class]
    }

    /// Per-class active counts.
    #[must_use]
    pub const fn counts(&self) -> ClassMap<usize> {
        self.per_class
    }

    /// Whether `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &QueueKey) -> bool {
        self.index.contains_key(key)
    }

    /// Append `key` at the tail. Returns `false` if it was already present,
    /// in which case its position is unchanged.
    pub fn push_back(&mut self, key: QueueKey) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let stamp = self.stamp();
        self.order.insert(stamp, key);
        self.index.insert(key, stamp);
        self.per_class[key.class] += 1;
        true
    }

    /// Remove `key`. Returns `false` if it was not present.
    pub fn remove(&mut self, key: &QueueKey) -> bool {
        let Some(stamp) = self.index.remove(key) else {
            return false;
        };
        self.order.remove(&stamp);
        self.per_class[key.class] -= 1;
        true
    }

    /// Move `key` to the tail. Returns `false` if it was not present.
    pub fn move_to_back(&mut self, key: &QueueKey) -> bool {
        let next = self.stamp();
        let Some(stamp) = self.index.get_mut(key) else {
            return false;
        };
        let old = std::mem::replace(stamp, next);
        self.order.remove(&old);
        self.order.insert(next, *key);
        true
    }

    /// Keys of `class`, in registry order, copied out for traversal.
    #[must_use]
    pub fn class_members(&self, class: TrafficClass) -> Vec<QueueKey> {
        self.order
            .values()
            .filter(|key| key.class == class)
            .copied()
            .collect()
    }

    /// All keys in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &QueueKey> + '_ {
        self.order.values()
    }

    fn stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }
}
