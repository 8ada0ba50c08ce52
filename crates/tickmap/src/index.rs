//! Hash-chained index from key bytes to entries.
//!
//! Buckets are addressed by the FNV-1a hash of the key; entries whose keys
//! collide share a doubly linked chain threaded through the arena. Chains
//! are unordered. Empty buckets are kept rather than compacted.

use std::collections::HashMap;

use ahash::RandomState;

use crate::arena::EntryArena;
use crate::entry::{Entry, EntryId};
use crate::error::{Error, Result};
use crate::hash::fnv1a;

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    head: Option<EntryId>,
}

/// Bucket table over the entry arena
#[derive(Debug)]
pub(crate) struct HashIndex {
    buckets: HashMap<u64, Bucket, RandomState>,
}

impl HashIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Link `entry` into its bucket chain, allocating it in the arena.
    ///
    /// Fails with [`Error::DuplicateKey`] without allocating when a
    /// byte-equal key is already chained.
    pub(crate) fn insert<T>(&mut self, arena: &mut EntryArena<T>, entry: Entry<T>) -> Result<EntryId> {
        if self.find(arena, entry.hash, &entry.key).is_some() {
            return Err(Error::DuplicateKey);
        }

        let bucket = self.buckets.entry(entry.hash).or_default();
        let next = bucket.head;
        let id = arena.insert(entry);

        if let Some(next_idx) = next {
            if let Some(next_entry) = arena.get_mut(next_idx) {
                next_entry.chain_prev = Some(id);
            }
        }
        if let Some(new_entry) = arena.get_mut(id) {
            new_entry.chain_prev = None;
            new_entry.chain_next = next;
        }
        bucket.head = Some(id);

        Ok(id)
    }

    /// Find the entry stored under `key`
    pub(crate) fn lookup<T>(&self, arena: &EntryArena<T>, key: &[u8]) -> Option<EntryId> {
        self.find(arena, fnv1a(key), key)
    }

    /// Detach `id` from its chain and take it out of the arena.
    ///
    /// O(1): only the entry's own neighbours (or its bucket head) are touched.
    /// The wheel link is left as-is for the caller that is walking it.
    pub(crate) fn remove<T>(&mut self, arena: &mut EntryArena<T>, id: EntryId) -> Option<Entry<T>> {
        let mut entry = arena.remove(id)?;
        let prev = entry.chain_prev.take();
        let next = entry.chain_next.take();

        match prev {
            Some(prev_idx) => {
                if let Some(prev_entry) = arena.get_mut(prev_idx) {
                    prev_entry.chain_next = next;
                }
            }
            None => {
                if let Some(bucket) = self.buckets.get_mut(&entry.hash) {
                    bucket.head = next;
                }
            }
        }

        if let Some(next_idx) = next {
            if let Some(next_entry) = arena.get_mut(next_idx) {
                next_entry.chain_prev = prev;
            }
        }

        Some(entry)
    }

    fn find<T>(&self, arena: &EntryArena<T>, hash: u64, key: &[u8]) -> Option<EntryId> {
        let mut link = self.buckets.get(&hash)?.head;
        while let Some(id) = link {
            let entry = arena.get(id)?;
            if entry.matches(hash, key) {
                return Some(id);
            }
            link = entry.chain_next;
        }
        None
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[cfg(test)]
    fn chain<T>(&self, arena: &EntryArena<T>, hash: u64) -> Vec<EntryId> {
        let mut ids = Vec::new();
        let mut prev = None;
        let mut link = self.buckets.get(&hash).and_then(|b| b.head);
        while let Some(id) = link {
            let entry = arena.get(id).unwrap();
            assert_eq!(entry.chain_prev, prev, "broken back link");
            ids.push(id);
            prev = Some(id);
            link = entry.chain_next;
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLIDING: u64 = 42;

    fn setup() -> (HashIndex, EntryArena<&'static str>) {
        (HashIndex::with_capacity(4), EntryArena::with_capacity(4))
    }

    fn put(index: &mut HashIndex, arena: &mut EntryArena<&'static str>, key: &'static str) -> Result<EntryId> {
        index.insert(arena, Entry::new(key, fnv1a(key.as_bytes())))
    }

    #[test]
    fn test_index_insert_lookup() {
        let (mut index, mut arena) = setup();
        let id = put(&mut index, &mut arena, "abc").unwrap();

        assert_eq!(index.lookup(&arena, b"abc"), Some(id));
        assert_eq!(index.lookup(&arena, b"xyz"), None);
        assert_eq!(index.lookup(&arena, b""), None);
    }

    #[test]
    fn test_index_rejects_duplicate() {
        let (mut index, mut arena) = setup();
        let id = put(&mut index, &mut arena, "abc").unwrap();

        assert_eq!(put(&mut index, &mut arena, "abc"), Err(Error::DuplicateKey));
        assert_eq!(arena.len(), 1);
        assert_eq!(index.lookup(&arena, b"abc"), Some(id));
    }

    #[test]
    fn test_index_remove_keeps_bucket() {
        let (mut index, mut arena) = setup();
        let id = put(&mut index, &mut arena, "abc").unwrap();

        let removed = index.remove(&mut arena, id).unwrap();
        assert_eq!(removed.payload, "abc");
        assert_eq!(index.lookup(&arena, b"abc"), None);
        assert_eq!(index.bucket_count(), 1);
        assert!(index.remove(&mut arena, id).is_none());

        // Same key can come back once removed
        assert!(put(&mut index, &mut arena, "abc").is_ok());
        assert_eq!(index.bucket_count(), 1);
    }

    #[test]
    fn test_index_collision_chain() {
        let (mut index, mut arena) = setup();
        let a = index.insert(&mut arena, Entry::new("a", COLLIDING)).unwrap();
        let b = index.insert(&mut arena, Entry::new("b", COLLIDING)).unwrap();
        let c = index.insert(&mut arena, Entry::new("c", COLLIDING)).unwrap();

        assert_eq!(index.chain(&arena, COLLIDING).len(), 3);
        assert_eq!(index.find(&arena, COLLIDING, b"a"), Some(a));
        assert_eq!(index.find(&arena, COLLIDING, b"b"), Some(b));
        assert_eq!(index.find(&arena, COLLIDING, b"c"), Some(c));
        assert_eq!(
            index.insert(&mut arena, Entry::new("b", COLLIDING)).unwrap_err(),
            Error::DuplicateKey
        );

        // Middle, then head, then tail
        index.remove(&mut arena, b).unwrap();
        assert_eq!(index.chain(&arena, COLLIDING), vec![c, a]);
        index.remove(&mut arena, c).unwrap();
        assert_eq!(index.chain(&arena, COLLIDING), vec![a]);
        index.remove(&mut arena, a).unwrap();
        assert!(index.chain(&arena, COLLIDING).is_empty());
        assert_eq!(arena.len(), 0);
    }
}
