//! Slot arena owning every live entry.
//!
//! Links between entries are [`EntryId`]s into this arena, so detaching an
//! entry never leaves a dangling reference: a freed slot simply stops
//! resolving until it is reused.

use crate::entry::{Entry, EntryId};

/// Entry storage with free-list reuse
#[derive(Debug)]
pub(crate) struct EntryArena<T> {
    slots: Vec<Option<Entry<T>>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> EntryArena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn insert(&mut self, entry: Entry<T>) -> EntryId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(entry);
            idx
        } else {
            self.slots.push(Some(entry));
            self.slots.len() - 1
        };
        self.len += 1;
        EntryId(idx)
    }

    pub(crate) fn remove(&mut self, id: EntryId) -> Option<Entry<T>> {
        let entry = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(entry)
    }

    pub(crate) fn get(&self, id: EntryId) -> Option<&Entry<T>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry<T>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &'static str) -> Entry<&'static str> {
        Entry::new(key, 0)
    }

    #[test]
    fn test_arena_insert_get_remove() {
        let mut arena = EntryArena::with_capacity(2);
        let a = arena.insert(entry("a"));
        let b = arena.insert(entry("b"));

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a).map(|e| e.payload), Some("a"));

        let removed = arena.remove(a).unwrap();
        assert_eq!(removed.payload, "a");
        assert!(arena.get(a).is_none());
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(b).map(|e| e.payload), Some("b"));
    }

    #[test]
    fn test_arena_reuses_freed_slots() {
        let mut arena = EntryArena::with_capacity(0);
        let a = arena.insert(entry("a"));
        arena.remove(a);
        let c = arena.insert(entry("c"));

        assert_eq!(a, c);
        assert_eq!(arena.get_mut(c).map(|e| e.payload), Some("c"));
    }
}
