//! Fixed-size circular wheel of expiration slots.
//!
//! Slot `i` holds the entries due at every tick congruent to `i` modulo the
//! wheel length (`max_tick + 1`). Each slot is a singly linked chain threaded
//! through the arena via `wheel_next`; new entries are prepended, so a slot
//! drains in reverse insertion order.

use crate::arena::EntryArena;
use crate::entry::{EntryId, Tick};
use crate::error::{Error, Result};
use crate::index::HashIndex;

/// Expiration slots plus the wheel's notion of "now"
#[derive(Debug)]
pub(crate) struct ExpirationWheel {
    slots: Vec<Option<EntryId>>,
    /// Slot of `current_tick`
    cursor: usize,
    current_tick: Tick,
    max_tick: Tick,
}

impl ExpirationWheel {
    pub(crate) fn new(max_tick: Tick) -> Result<Self> {
        let len = usize::try_from(max_tick)
            .ok()
            .and_then(|m| m.checked_add(1))
            .ok_or(Error::WheelTooLarge(max_tick))?;

        Ok(Self {
            slots: vec![None; len],
            cursor: 0,
            current_tick: 0,
            max_tick,
        })
    }

    pub(crate) fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub(crate) fn max_tick(&self) -> Tick {
        self.max_tick
    }

    pub(crate) fn check_ttl(&self, ttl: Tick) -> Result<()> {
        if ttl > self.max_tick {
            return Err(Error::TtlOutOfRange {
                ttl,
                max_tick: self.max_tick,
            });
        }
        Ok(())
    }

    /// Prepend `id` to the slot due `ttl` ticks from now.
    ///
    /// `ttl` must already have passed [`check_ttl`](Self::check_ttl).
    pub(crate) fn schedule<T>(&mut self, arena: &mut EntryArena<T>, id: EntryId, ttl: Tick) {
        debug_assert!(ttl <= self.max_tick);

        // ttl <= max_tick, which fits in usize since the wheel was allocated
        let slot = (self.cursor + ttl as usize) % self.slots.len();
        if let Some(entry) = arena.get_mut(id) {
            entry.wheel_next = self.slots[slot];
            self.slots[slot] = Some(id);
        }
    }

    /// Move `progress` ticks forward, unlinking every entry that falls due
    /// from both the wheel and `index`.
    ///
    /// An entry scheduled with TTL `t` is returned by the call during which
    /// cumulative progress reaches `t`; TTL 0 entries go on the next call with
    /// non-zero progress. At most one revolution is walked however large
    /// `progress` is.
    pub(crate) fn advance<T>(
        &mut self,
        progress: Tick,
        arena: &mut EntryArena<T>,
        index: &mut HashIndex,
    ) -> Vec<T> {
        let mut expired = Vec::new();
        if progress == 0 {
            return expired;
        }

        let len = self.slots.len();

        // Arrival at the cursor drained it, so it can only hold TTL 0 entries
        self.drain(self.cursor, arena, index, &mut expired);

        let steps = usize::try_from(progress).map_or(len - 1, |p| p.min(len - 1));
        for i in 1..=steps {
            self.drain((self.cursor + i) % len, arena, index, &mut expired);
        }

        self.cursor = (self.cursor + (progress % len as u64) as usize) % len;
        self.current_tick = self.current_tick.saturating_add(progress);
        expired
    }

    fn drain<T>(&mut self, slot: usize, arena: &mut EntryArena<T>, index: &mut HashIndex, expired: &mut Vec<T>) {
        let mut link = self.slots[slot].take();
        while let Some(id) = link {
            match index.remove(arena, id) {
                Some(entry) => {
                    link = entry.wheel_next;
                    expired.push(entry.payload);
                }
                None => break,
            }
        }
    }
}
