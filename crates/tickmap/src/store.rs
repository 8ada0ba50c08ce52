//! Store: hash index and expiration wheel over one entry arena

use std::fmt;

use tracing::{debug, trace};

use crate::arena::EntryArena;
use crate::entry::{Entry, Keyed, Tick};
use crate::error::Result;
use crate::hash::fnv1a;
use crate::index::HashIndex;
use crate::stats::StoreStats;
use crate::wheel::ExpirationWheel;

/// Key-addressed store whose entries expire after a number of ticks.
///
/// Time only moves when the caller calls [`advance`](Store::advance). The
/// store does no locking of its own; share it behind a caller-owned mutex
/// that covers every put, get and advance.
pub struct Store<T> {
    /// Owns every live entry; both structures link through it
    arena: EntryArena<T>,

    /// Key lookup
    index: HashIndex,

    /// Expiration slots and current tick
    wheel: ExpirationWheel,

    /// Entries reachable through the index
    live: usize,

    stats: StoreStats,
}

impl<T: Keyed> Store<T> {
    /// Create a store accepting TTLs in `0..=max_tick`
    ///
    /// # Panics
    /// If `max_tick + 1` wheel slots cannot be addressed. Use
    /// [`try_new`](Store::try_new) to get an error instead.
    pub fn new(max_tick: Tick) -> Self {
        Self::with_capacity(max_tick, 0)
    }

    /// Create a store with room for `capacity` entries before reallocating
    ///
    /// # Panics
    /// Same as [`new`](Store::new).
    pub fn with_capacity(max_tick: Tick, capacity: usize) -> Self {
        match Self::try_with_capacity(max_tick, capacity) {
            Ok(store) => store,
            Err(err) => panic!("{}", err),
        }
    }

    /// Fallible [`new`](Store::new)
    pub fn try_new(max_tick: Tick) -> Result<Self> {
        Self::try_with_capacity(max_tick, 0)
    }

    /// Fallible [`with_capacity`](Store::with_capacity)
    pub fn try_with_capacity(max_tick: Tick, capacity: usize) -> Result<Self> {
        Ok(Self {
            arena: EntryArena::with_capacity(capacity),
            index: HashIndex::with_capacity(capacity),
            wheel: ExpirationWheel::new(max_tick)?,
            live: 0,
            stats: StoreStats::new(),
        })
    }

    /// Insert `payload` under its key, due to expire `ttl` ticks from now.
    ///
    /// # Errors
    /// * [`Error::TtlOutOfRange`](crate::Error::TtlOutOfRange) if `ttl > max_tick`
    /// * [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a live entry has the same key
    ///
    /// Nothing changes when an error is returned.
    pub fn put(&mut self, payload: T, ttl: Tick) -> Result<()> {
        if let Err(err) = self.wheel.check_ttl(ttl) {
            self.stats.record_rejected_ttl();
            debug!(ttl, max_tick = self.wheel.max_tick(), "Rejected put");
            return Err(err);
        }

        let hash = fnv1a(payload.key());
        let id = match self.index.insert(&mut self.arena, Entry::new(payload, hash)) {
            Ok(id) => id,
            Err(err) => {
                self.stats.record_rejected_duplicate();
                debug!(hash, "Rejected put: {}", err);
                return Err(err);
            }
        };

        self.wheel.schedule(&mut self.arena, id, ttl);
        self.live += 1;
        self.stats.record_insert();
        trace!(hash, ttl, tick = self.wheel.current_tick(), "Scheduled entry");

        Ok(())
    }

    /// Get the live payload stored under `key`
    pub fn get(&self, key: &[u8]) -> Option<&T> {
        let found = self
            .index
            .lookup(&self.arena, key)
            .and_then(|id| self.arena.get(id))
            .map(|entry| &entry.payload);

        match found {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        found
    }

    /// Check for a live entry without touching statistics
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.index.lookup(&self.arena, key).is_some()
    }

    /// Move time forward by `progress` ticks and return every payload that
    /// expired on the way, in no particular order.
    ///
    /// `advance(0)` changes nothing and returns an empty vector.
    pub fn advance(&mut self, progress: Tick) -> Vec<T> {
        let expired = self.wheel.advance(progress, &mut self.arena, &mut self.index);

        self.live -= expired.len();
        debug_assert_eq!(self.live, self.arena.len());

        if !expired.is_empty() {
            self.stats.record_expirations(expired.len() as u64);
            debug!(
                expired = expired.len(),
                tick = self.wheel.current_tick(),
                live = self.live,
                "Pruned expired entries"
            );
        }
        expired
    }
}

impl<T> Store<T> {
    /// Number of live entries
    pub fn size(&self) -> usize {
        self.live
    }

    /// Same as [`size`](Store::size)
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if the store holds no live entries
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Largest accepted TTL
    pub fn max_tick(&self) -> Tick {
        self.wheel.max_tick()
    }

    /// Ticks advanced since creation
    pub fn current_tick(&self) -> Tick {
        self.wheel.current_tick()
    }

    /// Get store statistics
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }
}

impl<T> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("max_tick", &self.max_tick())
            .field("current_tick", &self.current_tick())
            .field("len", &self.live)
            .finish()
    }
}
