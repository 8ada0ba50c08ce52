//! # tickmap
//!
//! In-memory key-addressed store with tick-driven TTL expiration.
//!
//! ## Architecture
//! - **Arena**: every entry lives in one slot arena, addressed by index
//! - **Hash index**: FNV-1a buckets with doubly linked collision chains
//! - **Expiration wheel**: `max_tick + 1` slots, each a singly linked chain
//!   of entries due at that tick
//!
//! An entry is linked into exactly one chain of each structure, so draining
//! a wheel slot unlinks each entry from its hash chain in O(1).
//!
//! Time is supplied by the caller: [`Store::advance`] moves the wheel and
//! returns what expired.
//!
//! ```
//! use tickmap::Store;
//!
//! let mut store = Store::new(12);
//! store.put(("abc", 1), 3).unwrap();
//! assert!(store.get(b"abc").is_some());
//!
//! assert!(store.advance(2).is_empty());
//! assert_eq!(store.advance(1), vec![("abc", 1)]);
//! assert!(store.is_empty());
//! ```

#![warn(missing_docs)]

mod arena;
mod entry;
mod error;
mod hash;
mod index;
mod stats;
mod store;
mod wheel;

pub use entry::{Keyed, Tick};
pub use error::{Error, Result};
pub use hash::fnv1a;
pub use stats::StoreStats;
pub use store::Store;
