//! Stored entries and the key capability payloads expose.

/// Abstract, caller-driven unit of time
pub type Tick = u64;

/// Payload capability: exposes the byte-string identity it is stored under.
///
/// The key is copied into the entry at insert time, so a payload whose
/// `key()` later changes does not corrupt the index.
pub trait Keyed {
    /// Key bytes used for hashing and equality
    fn key(&self) -> &[u8];
}

impl Keyed for Vec<u8> {
    fn key(&self) -> &[u8] {
        self
    }
}

impl Keyed for Box<[u8]> {
    fn key(&self) -> &[u8] {
        self
    }
}

impl Keyed for String {
    fn key(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Keyed for &'static str {
    fn key(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<K: AsRef<[u8]>, V> Keyed for (K, V) {
    fn key(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// Stable handle of an entry inside the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EntryId(pub(crate) usize);

/// Entry linked into one hash chain and one wheel slot at the same time
#[derive(Debug)]
pub(crate) struct Entry<T> {
    pub(crate) key: Box<[u8]>,
    pub(crate) hash: u64,
    pub(crate) payload: T,
    /// Hash chain neighbours
    pub(crate) chain_prev: Option<EntryId>,
    pub(crate) chain_next: Option<EntryId>,
    /// Next entry due in the same wheel slot
    pub(crate) wheel_next: Option<EntryId>,
}

impl<T: Keyed> Entry<T> {
    pub(crate) fn new(payload: T, hash: u64) -> Self {
        Self {
            key: payload.key().into(),
            hash,
            payload,
            chain_prev: None,
            chain_next: None,
            wheel_next: None,
        }
    }
}

impl<T> Entry<T> {
    pub(crate) fn matches(&self, hash: u64, key: &[u8]) -> bool {
        self.hash == hash && *self.key == *key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_impls() {
        assert_eq!(b"abc".to_vec().key(), b"abc");
        assert_eq!(String::from("abc").key(), b"abc");
        assert_eq!("abc".key(), b"abc");
        assert_eq!(("abc", 42).key(), b"abc");
        assert_eq!((vec![1u8, 2], ()).key(), &[1, 2]);
    }

    #[test]
    fn test_entry_copies_key() {
        let entry = Entry::new(("abc", 1), 7);
        assert_eq!(&*entry.key, b"abc");
        assert!(entry.matches(7, b"abc"));
        assert!(!entry.matches(8, b"abc"));
        assert!(!entry.matches(7, b"abd"));
        assert!(entry.chain_prev.is_none() && entry.chain_next.is_none());
        assert!(entry.wheel_next.is_none());
    }
}
