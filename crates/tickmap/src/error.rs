//! Error types for tickmap

use thiserror::Error;

use crate::entry::Tick;

/// Result type alias for tickmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for store operations
///
/// Every failing operation leaves the store exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// TTL does not fit on the wheel
    #[error("TTL {ttl} is over max tick {max_tick}")]
    TtlOutOfRange {
        /// Requested TTL
        ttl: Tick,
        /// Largest TTL the wheel accepts
        max_tick: Tick,
    },

    /// A live entry already has a byte-equal key
    #[error("Duplicated key")]
    DuplicateKey,

    /// `max_tick + 1` wheel slots cannot be addressed on this platform
    #[error("Wheel of max tick {0} is too large")]
    WheelTooLarge(Tick),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TtlOutOfRange { ttl: 13, max_tick: 12 };
        assert_eq!(err.to_string(), "TTL 13 is over max tick 12");
        assert_eq!(Error::DuplicateKey.to_string(), "Duplicated key");
    }
}
