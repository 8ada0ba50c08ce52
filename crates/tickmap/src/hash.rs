//! 64-bit FNV-1a over raw key bytes.
//!
//! See <http://isthe.com/chongo/tech/comp/fnv/>.

/// FNV-1a 64-bit offset basis
pub const FNV_BASIS: u64 = 14_695_981_039_346_656_037;

/// FNV-1a 64-bit prime
pub const FNV_PRIME: u64 = 1_099_511_628_211;

/// Hash `key` byte by byte
pub fn fnv1a(key: &[u8]) -> u64 {
    key.iter().fold(FNV_BASIS, |h, &b| {
        (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv_empty_is_basis() {
        assert_eq!(fnv1a(b""), FNV_BASIS);
    }

    #[test]
    fn test_fnv_known_vectors() {
        assert_eq!(fnv1a(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_fnv_distinguishes_order() {
        assert_ne!(fnv1a(b"abc"), fnv1a(b"cba"));
    }
}
