//! `FixedHasher` is a seeded `foldhash` hasher with stable output.
//!
//! `NoOpHasher` forwards a single `u64` as the hash, which is all a
//! [`TypeId`](core::any::TypeId) key needs.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6C61_7373_6966_7921);

/// Hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A [`BuildHasher`] whose output only depends on the hashed value.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use classify_utils::hash::FixedHashState;
///
/// let mut a = FixedHashState.build_hasher();
/// let mut b = FixedHashState.build_hasher();
/// "member".hash(&mut a);
/// "member".hash(&mut b);
/// assert_eq!(a.finish(), b.finish());
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that passes a written `u64` straight through.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// [`BuildHasher`] for [`NoOpHasher`].
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use classify_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 7_u64.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 7);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::Hash;

    #[test]
    fn fixed_state_is_stable_across_builders() {
        let hash = |value: &str| {
            let mut hasher = FixedHashState.build_hasher();
            value.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash("item"), hash("item"));
        assert_ne!(hash("item"), hash("key"));
    }

    #[test]
    fn noop_byte_writes_match_u64() {
        let mut a = NoOpHashState.build_hasher();
        a.write_u64(1234);
        let mut b = NoOpHashState.build_hasher();
        b.write(&1234_u64.to_le_bytes());
        assert_eq!(a.finish(), b.finish());
    }
}
