//! Hash states and containers, re-exports *hashbrown* and *foldhash*.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] with a fixed, seeded hasher.
///
/// Iteration order only depends on the inserted keys, never on a random seed.
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
