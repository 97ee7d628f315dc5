//! A hash-map used for keyed lookups only.
//!
//! Nothing in this crate iterates over one of these maps: output ordering is
//! always driven by the input buffers, so the hasher choice never leaks into
//! results.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`] and its default hasher.
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;
