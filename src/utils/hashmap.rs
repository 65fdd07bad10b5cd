//! The hash-map used to index particles by identity.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`] with its default hasher.
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V>;
