use crate::cells::Position;
use std::hash::BuildHasherDefault;

pub use fnv::{FnvHashMap, FnvHashSet};

/// Construct an empty set of grid positions with room for `capacity` entries.
/// Fnv hashing is much faster than the default on small keys such as a pair of integers,
/// though it is less robust against key collision attacks.
pub fn position_set(capacity: usize) -> FnvHashSet<Position> {
    FnvHashSet::with_capacity_and_hasher(capacity, BuildHasherDefault::default())
}

/// Construct an empty map keyed by grid position with room for `capacity` entries.
pub fn position_map<V>(capacity: usize) -> FnvHashMap<Position, V> {
    FnvHashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::default())
}
