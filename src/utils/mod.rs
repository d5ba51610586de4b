/*!
# Utilities

Provides the collaborators of the trees and graph algorithms:
- an abstraction over [`Map`] data structures, so lookups can pick their hasher,
- the [`IndexedPriorityQueue`] used by Dijkstra's algorithm,
- [`FromCapacity`] for map-like structures that should be pre-sized.
*/

use std::{collections::HashMap, hash::RandomState};

use fxhash::{FxBuildHasher, FxHashMap};

pub mod indexed_pq;
pub mod map;

pub use indexed_pq::IndexedPriorityQueue;
pub use map::Map;

/// Helper trait for datastructure that can be initialized with capacity.
/// Can be interpreted as reserved space or guaranteed used space.
pub trait FromCapacity: Sized {
    /// Create a new instance with a given capacity
    fn from_capacity(capacity: usize) -> Self;
}

impl<K, V> FromCapacity for HashMap<K, V, RandomState> {
    fn from_capacity(capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }
}

impl<K, V> FromCapacity for FxHashMap<K, V> {
    fn from_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher::default())
    }
}
