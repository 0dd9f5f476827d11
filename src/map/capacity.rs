use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use super::IndexedOrderedMap;
use crate::raw::RawOrder;

impl<K, V> IndexedOrderedMap<K, V> {
    /// Creates an empty map with capacity for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let map: IndexedOrderedMap<i32, i32> = IndexedOrderedMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IndexedOrderedMap::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> IndexedOrderedMap<K, V, S> {
    /// Creates an empty map which will use the given hash builder to hash keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::hash::RandomState;
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map = IndexedOrderedMap::with_hasher(RandomState::new());
    /// map.insert(1, 2);
    /// ```
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        IndexedOrderedMap {
            entries: HashMap::with_hasher(hash_builder),
            order: RawOrder::new(),
        }
    }

    /// Creates an empty map with capacity for at least `capacity` entries, using
    /// `hash_builder` to hash keys.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        IndexedOrderedMap {
            entries: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            order: RawOrder::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating
    /// either the entry table or the key order.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity().min(self.order.capacity())
    }

    /// Returns a reference to the map's [`BuildHasher`].
    #[must_use]
    pub fn hasher(&self) -> &S {
        self.entries.hasher()
    }
}

impl<K, V, S> IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Reserves capacity for at least `additional` more entries.
    ///
    /// # Panics
    ///
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
        self.order.reserve(additional);
    }

    /// Shrinks the capacity of the map as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
        self.order.shrink_to_fit();
    }
}
