use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::ops::{Index, IndexMut};

use super::{DESYNC, IndexedOrderedMap};
use crate::Position;

impl<K, V, S> IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the key-value pair at position `index` in the current order.
    ///
    /// Returns `None` if `index` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(1) on average.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map = IndexedOrderedMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// assert_eq!(map.get_index(1), Some((&"c", &30)));
    /// assert!(map.get_index(3).is_none());
    /// ```
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        let key = self.order.get(index)?;
        Some((key, self.entries.get(key).expect(DESYNC)))
    }

    /// Returns the key and a mutable reference to the value at position `index`.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// break the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map = IndexedOrderedMap::from([(10, "a"), (5, "b")]);
    ///
    /// if let Some((key, value)) = map.get_index_mut(1) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        let key = self.order.get(index)?;
        Some((key, self.entries.get_mut(key).expect(DESYNC)))
    }

    /// Returns the position of `key` in the current order, or `None` if the key
    /// is not present.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.order.position(key)
    }
}

/// Indexes into the map by position.
///
/// # Panics
///
/// Panics if the position is out of bounds.
///
/// # Examples
///
/// ```
/// use indexed::{IndexedOrderedMap, Position};
///
/// let map = IndexedOrderedMap::from([("b", 2), ("a", 1)]);
/// assert_eq!(map[Position(1)], 1);
/// ```
impl<K: Hash + Eq, V, S: BuildHasher> Index<Position> for IndexedOrderedMap<K, V, S> {
    type Output = V;

    fn index(&self, position: Position) -> &Self::Output {
        self.get_index(position.0).map(|(_, v)| v).expect("position out of bounds")
    }
}

/// Mutably indexes into the map by position.
///
/// # Panics
///
/// Panics if the position is out of bounds.
///
/// # Examples
///
/// ```
/// use indexed::{IndexedOrderedMap, Position};
///
/// let mut map = IndexedOrderedMap::from([("a", 1), ("b", 2)]);
/// map[Position(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K: Hash + Eq, V, S: BuildHasher> IndexMut<Position> for IndexedOrderedMap<K, V, S> {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        self.get_index_mut(position.0).map(|(_, v)| v).expect("position out of bounds")
    }
}
