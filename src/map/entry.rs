use std::collections::hash_map;
use std::fmt;
use std::hash::Hash;

use super::DESYNC;
use crate::raw::RawOrder;

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`crate::IndexedOrderedMap`].
///
/// # Examples
///
/// ```
/// use indexed::IndexedOrderedMap;
/// use indexed::map::Entry;
///
/// let mut map = IndexedOrderedMap::new();
///
/// match map.entry("oz") {
///     Entry::Vacant(v) => {
///         v.insert(1);
///     }
///     Entry::Occupied(mut o) => {
///         *o.get_mut() += 1;
///     }
/// }
/// assert_eq!(map["oz"], 1);
/// ```
///
/// [`entry`]: crate::IndexedOrderedMap::entry
pub enum Entry<'a, K: 'a, V: 'a> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),

    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(v) => f.debug_tuple("Entry").field(v).finish(),
            Entry::Occupied(o) => f.debug_tuple("Entry").field(o).finish(),
        }
    }
}

/// A view into a vacant entry in an `IndexedOrderedMap`.
/// It is part of the [`Entry`] enum.
///
/// Inserting through a vacant entry appends its key to the end of the order.
pub struct VacantEntry<'a, K, V> {
    pub(super) inner: hash_map::VacantEntry<'a, K, V>,
    pub(super) order: &'a mut RawOrder<K>,
}

impl<K: fmt::Debug, V> fmt::Debug for VacantEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacantEntry").field("key", self.inner.key()).finish()
    }
}

/// A view into an occupied entry in an `IndexedOrderedMap`.
/// It is part of the [`Entry`] enum.
///
/// # Examples
///
/// ```
/// use indexed::IndexedOrderedMap;
/// use indexed::map::Entry;
///
/// let mut map = IndexedOrderedMap::new();
/// map.insert("oz", 1);
///
/// if let Entry::Occupied(mut o) = map.entry("oz") {
///     *o.get_mut() += 1;
/// }
/// assert_eq!(map["oz"], 2);
/// ```
pub struct OccupiedEntry<'a, K, V> {
    pub(super) inner: hash_map::OccupiedEntry<'a, K, V>,
    pub(super) order: &'a mut RawOrder<K>,
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OccupiedEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry").field("key", self.inner.key()).field("value", self.inner.get()).finish()
    }
}

impl<'a, K: Hash + Eq + Clone, V> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map: IndexedOrderedMap<&str, usize> = IndexedOrderedMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map["poneyland"], 12);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default function if empty,
    /// and returns a mutable reference to the value in the entry.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of the default function.
    ///
    /// The function receives a reference to the key that was moved during the
    /// `.entry(key)` call.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map: IndexedOrderedMap<&str, usize> = IndexedOrderedMap::new();
    ///
    /// map.entry("poneyland").or_insert_with_key(|key| key.chars().count());
    ///
    /// assert_eq!(map["poneyland"], 9);
    /// ```
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let value = default(v.key());
                v.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    #[must_use]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(o) => o.key(),
            Entry::Vacant(v) => v.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map: IndexedOrderedMap<&str, usize> = IndexedOrderedMap::new();
    ///
    /// map.entry("poneyland").and_modify(|e| *e += 1).or_insert(42);
    /// assert_eq!(map["poneyland"], 42);
    ///
    /// map.entry("poneyland").and_modify(|e| *e += 1).or_insert(42);
    /// assert_eq!(map["poneyland"], 43);
    /// ```
    #[must_use]
    pub fn and_modify<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(o) = &mut self {
            f(o.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an `OccupiedEntry`.
    ///
    /// An occupied entry keeps its position; a vacant one is appended.
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        match self {
            Entry::Occupied(mut o) => {
                o.insert(value);
                o
            }
            Entry::Vacant(v) => v.insert_entry(value),
        }
    }
}

impl<'a, K: Hash + Eq + Clone, V: Default> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(V::default()),
        }
    }
}

impl<'a, K: Hash + Eq + Clone, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value
    /// through the `VacantEntry`.
    #[must_use]
    pub fn key(&self) -> &K {
        self.inner.key()
    }

    /// Take ownership of the key.
    #[must_use]
    pub fn into_key(self) -> K {
        self.inner.into_key()
    }

    /// Sets the value of the entry with the `VacantEntry`'s key, appending the key
    /// to the end of the order, and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    /// use indexed::map::Entry;
    ///
    /// let mut map = IndexedOrderedMap::from([("a", 1)]);
    ///
    /// if let Entry::Vacant(o) = map.entry("b") {
    ///     o.insert(2);
    /// }
    /// assert_eq!(map.keys().at(1), Ok(&"b"));
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        self.order.push_back(self.inner.key().clone());
        self.inner.insert(value)
    }

    /// Sets the value of the entry with the `VacantEntry`'s key, and returns an
    /// `OccupiedEntry`.
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        self.order.push_back(self.inner.key().clone());
        OccupiedEntry {
            inner: self.inner.insert_entry(value),
            order: self.order,
        }
    }
}

impl<'a, K: Hash + Eq + Clone, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    #[must_use]
    pub fn key(&self) -> &K {
        self.inner.key()
    }

    /// Returns the position of the entry in the current order.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    /// use indexed::map::Entry;
    ///
    /// let mut map = IndexedOrderedMap::from([("a", 1), ("b", 2)]);
    /// if let Entry::Occupied(o) = map.entry("b") {
    ///     assert_eq!(o.index(), 1);
    /// }
    /// ```
    #[must_use]
    pub fn index(&self) -> usize {
        self.order.position(self.inner.key()).expect(DESYNC)
    }

    /// Take ownership of the key and value from the map.
    ///
    /// # Complexity
    ///
    /// O(n), for the scan of the key order.
    #[allow(clippy::must_use_candidate)]
    pub fn remove_entry(self) -> (K, V) {
        let (key, value) = self.inner.remove_entry();
        self.order.remove(&key).expect(DESYNC);
        (key, value)
    }

    /// Gets a reference to the value in the entry.
    #[must_use]
    pub fn get(&self) -> &V {
        self.inner.get()
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference to the `OccupiedEntry` that may outlive the
    /// destruction of the `Entry` value, see [`into_mut`].
    ///
    /// [`into_mut`]: OccupiedEntry::into_mut
    pub fn get_mut(&mut self) -> &mut V {
        self.inner.get_mut()
    }

    /// Converts the entry into a mutable reference to its value.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_mut(self) -> &'a mut V {
        self.inner.into_mut()
    }

    /// Sets the value of the entry, and returns the entry's old value.
    ///
    /// The entry keeps its position.
    pub fn insert(&mut self, value: V) -> V {
        self.inner.insert(value)
    }

    /// Takes the value of the entry out of the map, and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    /// use indexed::map::Entry;
    ///
    /// let mut map: IndexedOrderedMap<&str, usize> = IndexedOrderedMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     assert_eq!(o.remove(), 12);
    /// }
    /// assert!(map.keys().is_empty());
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}
