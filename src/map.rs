use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::hash_map::{self, RandomState};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FusedIterator;
use std::mem;
use std::ops::Index;
use std::ptr;

use crate::raw::{RawOrder, RenderGuard};
use crate::{Error, Result};

mod capacity;
mod entry;
mod ops;
mod position;
mod view;

pub use crate::Position;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use view::{
    IndexedView, ItemProjection, Items, Iter, KeyProjection, Keys, KeysIter, Projection, ValueProjection, Values,
    ValuesIter, ViewIter,
};

/// Message for lookups that can only fail if the hash map and the key order disagree.
const DESYNC: &str = "`IndexedOrderedMap` - key order and entries are out of sync!";

/// A hash map that remembers the order in which keys were first inserted.
///
/// Keys must implement [`Hash`] and [`Eq`] like the keys of a [`HashMap`], and
/// [`Clone`], because every key is held both by the entry table and by the key
/// order.
///
/// Iteration, [`Debug`](fmt::Debug) output and the positional views returned by
/// [`keys`], [`values`] and [`items`] all follow the current key order:
///
/// - a new key is appended to the end;
/// - overwriting the value of an existing key leaves its position unchanged;
/// - removing a key closes the gap;
/// - [`move_to_end`] and the `sort_*` methods reorder keys explicitly.
///
/// # Equality
///
/// Two `IndexedOrderedMap`s are equal only if they hold the same entries **in the
/// same order**. An `IndexedOrderedMap` compared with a [`HashMap`] or a
/// [`BTreeMap`] is equal if the entries match, regardless of order. Use
/// [`eq_unordered`] to compare two `IndexedOrderedMap`s the latter way.
///
/// ```
/// use std::collections::HashMap;
/// use indexed::IndexedOrderedMap;
///
/// let mut a = IndexedOrderedMap::new();
/// a.insert("foo", "bar");
/// a.insert("baz", "zab");
///
/// let plain = HashMap::from([("baz", "zab"), ("foo", "bar")]);
/// assert_eq!(a, plain);
///
/// let mut reordered = a.clone();
/// reordered.move_to_end("foo", true).unwrap();
/// assert_ne!(a, reordered);
/// assert!(a.eq_unordered(&reordered));
/// ```
///
/// # Complexity
///
/// Lookup, insertion of a new key, overwriting, and popping from either end are
/// O(1) on average. Removing an arbitrary key, [`move_to_end`] and
/// [`index_of`] scan the key order and are O(n), which dominates for very large
/// maps that delete from the middle.
///
/// # Examples
///
/// ```
/// use indexed::IndexedOrderedMap;
///
/// let mut d = IndexedOrderedMap::new();
/// d.insert("first-key", "first");
/// d.insert("middle-key", "middle");
/// d.insert("last-key", "last");
///
/// assert_eq!(d.pop_item(true), Ok(("last-key", "last")));
/// assert_eq!(d.pop_item(false), Ok(("first-key", "first")));
/// assert_eq!(d.len(), 1);
/// assert_eq!(d["middle-key"], "middle");
/// ```
///
/// [`keys`]: IndexedOrderedMap::keys
/// [`values`]: IndexedOrderedMap::values
/// [`items`]: IndexedOrderedMap::items
/// [`move_to_end`]: IndexedOrderedMap::move_to_end
/// [`index_of`]: IndexedOrderedMap::index_of
/// [`eq_unordered`]: IndexedOrderedMap::eq_unordered
pub struct IndexedOrderedMap<K, V, S = RandomState> {
    entries: HashMap<K, V, S>,
    order: RawOrder<K>,
}

/// An owning iterator over the entries of an `IndexedOrderedMap`, in order.
///
/// This `struct` is created by the [`into_iter`] method on [`IndexedOrderedMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IndexedOrderedMap<K, V> {
    /// Makes a new, empty `IndexedOrderedMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map = IndexedOrderedMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> IndexedOrderedMap<K, V> {
        IndexedOrderedMap::with_hasher(RandomState::new())
    }
}

impl<K, V, S> IndexedOrderedMap<K, V, S> {
    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut a = IndexedOrderedMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears the map, removing all entries.
    ///
    /// Both the entries and the key order are emptied before returning.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut a = IndexedOrderedMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// assert_eq!(a.values().len(), 0);
    /// ```
    pub fn clear(&mut self) {
        log::trace!("clearing {} entries", self.entries.len());
        self.order.clear();
        self.entries.clear();
    }

    /// Returns the positional view of the keys, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let map = IndexedOrderedMap::from([(8, "8"), (5, "5"), (9, "9")]);
    /// let keys = map.keys();
    /// assert_eq!(keys.at(1), Ok(&5));
    /// assert_eq!(keys.index_of(&9), Ok(2));
    /// assert_eq!(keys.iter().rev().collect::<Vec<_>>(), [&9, &5, &8]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V, S> {
        IndexedView::new(self)
    }

    /// Returns the positional view of the values, in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let map = IndexedOrderedMap::from([("key-zero", "zero"), ("key-one", "one")]);
    /// assert_eq!(map.values().at(1), Ok(&"one"));
    /// ```
    pub fn values(&self) -> Values<'_, K, V, S> {
        IndexedView::new(self)
    }

    /// Returns the positional view of the `(key, value)` pairs, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let map = IndexedOrderedMap::from([("key-zero", "zero"), ("key-one", "one")]);
    /// assert_eq!(map.items().at(0), Ok((&"key-zero", &"zero")));
    /// ```
    pub fn items(&self) -> Items<'_, K, V, S> {
        IndexedView::new(self)
    }
}

impl<K, V, S> IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Gets an iterator over the entries of the map, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map = IndexedOrderedMap::new();
    /// map.insert(3, "c");
    /// map.insert(1, "a");
    ///
    /// let mut iter = map.iter();
    /// assert_eq!(iter.next(), Some((&3, &"c")));
    /// assert_eq!(iter.next(), Some((&1, &"a")));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        self.items().iter()
    }

    /// Creates a map whose keys are taken from `keys`, left to right, all mapped
    /// to a clone of `value`.
    ///
    /// A key that occurs more than once is stored once, at the position of its
    /// first occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let d: IndexedOrderedMap<_, _> = IndexedOrderedMap::from_keys(["key-a", "key-b", "key-a"], "default-value");
    /// assert_eq!(d.len(), 2);
    /// assert_eq!(d["key-a"], "default-value");
    /// assert_eq!(d.keys().at(1), Ok(&"key-b"));
    /// ```
    pub fn from_keys<I>(keys: I, value: V) -> Self
    where
        I: IntoIterator<Item = K>,
        V: Clone,
        S: Default,
    {
        let mut map = Self::default();
        for key in keys {
            map.insert(key, value.clone());
        }
        map
    }

    /// Creates a map from at most one positional source of pairs followed by
    /// `kwargs`.
    ///
    /// The entries of the source come first, in its iteration order; the pairs of
    /// `kwargs` are then inserted in turn, overwriting values of keys already
    /// present without moving them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConstruction`] if `args` yields more than one
    /// source. At most two sources are pulled from `args` in that case, and
    /// nothing is consumed from them.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::{Error, IndexedOrderedMap};
    ///
    /// let d: IndexedOrderedMap<_, _> = IndexedOrderedMap::from_args([vec![("a", 1), ("b", 2)]], [("a", 3), ("c", 4)]).unwrap();
    /// assert_eq!(d.iter().collect::<Vec<_>>(), [(&"a", &3), (&"b", &2), (&"c", &4)]);
    ///
    /// let too_many = IndexedOrderedMap::<&str, i32>::from_args([vec![], vec![]], []);
    /// assert_eq!(too_many, Err(Error::InvalidConstruction { given: 2 }));
    /// ```
    pub fn from_args<A, I, W>(args: A, kwargs: W) -> Result<Self>
    where
        A: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        W: IntoIterator<Item = (K, V)>,
        S: Default,
    {
        let mut args = args.into_iter();
        let source = args.next();
        if args.next().is_some() {
            // `args` may be unbounded, so only its size hint is consulted.
            let given = args.size_hint().0.saturating_add(2);
            log::debug!("rejecting construction from {given} sources");
            return Err(Error::InvalidConstruction { given });
        }

        let mut map = Self::default();
        if let Some(source) = source {
            map.update(source);
        }
        map.update(kwargs);
        Ok(map)
    }

    /// Returns a reference to the value corresponding to the key.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the stored key and its value.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map = IndexedOrderedMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.contains_key(key)
    }

    /// Returns the first entry in order.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.order.first().map(|key| self.resolve(key))
    }

    /// Returns the last entry in order.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.order.last().map(|key| self.resolve(key))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, it is appended to the end of the
    /// order and `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place, its
    /// position is unchanged, and the old value is returned.
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
    /// assert_eq!(map.insert(37, "a"), None);
    /// map.insert(42, "c");
    ///
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.keys().at(0), Ok(&37));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.entries.get_mut(&key) {
            return Some(mem::replace(slot, value));
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        None
    }

    /// Returns the value for `key`, inserting `default` at the end first if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut d = IndexedOrderedMap::new();
    /// d.insert("a", "set");
    ///
    /// assert_eq!(*d.set_default("a", "not-set"), "set");
    /// assert_eq!(*d.set_default("b", "not-set"), "not-set");
    /// assert_eq!(*d.set_default("b", "still-not-set"), "not-set");
    /// ```
    pub fn set_default(&mut self, key: K, default: V) -> &mut V {
        self.entry(key).or_insert(default)
    }

    /// Gets the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut count: IndexedOrderedMap<&str, usize> = IndexedOrderedMap::new();
    ///
    /// for x in ["a", "b", "a", "c", "a", "b"] {
    ///     count.entry(x).and_modify(|curr| *curr += 1).or_insert(1);
    /// }
    ///
    /// assert_eq!(count.iter().collect::<Vec<_>>(), [(&"a", &3), (&"b", &2), (&"c", &1)]);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(inner) => Entry::Occupied(OccupiedEntry {
                inner,
                order: &mut self.order,
            }),
            hash_map::Entry::Vacant(inner) => Entry::Vacant(VacantEntry {
                inner,
                order: &mut self.order,
            }),
        }
    }

    /// Removes a key from the map, returning the value at the key if the key was
    /// previously in the map.
    ///
    /// # Complexity
    ///
    /// O(n), for the scan of the key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map = IndexedOrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key
    /// was previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (key, value) = self.entries.remove_entry(key)?;
        self.order.remove::<K>(&key).expect(DESYNC);
        Some((key, value))
    }

    /// Removes a key from the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent; the map is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::{Error, IndexedOrderedMap};
    ///
    /// let mut d = IndexedOrderedMap::from([("key-a", "a"), ("key-b", "b"), ("key-c", "c")]);
    /// let keys = d.keys().iter().count();
    /// assert_eq!(keys, 3);
    ///
    /// d.delete("key-a").unwrap();
    /// assert!(!d.contains_key("key-a"));
    /// assert_eq!(d.keys().index_of("key-b"), Ok(0));
    /// assert_eq!(d.delete("key-a"), Err(Error::KeyNotFound));
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(drop).ok_or(Error::KeyNotFound)
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent. Use [`pop_or`] to fall
    /// back to a default instead.
    ///
    /// [`pop_or`]: IndexedOrderedMap::pop_or
    pub fn pop<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove(key).ok_or(Error::KeyNotFound)
    }

    /// Removes `key` and returns its value, or returns `default` if the key is
    /// absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut d = IndexedOrderedMap::from([("foo", "bar")]);
    /// assert_eq!(d.pop_or("foo", "default"), "bar");
    /// assert!(!d.contains_key("foo"));
    /// assert_eq!(d.pop_or("hello", "default"), "default");
    /// ```
    pub fn pop_or<Q>(&mut self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove(key).unwrap_or(default)
    }

    /// Removes and returns the last entry if `from_end` is `true` (LIFO), or the
    /// first entry otherwise (FIFO).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(1) on average.
    pub fn pop_item(&mut self, from_end: bool) -> Result<(K, V)> {
        let popped = if from_end { self.pop_last() } else { self.pop_first() };
        popped.ok_or(Error::EmptyContainer)
    }

    /// Removes and returns the first entry in order.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        let value = self.entries.remove(&key).expect(DESYNC);
        Some((key, value))
    }

    /// Removes and returns the last entry in order.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_back()?;
        let value = self.entries.remove(&key).expect(DESYNC);
        Some((key, value))
    }

    /// Moves an existing key to the end of the order (`to_end == true`) or to the
    /// front, leaving its value untouched.
    ///
    /// With `to_end == true` this is a faster `let v = map.remove(k); map.insert(k, v)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut d = IndexedOrderedMap::from([("A", 1), ("B", 2), ("C", 3)]);
    /// d.move_to_end("B", true).unwrap();
    /// assert_eq!(d.keys().iter().collect::<Vec<_>>(), [&"A", &"C", &"B"]);
    /// d.move_to_end("C", false).unwrap();
    /// assert_eq!(d.keys().iter().collect::<Vec<_>>(), [&"C", &"A", &"B"]);
    /// ```
    pub fn move_to_end<Q>(&mut self, key: &Q, to_end: bool) -> Result<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.entries.contains_key(key) {
            return Err(Error::KeyNotFound);
        }
        log::trace!("moving key to the {}", if to_end { "back" } else { "front" });
        let moved = self.order.relocate(key, to_end);
        assert!(moved, "{DESYNC}");
        Ok(())
    }

    /// Inserts every pair of `iter`, left to right, with the semantics of
    /// [`insert`](IndexedOrderedMap::insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut d = IndexedOrderedMap::from([("foo", 1)]);
    /// d.update([("bar", 1), ("foo", 2)]);
    /// assert_eq!(d.iter().collect::<Vec<_>>(), [(&"foo", &2), (&"bar", &1)]);
    /// ```
    pub fn update<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }

    /// Retains only the entries specified by the predicate, visiting them in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut map: IndexedOrderedMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert_eq!(map.keys().iter().copied().collect::<Vec<_>>(), [0, 2, 4, 6]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        // Every predicate call happens before either structure changes.
        let verdicts: Vec<bool> = self
            .order
            .iter()
            .map(|key| keep(key, self.entries.get_mut(key).expect(DESYNC)))
            .collect();

        let entries = &mut self.entries;
        let mut verdicts = verdicts.into_iter();
        self.order.retain(|key| {
            let kept = verdicts.next().expect(DESYNC);
            if !kept {
                entries.remove(key);
            }
            kept
        });
    }

    /// Sorts the key order with a comparator over the entries.
    ///
    /// The sort is stable. Only the order changes; no entry is added or removed.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&K, &V, &K, &V) -> Ordering,
    {
        log::trace!("sorting {} keys", self.order.len());
        let entries = &self.entries;
        self.order.sort_by(|a, b| compare(a, &entries[a], b, &entries[b]));
    }

    /// Sorts the key order by a sort key extracted from each entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let mut forwards = IndexedOrderedMap::from([("a", 1), ("b", -1)]);
    /// forwards.sort_by_key(|_, v| *v);
    /// assert_eq!(forwards.keys().iter().collect::<Vec<_>>(), [&"b", &"a"]);
    /// ```
    pub fn sort_by_key<T, F>(&mut self, mut sort_key: F)
    where
        T: Ord,
        F: FnMut(&K, &V) -> T,
    {
        self.sort_by(|ka, va, kb, vb| sort_key(ka, va).cmp(&sort_key(kb, vb)));
    }

    /// Sorts the key order by the keys themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let forwards = IndexedOrderedMap::from([("a", 1), ("b", -1)]);
    /// let mut backwards = IndexedOrderedMap::from([("b", -1), ("a", 1)]);
    /// assert_ne!(forwards, backwards);
    /// backwards.sort_keys();
    /// assert_eq!(forwards, backwards);
    /// ```
    pub fn sort_keys(&mut self)
    where
        K: Ord,
    {
        log::trace!("sorting {} keys", self.order.len());
        self.order.sort_by(K::cmp);
    }

    /// Reverses the key order in place.
    pub fn reverse(&mut self) {
        log::trace!("reversing {} keys", self.order.len());
        self.order.reverse();
    }

    /// Compares the entries of two maps, ignoring their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let a = IndexedOrderedMap::from([(1, "a"), (2, "b")]);
    /// let b = IndexedOrderedMap::from([(2, "b"), (1, "a")]);
    /// assert_ne!(a, b);
    /// assert!(a.eq_unordered(&b));
    /// ```
    pub fn eq_unordered<S2>(&self, other: &IndexedOrderedMap<K, V, S2>) -> bool
    where
        V: PartialEq,
        S2: BuildHasher,
    {
        entries_eq(&self.entries, &other.entries)
    }

    #[inline]
    fn resolve<'a>(&'a self, key: &'a K) -> (&'a K, &'a V) {
        (key, self.entries.get(key).expect(DESYNC))
    }
}

/// Order-insensitive comparison of two entry tables with possibly different hashers.
fn entries_eq<K, V, S1, S2>(a: &HashMap<K, V, S1>, b: &HashMap<K, V, S2>) -> bool
where
    K: Hash + Eq,
    V: PartialEq,
    S1: BuildHasher,
    S2: BuildHasher,
{
    a.len() == b.len() && a.iter().all(|(key, value)| b.get(key) == Some(value))
}

impl<K: Clone, V: Clone, S: Clone> Clone for IndexedOrderedMap<K, V, S> {
    /// Returns a shallow copy: new entry and order containers holding clones of
    /// the keys and values.
    fn clone(&self) -> Self {
        IndexedOrderedMap {
            entries: self.entries.clone(),
            order: self.order.clone(),
        }
    }
}

impl<K, V, S> Hash for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Hash,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

/// Order-sensitive: same entries in the same order.
impl<K, V, S, S2> PartialEq<IndexedOrderedMap<K, V, S2>> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: PartialEq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &IndexedOrderedMap<K, V, S2>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K, V, S> Eq for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Eq,
    S: BuildHasher,
{
}

/// Order-insensitive: a `HashMap` has no order to compare.
impl<K, V, S, S2> PartialEq<HashMap<K, V, S2>> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S2>) -> bool {
        entries_eq(&self.entries, other)
    }
}

impl<K, V, S, S2> PartialEq<IndexedOrderedMap<K, V, S>> for HashMap<K, V, S2>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &IndexedOrderedMap<K, V, S>) -> bool {
        entries_eq(&other.entries, self)
    }
}

/// Order-insensitive: the `BTreeMap`'s key order is not an insertion order.
impl<K, V, S> PartialEq<BTreeMap<K, V>> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Ord,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &BTreeMap<K, V>) -> bool {
        self.len() == other.len() && other.iter().all(|(key, value)| self.entries.get(key) == Some(value))
    }
}

impl<K, V, S> PartialEq<IndexedOrderedMap<K, V, S>> for BTreeMap<K, V>
where
    K: Hash + Ord,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &IndexedOrderedMap<K, V, S>) -> bool {
        other == self
    }
}

/// Renders the entries in order as `{k: v, ...}`.
///
/// A map that is reached again through one of its own values while it is being
/// rendered prints `...` in that position.
impl<K, V, S> fmt::Debug for IndexedOrderedMap<K, V, S>
where
    K: fmt::Debug + Hash + Eq + Clone,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_guard) = RenderGuard::enter(ptr::from_ref(self).addr()) else {
            return f.write_str("...");
        };
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S: Default> Default for IndexedOrderedMap<K, V, S> {
    fn default() -> Self {
        IndexedOrderedMap::with_hasher(S::default())
    }
}

impl<K, V, S> FromIterator<(K, V)> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = IndexedOrderedMap::default();
        map.update(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.update(iter);
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.update(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<'a, K, V, S> IntoIterator for &'a IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Iter<'a, K, V, S> {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::IndexedOrderedMap;
    ///
    /// let map = IndexedOrderedMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((2, "b")));
    /// assert_eq!(iter.next_back(), Some((1, "a")));
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        let IndexedOrderedMap { mut entries, order } = self;
        let entries: Vec<(K, V)> = order
            .into_iter()
            .map(|key| {
                let value = entries.remove(&key).expect(DESYNC);
                (key, value)
            })
            .collect();
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<K, Q, V, S> Index<&Q> for IndexedOrderedMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq + Clone,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Hash + Eq + Clone, V, const N: usize> From<[(K, V); N]> for IndexedOrderedMap<K, V> {
    /// Converts a `[(K, V); N]` into an `IndexedOrderedMap<K, V>`, keeping the
    /// array's order.
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Takes over the entries of `map`; the key order is `map`'s iteration order.
    fn from(map: HashMap<K, V, S>) -> Self {
        let order = {
            let mut order = RawOrder::with_capacity(map.len());
            for key in map.keys() {
                order.push_back(key.clone());
            }
            order
        };
        IndexedOrderedMap { entries: map, order }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `map::IntoIter`.
    ///
    /// ```
    /// # use indexed::map;
    /// let iter: map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}
