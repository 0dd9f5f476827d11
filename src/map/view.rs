use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::vec_deque;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::Index;

use super::{DESYNC, IndexedOrderedMap};
use crate::{Error, Result};

/// Selects what an [`IndexedView`] yields for each key in the order.
///
/// Implemented by [`KeyProjection`], [`ValueProjection`] and [`ItemProjection`].
pub trait Projection<K, V> {
    /// What the view yields for one entry.
    type Item<'a>
    where
        K: 'a,
        V: 'a;

    /// Resolves `key`, taken from the current order of `map`, into the projected item.
    fn resolve<'a, S>(map: &'a IndexedOrderedMap<K, V, S>, key: &'a K) -> Self::Item<'a>
    where
        K: Hash + Eq,
        S: BuildHasher;
}

/// Projects each entry onto its key.
#[derive(Clone, Copy, Debug)]
pub struct KeyProjection;

/// Projects each entry onto its value.
#[derive(Clone, Copy, Debug)]
pub struct ValueProjection;

/// Projects each entry onto its `(key, value)` pair.
#[derive(Clone, Copy, Debug)]
pub struct ItemProjection;

impl<K, V> Projection<K, V> for KeyProjection {
    type Item<'a>
        = &'a K
    where
        K: 'a,
        V: 'a;

    #[inline]
    fn resolve<'a, S>(_map: &'a IndexedOrderedMap<K, V, S>, key: &'a K) -> &'a K
    where
        K: Hash + Eq,
        S: BuildHasher,
    {
        key
    }
}

impl<K, V> Projection<K, V> for ValueProjection {
    type Item<'a>
        = &'a V
    where
        K: 'a,
        V: 'a;

    #[inline]
    fn resolve<'a, S>(map: &'a IndexedOrderedMap<K, V, S>, key: &'a K) -> &'a V
    where
        K: Hash + Eq,
        S: BuildHasher,
    {
        map.entries.get(key).expect(DESYNC)
    }
}

impl<K, V> Projection<K, V> for ItemProjection {
    type Item<'a>
        = (&'a K, &'a V)
    where
        K: 'a,
        V: 'a;

    #[inline]
    fn resolve<'a, S>(map: &'a IndexedOrderedMap<K, V, S>, key: &'a K) -> (&'a K, &'a V)
    where
        K: Hash + Eq,
        S: BuildHasher,
    {
        (key, map.entries.get(key).expect(DESYNC))
    }
}

/// A read-only positional view over the live order of an [`IndexedOrderedMap`].
///
/// A view owns nothing and copies nothing: every access resolves the position
/// against the map's current key order and, for values and items, looks the
/// value up in the map at that moment. The borrow it holds keeps the map from
/// being mutated while the view is alive, so a view never observes a half-done
/// mutation; take a fresh view after mutating to see the new order.
///
/// This `struct` is created by the [`keys`], [`values`] and [`items`] methods on
/// [`IndexedOrderedMap`]. `P` selects the projection.
///
/// # Examples
///
/// ```
/// use indexed::{Error, IndexedOrderedMap};
///
/// let mut d = IndexedOrderedMap::new();
/// d.insert("key-zero", "zero");
/// d.insert("key-one", "one");
/// d.insert("key-two", "two");
///
/// let keys = d.keys();
/// assert_eq!(keys.len(), 3);
/// assert_eq!(keys.at(0), Ok(&"key-zero"));
/// assert_eq!(keys.index_of("key-two"), Ok(2));
/// assert_eq!(keys.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
///
/// assert_eq!(d.items().at(1), Ok((&"key-one", &"one")));
/// ```
///
/// [`keys`]: IndexedOrderedMap::keys
/// [`values`]: IndexedOrderedMap::values
/// [`items`]: IndexedOrderedMap::items
pub struct IndexedView<'a, K, V, S, P> {
    map: &'a IndexedOrderedMap<K, V, S>,
    projection: PhantomData<P>,
}

/// The positional view of a map's keys.
pub type Keys<'a, K, V, S = RandomState> = IndexedView<'a, K, V, S, KeyProjection>;

/// The positional view of a map's values.
pub type Values<'a, K, V, S = RandomState> = IndexedView<'a, K, V, S, ValueProjection>;

/// The positional view of a map's `(key, value)` pairs.
pub type Items<'a, K, V, S = RandomState> = IndexedView<'a, K, V, S, ItemProjection>;

/// An iterator over the projected entries of an [`IndexedView`], in order.
///
/// Restartable: every call to [`IndexedView::iter`] starts a fresh traversal.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ViewIter<'a, K, V, S, P> {
    map: &'a IndexedOrderedMap<K, V, S>,
    keys: vec_deque::Iter<'a, K>,
    projection: PhantomData<P>,
}

/// An iterator over the entries of an `IndexedOrderedMap`, in order.
///
/// This `struct` is created by the [`iter`] method on [`IndexedOrderedMap`].
///
/// [`iter`]: IndexedOrderedMap::iter
pub type Iter<'a, K, V, S = RandomState> = ViewIter<'a, K, V, S, ItemProjection>;

/// An iterator over the keys of an `IndexedOrderedMap`, in order.
pub type KeysIter<'a, K, V, S = RandomState> = ViewIter<'a, K, V, S, KeyProjection>;

/// An iterator over the values of an `IndexedOrderedMap`, in key order.
pub type ValuesIter<'a, K, V, S = RandomState> = ViewIter<'a, K, V, S, ValueProjection>;

impl<'a, K, V, S, P> IndexedView<'a, K, V, S, P> {
    pub(super) fn new(map: &'a IndexedOrderedMap<K, V, S>) -> Self {
        IndexedView {
            map,
            projection: PhantomData,
        }
    }

    /// Returns the number of entries in the underlying map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the underlying map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<'a, K, V, S, P> IndexedView<'a, K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: Projection<K, V>,
{
    /// Returns the projected entry at `index` in the current order, or `None` if
    /// `index` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(1) on average.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<P::Item<'a>> {
        let key = self.map.order.get(index)?;
        Some(P::resolve(self.map, key))
    }

    /// Returns the projected entry at `index` in the current order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < self.len()`.
    /// Negative positions are not representable; count from [`len`](Self::len)
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed::{Error, IndexedOrderedMap};
    ///
    /// let d = IndexedOrderedMap::from([("key-four", "four"), ("key-five", "five")]);
    /// let values = d.values();
    /// assert_eq!(values.at(1), Ok(&"five"));
    /// assert_eq!(values.at(values.len()), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<P::Item<'a>> {
        self.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the first projected entry.
    #[must_use]
    pub fn first(&self) -> Option<P::Item<'a>> {
        self.get(0)
    }

    /// Returns the last projected entry.
    #[must_use]
    pub fn last(&self) -> Option<P::Item<'a>> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Iterates over the projected entries in the current order.
    ///
    /// The iterator is double-ended, so `.rev()` walks the order back to front.
    pub fn iter(&self) -> ViewIter<'a, K, V, S, P> {
        ViewIter {
            map: self.map,
            keys: self.map.order.iter(),
            projection: PhantomData,
        }
    }
}

impl<K, V, S> IndexedView<'_, K, V, S, KeyProjection>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the position of `key` in the current order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn index_of<Q>(&self, key: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.map.entries.contains_key(key) {
            return Err(Error::KeyNotFound);
        }
        Ok(self.map.order.position(key).expect(DESYNC))
    }

    /// Returns `true` if the underlying map contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.entries.contains_key(key)
    }
}

impl<K, V, S, P> Clone for IndexedView<'_, K, V, S, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S, P> Copy for IndexedView<'_, K, V, S, P> {}

impl<K, V, S> Index<usize> for IndexedView<'_, K, V, S, KeyProjection>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = K;

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn index(&self, index: usize) -> &K {
        self.get(index).expect("index out of bounds")
    }
}

impl<K, V, S> Index<usize> for IndexedView<'_, K, V, S, ValueProjection>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn index(&self, index: usize) -> &V {
        self.get(index).expect("index out of bounds")
    }
}

impl<'a, K, V, S, P> IntoIterator for IndexedView<'a, K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: Projection<K, V>,
{
    type Item = P::Item<'a>;
    type IntoIter = ViewIter<'a, K, V, S, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S, P> IntoIterator for &IndexedView<'a, K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: Projection<K, V>,
{
    type Item = P::Item<'a>;
    type IntoIter = ViewIter<'a, K, V, S, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> fmt::Debug for IndexedView<'_, K, V, S, KeyProjection>
where
    K: fmt::Debug + Hash + Eq,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Keys").field(&DebugList(*self)).finish()
    }
}

impl<K, V, S> fmt::Debug for IndexedView<'_, K, V, S, ValueProjection>
where
    K: Hash + Eq,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Values").field(&DebugList(*self)).finish()
    }
}

impl<K, V, S> fmt::Debug for IndexedView<'_, K, V, S, ItemProjection>
where
    K: fmt::Debug + Hash + Eq,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Items").field(&DebugList(*self)).finish()
    }
}

/// Renders a view's projected entries as a list.
struct DebugList<'a, K, V, S, P>(IndexedView<'a, K, V, S, P>);

impl<'a, K, V, S, P> fmt::Debug for DebugList<'a, K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: Projection<K, V>,
    P::Item<'a>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a, K, V, S, P> Iterator for ViewIter<'a, K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: Projection<K, V>,
{
    type Item = P::Item<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(P::resolve(self.map, key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let key = self.keys.nth(n)?;
        Some(P::resolve(self.map, key))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V, S, P> DoubleEndedIterator for ViewIter<'_, K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: Projection<K, V>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        Some(P::resolve(self.map, key))
    }
}

impl<K, V, S, P> ExactSizeIterator for ViewIter<'_, K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: Projection<K, V>,
{
    fn len(&self) -> usize {
        self.keys.len()
    }
}

impl<K, V, S, P> FusedIterator for ViewIter<'_, K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: Projection<K, V>,
{
}

impl<K, V, S, P> Clone for ViewIter<'_, K, V, S, P> {
    fn clone(&self) -> Self {
        ViewIter {
            map: self.map,
            keys: self.keys.clone(),
            projection: PhantomData,
        }
    }
}

impl<K, V, S, P> fmt::Debug for ViewIter<'_, K, V, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewIter").field("remaining", &self.keys.len()).finish()
    }
}
