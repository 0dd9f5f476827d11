use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::ops::{BitOr, BitOrAssign};

use super::IndexedOrderedMap;

/// Merges `rhs` into `self`: keys already present keep their position and take
/// the value from `rhs`; new keys are appended in `rhs`'s order.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use indexed::IndexedOrderedMap;
///
/// let foo = IndexedOrderedMap::from([("foo", 1)]);
/// let bar = HashMap::from([("bar", 1)]);
///
/// let foo_bar = foo.clone() | bar;
/// assert_eq!(foo_bar, IndexedOrderedMap::from([("foo", 1), ("bar", 1)]));
/// assert_eq!(foo.clone() | foo.clone(), foo);
/// ```
impl<K, V, S, I> BitOr<I> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
    I: IntoIterator<Item = (K, V)>,
{
    type Output = IndexedOrderedMap<K, V, S>;

    fn bitor(mut self, rhs: I) -> Self::Output {
        self.update(rhs);
        self
    }
}

/// Merges `rhs` into `self` in place, as [`update`](IndexedOrderedMap::update) does.
///
/// # Examples
///
/// ```
/// use indexed::IndexedOrderedMap;
///
/// let mut foo = IndexedOrderedMap::from([("foo", 1)]);
/// foo |= [("bar", 1)];
/// assert_eq!(foo, IndexedOrderedMap::from([("foo", 1), ("bar", 1)]));
/// ```
impl<K, V, S, I> BitOrAssign<I> for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
    I: IntoIterator<Item = (K, V)>,
{
    fn bitor_assign(&mut self, rhs: I) {
        self.update(rhs);
    }
}

/// Builds an `IndexedOrderedMap` from the `HashMap` and merges `rhs` into it, so
/// the `HashMap`'s keys come first.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use indexed::IndexedOrderedMap;
///
/// let foo = IndexedOrderedMap::from([("foo", 1)]);
/// let bar = HashMap::from([("bar", 1)]);
///
/// let bar_foo = bar | foo;
/// assert_eq!(bar_foo.keys().at(0), Ok(&"bar"));
/// assert_ne!(bar_foo, IndexedOrderedMap::from([("foo", 1), ("bar", 1)]));
/// ```
impl<K, V, S> BitOr<IndexedOrderedMap<K, V, S>> for HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    type Output = IndexedOrderedMap<K, V, S>;

    fn bitor(self, rhs: IndexedOrderedMap<K, V, S>) -> Self::Output {
        let mut merged = IndexedOrderedMap::from(self);
        merged.update(rhs);
        merged
    }
}
