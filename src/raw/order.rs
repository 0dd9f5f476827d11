use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::collections::vec_deque;

/// The key sequence of an `IndexedOrderedMap`.
///
/// Holds no duplicates as long as callers only push keys that are absent,
/// which the owning map guarantees by consulting its hash map first.
#[derive(Clone, Debug)]
pub(crate) struct RawOrder<K> {
    keys: VecDeque<K>,
}

impl<K> RawOrder<K> {
    pub(crate) const fn new() -> Self {
        Self {
            keys: VecDeque::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: VecDeque::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.keys.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.keys.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.keys.shrink_to_fit();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub(crate) fn first(&self) -> Option<&K> {
        self.keys.front()
    }

    pub(crate) fn last(&self) -> Option<&K> {
        self.keys.back()
    }

    pub(crate) fn push_back(&mut self, key: K) {
        self.keys.push_back(key);
    }

    pub(crate) fn pop_back(&mut self) -> Option<K> {
        self.keys.pop_back()
    }

    pub(crate) fn pop_front(&mut self) -> Option<K> {
        self.keys.pop_front()
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
    }

    pub(crate) fn iter(&self) -> vec_deque::Iter<'_, K> {
        self.keys.iter()
    }

    /// Linear scan for the position of `key`.
    pub(crate) fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.keys.iter().position(|k| k.borrow() == key)
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let index = self.position(key)?;
        self.keys.remove(index)
    }

    /// Moves `key` to the back (`to_back == true`) or front of the sequence.
    ///
    /// Returns `false`, leaving the sequence untouched, if `key` is absent.
    pub(crate) fn relocate<Q>(&mut self, key: &Q, to_back: bool) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let Some(index) = self.position(key) else {
            return false;
        };
        let keys = self.keys.make_contiguous();
        if to_back {
            keys[index..].rotate_left(1);
        } else {
            keys[..=index].rotate_right(1);
        }
        true
    }

    pub(crate) fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        self.keys.make_contiguous().sort_by(compare);
    }

    pub(crate) fn reverse(&mut self) {
        self.keys.make_contiguous().reverse();
    }

    pub(crate) fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.keys.retain(keep);
    }
}

impl<K> IntoIterator for RawOrder<K> {
    type Item = K;
    type IntoIter = vec_deque::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}
