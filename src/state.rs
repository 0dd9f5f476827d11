use std::hash::{BuildHasher, Hash};

use crate::IndexedOrderedMap;

/// Splits a value into plain state and rebuilds an equal value from it.
///
/// This is the hook for persistence: an external encoder stores the state in
/// whatever format it likes and hands it back to [`reconstruct`] on load. For
/// [`IndexedOrderedMap`] the state is the ordered list of `(key, value)` pairs,
/// and the rebuilt map compares equal under its order-sensitive equality.
///
/// # Examples
///
/// ```
/// use indexed::{IndexedOrderedMap, Reconstruct};
///
/// let mut d = IndexedOrderedMap::new();
/// d.insert("foo", "bar");
/// d.insert("bar", "baz");
///
/// let state = d.extract_state();
/// assert_eq!(state, [("foo", "bar"), ("bar", "baz")]);
/// let rebuilt: IndexedOrderedMap<_, _> = IndexedOrderedMap::reconstruct(state);
/// assert_eq!(rebuilt, d);
/// ```
///
/// [`reconstruct`]: Reconstruct::reconstruct
pub trait Reconstruct: Sized {
    /// The extracted state.
    type State;

    /// Captures everything needed to rebuild `self`.
    fn extract_state(&self) -> Self::State;

    /// Rebuilds a value from state captured by [`extract_state`](Reconstruct::extract_state).
    fn reconstruct(state: Self::State) -> Self;
}

impl<K, V, S> Reconstruct for IndexedOrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default,
{
    type State = Vec<(K, V)>;

    fn extract_state(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn reconstruct(state: Vec<(K, V)>) -> Self {
        state.into_iter().collect()
    }
}
