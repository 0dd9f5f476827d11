/// A zero-based position in the current key order of a map.
///
/// Positions are not stable: inserting, removing or reordering keys changes
/// which entry a given position refers to.
///
/// # Examples
///
/// ```
/// use indexed::{IndexedOrderedMap, Position};
///
/// let mut map = IndexedOrderedMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Position(0)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position(pub usize);
