use thiserror::Error;

/// The errors reported by fallible [`IndexedOrderedMap`](crate::IndexedOrderedMap)
/// and [`IndexedView`](crate::IndexedView) operations.
///
/// A failed operation never leaves the map partially modified.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The addressed key is not present in the map.
    #[error("key not found")]
    KeyNotFound,

    /// An entry was requested from either end of an empty map.
    #[error("cannot pop an item from an empty map")]
    EmptyContainer,

    /// A positional access fell outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The number of entries at the time of the access.
        len: usize,
    },

    /// More than one positional source was passed to
    /// [`from_args`](crate::IndexedOrderedMap::from_args).
    #[error("expected at most 1 source, got {given}")]
    InvalidConstruction {
        /// The number of sources supplied, or a lower bound on it when the
        /// sources do not report their count.
        given: usize,
    },
}

/// A `Result` whose error type is [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
        assert_eq!(Error::IndexOutOfRange { index: 3, len: 3 }.to_string(), "index 3 out of range for length 3");
        assert_eq!(Error::InvalidConstruction { given: 2 }.to_string(), "expected at most 1 source, got 2");
    }
}
