//! A hash map that remembers insertion order and exposes it by position.
//!
//! This crate provides [`IndexedOrderedMap`], which behaves like the standard
//! library's `HashMap` (unique keys, O(1) lookup) while keeping its keys in a
//! deterministic, mutation-aware order that can be indexed:
//!
//! - [`keys`](IndexedOrderedMap::keys), [`values`](IndexedOrderedMap::values) and
//!   [`items`](IndexedOrderedMap::items) return live [`IndexedView`]s with
//!   [`at`](IndexedView::at) and, for keys, [`index_of`](IndexedView::index_of)
//! - [`move_to_end`](IndexedOrderedMap::move_to_end) and
//!   [`pop_item`](IndexedOrderedMap::pop_item) reorder and consume from either end
//! - Indexing by [`Position`] - e.g., `map[Position(0)]` for the first value
//!
//! # Example
//!
//! ```
//! use indexed::{IndexedOrderedMap, Position};
//!
//! let mut d = IndexedOrderedMap::new();
//! d.insert("first-key", "first");
//! d.insert("middle-key", "middle");
//! d.insert("last-key", "last");
//!
//! d.move_to_end("middle-key", true).unwrap();
//! assert_eq!(d.keys().at(2), Ok(&"middle-key"));
//! assert_eq!(d.values().at(2), Ok(&"middle"));
//! assert_eq!(d.keys().index_of("last-key"), Ok(1));
//! assert_eq!(d[Position(0)], "first");
//! ```
//!
//! # Equality
//!
//! Comparing two `IndexedOrderedMap`s is **order-sensitive**. Comparing an
//! `IndexedOrderedMap` with a `HashMap` or `BTreeMap` is **order-insensitive**.
//!
//! # Implementation
//!
//! Entries live in a `HashMap<K, V, S>`; a separate sequence of keys records
//! their order. Every public mutation keeps the two in agreement. Appending and
//! popping at either end are O(1); removing an arbitrary key, moving a key and
//! looking up a key's position scan the order sequence and are O(n).

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod position;
mod raw;
mod state;

pub mod map;

#[cfg(feature = "serde")]
mod serde;

pub use error::{Error, Result};
pub use map::{IndexedOrderedMap, IndexedView};
pub use position::Position;
pub use state::Reconstruct;
