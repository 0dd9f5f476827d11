use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use indexed::map::Entry;
use indexed::{Error, IndexedOrderedMap, Position, Reconstruct};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys are drawn from a small range so that operations keep hitting existing keys.
fn key_strategy() -> impl Strategy<Value = i64> {
    -64i64..64i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Delete(i64),
    Pop(i64),
    PopOr(i64, i64),
    PopItem(bool),
    MoveToEnd(i64, bool),
    SetDefault(i64, i64),
    Get(i64),
    IndexOf(i64),
    Clear,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        8 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Delete),
        1 => key_strategy().prop_map(MapOp::Pop),
        1 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::PopOr(k, v)),
        2 => any::<bool>().prop_map(MapOp::PopItem),
        3 => (key_strategy(), any::<bool>()).prop_map(|(k, e)| MapOp::MoveToEnd(k, e)),
        2 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::SetDefault(k, v)),
        2 => key_strategy().prop_map(MapOp::Get),
        2 => key_strategy().prop_map(MapOp::IndexOf),
        1 => Just(MapOp::Clear),
    ]
}

/// A deliberately naive order-preserving map: a vector of pairs.
#[derive(Debug, Default)]
struct Model(Vec<(i64, i64)>);

impl Model {
    fn position(&self, key: i64) -> Option<usize> {
        self.0.iter().position(|(k, _)| *k == key)
    }

    fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        match self.position(key) {
            Some(i) => Some(std::mem::replace(&mut self.0[i].1, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    fn remove(&mut self, key: i64) -> Option<i64> {
        self.position(key).map(|i| self.0.remove(i).1)
    }

    fn pop_item(&mut self, from_end: bool) -> Option<(i64, i64)> {
        if self.0.is_empty() {
            None
        } else if from_end {
            self.0.pop()
        } else {
            Some(self.0.remove(0))
        }
    }

    fn move_to_end(&mut self, key: i64, to_end: bool) -> bool {
        let Some(i) = self.position(key) else {
            return false;
        };
        let entry = self.0.remove(i);
        if to_end {
            self.0.push(entry);
        } else {
            self.0.insert(0, entry);
        }
        true
    }
}

/// The key order and the entry table hold the same keys, without duplicates.
fn assert_consistent(map: &IndexedOrderedMap<i64, i64>) -> Result<(), TestCaseError> {
    let keys: Vec<i64> = map.keys().iter().copied().collect();
    let unique: HashSet<i64> = keys.iter().copied().collect();
    prop_assert_eq!(keys.len(), map.len(), "order length differs from entry count");
    prop_assert_eq!(unique.len(), keys.len(), "duplicate keys in order");
    prop_assert!(keys.iter().all(|k| map.contains_key(k)), "order holds a key without an entry");
    Ok(())
}

// ─── Core operations against the model ──────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both the map and the model and
    /// asserts identical results and identical order at every step.
    #[test]
    fn map_ops_match_model(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut map: IndexedOrderedMap<i64, i64> = IndexedOrderedMap::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(k), "remove({})", k);
                }
                MapOp::Delete(k) => {
                    let expected = model.remove(k).map(drop).ok_or(Error::KeyNotFound);
                    prop_assert_eq!(map.delete(&k), expected, "delete({})", k);
                }
                MapOp::Pop(k) => {
                    let expected = model.remove(k).ok_or(Error::KeyNotFound);
                    prop_assert_eq!(map.pop(&k), expected, "pop({})", k);
                }
                MapOp::PopOr(k, default) => {
                    let expected = model.remove(k).unwrap_or(default);
                    prop_assert_eq!(map.pop_or(&k, default), expected, "pop_or({})", k);
                }
                MapOp::PopItem(from_end) => {
                    let expected = model.pop_item(from_end).ok_or(Error::EmptyContainer);
                    prop_assert_eq!(map.pop_item(from_end), expected, "pop_item({})", from_end);
                }
                MapOp::MoveToEnd(k, to_end) => {
                    let expected = if model.move_to_end(k, to_end) { Ok(()) } else { Err(Error::KeyNotFound) };
                    prop_assert_eq!(map.move_to_end(&k, to_end), expected, "move_to_end({}, {})", k, to_end);
                }
                MapOp::SetDefault(k, v) => {
                    let expected = match model.position(k) {
                        Some(i) => model.0[i].1,
                        None => {
                            model.0.push((k, v));
                            v
                        }
                    };
                    prop_assert_eq!(*map.set_default(k, v), expected, "set_default({}, {})", k, v);
                }
                MapOp::Get(k) => {
                    let expected = model.position(k).map(|i| &model.0[i].1);
                    prop_assert_eq!(map.get(&k), expected, "get({})", k);
                    prop_assert_eq!(map.try_get(&k).ok(), expected, "try_get({})", k);
                }
                MapOp::IndexOf(k) => {
                    prop_assert_eq!(map.index_of(&k), model.position(k), "index_of({})", k);
                    prop_assert_eq!(map.keys().index_of(&k).ok(), model.position(k), "keys().index_of({})", k);
                }
                MapOp::Clear => {
                    map.clear();
                    model.0.clear();
                }
            }

            prop_assert_eq!(map.len(), model.0.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(map.is_empty(), model.0.is_empty(), "is_empty mismatch after {:?}", op);
            assert_consistent(&map)?;
        }

        let entries: Vec<(i64, i64)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(entries, model.0);
    }

    /// Overwriting an existing key never moves it and never changes the length.
    #[test]
    fn overwrite_keeps_position(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE),
        overwrites in proptest::collection::vec((any::<prop::sample::Index>(), value_strategy()), 100),
    ) {
        let mut map: IndexedOrderedMap<i64, i64> = entries.into_iter().collect();
        let before: Vec<i64> = map.keys().iter().copied().collect();

        for (which, value) in overwrites {
            let key = before[which.index(before.len())];
            prop_assert!(map.insert(key, value).is_some());
            prop_assert_eq!(map.len(), before.len());
        }

        let after: Vec<i64> = map.keys().iter().copied().collect();
        prop_assert_eq!(after, before);
    }

    /// `reconstruct(extract_state(d))` is order-sensitively equal to `d`.
    #[test]
    fn state_round_trip(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE / 4)) {
        let mut map: IndexedOrderedMap<i64, i64> = IndexedOrderedMap::new();
        for op in ops {
            match op {
                MapOp::Insert(k, v) => {
                    map.insert(k, v);
                }
                MapOp::MoveToEnd(k, to_end) => {
                    let _ = map.move_to_end(&k, to_end);
                }
                MapOp::Remove(k) => {
                    map.remove(&k);
                }
                _ => {}
            }
        }

        let rebuilt: IndexedOrderedMap<_, _> = IndexedOrderedMap::reconstruct(map.extract_state());
        prop_assert_eq!(&rebuilt, &map);
        prop_assert_eq!(rebuilt.keys().iter().collect::<Vec<_>>(), map.keys().iter().collect::<Vec<_>>());
    }

    /// `retain` keeps exactly the accepted entries, in their original order.
    #[test]
    fn retain_matches_filter(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut map: IndexedOrderedMap<i64, i64> = entries.into_iter().collect();
        let expected: Vec<(i64, i64)> = map.iter().filter(|(_, v)| *v % 2 == 0).map(|(k, v)| (*k, *v)).collect();

        map.retain(|_, v| *v % 2 == 0);

        prop_assert_eq!(map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), expected);
        assert_consistent(&map)?;
    }

    /// Sorting permutes the order only.
    #[test]
    fn sort_keys_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut map: IndexedOrderedMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = map.iter().map(|(k, v)| (*k, *v)).collect();

        map.sort_keys();

        prop_assert!(map.iter().eq(bt_map.iter()));
        prop_assert!(map == bt_map);
        assert_consistent(&map)?;
    }

    /// Equal maps hash equally.
    #[test]
    fn clone_is_equal_and_hashes_equal(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let map: IndexedOrderedMap<i64, i64> = entries.into_iter().collect();
        let copy = map.clone();
        prop_assert_eq!(&copy, &map);
        prop_assert_eq!(hash_of(&copy), hash_of(&map));
    }
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ─── Behavior of individual operations ───────────────────────────────────────

#[test]
fn del_item() {
    let mut d = IndexedOrderedMap::new();
    d.insert("key-a", "a");
    d.insert("key-b", "b");
    d.insert("key-c", "c");

    d.delete("key-a").unwrap();
    assert!(!d.contains_key("key-a"));

    let keys = d.keys();
    assert_eq!(keys.index_of("key-b"), Ok(0));
    assert_eq!(keys.index_of("key-c"), Ok(1));
    assert_eq!(keys.index_of("key-a"), Err(Error::KeyNotFound));
}

#[test]
fn delete_absent_key_leaves_map_untouched() {
    let mut d = IndexedOrderedMap::from([("a", 1), ("b", 2)]);
    assert_eq!(d.delete("z"), Err(Error::KeyNotFound));
    assert_eq!(d, IndexedOrderedMap::from([("a", 1), ("b", 2)]));
}

#[test]
fn iter_follows_insertion_order() {
    let mut d = IndexedOrderedMap::new();
    d.insert(8, "8");
    d.insert(5, "5");
    d.insert(9, "9");

    let mut it = d.keys().iter();
    assert_eq!(it.next(), Some(&8));
    assert_eq!(it.next(), Some(&5));
    assert_eq!(it.next(), Some(&9));
    assert_eq!(it.next(), None);

    // Every call starts a fresh traversal.
    assert_eq!(d.keys().iter().count(), 3);
}

#[test]
fn reversed() {
    let mut d = IndexedOrderedMap::new();
    d.insert("a", "b");
    d.insert("b", "a");

    let mut it = d.keys().iter().rev();
    assert_eq!(it.next(), Some(&"b"));
    assert_eq!(it.next(), Some(&"a"));
}

#[test]
fn clear() {
    let mut d = IndexedOrderedMap::new();
    d.insert("foo", "bar");
    assert_eq!(d.len(), 1);
    assert_eq!(d.values().len(), 1);

    d.clear();
    assert_eq!(d.len(), 0);
    assert_eq!(d.values().len(), 0);
    assert_eq!(d.keys().iter().next(), None);
}

#[test]
fn pop_item_lifo_and_fifo() {
    let mut d = IndexedOrderedMap::new();
    d.insert("first-key", "first");
    d.insert("middle-key", "middle");
    d.insert("last-key", "last");

    assert_eq!(d.pop_item(true), Ok(("last-key", "last")));
    assert_eq!(d.pop_item(false), Ok(("first-key", "first")));

    assert_eq!(d.len(), 1);
    assert_eq!(d["middle-key"], "middle");
}

#[test]
fn pop_item_on_empty_map() {
    let mut d: IndexedOrderedMap<&str, &str> = IndexedOrderedMap::new();
    assert_eq!(d.pop_item(true), Err(Error::EmptyContainer));
    assert_eq!(d.pop_item(false), Err(Error::EmptyContainer));
    assert_eq!(d.pop_first(), None);
    assert_eq!(d.pop_last(), None);
}

#[test]
fn move_to_end() {
    let mut d = IndexedOrderedMap::new();
    d.insert("first-key", "first");
    d.insert("middle-key", "middle");
    d.insert("last-key", "last");

    d.move_to_end("middle-key", true).unwrap();
    assert_eq!(d.keys()[2], "middle-key");
    assert_eq!(d.values()[2], "middle");
    assert_eq!(d.keys()[1], "last-key");

    d.move_to_end("last-key", false).unwrap();
    assert_eq!(d.keys()[0], "last-key");
    assert_eq!(d.values()[0], "last");

    assert_eq!(d.len(), 3);
    assert_eq!(d.move_to_end("missing", true), Err(Error::KeyNotFound));
    assert_eq!(d.keys().iter().copied().collect::<Vec<_>>(), ["last-key", "first-key", "middle-key"]);
}

#[test]
fn move_to_end_sequence() {
    let mut d = IndexedOrderedMap::from([("A", 1), ("B", 2), ("C", 3)]);
    d.move_to_end("B", true).unwrap();
    assert_eq!(d.keys().iter().copied().collect::<Vec<_>>(), ["A", "C", "B"]);
    d.move_to_end("C", false).unwrap();
    assert_eq!(d.keys().iter().copied().collect::<Vec<_>>(), ["C", "A", "B"]);
}

#[test]
fn pop() {
    let mut d = IndexedOrderedMap::new();
    d.insert("foo", "bar");

    assert!(d.contains_key("foo"));
    assert_eq!(d.pop("foo"), Ok("bar"));
    assert!(!d.contains_key("foo"));

    assert_eq!(d.pop("hello"), Err(Error::KeyNotFound));
    assert_eq!(d.pop_or("hello", "default"), "default");
}

#[test]
fn set_default() {
    let mut d = IndexedOrderedMap::new();
    d.insert("a", "set");

    assert_eq!(*d.set_default("a", "not-set"), "set");
    assert_eq!(*d.set_default("b", "not-set"), "not-set");
    assert_eq!(*d.set_default("b", "still-not-set"), "not-set");
    assert_eq!(d.keys().at(1), Ok(&"b"));
}

#[test]
fn get_and_try_get() {
    let d = IndexedOrderedMap::from([("a", 1)]);
    assert_eq!(d.get("a"), Some(&1));
    assert_eq!(d.try_get("a"), Ok(&1));
    assert_eq!(d.try_get("b"), Err(Error::KeyNotFound));
    assert_eq!(d.get_key_value("a"), Some((&"a", &1)));
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_by_missing_key_panics() {
    let d = IndexedOrderedMap::from([("a", 1)]);
    let _ = d["b"];
}

#[test]
fn index_by_position() {
    let mut d = IndexedOrderedMap::from([("a", 1), ("b", 2)]);
    assert_eq!(d[Position(1)], 2);
    d[Position(0)] = 10;
    assert_eq!(d["a"], 10);
    assert_eq!(d.get_index(2), None);
}

#[test]
#[should_panic(expected = "position out of bounds")]
fn index_by_position_out_of_bounds_panics() {
    let d = IndexedOrderedMap::from([("a", 1)]);
    let _ = d[Position(1)];
}

#[test]
fn render() {
    let d = IndexedOrderedMap::from([("key", "value"), ("other", "thing")]);
    assert_eq!(format!("{d:?}"), r#"{"key": "value", "other": "thing"}"#);

    let empty: IndexedOrderedMap<i32, i32> = IndexedOrderedMap::new();
    assert_eq!(format!("{empty:?}"), "{}");
}

#[derive(Debug)]
enum Value {
    Str(&'static str),
    Map(Rc<RefCell<IndexedOrderedMap<&'static str, Value>>>),
}

#[test]
fn self_referential_render_terminates() {
    let d = Rc::new(RefCell::new(IndexedOrderedMap::new()));
    d.borrow_mut().insert("key", Value::Str("value"));
    d.borrow_mut().insert("recursive", Value::Map(Rc::clone(&d)));

    let rendered = format!("{:?}", d.borrow());
    assert_eq!(rendered, r#"{"key": Str("value"), "recursive": Map(RefCell { value: ... })}"#);

    // Rendering again works: the guard is released once rendering finishes.
    assert_eq!(format!("{:?}", d.borrow()), rendered);

    // Break the cycle so the map is dropped.
    d.borrow_mut().clear();
}

#[test]
fn equality_is_order_sensitive_between_ordered_maps() {
    let mut a = IndexedOrderedMap::new();
    a.insert("foo", "bar");
    a.insert("baz", "zab");

    let mut b = a.clone();
    assert!(a == b);

    b.insert("zip", "zap");
    assert!(a != b);

    let mut reordered_a = a.clone();
    reordered_a.move_to_end("foo", true).unwrap();
    assert_ne!(a, reordered_a);
    assert!(a.eq_unordered(&reordered_a));
}

#[test]
fn equality_is_order_insensitive_against_plain_maps() {
    let mut a = IndexedOrderedMap::new();
    a.insert("foo", "bar");
    a.insert("baz", "zab");

    let std_map = HashMap::from([("baz", "zab"), ("foo", "bar")]);
    assert_eq!(std_map, a);
    assert_eq!(a, std_map);

    let bt_map = BTreeMap::from([("foo", "bar"), ("baz", "zab")]);
    assert_eq!(a, bt_map);
    assert_eq!(bt_map, a);

    let different = HashMap::from([("baz", "zab"), ("foo", "other")]);
    assert_ne!(a, different);
}

#[test]
fn copy_is_shallow() {
    let shared = Rc::new(5);
    let a = IndexedOrderedMap::from([("x", Rc::clone(&shared))]);
    let mut b = a.clone();

    assert!(Rc::ptr_eq(&a["x"], &b["x"]));
    b.insert("y", Rc::new(6));
    assert_eq!(a.len(), 1);
    assert_eq!(Rc::strong_count(&shared), 3);
}

#[test]
fn state_round_trip_preserves_order() {
    let mut d = IndexedOrderedMap::new();
    d.insert("foo", "bar");
    d.insert("bar", "baz");

    let state = d.extract_state();
    assert_eq!(state, vec![("foo", "bar"), ("bar", "baz")]);

    let restored: IndexedOrderedMap<_, _> = IndexedOrderedMap::reconstruct(state);
    assert_eq!(d, restored);
}

#[test]
fn from_keys() {
    let d: IndexedOrderedMap<_, _> = IndexedOrderedMap::from_keys(["key-a", "key-b"], "default-value");
    assert_eq!(d["key-a"], "default-value");
    assert_eq!(d["key-b"], "default-value");

    let repeated: IndexedOrderedMap<_, _> = IndexedOrderedMap::from_keys([3, 1, 3, 2], ());
    assert_eq!(repeated.keys().iter().copied().collect::<Vec<_>>(), [3, 1, 2]);
}

#[test]
fn from_args() {
    let d: IndexedOrderedMap<_, _> = IndexedOrderedMap::from_args([vec![("a", 1), ("b", 2)]], [("c", 3)]).unwrap();
    assert_eq!(d.iter().collect::<Vec<_>>(), [(&"a", &1), (&"b", &2), (&"c", &3)]);

    let only_kwargs: IndexedOrderedMap<_, _> = IndexedOrderedMap::from_args(None::<Vec<(&str, i32)>>, [("x", 1)]).unwrap();
    assert_eq!(only_kwargs, IndexedOrderedMap::from([("x", 1)]));

    let too_many = IndexedOrderedMap::<&str, i32>::from_args([vec![("a", 1)], vec![("b", 2)], vec![]], []);
    assert_eq!(too_many, Err(Error::InvalidConstruction { given: 3 }));
}

#[test]
fn from_args_rejects_endless_sources() {
    let endless = std::iter::repeat(vec![("a", 1)]);
    let err = IndexedOrderedMap::<&str, i32>::from_args(endless, []).unwrap_err();
    assert!(matches!(err, Error::InvalidConstruction { given } if given >= 2));

    let mut pulled = 0;
    let counted = std::iter::from_fn(|| {
        pulled += 1;
        Some(Vec::<(&str, i32)>::new())
    });
    let err = IndexedOrderedMap::<&str, i32>::from_args(counted, []).unwrap_err();
    assert_eq!(err, Error::InvalidConstruction { given: 2 });
    assert_eq!(pulled, 2);
}

#[test]
fn borrowed_lookups_remove_owned_keys() {
    let mut d: IndexedOrderedMap<String, u32> = ["a", "b", "c"].iter().map(|k| (k.to_string(), 0)).collect();

    assert_eq!(d.remove_entry("b"), Some(("b".to_owned(), 0)));
    assert_eq!(d.remove("missing"), None);
    assert_eq!(d.delete("a"), Ok(()));
    assert_eq!(d.pop("c"), Ok(0));
    assert!(d.is_empty());
    assert!(d.keys().is_empty());
}

#[test]
fn retain_with_panicking_predicate_leaves_map_intact() {
    let mut d: IndexedOrderedMap<u32, u32> = (0..6).map(|k| (k, k * 10)).collect();

    let mut calls = 0;
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        d.retain(|&k, _| {
            calls += 1;
            assert!(calls < 5, "predicate gave up");
            k % 2 == 0
        });
    }));
    assert!(outcome.is_err());

    assert_eq!(d.len(), 6);
    assert_eq!(d.keys().len(), d.len());
    assert_eq!(d.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), [(0, 0), (1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]);

    d.retain(|&k, _| k % 2 == 0);
    assert_eq!(d.keys().iter().copied().collect::<Vec<_>>(), [0, 2, 4]);
}

#[test]
fn from_hash_map_keeps_its_iteration_order() {
    let source = HashMap::from([(1, "a"), (2, "b"), (3, "c")]);
    let expected: Vec<i32> = source.keys().copied().collect();
    let d = IndexedOrderedMap::from(source);
    assert_eq!(d.keys().iter().copied().collect::<Vec<_>>(), expected);
}

#[test]
fn sort() {
    let forwards = IndexedOrderedMap::from([("a", 1), ("b", -1)]);
    let mut backwards = IndexedOrderedMap::from([("b", -1), ("a", 1)]);
    assert_ne!(forwards, backwards);

    backwards.sort_keys();
    assert_eq!(forwards, backwards);

    backwards.reverse();
    assert_ne!(forwards, backwards);

    let mut forwards = forwards;
    forwards.sort_by_key(|_, v| *v);
    assert_eq!(forwards, backwards);

    forwards.sort_by(|ka, _, kb, _| ka.cmp(kb));
    assert_eq!(forwards.keys().iter().copied().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn union() {
    let foo = IndexedOrderedMap::from([("foo", 1)]);
    let bar = HashMap::from([("bar", 1)]);
    let foo_bar = IndexedOrderedMap::from([("foo", 1), ("bar", 1)]);

    assert_eq!(foo.clone() | foo.clone(), foo);
    assert_eq!(foo.clone() | bar.clone(), foo_bar);
    assert_ne!(bar.clone() | foo.clone(), foo_bar);

    let mut foo = foo;
    foo |= bar;
    assert_eq!(foo, foo_bar);
}

#[test]
fn entry_api_keeps_order() {
    let mut count: IndexedOrderedMap<&str, usize> = IndexedOrderedMap::new();
    for word in ["b", "a", "b", "c", "a", "b"] {
        *count.entry(word).or_default() += 1;
    }
    assert_eq!(count.iter().collect::<Vec<_>>(), [(&"b", &3), (&"a", &2), (&"c", &1)]);

    match count.entry("a") {
        Entry::Occupied(o) => {
            assert_eq!(o.index(), 1);
            assert_eq!(o.remove_entry(), ("a", 2));
        }
        Entry::Vacant(_) => unreachable!(),
    }
    assert_eq!(count.keys().iter().copied().collect::<Vec<_>>(), ["b", "c"]);

    let occupied = count.entry("d").insert_entry(4);
    assert_eq!(occupied.index(), 2);
    assert_eq!(count.keys().index_of("d"), Ok(2));

    match count.entry("e") {
        Entry::Vacant(v) => assert_eq!(v.into_key(), "e"),
        Entry::Occupied(_) => unreachable!(),
    }
    assert!(!count.contains_key("e"));
    assert_eq!(count.len(), 3);
}

#[test]
fn into_iter_is_ordered() {
    let d = IndexedOrderedMap::from([(3, "c"), (1, "a"), (2, "b")]);
    assert_eq!(d.into_iter().collect::<Vec<_>>(), [(3, "c"), (1, "a"), (2, "b")]);
}

#[test]
fn capacity() {
    let mut d: IndexedOrderedMap<u32, u32> = IndexedOrderedMap::with_capacity(16);
    assert!(d.capacity() >= 16);
    d.reserve(64);
    assert!(d.capacity() >= 64);
    d.insert(1, 1);
    d.shrink_to_fit();
    assert!(d.capacity() >= 1);
}

#[test]
fn errors_display() {
    assert_eq!(Error::EmptyContainer.to_string(), "cannot pop an item from an empty map");
}
