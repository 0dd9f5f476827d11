use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use ::serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use ::serde::ser::{Serialize, SerializeMap, Serializer};

use crate::IndexedOrderedMap;

/// Serializes as a map whose entries appear in the map's current order.
impl<K, V, S> Serialize for IndexedOrderedMap<K, V, S>
where
    K: Serialize + Hash + Eq + Clone,
    V: Serialize,
    S: BuildHasher,
{
    fn serialize<T>(&self, serializer: T) -> Result<T::Ok, T::Error>
    where
        T: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct IndexedOrderedMapVisitor<K, V, S> {
    marker: PhantomData<fn() -> IndexedOrderedMap<K, V, S>>,
}

impl<'de, K, V, S> Visitor<'de> for IndexedOrderedMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = IndexedOrderedMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let capacity = access.size_hint().unwrap_or(0).min(4096);
        let mut map = IndexedOrderedMap::with_capacity_and_hasher(capacity, S::default());
        // Entries arrive in document order, which becomes the key order.
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for IndexedOrderedMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(IndexedOrderedMapVisitor {
            marker: PhantomData,
        })
    }
}
