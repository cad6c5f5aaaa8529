//! `serde` support. Lists and sets serialize as sequences, maps as maps in
//! insertion order. Deserialization always produces immutable collections.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};

use crate::factory;
use crate::features::Mutability;
use crate::list::List;
use crate::map::Map;
use crate::sequence::Sequence;
use crate::set::Set;

/// Upper bound on storage reserved up front from a deserializer's size hint.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

fn serialize_elements<T, Q, S>(sequence: &Q, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Clone + serde::ser::Serialize,
    Q: Sequence<T>,
    S: serde::ser::Serializer,
{
    let items = sequence.to_vec().map_err(S::Error::custom)?;
    let mut seq = serializer.serialize_seq(Some(items.len()))?;
    for item in &items {
        seq.serialize_element(item)?;
    }
    seq.end()
}

impl<T> serde::ser::Serialize for List<T>
where
    T: Clone + serde::ser::Serialize + 'static,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serialize_elements(self, serializer)
    }
}

impl<'de, T> serde::de::Deserialize<'de> for List<T>
where
    T: Clone + serde::de::Deserialize<'de> + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<List<T>, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(factory::list)
    }
}

impl<T> serde::ser::Serialize for Set<T>
where
    T: Clone + Eq + Hash + serde::ser::Serialize + 'static,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serialize_elements(self, serializer)
    }
}

impl<'de, T> serde::de::Deserialize<'de> for Set<T>
where
    T: Clone + Eq + Hash + serde::de::Deserialize<'de> + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Set<T>, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(factory::set)
    }
}

impl<K, V> serde::ser::Serialize for Map<K, V>
where
    K: Clone + Eq + Hash + serde::ser::Serialize + 'static,
    V: Clone + serde::ser::Serialize + 'static,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let entries = self.entries().to_vec().map_err(S::Error::custom)?;
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (k, v) in &entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, K, V> serde::de::Deserialize<'de> for Map<K, V>
where
    K: Clone + Eq + Hash + serde::de::Deserialize<'de> + 'static,
    V: Clone + serde::de::Deserialize<'de> + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Map<K, V>, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

struct MapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
where
    K: Clone + Eq + Hash + serde::de::Deserialize<'de> + 'static,
    V: Clone + serde::de::Deserialize<'de> + 'static,
{
    type Value = Map<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(
            access
                .size_hint()
                .unwrap_or(0)
                .min(MAX_PREALLOCATED_ENTRIES),
        );
        while let Some(entry) = access.next_entry::<K, V>()? {
            entries.push(entry);
        }
        Ok(Map::build(entries, Mutability::Immutable))
    }
}
