//! Insertion-ordered association lists.

use std::fmt;
use std::hash::Hash;
use std::ops::ControlFlow;

use ahash::AHashMap;
use cadence_common::Result;

use crate::config::StorageKind;
use crate::features::{Features, Mutability};
use crate::iter::Iter;
use crate::list::List;
use crate::sequence::Sequence;

/// Key/value entries in insertion order, on top of a [`List`] of pairs.
///
/// Inserting an existing key replaces its value at the key's original position.
pub struct Map<K, V> {
    entries: List<(K, V)>,
}

impl<K, V> Clone for Map<K, V> {
    fn clone(&self) -> Self {
        Map {
            entries: self.entries.clone(),
        }
    }
}

impl<K, V> Map<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + 'static,
{
    pub fn empty() -> Map<K, V> {
        Map {
            entries: List::empty(),
        }
    }

    /// Builds a map from `entries`. A repeated key keeps its first position and
    /// its last value.
    pub(crate) fn build(entries: Vec<(K, V)>, mutability: Mutability) -> Map<K, V> {
        let mut positions = AHashMap::with_capacity(entries.len());
        let mut unique: Vec<(K, V)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match positions.get(&key) {
                Some(&index) => unique[index] = (key, value),
                None => {
                    positions.insert(key.clone(), unique.len());
                    unique.push((key, value));
                }
            }
        }
        let entries = match mutability {
            Mutability::Immutable => List::immutable(unique, Features::empty()),
            Mutability::Mutable => List::mutable(unique, Features::empty(), StorageKind::Array),
            Mutability::ReadOnlyMutable => {
                List::mutable(unique, Features::empty(), StorageKind::Array).read_only()
            }
        };
        Map { entries }
    }

    pub fn mutability(&self) -> Mutability {
        self.entries.mutability()
    }

    pub fn features(&self) -> Features {
        self.entries.features()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &K) -> Result<Option<usize>> {
        let mut index = 0;
        let missing = self.entries.scan(&mut |(k, _)| {
            if k == key {
                ControlFlow::Break(())
            } else {
                index += 1;
                ControlFlow::Continue(())
            }
        })?;
        Ok((!missing).then_some(index))
    }

    pub fn get(&self, key: &K) -> Result<Option<V>> {
        match self.position(key)? {
            Some(index) => Ok(Some(self.entries.get(index)?.1)),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        Ok(self.position(key)?.is_some())
    }

    /// Associates `value` with `key`.
    pub fn insert(&self, key: K, value: V) -> Result<Map<K, V>> {
        let entries = match self.position(&key)? {
            Some(index) => self.entries.update(index, (key, value))?,
            None => self.entries.append((key, value))?,
        };
        Ok(Map { entries })
    }

    pub fn remove(&self, key: &K) -> Result<Map<K, V>> {
        match self.position(key)? {
            Some(index) => Ok(Map {
                entries: self.entries.remove_index(index)?,
            }),
            None => Ok(self.clone()),
        }
    }

    pub fn keys(&self) -> Result<List<K>> {
        self.entries.map(|(k, _)| k)
    }

    pub fn values(&self) -> Result<List<V>> {
        self.entries.map(|(_, v)| v)
    }

    /// The entries as a read-only list sharing this map's storage.
    pub fn entries(&self) -> List<(K, V)> {
        self.entries.read_only()
    }

    pub fn iter(&self) -> Iter<(K, V)> {
        self.entries.iter()
    }

    pub fn read_only(&self) -> Map<K, V> {
        Map {
            entries: self.entries.read_only(),
        }
    }

    pub fn snapshot(&self) -> Result<Map<K, V>> {
        Ok(Map {
            entries: self.entries.snapshot()?,
        })
    }

    pub fn same_instance(&self, other: &Map<K, V>) -> bool {
        self.entries.same_instance(&other.entries)
    }
}

impl<K, V> Sequence<(K, V)> for Map<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + 'static,
{
    fn features(&self) -> Features {
        self.entries.features()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Result<(K, V)> {
        self.entries.get(index)
    }

    fn try_each(&self, f: &mut dyn FnMut(&(K, V)) -> ControlFlow<()>) -> Result<bool> {
        self.entries.scan(f)
    }
}

impl<K, V> PartialEq for Map<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + PartialEq + 'static,
{
    /// Maps are equal when they associate the same keys with equal values, in
    /// any order.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let Ok(entries) = self.entries.to_vec() else {
            return false;
        };
        entries
            .iter()
            .all(|(k, v)| matches!(other.get(k), Ok(Some(w)) if *v == w))
    }
}

impl<K, V> fmt::Debug for Map<K, V>
where
    K: Clone + Eq + Hash + fmt::Debug + 'static,
    V: Clone + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entries.to_vec() {
            Ok(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
            Err(e) => write!(f, "Map(<{e}>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{list, map, new_map};

    #[test]
    fn test_build_keeps_first_position_last_value() {
        let m = map([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.entries().to_vec().unwrap(), vec![("a", 3), ("b", 2)]);
        assert_eq!(m.mutability(), Mutability::Immutable);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let m = map([("a", 1), ("b", 2)]);
        let updated = m.insert("a", 10).unwrap();
        assert_eq!(updated.entries().to_vec().unwrap(), vec![("a", 10), ("b", 2)]);
        assert_eq!(m.get(&"a").unwrap(), Some(1));
        let grown = m.insert("c", 3).unwrap();
        assert_eq!(grown.keys().unwrap(), list(["a", "b", "c"]));
        assert_eq!(grown.values().unwrap(), list([1, 2, 3]));
        assert!(m.remove(&"z").unwrap().same_instance(&m));
        assert!(!m.remove(&"a").unwrap().contains_key(&"a").unwrap());
    }

    #[test]
    fn test_mutable_map() {
        let m = new_map([(1, "one")]);
        let generation = m.entries.generation().unwrap();
        assert!(m.insert(1, "uno").unwrap().same_instance(&m));
        assert_eq!(m.entries.generation().unwrap(), generation);
        assert!(m.insert(2, "dos").unwrap().same_instance(&m));
        assert_eq!(m.get(&2).unwrap(), Some("dos"));
        assert_eq!(m, map([(2, "dos"), (1, "uno")]));
        assert!(m.read_only().insert(3, "tres").unwrap().mutability().is_mutable());
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", map([(1, 'x')])), "{1: 'x'}");
    }
}
