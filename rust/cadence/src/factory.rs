//! Paired immutable / mutable constructors.
//!
//! `list`, `set` and `map` build immutable collections; `new_list`,
//! `new_set` and `new_map` build mutable ones. Immutable factories given no
//! elements return the canonical empty value.

use std::hash::Hash;

use crate::builder::ListBuilder;
use crate::config::StorageKind;
use crate::features::{Features, Mutability};
use crate::list::List;
use crate::map::Map;
use crate::set::Set;

/// An immutable list of `items`.
pub fn list<T, I>(items: I) -> List<T>
where
    T: Clone + 'static,
    I: IntoIterator<Item = T>,
{
    items.into_iter().collect::<ListBuilder<T>>().to_list()
}

/// A mutable, array-backed list of `items`.
pub fn new_list<T, I>(items: I) -> List<T>
where
    T: Clone + 'static,
    I: IntoIterator<Item = T>,
{
    List::mutable(items.into_iter().collect(), Features::empty(), StorageKind::Array)
}

/// A mutable list backed by linked nodes. Positional access is linear.
pub fn linked_list<T, I>(items: I) -> List<T>
where
    T: Clone + 'static,
    I: IntoIterator<Item = T>,
{
    List::mutable(items.into_iter().collect(), Features::empty(), StorageKind::Linked)
}

pub fn set<T, I>(items: I) -> Set<T>
where
    T: Clone + Eq + Hash + 'static,
    I: IntoIterator<Item = T>,
{
    Set::build(items.into_iter().collect(), Mutability::Immutable)
}

pub fn new_set<T, I>(items: I) -> Set<T>
where
    T: Clone + Eq + Hash + 'static,
    I: IntoIterator<Item = T>,
{
    Set::build(items.into_iter().collect(), Mutability::Mutable)
}

pub fn map<K, V, I>(entries: I) -> Map<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + 'static,
    I: IntoIterator<Item = (K, V)>,
{
    Map::build(entries.into_iter().collect(), Mutability::Immutable)
}

pub fn new_map<K, V, I>(entries: I) -> Map<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + 'static,
    I: IntoIterator<Item = (K, V)>,
{
    Map::build(entries.into_iter().collect(), Mutability::Mutable)
}

/// Creates an immutable [`List`](crate::List) of the given elements.
///
/// ```
/// let l = cadence::list![1, 2, 3];
/// assert!(l.is(cadence::Features::IMMUTABLE));
/// let empty: cadence::List<i32> = cadence::list![];
/// assert!(empty.is_canonical_empty());
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::List::empty()
    };
    ($($x:expr),+ $(,)?) => {
        $crate::list([$($x),+])
    };
}

/// Creates a mutable [`List`](crate::List) of the given elements.
#[macro_export]
macro_rules! new_list {
    () => {
        $crate::new_list(::std::vec::Vec::new())
    };
    ($($x:expr),+ $(,)?) => {
        $crate::new_list([$($x),+])
    };
}
