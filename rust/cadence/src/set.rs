//! Insertion-ordered sets of unique elements.

use std::fmt;
use std::hash::Hash;
use std::ops::ControlFlow;

use ahash::AHashSet;
use cadence_common::Result;

use crate::config::StorageKind;
use crate::features::{Features, Mutability};
use crate::iter::Iter;
use crate::list::List;
use crate::sequence::Sequence;

/// Unique elements in insertion order, on top of a [`List`].
///
/// Follows the same mutability rules as lists: `insert` and `remove` on a
/// mutable set change it in place and return it, immutable sets return a new
/// set.
pub struct Set<T> {
    list: List<T>,
}

impl<T> Clone for Set<T> {
    fn clone(&self) -> Self {
        Set {
            list: self.list.clone(),
        }
    }
}

impl<T: Clone + Eq + Hash + 'static> Set<T> {
    pub fn empty() -> Set<T> {
        Set {
            list: List::empty(),
        }
    }

    /// Builds a set from `items`, dropping later duplicates.
    pub(crate) fn build(mut items: Vec<T>, mutability: Mutability) -> Set<T> {
        let mut seen = AHashSet::with_capacity(items.len());
        items.retain(|x| seen.insert(x.clone()));
        let list = match mutability {
            Mutability::Immutable => List::immutable(items, Features::empty()),
            Mutability::Mutable => List::mutable(items, Features::empty(), StorageKind::Array),
            Mutability::ReadOnlyMutable => {
                List::mutable(items, Features::empty(), StorageKind::Array).read_only()
            }
        };
        Set { list }
    }

    pub fn mutability(&self) -> Mutability {
        self.list.mutability()
    }

    pub fn features(&self) -> Features {
        self.list.features()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, value: &T) -> Result<bool> {
        Sequence::contains(&self.list, value)
    }

    /// Adds `value` unless an equal element is present.
    pub fn insert(&self, value: T) -> Result<Set<T>> {
        if self.contains(&value)? {
            return Ok(self.clone());
        }
        Ok(Set {
            list: self.list.append(value)?,
        })
    }

    pub fn remove(&self, value: &T) -> Result<Set<T>> {
        Ok(Set {
            list: self.list.remove(value)?,
        })
    }

    /// Elements of `self` followed by the elements of `other` not in `self`.
    pub fn union(&self, other: &Set<T>) -> Result<Set<T>> {
        let present = self.elements()?;
        let extra: Vec<T> = other
            .list
            .to_vec()?
            .into_iter()
            .filter(|x| !present.contains(x))
            .collect();
        Ok(Set {
            list: self.list.append_all(extra)?,
        })
    }

    pub fn intersection(&self, other: &Set<T>) -> Result<Set<T>> {
        let keep = other.elements()?;
        Ok(Set {
            list: self.list.filter(|x| keep.contains(x))?,
        })
    }

    pub fn difference(&self, other: &Set<T>) -> Result<Set<T>> {
        let excluded = other.elements()?;
        Ok(Set {
            list: self.list.remove_if(|x| excluded.contains(x))?,
        })
    }

    fn elements(&self) -> Result<AHashSet<T>> {
        let mut elements = AHashSet::with_capacity(self.len());
        self.list.scan(&mut |x| {
            elements.insert(x.clone());
            ControlFlow::Continue(())
        })?;
        Ok(elements)
    }

    pub fn iter(&self) -> Iter<T> {
        self.list.iter()
    }

    /// The elements as a list sharing this set's storage. The list is read-only
    /// so it cannot introduce duplicates.
    pub fn to_list(&self) -> List<T> {
        self.list.read_only()
    }

    pub fn read_only(&self) -> Set<T> {
        Set {
            list: self.list.read_only(),
        }
    }

    pub fn snapshot(&self) -> Result<Set<T>> {
        Ok(Set {
            list: self.list.snapshot()?,
        })
    }

    pub fn same_instance(&self, other: &Set<T>) -> bool {
        self.list.same_instance(&other.list)
    }
}

impl<T: Clone + Eq + Hash + 'static> Sequence<T> for Set<T> {
    fn features(&self) -> Features {
        self.list.features()
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn get(&self, index: usize) -> Result<T> {
        self.list.get(index)
    }

    fn try_each(&self, f: &mut dyn FnMut(&T) -> ControlFlow<()>) -> Result<bool> {
        self.list.scan(f)
    }
}

impl<T: Clone + Eq + Hash + 'static> PartialEq for Set<T> {
    /// Sets are equal when they hold the same elements, in any order.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        match (self.elements(), other.elements()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Clone + Eq + Hash + fmt::Debug + 'static> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.list.to_vec() {
            Ok(items) => f.debug_set().entries(items).finish(),
            Err(e) => write!(f, "Set(<{e}>)"),
        }
    }
}
