//! Owned, generation-stamped storage behind mutable lists and their windows.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::LinkedList;
use std::ops::ControlFlow;
use std::rc::Rc;

use cadence_common::{Result, error::Error};

use crate::config::StorageKind;
use crate::features::Features;

pub(crate) type StoreRef<T> = Rc<StoreCell<T>>;

/// Element storage of a mutable list.
pub(crate) enum Storage<T> {
    Array(Vec<T>),
    Linked(LinkedList<T>),
}

impl<T> Storage<T> {
    pub fn new(kind: StorageKind, items: Vec<T>) -> Storage<T> {
        match kind {
            StorageKind::Array => Storage::Array(items),
            StorageKind::Linked => Storage::Linked(items.into_iter().collect()),
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            Storage::Array(_) => StorageKind::Array,
            Storage::Linked(_) => StorageKind::Linked,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Storage::Array(v) => v.len(),
            Storage::Linked(l) => l.len(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            Storage::Array(v) => v.get(index),
            Storage::Linked(l) => l.iter().nth(index),
        }
    }

    /// Replaces the element at `index`, returning the previous one, or `None`
    /// when `index` is out of bounds.
    pub fn replace(&mut self, index: usize, value: T) -> Option<T> {
        let slot = match self {
            Storage::Array(v) => v.get_mut(index)?,
            Storage::Linked(l) => l.iter_mut().nth(index)?,
        };
        Some(std::mem::replace(slot, value))
    }

    /// The caller guarantees `index <= len`.
    pub fn insert(&mut self, index: usize, value: T) {
        match self {
            Storage::Array(v) => v.insert(index, value),
            Storage::Linked(l) => {
                let mut tail = l.split_off(index);
                l.push_back(value);
                l.append(&mut tail);
            }
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        match self {
            Storage::Array(v) => Some(v.remove(index)),
            Storage::Linked(l) => {
                let mut tail = l.split_off(index);
                let value = tail.pop_front();
                l.append(&mut tail);
                value
            }
        }
    }

    /// Visits `[offset, offset + len)` by reference. Returns `false` if `f` stopped early.
    pub fn scan_range(
        &self,
        offset: usize,
        len: usize,
        f: &mut dyn FnMut(&T) -> ControlFlow<()>,
    ) -> bool {
        match self {
            Storage::Array(v) => v[offset..offset + len].iter().all(|x| f(x).is_continue()),
            Storage::Linked(l) => l
                .iter()
                .skip(offset)
                .take(len)
                .all(|x| f(x).is_continue()),
        }
    }

    pub fn to_vec_range(&self, offset: usize, len: usize) -> Vec<T>
    where
        T: Clone,
    {
        match self {
            Storage::Array(v) => v[offset..offset + len].to_vec(),
            Storage::Linked(l) => l.iter().skip(offset).take(len).cloned().collect(),
        }
    }

    /// Applies `f` to the elements in `[offset, offset + len)` as a `Vec` and
    /// writes the (possibly resized) result back in place.
    ///
    /// Returns the value produced by `f` and the new length of the range.
    pub fn splice<R>(
        &mut self,
        offset: usize,
        len: usize,
        f: impl FnOnce(&mut Vec<T>) -> R,
    ) -> (R, usize) {
        match self {
            Storage::Array(v) if offset == 0 && len == v.len() => {
                let result = f(v);
                (result, v.len())
            }
            Storage::Array(v) => {
                let mut range: Vec<T> = v.drain(offset..offset + len).collect();
                let result = f(&mut range);
                let new_len = range.len();
                v.splice(offset..offset, range);
                (result, new_len)
            }
            Storage::Linked(l) => {
                let mut range_and_rest = l.split_off(offset);
                let mut rest = range_and_rest.split_off(len);
                let mut range: Vec<T> = range_and_rest.into_iter().collect();
                let result = f(&mut range);
                let new_len = range.len();
                l.extend(range);
                l.append(&mut rest);
                (result, new_len)
            }
        }
    }
}

/// Shared cell holding a mutable list's storage, traits and generation counter.
///
/// The generation is bumped on every structural change (size or order), never
/// on element replacement. Views and cursors record it and fail once it moves on.
/// Generation and traits live outside the `RefCell` so they can be read and
/// toggled while the storage is borrowed.
pub(crate) struct StoreCell<T> {
    kind: StorageKind,
    len: Cell<usize>,
    generation: Cell<u64>,
    traits: Cell<Features>,
    items: RefCell<Storage<T>>,
}

impl<T> StoreCell<T> {
    pub fn shared(items: Storage<T>, traits: Features) -> StoreRef<T> {
        let kind = items.kind();
        let traits = match kind {
            StorageKind::Array => traits | Features::RANDOM_ACCESS,
            StorageKind::Linked => traits - Features::RANDOM_ACCESS,
        };
        Rc::new(StoreCell {
            kind,
            len: Cell::new(items.len()),
            generation: Cell::new(0),
            traits: Cell::new((traits | Features::BASE) - Features::IDENTITY),
            items: RefCell::new(items),
        })
    }

    #[inline]
    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    #[inline]
    pub fn traits(&self) -> Features {
        self.traits.get()
    }

    pub fn set_traits(&self, traits: Features) {
        self.traits.set(traits - Features::IDENTITY);
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Number of stored elements as of the last committed change.
    #[inline]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Applies a structural change and returns its result with the new generation.
    pub fn modify<R>(&self, f: impl FnOnce(&mut Storage<T>) -> R) -> Result<(R, u64)> {
        let mut items = self.write()?;
        let result = f(&mut items);
        let len = items.len();
        drop(items);
        self.len.set(len);
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        Ok((result, generation))
    }

    /// Replaces one element. Not a structural change: the generation is kept.
    pub fn replace(&self, index: usize, value: T) -> Result<T> {
        self.write()?
            .replace(index, value)
            .ok_or_else(|| Error::index_out_of_range(index, self.len()))
    }

    /// Removes one element, bumping the generation.
    pub fn remove(&self, index: usize) -> Result<T> {
        let (value, _) = self.modify(|items| items.remove(index))?;
        value.ok_or_else(|| Error::index_out_of_range(index, self.len()))
    }

    /// Borrows the storage for reading.
    ///
    /// Fails only when called from inside an in-place edit of the same store,
    /// i.e. while its structure is in flux.
    pub fn read(&self) -> Result<Ref<'_, Storage<T>>> {
        self.items.try_borrow().map_err(|_| self.in_flux())
    }

    /// Borrows the storage for writing.
    ///
    /// Fails when the storage is already borrowed by a traversal further up the
    /// stack: writing now would invalidate that traversal.
    fn write(&self) -> Result<RefMut<'_, Storage<T>>> {
        self.items.try_borrow_mut().map_err(|_| self.in_flux())
    }

    #[cold]
    fn in_flux(&self) -> Error {
        let generation = self.generation();
        log::debug!("re-entrant access to a store at generation {generation}");
        Error::concurrent_modification(generation, generation + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(items: Vec<i32>) -> [Storage<i32>; 2] {
        [
            Storage::new(StorageKind::Array, items.clone()),
            Storage::new(StorageKind::Linked, items),
        ]
    }

    #[test]
    fn test_positional_ops() {
        for mut s in both(vec![1, 2, 3]) {
            s.insert(1, 10);
            s.insert(4, 20);
            assert_eq!(s.to_vec_range(0, s.len()), vec![1, 10, 2, 3, 20]);
            assert_eq!(s.remove(0), Some(1));
            assert_eq!(s.replace(3, 30), Some(20));
            assert_eq!(s.replace(4, 0), None);
            assert_eq!(s.remove(4), None);
            assert_eq!(s.get(3), Some(&30));
            assert_eq!(s.get(4), None);
        }
    }

    #[test]
    fn test_splice_middle() {
        for mut s in both(vec![0, 1, 2, 3, 4, 5]) {
            let (removed, new_len) = s.splice(2, 3, |v| {
                v.retain(|x| x % 2 == 0);
                v.push(9);
                3 - v.len() + 1
            });
            assert_eq!(new_len, 3);
            assert_eq!(removed, 1);
            assert_eq!(s.to_vec_range(0, s.len()), vec![0, 1, 2, 4, 9, 5]);
        }
    }

    #[test]
    fn test_scan_range_stops() {
        for s in both(vec![1, 2, 3, 4]) {
            let mut seen = Vec::new();
            let completed = s.scan_range(1, 3, &mut |x| {
                seen.push(*x);
                if *x == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            assert!(!completed);
            assert_eq!(seen, vec![2, 3]);
        }
    }

    #[test]
    fn test_store_traits_follow_storage() {
        let cell = StoreCell::shared(
            Storage::new(StorageKind::Linked, vec![1]),
            Features::RANDOM_ACCESS,
        );
        assert!(!cell.traits().is(Features::RANDOM_ACCESS));
        assert_eq!(cell.kind(), StorageKind::Linked);
        let cell = StoreCell::shared(
            Storage::new(StorageKind::Array, vec![1]),
            Features::IMMUTABLE,
        );
        assert!(cell.traits().is(Features::RANDOM_ACCESS | Features::BASE));
        assert!(!cell.traits().intersects(Features::IDENTITY));
        cell.set_traits(cell.traits() | Features::LAZY | Features::READONLY);
        assert!(cell.traits().is(Features::LAZY));
        assert!(!cell.traits().is(Features::READONLY));
    }

    #[test]
    fn test_modify_commits_len_and_generation() {
        let cell = StoreCell::shared(
            Storage::new(StorageKind::Array, vec![1, 2]),
            Features::empty(),
        );
        let (value, generation) = cell.modify(|items| items.remove(0)).unwrap();
        assert_eq!((value, generation), (Some(1), 1));
        assert_eq!(cell.len(), 1);
        assert_eq!(cell.replace(0, 5).unwrap(), 2);
        assert_eq!(cell.generation(), 1);
    }

    #[test]
    fn test_reentrant_access_is_reported() {
        let cell = StoreCell::shared(
            Storage::new(StorageKind::Array, vec![1, 2]),
            Features::empty(),
        );
        {
            let _reader = cell.read().unwrap();
            let err = cell.modify(|items| items.insert(0, 0)).unwrap_err();
            assert!(err.is_concurrent_modification());
            assert!(cell.read().is_ok());
        }
        let result = cell.modify(|_| {
            // Reads from inside an edit observe a store in flux.
            cell.read().is_err()
        });
        assert!(result.unwrap().0);
        assert_eq!(cell.generation(), 1);
        assert_eq!(cell.len(), 2);
    }
}
