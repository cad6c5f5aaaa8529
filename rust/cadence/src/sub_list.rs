//! Offset windows over a mutable store with fail-fast comodification checks.
//!
//! A [`Window`] covers `[offset, offset + len)` of a store and records the store
//! generation it last agreed with. Every access revalidates that stamp; a window
//! that observes a foreign structural change fails with `ConcurrentModification`
//! and keeps failing. Structural changes made *through* a window update the
//! window and all enclosing windows to the new generation, so the chain of
//! nested sub-lists stays valid while siblings and the owner's other views go
//! stale.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use cadence_common::{Result, error::Error, verify_arg, verify_index};

use crate::config::StorageKind;
use crate::features::Features;
use crate::store::StoreRef;

pub(crate) struct Window<T> {
    store: StoreRef<T>,
    parent: Option<Rc<Window<T>>>,
    /// Absolute offset into the store.
    offset: usize,
    len: Cell<usize>,
    expected: Cell<u64>,
    traits: Cell<Features>,
}

impl<T: Clone> Window<T> {
    /// Creates a window over `[offset, offset + len)` of `store`.
    ///
    /// The caller has validated the bounds against the current store contents.
    pub fn over_store(store: StoreRef<T>, offset: usize, len: usize) -> Window<T> {
        let traits = store.traits();
        let expected = store.generation();
        Window {
            store,
            parent: None,
            offset,
            len: Cell::new(len),
            expected: Cell::new(expected),
            traits: Cell::new(traits),
        }
    }

    /// Creates the nested window `[from, to)` of `parent`, relative to the parent.
    pub fn nested(parent: &Rc<Window<T>>, from: usize, to: usize) -> Result<Window<T>> {
        parent.check()?;
        verify_arg!(from, from <= to);
        if to > parent.len() {
            return Err(Error::index_out_of_range(to, parent.len()));
        }
        Ok(Window {
            store: parent.store.clone(),
            parent: Some(parent.clone()),
            offset: parent.offset + from,
            len: Cell::new(to - from),
            expected: Cell::new(parent.expected.get()),
            traits: Cell::new(parent.traits.get()),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn traits(&self) -> Features {
        self.traits.get()
    }

    pub fn set_traits(&self, traits: Features) {
        self.traits.set(traits);
    }

    pub fn store(&self) -> &StoreRef<T> {
        &self.store
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.store.kind()
    }

    /// Fails if the store changed structurally behind this window's back.
    pub fn check(&self) -> Result<()> {
        let found = self.store.generation();
        let expected = self.expected.get();
        if found == expected {
            Ok(())
        } else {
            log::debug!(
                "sub-list [{}, {}) is stale: expected generation {expected}, found {found}",
                self.offset,
                self.offset + self.len()
            );
            Err(Error::concurrent_modification(expected, found))
        }
    }

    /// Validated generation of the backing store.
    pub fn generation(&self) -> Result<u64> {
        self.check()?;
        Ok(self.expected.get())
    }

    pub fn get(&self, index: usize) -> Result<T> {
        self.check()?;
        verify_index!(index, self.len());
        let store = self.store.read()?;
        store
            .get(self.offset + index)
            .cloned()
            .ok_or_else(|| Error::index_out_of_range(index, self.len()))
    }

    /// Replaces an element. Not a structural change: the generation is kept.
    pub fn set(&self, index: usize, value: T) -> Result<T> {
        self.check()?;
        verify_index!(index, self.len());
        self.store.replace(self.offset + index, value)
    }

    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        self.check()?;
        verify_index!(index, self.len() + 1);
        let offset = self.offset;
        let ((), generation) = self.store.modify(|items| items.insert(offset + index, value))?;
        self.commit(1, generation);
        Ok(())
    }

    pub fn remove(&self, index: usize) -> Result<T> {
        self.check()?;
        verify_index!(index, self.len());
        let offset = self.offset;
        let (value, generation) = self.store.modify(|items| items.remove(offset + index))?;
        self.commit(-1, generation);
        value.ok_or_else(|| Error::index_out_of_range(index, self.len()))
    }

    /// Applies `f` to the window contents in place.
    pub fn edit<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R> {
        self.check()?;
        let old_len = self.len();
        let offset = self.offset;
        let ((result, new_len), generation) =
            self.store.modify(|items| items.splice(offset, old_len, f))?;
        self.commit(new_len as isize - old_len as isize, generation);
        Ok(result)
    }

    pub fn scan(&self, f: &mut dyn FnMut(&T) -> ControlFlow<()>) -> Result<bool> {
        self.check()?;
        let store = self.store.read()?;
        Ok(store.scan_range(self.offset, self.len(), f))
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.check()?;
        let store = self.store.read()?;
        Ok(store.to_vec_range(self.offset, self.len()))
    }

    /// Moves this window and every enclosing window to `generation`, adjusting
    /// their lengths by `delta`.
    fn commit(&self, delta: isize, generation: u64) {
        let mut window = Some(self);
        while let Some(w) = window {
            w.len.set(w.len.get().wrapping_add_signed(delta));
            w.expected.set(generation);
            window = w.parent.as_deref();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Storage, StoreCell};

    fn store(items: Vec<i32>) -> StoreRef<i32> {
        StoreCell::shared(Storage::new(StorageKind::Array, items), Features::empty())
    }

    #[test]
    fn test_window_reads_and_bounds() {
        let store = store(vec![0, 1, 2, 3, 4]);
        let w = Window::over_store(store, 1, 2);
        assert_eq!(w.get(0).unwrap(), 1);
        assert_eq!(w.get(1).unwrap(), 2);
        assert!(w.get(2).is_err());
        assert_eq!(w.to_vec().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_foreign_change_invalidates() {
        let store = store(vec![0, 1, 2, 3, 4]);
        let w = Window::over_store(store.clone(), 1, 3);
        store.modify(|items| items.insert(5, 99)).unwrap();
        assert!(w.get(0).unwrap_err().is_concurrent_modification());
        assert!(w.to_vec().unwrap_err().is_concurrent_modification());
    }

    #[test]
    fn test_nested_edit_updates_chain() {
        let store = store((0..10).collect());
        let outer = Rc::new(Window::over_store(store.clone(), 2, 6));
        let inner = Rc::new(Window::nested(&outer, 1, 4).unwrap());
        let sibling = Window::nested(&outer, 0, 2).unwrap();
        assert_eq!(inner.to_vec().unwrap(), vec![3, 4, 5]);

        inner.insert(0, 100).unwrap();
        inner.edit(|v| v.retain(|x| *x != 4)).unwrap();

        assert_eq!(inner.to_vec().unwrap(), vec![100, 3, 5]);
        assert_eq!(outer.to_vec().unwrap(), vec![2, 100, 3, 5, 6, 7]);
        assert_eq!(outer.len(), 6);
        assert!(sibling.get(0).unwrap_err().is_concurrent_modification());
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_set_keeps_generation() {
        let store = store(vec![1, 2, 3]);
        let w = Window::over_store(store.clone(), 0, 3);
        assert_eq!(w.set(1, 20).unwrap(), 2);
        assert_eq!(store.generation(), 0);
        assert_eq!(w.remove(0).unwrap(), 1);
        assert_eq!(w.to_vec().unwrap(), vec![20, 3]);
    }

    #[test]
    fn test_nested_bounds() {
        let store = store(vec![1, 2, 3]);
        let outer = Rc::new(Window::over_store(store, 0, 2));
        assert!(Window::nested(&outer, 2, 1).is_err());
        assert!(Window::nested(&outer, 0, 3).is_err());
    }
}
