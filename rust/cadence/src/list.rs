//! The sequence handle and its closed set of storage variants.
//!
//! A [`List`] is a cheap handle. Cloning it aliases the same instance: same
//! storage, same generation counter, same traits. Structural operations on a
//! mutable instance therefore "return `this`" by handing back another handle to
//! it, which [`List::same_instance`] can observe. [`List::snapshot`] is the only
//! way to obtain storage nobody else sees.

use std::fmt;
use std::ops::ControlFlow;
use std::rc::Rc;

use cadence_common::{Result, error::Error, verify_arg};
use cadence_shared_vec::SharedVec;

use crate::builder::ListBuilder;
use crate::composite::Composite;
use crate::config::{ListConfig, StorageKind};
use crate::features::{Features, Mutability};
use crate::iter::Iter;
use crate::store::{Storage, StoreCell, StoreRef};
use crate::sub_list::Window;
use crate::views::{LazyView, SliceView};

/// An ordered, finite sequence whose behavior is governed by its [`Features`].
pub struct List<T> {
    pub(crate) repr: Repr<T>,
    mutability: Mutability,
    /// Traits of handles that do not own a mutable store or window. Mutable
    /// stores and windows keep their traits in the shared cell so every handle
    /// to the instance observes toggles.
    traits: Features,
}

pub(crate) enum Repr<T> {
    /// The canonical empty value. Zero-sized, never allocates.
    Empty,
    /// Immutable elements, possibly a window of a larger shared allocation.
    Shared(SharedVec<T>),
    /// Mutable array or linked storage.
    Owned(StoreRef<T>),
    /// Offset window over a mutable store.
    Window(Rc<Window<T>>),
    /// Lazy concatenation of two lists.
    Composite(Rc<Composite<T>>),
    /// Lazy reverse / mapped / zipped / sliced view.
    View(Rc<dyn LazyView<T>>),
}

impl<T> Clone for Repr<T> {
    fn clone(&self) -> Self {
        match self {
            Repr::Empty => Repr::Empty,
            Repr::Shared(items) => Repr::Shared(items.clone()),
            Repr::Owned(store) => Repr::Owned(store.clone()),
            Repr::Window(window) => Repr::Window(window.clone()),
            Repr::Composite(composite) => Repr::Composite(composite.clone()),
            Repr::View(view) => Repr::View(view.clone()),
        }
    }
}

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        List {
            repr: self.repr.clone(),
            mutability: self.mutability,
            traits: self.traits,
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::empty()
    }
}

impl<T> List<T> {
    /// The canonical empty list: immutable, zero-sized, shared by value.
    pub const fn empty() -> List<T> {
        List {
            repr: Repr::Empty,
            mutability: Mutability::Immutable,
            traits: Features::BASE.union(Features::RANDOM_ACCESS),
        }
    }

    #[inline]
    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    /// `true` for the canonical empty value.
    pub fn is_canonical_empty(&self) -> bool {
        matches!(self.repr, Repr::Empty)
    }
}

impl<T: Clone + 'static> List<T> {
    pub(crate) fn from_parts(repr: Repr<T>, mutability: Mutability, traits: Features) -> List<T> {
        let traits = traits - Features::IMMUTABLE;
        let traits = if mutability.is_mutable() {
            traits - Features::READONLY
        } else {
            traits
        };
        List {
            repr,
            mutability,
            traits,
        }
    }

    pub(crate) fn from_shared(items: SharedVec<T>, traits: Features) -> List<T> {
        let traits = traits | Features::BASE | Features::RANDOM_ACCESS;
        if items.is_empty() {
            List::from_parts(Repr::Empty, Mutability::Immutable, traits)
        } else {
            List::from_parts(Repr::Shared(items), Mutability::Immutable, traits)
        }
    }

    pub(crate) fn immutable(items: Vec<T>, traits: Features) -> List<T> {
        if items.is_empty() {
            List::from_parts(
                Repr::Empty,
                Mutability::Immutable,
                traits | Features::BASE | Features::RANDOM_ACCESS,
            )
        } else {
            List::from_shared(SharedVec::from_vec(items), traits)
        }
    }

    pub(crate) fn mutable(items: Vec<T>, traits: Features, kind: StorageKind) -> List<T> {
        let store = StoreCell::shared(Storage::new(kind, items), traits);
        List::from_parts(Repr::Owned(store), Mutability::Mutable, Features::empty())
    }

    pub(crate) fn from_view(
        view: Rc<dyn LazyView<T>>,
        mutability: Mutability,
        traits: Features,
    ) -> List<T> {
        List::from_parts(Repr::View(view), mutability, traits | Features::BASE)
    }

    /// Creates a mutable list as described by `config`.
    ///
    /// Immutable lists with a configuration are built through
    /// [`ListBuilder::with_config`].
    pub fn with_config<I>(config: &ListConfig, items: I) -> Result<List<T>>
    where
        I: IntoIterator<Item = T>,
    {
        config.validate()?;
        let mut buffer = match config.storage {
            StorageKind::Array => Vec::with_capacity(config.initial_capacity),
            StorageKind::Linked => Vec::new(),
        };
        buffer.extend(items);
        Ok(List::mutable(buffer, config.traits, config.storage))
    }

    /// Builds a result of an operation on a receiver in state `mutability`:
    /// immutable receivers produce immutable results, everything else a new
    /// mutable list.
    pub(crate) fn derived(mutability: Mutability, items: Vec<T>, traits: Features) -> List<T> {
        match mutability {
            Mutability::Immutable => ListBuilder::from_vec(items).with_traits(traits).to_list(),
            Mutability::Mutable | Mutability::ReadOnlyMutable => {
                List::mutable(items, traits, StorageKind::Array)
            }
        }
    }

    // Traits

    pub(crate) fn traits(&self) -> Features {
        match (&self.repr, self.mutability) {
            (Repr::Owned(store), Mutability::Mutable) => store.traits(),
            (Repr::Window(window), Mutability::Mutable) => window.traits(),
            _ => self.traits,
        }
    }

    /// Returns the capability traits of this instance.
    ///
    /// The result is a copy; changing it has no effect on the list.
    pub fn features(&self) -> Features {
        self.traits() | self.mutability.identity()
    }

    #[inline]
    pub fn is(&self, feature: Features) -> bool {
        self.features().is(feature)
    }

    /// Traits every result derived from this list starts from.
    pub(crate) fn inherited_traits(&self) -> Features {
        self.traits() & Features::INHERITED
    }

    /// Sets or clears toggleable traits. Mutable instances change in place and
    /// return themselves; other instances return a new handle over the same storage.
    pub(crate) fn toggled(&self, feature: Features, on: bool) -> List<T> {
        debug_assert!(Features::TOGGLEABLE.contains(feature));
        let mut traits = self.traits();
        traits.set(feature, on);
        match (&self.repr, self.mutability) {
            (Repr::Owned(store), Mutability::Mutable) => {
                store.set_traits(traits);
                self.clone()
            }
            (Repr::Window(window), Mutability::Mutable) => {
                window.set_traits(traits);
                self.clone()
            }
            _ => List::from_parts(self.repr.clone(), self.mutability, traits),
        }
    }

    /// Marks the list `LAZY`: concatenation builds composite views, and
    /// `reverse`, `map` and `zip` return views.
    pub fn lazy(&self) -> List<T> {
        self.toggled(Features::LAZY, true)
    }

    /// Clears `LAZY`. A composite or lazy view is materialized into storage of
    /// its own, keeping its mutability state.
    pub fn eager(&self) -> Result<List<T>> {
        match self.repr {
            Repr::Composite(_) | Repr::View(_) => {
                log::trace!("eager: materializing a {}-element view", self.len());
                Ok(self.snapshot()?.toggled(Features::LAZY, false))
            }
            _ => Ok(self.toggled(Features::LAZY, false)),
        }
    }

    /// Marks the list `PARALLEL`. The marker is for callers choosing an execution
    /// strategy; the list itself never runs anything concurrently.
    pub fn parallel(&self) -> List<T> {
        self.toggled(Features::PARALLEL, true)
    }

    pub fn sequential(&self) -> List<T> {
        self.toggled(Features::PARALLEL, false)
    }

    // Primitive reads

    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Empty => 0,
            Repr::Shared(items) => items.len(),
            Repr::Owned(store) => store.len(),
            Repr::Window(window) => window.len(),
            Repr::Composite(composite) => composite.len(),
            Repr::View(view) => view.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<T> {
        match &self.repr {
            Repr::Empty => Err(Error::index_out_of_range(index, 0)),
            Repr::Shared(items) => items
                .get(index)
                .cloned()
                .ok_or_else(|| Error::index_out_of_range(index, items.len())),
            Repr::Owned(store) => {
                let items = store.read()?;
                items
                    .get(index)
                    .cloned()
                    .ok_or_else(|| Error::index_out_of_range(index, items.len()))
            }
            Repr::Window(window) => window.get(index),
            Repr::Composite(composite) => composite.get(index),
            Repr::View(view) => {
                if index >= view.len() {
                    return Err(Error::index_out_of_range(index, view.len()));
                }
                view.get(index)
            }
        }
    }

    /// Generation of the backing store, validated for windows.
    ///
    /// `None` for lists without a mutable store of their own (immutable lists,
    /// composites and lazy views), which never report comodification themselves.
    pub fn generation(&self) -> Result<Option<u64>> {
        match &self.repr {
            Repr::Owned(store) => Ok(Some(store.generation())),
            Repr::Window(window) => window.generation().map(Some),
            _ => Ok(None),
        }
    }

    /// Fails with `ConcurrentModification` if this is a stale window or a
    /// composite over a stale child.
    pub(crate) fn check_live(&self) -> Result<()> {
        match &self.repr {
            Repr::Window(window) => window.check(),
            Repr::Composite(composite) => composite.check(),
            _ => Ok(()),
        }
    }

    /// `true` if both handles refer to the same instance with the same contract.
    pub fn same_instance(&self, other: &List<T>) -> bool {
        if self.mutability != other.mutability {
            return false;
        }
        match (&self.repr, &other.repr) {
            (Repr::Empty, Repr::Empty) => true,
            (Repr::Shared(a), Repr::Shared(b)) => a.ptr_eq(b),
            (Repr::Owned(a), Repr::Owned(b)) => Rc::ptr_eq(a, b),
            (Repr::Window(a), Repr::Window(b)) => Rc::ptr_eq(a, b),
            (Repr::Composite(a), Repr::Composite(b)) => Rc::ptr_eq(a, b),
            (Repr::View(a), Repr::View(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => false,
        }
    }

    /// Visits the elements in order by reference until `f` breaks.
    ///
    /// Returns `Ok(true)` if every element was visited. Structural changes to
    /// this list from inside `f` fail with `ConcurrentModification`.
    pub(crate) fn scan(&self, f: &mut dyn FnMut(&T) -> ControlFlow<()>) -> Result<bool> {
        match &self.repr {
            Repr::Empty => Ok(true),
            Repr::Shared(items) => Ok(items.iter().all(|x| f(x).is_continue())),
            Repr::Owned(store) => {
                let items = store.read()?;
                Ok(items.scan_range(0, items.len(), f))
            }
            Repr::Window(window) => window.scan(f),
            Repr::Composite(composite) => composite.scan(f),
            Repr::View(view) => {
                for index in 0..view.len() {
                    if f(&view.get(index)?).is_break() {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        match &self.repr {
            Repr::Empty => Ok(Vec::new()),
            Repr::Shared(items) => Ok(items.to_vec()),
            Repr::Owned(store) => {
                let items = store.read()?;
                Ok(items.to_vec_range(0, items.len()))
            }
            Repr::Window(window) => window.to_vec(),
            Repr::Composite(composite) => composite.to_vec(),
            Repr::View(view) => (0..view.len()).map(|i| view.get(i)).collect(),
        }
    }

    /// Fail-fast iterator over the elements.
    ///
    /// Yields `Err(ConcurrentModification)` once, and then stops, if the list
    /// changes structurally behind the iterator's back.
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.clone())
    }

    pub(crate) fn storage_kind(&self) -> StorageKind {
        match &self.repr {
            Repr::Owned(store) => store.kind(),
            Repr::Window(window) => window.storage_kind(),
            _ => StorageKind::Array,
        }
    }

    // In-place primitives. Only mutable instances accept them.

    /// Replaces the element at `index` and returns the previous one.
    ///
    /// Element replacement is not a structural change: views stay valid.
    pub fn set(&self, index: usize, value: T) -> Result<T> {
        self.mutability.require_mutable("set")?;
        let previous = match &self.repr {
            Repr::Owned(store) => {
                if index >= store.len() {
                    return Err(Error::index_out_of_range(index, store.len()));
                }
                store.replace(index, value)?
            }
            Repr::Window(window) => window.set(index, value)?,
            _ => unreachable!("only stores and windows are mutable"),
        };
        self.clear_sorted();
        Ok(previous)
    }

    pub fn add(&self, value: T) -> Result<()> {
        self.add_at(self.len(), value)
    }

    pub fn add_at(&self, index: usize, value: T) -> Result<()> {
        self.mutability.require_mutable("add")?;
        match &self.repr {
            Repr::Owned(store) => {
                if index > store.len() {
                    return Err(Error::index_out_of_range(index, store.len()));
                }
                store.modify(|items| items.insert(index, value))?;
            }
            Repr::Window(window) => window.insert(index, value)?,
            _ => unreachable!("only stores and windows are mutable"),
        }
        self.clear_sorted();
        Ok(())
    }

    pub fn add_all<I>(&self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.mutability.require_mutable("add")?;
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Ok(());
        }
        self.edit("add", |v| v.extend(items))?;
        self.clear_sorted();
        Ok(())
    }

    pub fn remove_at(&self, index: usize) -> Result<T> {
        self.mutability.require_mutable("remove")?;
        match &self.repr {
            Repr::Owned(store) => {
                if index >= store.len() {
                    return Err(Error::index_out_of_range(index, store.len()));
                }
                store.remove(index)
            }
            Repr::Window(window) => window.remove(index),
            _ => unreachable!("only stores and windows are mutable"),
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.edit("clear", |v| v.clear())
    }

    /// Applies `f` to the elements of a mutable instance in place and records
    /// a structural change.
    pub(crate) fn edit<R>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Vec<T>) -> R,
    ) -> Result<R> {
        self.mutability.require_mutable(operation)?;
        match &self.repr {
            Repr::Owned(store) => {
                let len = store.len();
                Ok(store.modify(|items| items.splice(0, len, f).0)?.0)
            }
            Repr::Window(window) => window.edit(f),
            _ => unreachable!("only stores and windows are mutable"),
        }
    }

    /// Drops `SORTED` after a change that may break the order. A change through
    /// a window also unsorts the store it belongs to.
    pub(crate) fn clear_sorted(&self) {
        if !self.traits().is(Features::SORTED) {
            return;
        }
        self.toggled(Features::SORTED, false);
        if let Repr::Window(window) = &self.repr {
            let store = window.store();
            store.set_traits(store.traits() - Features::SORTED);
        }
    }

    // Views and copies

    /// Returns the window `[from, to)`.
    ///
    /// Over a mutable store this is a live view: changes through it reach the
    /// store, and it fails with `ConcurrentModification` once the store changes
    /// structurally through any other handle. Immutable lists share their
    /// storage with the result.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<List<T>> {
        verify_arg!(from, from <= to);
        let len = self.len();
        if to > len {
            return Err(Error::index_out_of_range(to, len));
        }
        match &self.repr {
            Repr::Empty => Ok(self.clone()),
            Repr::Shared(items) => Ok(List::from_shared(items.slice(from..to), self.traits)),
            Repr::Owned(store) => {
                let window = Window::over_store(store.clone(), from, to - from);
                Ok(List::from_parts(
                    Repr::Window(Rc::new(window)),
                    self.mutability,
                    self.traits(),
                ))
            }
            Repr::Window(parent) => {
                let window = Window::nested(parent, from, to)?;
                Ok(List::from_parts(
                    Repr::Window(Rc::new(window)),
                    self.mutability,
                    self.traits(),
                ))
            }
            Repr::Composite(composite) => composite.sub_list(from, to),
            Repr::View(_) => Ok(List::from_view(
                Rc::new(SliceView::new(self.clone(), from, to)),
                self.mutability,
                self.traits(),
            )),
        }
    }

    /// Returns a handle that shares this list's storage but refuses in-place
    /// mutation. Structural operations on it copy into a new mutable list.
    pub fn read_only(&self) -> List<T> {
        match self.mutability {
            Mutability::Mutable => List::from_parts(
                self.repr.clone(),
                Mutability::ReadOnlyMutable,
                self.traits() | Features::READONLY,
            ),
            Mutability::Immutable | Mutability::ReadOnlyMutable => self.clone(),
        }
    }

    /// Copies the elements into storage owned by the result alone, keeping the
    /// mutability state and toggleable traits.
    pub fn snapshot(&self) -> Result<List<T>> {
        let items = self.to_vec()?;
        let traits = self.traits() & Features::TOGGLEABLE;
        log::trace!(
            "snapshot: copying {} elements of a {} list",
            items.len(),
            self.mutability.name()
        );
        Ok(match self.mutability {
            Mutability::Immutable => List::immutable(items, traits),
            Mutability::Mutable => List::mutable(items, traits, self.storage_kind()),
            Mutability::ReadOnlyMutable => {
                List::mutable(items, traits, self.storage_kind()).read_only()
            }
        })
    }
}

impl<T: Clone + PartialEq + 'static> PartialEq for List<T> {
    /// Content equality. A stale view is equal to nothing.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .zip(other.iter())
            .all(|pair| matches!(pair, (Ok(a), Ok(b)) if a == b))
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_vec() {
            Ok(items) => f.debug_list().entries(items).finish(),
            Err(e) => write!(f, "List(<{e}>)"),
        }
    }
}

impl<T: Clone + 'static> FromIterator<T> for List<T> {
    /// Collects into an immutable list.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<ListBuilder<T>>().to_list()
    }
}

impl<T: Clone + 'static> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        List::immutable(items, Features::empty())
    }
}

impl<'a, T: Clone + 'static> IntoIterator for &'a List<T> {
    type Item = Result<T>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{linked_list, list, new_list};

    #[test]
    fn test_empty_is_canonical() {
        let empty = List::<i32>::empty();
        assert!(empty.is_canonical_empty());
        assert!(empty.is(Features::IMMUTABLE));
        const EMPTY: List<i32> = List::empty();
        assert!(EMPTY.same_instance(&empty));
        assert!(list(Vec::<i32>::new()).is_canonical_empty());
        assert!(List::<i32>::from(vec![]).same_instance(&empty));
    }

    #[test]
    fn test_empty_results_keep_traits_without_storage() {
        let lazy = List::<i32>::immutable(Vec::new(), Features::LAZY);
        assert!(lazy.is_canonical_empty());
        assert!(lazy.is(Features::LAZY | Features::RANDOM_ACCESS | Features::IMMUTABLE));

        let filtered = List::<i32>::empty().parallel().filter(|x| *x > 0).unwrap();
        assert!(filtered.is_canonical_empty());
        assert!(filtered.is(Features::PARALLEL));
        assert!(list([1, 2]).take(0).unwrap().is_canonical_empty());
    }

    #[test]
    fn test_features_are_copies() {
        let l = new_list([1, 2, 3]);
        let mut features = l.features();
        features.insert(Features::IMMUTABLE);
        features.remove(Features::ORDERED);
        assert!(!l.is(Features::IMMUTABLE));
        assert!(l.is(Features::ORDERED));
        assert_eq!(l.mutability(), Mutability::Mutable);
    }

    #[test]
    fn test_primitives_on_mutable() {
        let l = new_list([1, 2, 3]);
        l.add(4).unwrap();
        l.add_at(0, 0).unwrap();
        assert_eq!(l.set(1, 10).unwrap(), 1);
        assert_eq!(l.remove_at(4).unwrap(), 4);
        assert_eq!(l.to_vec().unwrap(), vec![0, 10, 2, 3]);
        assert!(l.add_at(9, 9).is_err());
        l.clear().unwrap();
        assert!(l.is_empty());
        assert_eq!(l.generation().unwrap(), Some(4));
    }

    #[test]
    fn test_primitives_rejected_on_immutable() {
        let l = list([1, 2, 3]);
        for err in [
            l.add(4).unwrap_err(),
            l.set(0, 1).unwrap_err(),
            l.clear().unwrap_err(),
            l.remove_at(0).map(|_| ()).unwrap_err(),
        ] {
            assert!(matches!(
                err.kind(),
                cadence_common::error::ErrorKind::ImmutableMutation {
                    state: "immutable",
                    ..
                }
            ));
        }
        let ro = new_list([1]).read_only();
        assert!(ro.add(2).is_err());
        assert_eq!(ro.mutability(), Mutability::ReadOnlyMutable);
        assert!(ro.is(Features::READONLY));
    }

    #[test]
    fn test_toggles() {
        let m = new_list([1, 2]);
        let lazy = m.lazy();
        assert!(lazy.same_instance(&m));
        assert!(m.is(Features::LAZY));

        let i = list([1, 2]);
        let lazy = i.lazy();
        assert!(!i.is(Features::LAZY));
        assert!(lazy.is(Features::LAZY));
        assert!(lazy.is(Features::IMMUTABLE));
        assert!(!lazy.eager().unwrap().is(Features::LAZY));
        assert!(i.parallel().is(Features::PARALLEL));
        assert!(!i.parallel().sequential().is(Features::PARALLEL));
    }

    #[test]
    fn test_linked_storage() {
        let l = linked_list([1, 2, 3]);
        assert!(!l.is(Features::RANDOM_ACCESS));
        l.add_at(1, 5).unwrap();
        assert_eq!(l.get(1).unwrap(), 5);
        let sub = l.sub_list(1, 3).unwrap();
        assert!(!sub.is(Features::RANDOM_ACCESS));
        assert_eq!(sub.to_vec().unwrap(), vec![5, 2]);
        assert!(new_list([1]).sub_list(0, 1).unwrap().is(Features::RANDOM_ACCESS));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let m = new_list([1, 2, 3]);
        let snap = m.snapshot().unwrap();
        m.add(4).unwrap();
        assert_eq!(snap.to_vec().unwrap(), vec![1, 2, 3]);
        assert_eq!(snap.mutability(), Mutability::Mutable);
        assert!(!snap.same_instance(&m));

        let ro = m.read_only().snapshot().unwrap();
        assert_eq!(ro.mutability(), Mutability::ReadOnlyMutable);

        let i = list([1, 2, 3, 4]).sub_list(1, 3).unwrap();
        let snap = i.snapshot().unwrap();
        assert_eq!(snap, list([2, 3]));
        assert!(!snap.same_instance(&i));
    }

    #[test]
    fn test_sub_list_bounds() {
        let l = list([1, 2, 3]);
        assert!(matches!(
            l.sub_list(2, 1).unwrap_err().kind(),
            cadence_common::error::ErrorKind::InvalidArgument { .. }
        ));
        assert!(matches!(
            l.sub_list(1, 4).unwrap_err().kind(),
            cadence_common::error::ErrorKind::IndexOutOfRange { index: 4, len: 3 }
        ));
        assert_eq!(l.sub_list(1, 1).unwrap().len(), 0);
    }

    #[test]
    fn test_debug_and_eq() {
        assert_eq!(format!("{:?}", list([1, 2])), "[1, 2]");
        assert_eq!(new_list([1, 2]), list([1, 2]));
        assert_ne!(new_list([1, 2]), list([1, 3]));

        let b = new_list([1, 2, 3]);
        let v = b.sub_list(0, 2).unwrap();
        b.add(4).unwrap();
        assert!(format!("{v:?}").starts_with("List(<concurrent modification"));
        assert_ne!(v, v.clone());
    }
}
