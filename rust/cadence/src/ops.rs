//! Structural operations and the mutability decision table.
//!
//! Every operation below dispatches on the receiver's [`Mutability`]:
//!
//! - `Mutable`: the backing storage is changed in place, the generation is
//!   bumped and a handle to the receiver itself is returned.
//! - `Immutable`: a new immutable list holding the result is returned. An empty
//!   receiver yields the canonical empty list without allocating.
//! - `ReadOnlyMutable`: the result is copied into a new mutable list.
//!
//! Under `LAZY`, `reverse`, `map` and `zip` return views and concatenation
//! returns a composite instead of copying.

use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::ControlFlow;
use std::rc::Rc;

use ahash::AHashSet;
use cadence_common::{Result, error::Error};
use itertools::{EitherOrBoth, Itertools};

use crate::composite::Composite;
use crate::features::{Features, Mutability};
use crate::list::{List, Repr};
use crate::views::{Mapped, Reverse, Zipped};

/// How a structural operation affects the order guarantee of its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    /// Keeps a subsequence: a sorted receiver stays sorted.
    Shrink,
    /// Adds elements.
    Grow,
    /// Moves or rewrites elements.
    Reorder,
    /// Produces a sorted result.
    Sort,
}

impl Shape {
    fn apply(self, traits: Features) -> Features {
        match self {
            Shape::Shrink => traits,
            Shape::Grow | Shape::Reorder => traits - Features::SORTED,
            Shape::Sort => traits | Features::SORTED,
        }
    }
}

impl<T: Clone + 'static> List<T> {
    /// Applies the decision table to a structural edit `f` of the elements.
    pub(crate) fn restructure(
        &self,
        operation: &'static str,
        shape: Shape,
        f: impl FnOnce(&mut Vec<T>),
    ) -> Result<List<T>> {
        match self.mutability() {
            Mutability::Mutable => {
                self.edit(operation, f)?;
                match shape {
                    Shape::Shrink => {}
                    Shape::Grow | Shape::Reorder => self.clear_sorted(),
                    Shape::Sort => {
                        self.toggled(Features::SORTED, true);
                    }
                }
                Ok(self.clone())
            }
            Mutability::Immutable => {
                let traits = shape.apply(self.traits() & Features::TOGGLEABLE);
                if self.is_empty() && shape != Shape::Grow {
                    return Ok(List::immutable(Vec::new(), traits));
                }
                let mut items = self.to_vec()?;
                f(&mut items);
                log::trace!("{operation}: built a new immutable list of {}", items.len());
                Ok(List::derived(Mutability::Immutable, items, traits))
            }
            Mutability::ReadOnlyMutable => {
                let traits = shape.apply(self.traits() & Features::TOGGLEABLE);
                let mut items = self.to_vec()?;
                f(&mut items);
                log::trace!(
                    "{operation}: copied a read-only list into a new mutable list of {}",
                    items.len()
                );
                Ok(List::mutable(items, traits, self.storage_kind()))
            }
        }
    }

    /// Traits of a lazy view over this list.
    fn view_traits(&self) -> Features {
        self.traits() & (Features::INHERITED | Features::RANDOM_ACCESS)
    }

    /// Keeps `[from, to)`. Immutable storage and composites are sliced without
    /// copying.
    fn slice_range(&self, operation: &'static str, from: usize, to: usize) -> Result<List<T>> {
        match (&self.repr, self.mutability()) {
            (Repr::Composite(_), _)
            | (Repr::Empty, _)
            | (Repr::Shared(_), Mutability::Immutable) => self.sub_list(from, to),
            _ => self.restructure(operation, Shape::Shrink, |items| {
                items.truncate(to);
                items.drain(..from);
            }),
        }
    }

    /// Keeps the first `n` elements.
    ///
    /// A negative `n` keeps the last `|n|` elements instead, i.e.
    /// `take(-k) == drop(len - k)`. Taking at least `len` elements returns the
    /// receiver itself.
    pub fn take(&self, n: isize) -> Result<List<T>> {
        self.check_live()?;
        let len = self.len();
        if n < 0 {
            return self.drop(len.saturating_sub(n.unsigned_abs()) as isize);
        }
        let n = n as usize;
        if n >= len {
            return Ok(self.clone());
        }
        self.slice_range("take", 0, n)
    }

    /// Removes the first `n` elements.
    ///
    /// A negative `n` removes the last `|n|` elements instead, i.e.
    /// `drop(-k) == take(len - k)`.
    pub fn drop(&self, n: isize) -> Result<List<T>> {
        self.check_live()?;
        let len = self.len();
        if n < 0 {
            return self.take(len.saturating_sub(n.unsigned_abs()) as isize);
        }
        let n = (n as usize).min(len);
        if n == 0 {
            return Ok(self.clone());
        }
        self.slice_range("drop", n, len)
    }

    /// All elements but the first.
    pub fn tail(&self) -> Result<List<T>> {
        if self.is_empty() {
            return Err(Error::empty_sequence("tail"));
        }
        self.drop(1)
    }

    fn prefix_len(&self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        let mut n = 0;
        self.scan(&mut |x| {
            if pred(x) {
                n += 1;
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })?;
        Ok(n)
    }

    pub fn take_while(&self, pred: impl Fn(&T) -> bool) -> Result<List<T>> {
        self.take_while_dyn(&pred)
    }

    pub(crate) fn take_while_dyn(&self, pred: &dyn Fn(&T) -> bool) -> Result<List<T>> {
        if let Repr::Composite(composite) = &self.repr {
            return composite.take_while(pred);
        }
        let n = self.prefix_len(pred)?;
        self.take(n as isize)
    }

    pub fn drop_while(&self, pred: impl Fn(&T) -> bool) -> Result<List<T>> {
        self.drop_while_dyn(&pred)
    }

    pub(crate) fn drop_while_dyn(&self, pred: &dyn Fn(&T) -> bool) -> Result<List<T>> {
        if let Repr::Composite(composite) = &self.repr {
            return composite.drop_while(pred);
        }
        let n = self.prefix_len(pred)?;
        self.drop(n as isize)
    }

    /// Keeps the elements matching `pred`.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Result<List<T>> {
        self.filter_dyn(&pred)
    }

    pub(crate) fn filter_dyn(&self, pred: &dyn Fn(&T) -> bool) -> Result<List<T>> {
        if let Repr::Composite(composite) = &self.repr {
            return composite.filter(pred);
        }
        self.restructure("filter", Shape::Shrink, |items| items.retain(|x| pred(x)))
    }

    /// Removes the elements matching `pred`.
    pub fn remove_if(&self, pred: impl Fn(&T) -> bool) -> Result<List<T>> {
        self.filter_dyn(&|x| !pred(x))
    }

    /// Transforms every element.
    ///
    /// The element type may change, so the result is always a new instance: a
    /// mapped view under `LAZY`, otherwise a new immutable list for immutable
    /// receivers and a new mutable list for the others. Composites map each
    /// side.
    pub fn map<R: Clone + 'static>(&self, f: impl Fn(T) -> R + 'static) -> Result<List<R>> {
        self.map_rc(Rc::new(f))
    }

    pub(crate) fn map_rc<R: Clone + 'static>(&self, f: Rc<dyn Fn(T) -> R>) -> Result<List<R>> {
        if let Repr::Composite(composite) = &self.repr {
            return composite.map(f);
        }
        if self.is(Features::LAZY) {
            let view = Mapped::new(self.clone(), f)?;
            return Ok(List::from_view(
                Rc::new(view),
                self.mutability().of_view(),
                self.view_traits(),
            ));
        }
        let items: Vec<R> = self.to_vec()?.into_iter().map(|x| f(x)).collect();
        Ok(List::derived(self.mutability(), items, self.inherited_traits()))
    }

    /// Transforms every element into zero or more elements. Always eager: the
    /// length of the result is unknown until every element has been visited.
    pub fn flat_map<R, I>(&self, f: impl Fn(T) -> I) -> Result<List<R>>
    where
        R: Clone + 'static,
        I: IntoIterator<Item = R>,
    {
        let items: Vec<R> = self.to_vec()?.into_iter().flat_map(f).collect();
        Ok(List::derived(self.mutability(), items, self.inherited_traits()))
    }

    /// Same-type transform following the decision table: mutable receivers are
    /// rewritten in place.
    pub fn replace_all(&self, f: impl Fn(T) -> T) -> Result<List<T>> {
        self.restructure("replace_all", Shape::Reorder, |items| {
            let old = std::mem::take(items);
            items.extend(old.into_iter().map(f));
        })
    }

    /// Removes duplicates, keeping the first occurrence of each element.
    ///
    /// Returns the receiver itself when it holds no duplicates; no result is
    /// built before the first duplicate is found.
    pub fn unique(&self) -> Result<List<T>>
    where
        T: Eq + Hash,
    {
        let mut seen = AHashSet::new();
        let distinct = self.scan(&mut |x| {
            if seen.insert(x.clone()) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })?;
        if distinct {
            return Ok(self.clone());
        }
        drop(seen);
        self.restructure("unique", Shape::Shrink, |items| {
            let mut seen = AHashSet::with_capacity(items.len());
            items.retain(|x| seen.insert(x.clone()));
        })
    }

    /// Sorts by the natural order of the elements. The result is tagged `SORTED`.
    ///
    /// Elements without a total natural order (some pair is incomparable, such
    /// as a floating-point NaN or two values of a product order) are left in
    /// their original order, and the result is still tagged `SORTED`.
    pub fn sort(&self) -> Result<List<T>>
    where
        T: PartialOrd,
    {
        self.restructure("sort", Shape::Sort, |items| match partial_sort_order(items) {
            Some(order) => {
                let mut slots: Vec<Option<T>> =
                    std::mem::take(items).into_iter().map(Some).collect();
                items.extend(order.into_iter().filter_map(|i| slots[i].take()));
            }
            None => log::warn!(
                "sort: {} elements have no total natural order, leaving them unsorted",
                items.len()
            ),
        })
    }

    /// Sorts with a comparator. The result is tagged `SORTED`.
    pub fn sort_by(&self, cmp: impl FnMut(&T, &T) -> Ordering) -> Result<List<T>> {
        self.restructure("sort", Shape::Sort, |items| items.sort_by(cmp))
    }

    /// Reverses the order of the elements.
    ///
    /// Under `LAZY` this returns a reverse view without copying; reversing a
    /// reverse view returns its source.
    pub fn reverse(&self) -> Result<List<T>> {
        if let Repr::View(view) = &self.repr {
            if let Some(source) = view.reversed_source() {
                return Ok(source.read_only());
            }
        }
        if self.is(Features::LAZY) {
            let view = Reverse::new(self.clone())?;
            return Ok(List::from_view(
                Rc::new(view),
                self.mutability().of_view(),
                self.view_traits(),
            ));
        }
        self.restructure("reverse", Shape::Reorder, |items| items.reverse())
    }

    // Append / prepend / insert

    /// Appends one element.
    pub fn append(&self, value: T) -> Result<List<T>> {
        match (&self.repr, self.mutability()) {
            (_, Mutability::Mutable) => {
                self.add(value)?;
                Ok(self.clone())
            }
            (Repr::Composite(_), _) => {
                self.concat(&List::immutable(vec![value], Features::empty()))
            }
            _ => self.restructure("append", Shape::Grow, |items| items.push(value)),
        }
    }

    /// Appends every element of a plain collection, eagerly.
    pub fn append_all<I>(&self, items: I) -> Result<List<T>>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_live()?;
        let tail: Vec<T> = items.into_iter().collect();
        if tail.is_empty() {
            return Ok(self.clone());
        }
        self.restructure("append", Shape::Grow, |items| items.extend(tail))
    }

    /// Appends another list.
    ///
    /// A `LAZY` receiver, or a composite, produces a composite view over both
    /// lists without copying. Otherwise the elements of `other` are copied
    /// following the decision table. Appending an empty list returns the receiver.
    pub fn concat(&self, other: &List<T>) -> Result<List<T>> {
        if self.is(Features::LAZY) || matches!(self.repr, Repr::Composite(_)) {
            return Composite::join(self, other);
        }
        self.check_live()?;
        other.check_live()?;
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty()
            && self.mutability() == Mutability::Immutable
            && other.mutability() == Mutability::Immutable
        {
            return Ok(other.clone());
        }
        let tail = other.to_vec()?;
        self.restructure("append", Shape::Grow, |items| items.extend(tail))
    }

    /// Prepends one element.
    pub fn prepend(&self, value: T) -> Result<List<T>> {
        match (&self.repr, self.mutability()) {
            (_, Mutability::Mutable) => {
                self.add_at(0, value)?;
                Ok(self.clone())
            }
            (Repr::Composite(_), _) => {
                self.prepend_list(&List::immutable(vec![value], Features::empty()))
            }
            _ => self.restructure("prepend", Shape::Grow, |items| items.insert(0, value)),
        }
    }

    /// Prepends every element of a plain collection, eagerly.
    pub fn prepend_all<I>(&self, items: I) -> Result<List<T>>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_live()?;
        let head: Vec<T> = items.into_iter().collect();
        if head.is_empty() {
            return Ok(self.clone());
        }
        self.restructure("prepend", Shape::Grow, |items| {
            items.splice(0..0, head);
        })
    }

    /// Prepends another list; see [`List::concat`].
    pub fn prepend_list(&self, other: &List<T>) -> Result<List<T>> {
        if self.is(Features::LAZY) || matches!(self.repr, Repr::Composite(_)) {
            return Composite::join(other, self);
        }
        self.check_live()?;
        other.check_live()?;
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty()
            && self.mutability() == Mutability::Immutable
            && other.mutability() == Mutability::Immutable
        {
            return Ok(other.clone());
        }
        let head = other.to_vec()?;
        self.restructure("prepend", Shape::Grow, |items| {
            items.splice(0..0, head);
        })
    }

    /// Inserts `value` before position `index` (`index == len` appends).
    pub fn insert(&self, index: usize, value: T) -> Result<List<T>> {
        self.check_live()?;
        if index > self.len() {
            return Err(Error::index_out_of_range(index, self.len()));
        }
        if self.mutability().is_mutable() {
            self.add_at(index, value)?;
            return Ok(self.clone());
        }
        self.restructure("insert", Shape::Grow, |items| items.insert(index, value))
    }

    pub fn insert_all<I>(&self, index: usize, items: I) -> Result<List<T>>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_live()?;
        if index > self.len() {
            return Err(Error::index_out_of_range(index, self.len()));
        }
        let inserted: Vec<T> = items.into_iter().collect();
        if inserted.is_empty() {
            return Ok(self.clone());
        }
        self.restructure("insert", Shape::Grow, |items| {
            items.splice(index..index, inserted);
        })
    }

    /// Removes the first element equal to `value`. Returns the receiver if
    /// there is none.
    pub fn remove(&self, value: &T) -> Result<List<T>>
    where
        T: PartialEq,
    {
        let mut index = 0;
        let missing = self.scan(&mut |x| {
            if x == value {
                ControlFlow::Break(())
            } else {
                index += 1;
                ControlFlow::Continue(())
            }
        })?;
        if missing {
            return Ok(self.clone());
        }
        self.remove_index(index)
    }

    /// Removes the element at `index`.
    pub fn remove_index(&self, index: usize) -> Result<List<T>> {
        self.check_live()?;
        if index >= self.len() {
            return Err(Error::index_out_of_range(index, self.len()));
        }
        if self.mutability().is_mutable() {
            self.remove_at(index)?;
            return Ok(self.clone());
        }
        self.restructure("remove", Shape::Shrink, |items| {
            items.remove(index);
        })
    }

    /// Replaces the element at `index`. Mutable receivers change in place
    /// without a structural change.
    pub fn update(&self, index: usize, value: T) -> Result<List<T>> {
        if index >= self.len() {
            return Err(Error::index_out_of_range(index, self.len()));
        }
        if self.mutability().is_mutable() {
            self.set(index, value)?;
            return Ok(self.clone());
        }
        self.restructure("update", Shape::Reorder, |items| items[index] = value)
    }

    /// Keeps only the elements matching `pred`, in place.
    pub fn retain(&self, pred: impl Fn(&T) -> bool) -> Result<()> {
        self.edit("retain", |items| items.retain(|x| pred(x)))
    }

    // Zipping

    fn zip_mutability<U>(&self, other: &List<U>) -> Mutability {
        self.mutability().join(other.mutability())
    }

    /// Pairs elements positionally, stopping at the shorter list.
    pub fn zip<U: Clone + 'static>(&self, other: &List<U>) -> Result<List<(T, U)>> {
        if self.is(Features::LAZY) {
            let view = Zipped::new(self.clone(), other.clone(), None)?;
            return Ok(List::from_view(
                Rc::new(view),
                self.zip_mutability(other),
                self.view_traits() & other.traits(),
            ));
        }
        let items: Vec<(T, U)> = self
            .to_vec()?
            .into_iter()
            .zip(other.to_vec()?)
            .collect();
        Ok(List::derived(
            self.zip_mutability(other),
            items,
            self.inherited_traits(),
        ))
    }

    /// Pairs elements positionally up to the longer list, padding the shorter
    /// side with `defaults`.
    pub fn zip_all<U: Clone + 'static>(
        &self,
        other: &List<U>,
        defaults: (T, U),
    ) -> Result<List<(T, U)>> {
        if self.is(Features::LAZY) {
            let view = Zipped::new(self.clone(), other.clone(), Some(defaults))?;
            return Ok(List::from_view(
                Rc::new(view),
                self.zip_mutability(other),
                self.view_traits() & other.traits(),
            ));
        }
        let (left_default, right_default) = defaults;
        let items: Vec<(T, U)> = self
            .to_vec()?
            .into_iter()
            .zip_longest(other.to_vec()?)
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => (a, b),
                EitherOrBoth::Left(a) => (a, right_default.clone()),
                EitherOrBoth::Right(b) => (left_default.clone(), b),
            })
            .collect();
        Ok(List::derived(
            self.zip_mutability(other),
            items,
            self.inherited_traits(),
        ))
    }
}

/// Stable bottom-up merge sort of `items` by their natural partial order.
///
/// Returns the sorted permutation of indices, or `None` once two elements turn
/// out to be incomparable.
fn partial_sort_order<T: PartialOrd>(items: &[T]) -> Option<Vec<usize>> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    let mut merged = Vec::with_capacity(items.len());
    let mut width = 1;
    while width < order.len() {
        merged.clear();
        for start in (0..order.len()).step_by(2 * width) {
            let mid = (start + width).min(order.len());
            let end = (start + 2 * width).min(order.len());
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                if items[order[j]].partial_cmp(&items[order[i]])? == Ordering::Less {
                    merged.push(order[j]);
                    j += 1;
                } else {
                    merged.push(order[i]);
                    i += 1;
                }
            }
            merged.extend_from_slice(&order[i..mid]);
            merged.extend_from_slice(&order[j..end]);
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }
    // Merging skips some pairs; an ordered chain of neighbours covers them.
    for (&a, &b) in order.iter().tuple_windows() {
        if items[a].partial_cmp(&items[b])? == Ordering::Greater {
            return None;
        }
    }
    Some(order)
}
