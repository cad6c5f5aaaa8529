//! Read-side operations shared by every collection in the crate.

use std::ops::ControlFlow;

use cadence_common::{Result, error::Error};

use crate::features::Features;
use crate::list::List;

/// An ordered, finite sequence of `T`.
///
/// Implementors provide positional access and an interruptible traversal; the
/// queries and reductions are defined on top of them. All of them fail with
/// `ConcurrentModification` when called on a stale view.
pub trait Sequence<T: Clone> {
    fn features(&self) -> Features;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Result<T>;

    /// Visits the elements in order until `f` breaks. Returns `Ok(true)` if
    /// every element was visited.
    fn try_each(&self, f: &mut dyn FnMut(&T) -> ControlFlow<()>) -> Result<bool>;

    fn is(&self, feature: Features) -> bool {
        self.features().is(feature)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn first(&self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::empty_sequence("first"));
        }
        self.get(0)
    }

    fn head(&self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::empty_sequence("head"));
        }
        self.get(0)
    }

    fn last(&self) -> Result<T> {
        match self.len() {
            0 => Err(Error::empty_sequence("last")),
            len => self.get(len - 1),
        }
    }

    fn for_each(&self, mut f: impl FnMut(&T)) -> Result<()>
    where
        Self: Sized,
    {
        self.try_each(&mut |x| {
            f(x);
            ControlFlow::Continue(())
        })?;
        Ok(())
    }

    fn index_of(&self, value: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        let mut index = 0;
        let found = !self.try_each(&mut |x| {
            if x == value {
                ControlFlow::Break(())
            } else {
                index += 1;
                ControlFlow::Continue(())
            }
        })?;
        Ok(found.then_some(index))
    }

    fn last_index_of(&self, value: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        let mut index = 0;
        let mut last = None;
        self.try_each(&mut |x| {
            if x == value {
                last = Some(index);
            }
            index += 1;
            ControlFlow::Continue(())
        })?;
        Ok(last)
    }

    fn contains(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        Ok(self.index_of(value)?.is_some())
    }

    fn count(&self, pred: impl Fn(&T) -> bool) -> Result<usize>
    where
        Self: Sized,
    {
        let mut n = 0;
        self.try_each(&mut |x| {
            if pred(x) {
                n += 1;
            }
            ControlFlow::Continue(())
        })?;
        Ok(n)
    }

    fn any(&self, pred: impl Fn(&T) -> bool) -> Result<bool>
    where
        Self: Sized,
    {
        let none = self.try_each(&mut |x| {
            if pred(x) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(!none)
    }

    fn all(&self, pred: impl Fn(&T) -> bool) -> Result<bool>
    where
        Self: Sized,
    {
        self.try_each(&mut |x| {
            if pred(x) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
    }

    /// Left fold: `f(f(f(seed, x0), x1), x2)`.
    fn reduce<R>(&self, seed: R, f: impl FnMut(R, T) -> R) -> Result<R>
    where
        Self: Sized,
    {
        Ok(self.to_vec()?.into_iter().fold(seed, f))
    }

    /// Right fold: `f(f(f(seed, x2), x1), x0)`.
    fn reduce_right<R>(&self, seed: R, f: impl FnMut(R, T) -> R) -> Result<R>
    where
        Self: Sized,
    {
        Ok(self.to_vec()?.into_iter().rev().fold(seed, f))
    }

    /// Left fold seeded with the first element; `None` for an empty sequence.
    fn reduce_with(&self, mut f: impl FnMut(T, T) -> T) -> Result<Option<T>>
    where
        Self: Sized,
    {
        let mut acc: Option<T> = None;
        self.try_each(&mut |x| {
            acc = Some(match acc.take() {
                Some(a) => f(a, x.clone()),
                None => x.clone(),
            });
            ControlFlow::Continue(())
        })?;
        Ok(acc)
    }

    /// Right fold seeded with the last element; `None` for an empty sequence.
    fn reduce_right_with(&self, f: impl FnMut(T, T) -> T) -> Result<Option<T>>
    where
        Self: Sized,
    {
        Ok(self.to_vec()?.into_iter().rev().reduce(f))
    }

    fn to_vec(&self) -> Result<Vec<T>> {
        let mut items = Vec::with_capacity(self.len());
        self.try_each(&mut |x| {
            items.push(x.clone());
            ControlFlow::Continue(())
        })?;
        Ok(items)
    }
}

impl<T: Clone + 'static> Sequence<T> for List<T> {
    fn features(&self) -> Features {
        List::features(self)
    }

    fn len(&self) -> usize {
        List::len(self)
    }

    fn get(&self, index: usize) -> Result<T> {
        List::get(self, index)
    }

    fn try_each(&self, f: &mut dyn FnMut(&T) -> ControlFlow<()>) -> Result<bool> {
        self.scan(f)
    }

    fn to_vec(&self) -> Result<Vec<T>> {
        List::to_vec(self)
    }
}
