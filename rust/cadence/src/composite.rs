//! Lazy concatenation of two lists.

use std::ops::ControlFlow;
use std::rc::Rc;

use cadence_common::{Result, error::Error};

use crate::features::Features;
use crate::list::{List, Repr};
use crate::views::Stamp;

/// The concatenation `left ++ right` of two non-empty lists.
///
/// Children are held as read-only handles, so nothing done through the
/// composite can alter the children's storage. A child over mutable storage
/// is stamped with its generation; the composite fails once either child
/// changes structurally.
pub(crate) struct Composite<T> {
    left: List<T>,
    right: List<T>,
    stamps: (Stamp, Stamp),
}

impl<T: Clone + 'static> Composite<T> {
    /// Concatenates `left` and `right` without copying.
    ///
    /// An empty operand is not wrapped: the other operand is returned as is.
    pub fn join(left: &List<T>, right: &List<T>) -> Result<List<T>> {
        left.check_live()?;
        right.check_live()?;
        if right.is_empty() {
            return Ok(left.clone());
        }
        if left.is_empty() {
            return Ok(right.clone());
        }
        let traits =
            ((left.traits() & right.traits()) | Features::READONLY) - Features::SORTED;
        let mutability = left.mutability().join(right.mutability());
        let left = left.read_only();
        let right = right.read_only();
        let stamps = (Stamp::of(&left)?, Stamp::of(&right)?);
        let composite = Composite {
            left,
            right,
            stamps,
        };
        Ok(List::from_parts(
            Repr::Composite(Rc::new(composite)),
            mutability,
            traits,
        ))
    }

    pub fn check(&self) -> Result<()> {
        self.stamps.0.check(&self.left)?;
        self.stamps.1.check(&self.right)
    }

    pub fn left(&self) -> &List<T> {
        &self.left
    }

    pub fn right(&self) -> &List<T> {
        &self.right
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn get(&self, index: usize) -> Result<T> {
        self.check()?;
        let split = self.left.len();
        if index < split {
            self.left.get(index)
        } else if index - split < self.right.len() {
            self.right.get(index - split)
        } else {
            Err(Error::index_out_of_range(index, self.len()))
        }
    }

    pub fn scan(&self, f: &mut dyn FnMut(&T) -> ControlFlow<()>) -> Result<bool> {
        self.check()?;
        Ok(self.left.scan(f)? && self.right.scan(f)?)
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.check()?;
        let mut items = self.left.to_vec()?;
        items.extend(self.right.to_vec()?);
        Ok(items)
    }

    /// `[from, to)` of the concatenation, sliced from the children. The caller
    /// has validated the bounds.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<List<T>> {
        self.check()?;
        let split = self.left.len();
        if to <= split {
            self.left.sub_list(from, to)
        } else if from >= split {
            self.right.sub_list(from - split, to - split)
        } else {
            Composite::join(
                &self.left.sub_list(from, split)?,
                &self.right.sub_list(0, to - split)?,
            )
        }
    }

    pub fn take_while(&self, pred: &dyn Fn(&T) -> bool) -> Result<List<T>> {
        self.check()?;
        let left = self.left.take_while_dyn(pred)?;
        if left.len() < self.left.len() {
            return Ok(left);
        }
        Composite::join(&left, &self.right.take_while_dyn(pred)?)
    }

    pub fn drop_while(&self, pred: &dyn Fn(&T) -> bool) -> Result<List<T>> {
        self.check()?;
        let left = self.left.drop_while_dyn(pred)?;
        if left.is_empty() {
            self.right.drop_while_dyn(pred)
        } else {
            Composite::join(&left, &self.right)
        }
    }

    pub fn filter(&self, pred: &dyn Fn(&T) -> bool) -> Result<List<T>> {
        self.check()?;
        Composite::join(&self.left.filter_dyn(pred)?, &self.right.filter_dyn(pred)?)
    }

    pub fn map<R: Clone + 'static>(&self, f: Rc<dyn Fn(T) -> R>) -> Result<List<R>> {
        self.check()?;
        Composite::join(&self.left.map_rc(f.clone())?, &self.right.map_rc(f)?)
    }
}
