//! Bidirectional cursors and predicate-based location.

use cadence_common::{Result, error::Error};

use crate::list::List;

/// A position in a [`List`] that moves one element at a time in either direction.
///
/// The cursor sits *between* elements. [`Cursor::forward`] and
/// [`Cursor::backward`] step over one element and make it current; stepping
/// forward and then backward lands on the same element twice. Reading the
/// current element before the first step, or after a step that ran off either
/// end, fails with `NoSuchElement`.
///
/// Like iterators, a cursor records the generation of the list's store and
/// fails with `ConcurrentModification` once the list is changed structurally
/// by anyone but the cursor itself.
pub struct Cursor<T> {
    list: List<T>,
    next: usize,
    current: Option<usize>,
    expected: Option<u64>,
}

impl<T: Clone + 'static> Cursor<T> {
    fn new(list: List<T>, next: usize) -> Result<Cursor<T>> {
        let expected = list.generation()?;
        Ok(Cursor {
            list,
            next,
            current: None,
            expected,
        })
    }

    pub fn list(&self) -> &List<T> {
        &self.list
    }

    fn check(&self) -> Result<()> {
        let Some(expected) = self.expected else {
            return Ok(());
        };
        match self.list.generation()? {
            Some(found) if found != expected => {
                log::debug!("cursor is stale: expected generation {expected}, found {found}");
                Err(Error::concurrent_modification(expected, found))
            }
            _ => Ok(()),
        }
    }

    fn refresh(&mut self) -> Result<()> {
        self.expected = self.list.generation()?;
        Ok(())
    }

    /// Steps over the next element. Returns `false` at the end of the list,
    /// leaving the cursor without a current element.
    pub fn forward(&mut self) -> Result<bool> {
        self.check()?;
        if self.next < self.list.len() {
            self.current = Some(self.next);
            self.next += 1;
            Ok(true)
        } else {
            self.current = None;
            Ok(false)
        }
    }

    /// Steps back over the previous element. Returns `false` at the start of
    /// the list, leaving the cursor without a current element.
    pub fn backward(&mut self) -> Result<bool> {
        self.check()?;
        if self.next > 0 {
            self.next -= 1;
            self.current = Some(self.next);
            Ok(true)
        } else {
            self.current = None;
            Ok(false)
        }
    }

    pub fn has_forward(&self) -> bool {
        self.next < self.list.len()
    }

    pub fn has_backward(&self) -> bool {
        self.next > 0
    }

    /// Index of the current element.
    pub fn index(&self) -> Option<usize> {
        self.current
    }

    fn current_index(&self) -> Result<usize> {
        self.current
            .ok_or_else(|| Error::no_such_element("the cursor is not on an element"))
    }

    pub fn current(&self) -> Result<T> {
        self.check()?;
        self.list.get(self.current_index()?)
    }

    /// Moves forward to the next element matching `pred`.
    pub fn locate(&mut self, pred: impl Fn(&T) -> bool) -> Result<bool> {
        while self.forward()? {
            if pred(&self.current()?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Moves backward to the previous element matching `pred`.
    pub fn locate_back(&mut self, pred: impl Fn(&T) -> bool) -> Result<bool> {
        while self.backward()? {
            if pred(&self.current()?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Replaces the current element. Not a structural change.
    pub fn set(&mut self, value: T) -> Result<T> {
        self.check()?;
        let index = self.current_index()?;
        self.list.set(index, value)
    }

    /// Removes the current element. The cursor is left between the neighbors
    /// of the removed element, without a current element.
    pub fn remove(&mut self) -> Result<T> {
        self.check()?;
        let index = self.current_index()?;
        let value = self.list.remove_at(index)?;
        if index < self.next {
            self.next -= 1;
        }
        self.current = None;
        self.refresh()?;
        Ok(value)
    }

    /// Inserts `value` at the cursor position. The new element is behind the
    /// cursor: the next `forward` step is unaffected.
    pub fn insert(&mut self, value: T) -> Result<()> {
        self.check()?;
        self.list.add_at(self.next, value)?;
        self.next += 1;
        self.current = None;
        self.refresh()
    }
}

impl<T: Clone + 'static> List<T> {
    /// A cursor before the first element.
    pub fn cursor(&self) -> Result<Cursor<T>> {
        Cursor::new(self.clone(), 0)
    }

    /// A cursor after the last element.
    pub fn cursor_at_end(&self) -> Result<Cursor<T>> {
        Cursor::new(self.clone(), self.len())
    }

    /// Scans forward and returns a cursor on the first element matching `pred`.
    pub fn locate_first(&self, pred: impl Fn(&T) -> bool) -> Result<Option<Cursor<T>>> {
        let mut cursor = self.cursor()?;
        Ok(cursor.locate(pred)?.then_some(cursor))
    }

    /// Scans backward and returns a cursor on the last element matching `pred`.
    pub fn locate_last(&self, pred: impl Fn(&T) -> bool) -> Result<Option<Cursor<T>>> {
        let mut cursor = self.cursor_at_end()?;
        Ok(cursor.locate_back(pred)?.then_some(cursor))
    }
}
