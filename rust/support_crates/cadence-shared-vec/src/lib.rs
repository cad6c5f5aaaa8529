//! Immutable, reference-counted element storage for immutable sequences.
//!
//! Every immutable list holds a [`SharedVec`]: a `[start, end)` window into an
//! `Rc<[T]>` that is never mutated after construction. Cloning a list or
//! taking a sub-range of it (`take`, `drop`, `sub_list`) only adjusts the
//! window, so all of them keep pointing into one allocation.

use std::fmt;
use std::ops::{Deref, Range};
use std::rc::Rc;

pub struct SharedVec<T> {
    buffer: Rc<[T]>,
    start: usize,
    end: usize,
}

impl<T> Clone for SharedVec<T> {
    fn clone(&self) -> Self {
        SharedVec {
            buffer: self.buffer.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

impl<T> SharedVec<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        let end = items.len();
        SharedVec {
            buffer: Rc::from(items),
            start: 0,
            end,
        }
    }

    pub fn empty() -> Self {
        SharedVec::from_vec(Vec::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer[self.start..self.end]
    }

    /// The window `[from, to)` relative to this one, or `None` if the range is
    /// reversed or runs past the end.
    pub fn window(&self, from: usize, to: usize) -> Option<Self> {
        if from > to || to > self.len() {
            return None;
        }
        Some(SharedVec {
            buffer: self.buffer.clone(),
            start: self.start + from,
            end: self.start + to,
        })
    }

    /// Same as [`SharedVec::window`] for a range known to be in bounds.
    ///
    /// # Panics
    ///
    /// Panics if `range` is reversed or runs past the end.
    pub fn slice(&self, range: Range<usize>) -> Self {
        match self.window(range.start, range.end) {
            Some(window) => window,
            None => panic!(
                "range {:?} out of bounds for shared storage of length {}",
                range,
                self.len()
            ),
        }
    }

    /// `true` if both handles cover the same range of the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.buffer, &other.buffer)
            && self.start == other.start
            && self.end == other.end
    }

    /// `true` if this window spans its whole allocation.
    pub fn is_whole(&self) -> bool {
        self.start == 0 && self.end == self.buffer.len()
    }

    /// Number of handles keeping the allocation alive.
    pub fn share_count(&self) -> usize {
        Rc::strong_count(&self.buffer)
    }
}

impl<T> Deref for SharedVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SharedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> FromIterator<T> for SharedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        SharedVec::from_vec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_share_allocation() {
        let shared = SharedVec::from_vec(vec![1, 2, 3, 4, 5]);
        let middle = shared.slice(1..4);
        assert_eq!(middle.as_slice(), &[2, 3, 4]);
        assert_eq!(shared.share_count(), 2);
        assert!(shared.is_whole());
        assert!(!middle.is_whole());

        let nested = middle.slice(1..3);
        assert_eq!(&*nested, &[3, 4]);
        assert_eq!(nested.get(2), None);
        assert_eq!(shared.share_count(), 3);
    }

    #[test]
    fn test_window_bounds() {
        let shared: SharedVec<i32> = (1..=3).collect();
        assert!(shared.window(2, 1).is_none());
        assert!(shared.window(0, 4).is_none());
        let end = shared.window(3, 3).unwrap();
        assert!(end.is_empty());
        assert!(SharedVec::<i32>::empty().is_empty());
    }

    #[test]
    fn test_ptr_eq_needs_same_range() {
        let shared = SharedVec::from_vec(vec!['a', 'b']);
        assert!(shared.ptr_eq(&shared.clone()));
        assert!(!shared.ptr_eq(&shared.slice(0..1)));
        let copy = SharedVec::from_vec(shared.to_vec());
        assert_eq!(copy, shared);
        assert!(!copy.ptr_eq(&shared));
    }

    #[test]
    fn test_clone_without_element_clone() {
        struct Opaque(u8);
        let shared = SharedVec::from_vec(vec![Opaque(1), Opaque(2)]);
        let copy = shared.clone();
        assert!(copy.ptr_eq(&shared));
        assert_eq!(shared.share_count(), 2);
        assert_eq!(copy[1].0, 2);
    }

    #[test]
    #[should_panic]
    fn test_slice_out_of_bounds_panics() {
        SharedVec::from_vec(vec![1]).slice(0..2);
    }
}
