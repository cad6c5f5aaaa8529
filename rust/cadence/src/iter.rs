use std::iter::FusedIterator;

use cadence_common::{Result, error::Error};

use crate::list::List;

/// Fail-fast iterator over a [`List`].
///
/// Records the generation of the list's store when created. If the list is
/// changed structurally through any other handle, the next step yields a single
/// `Err(ConcurrentModification)` and the iterator is exhausted afterwards.
/// Element replacement is not structural and is observed by the iterator.
pub struct Iter<T> {
    list: List<T>,
    front: usize,
    back: usize,
    expected: Option<u64>,
    failure: Option<Error>,
    done: bool,
}

impl<T: Clone + 'static> Iter<T> {
    pub(crate) fn new(list: List<T>) -> Iter<T> {
        let (expected, failure) = match list.generation() {
            Ok(generation) => (generation, None),
            Err(e) => (None, Some(e)),
        };
        Iter {
            back: list.len(),
            list,
            front: 0,
            expected,
            failure,
            done: false,
        }
    }

    fn check(&mut self) -> Result<()> {
        if let Some(e) = self.failure.take() {
            return Err(e);
        }
        let Some(expected) = self.expected else {
            return Ok(());
        };
        match self.list.generation()? {
            Some(found) if found != expected => {
                Err(Error::concurrent_modification(expected, found))
            }
            _ => Ok(()),
        }
    }

    fn step(&mut self, index: usize) -> Option<Result<T>> {
        let item = self.check().and_then(|()| self.list.get(index));
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

impl<T: Clone + 'static> Iterator for Iter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.front >= self.back {
            self.done = true;
            return self.failure.take().map(Err);
        }
        let index = self.front;
        self.front += 1;
        self.step(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            let n = self.back - self.front;
            (n.min(1), Some(n + 1))
        }
    }
}

impl<T: Clone + 'static> DoubleEndedIterator for Iter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.front >= self.back {
            self.done = true;
            return self.failure.take().map(Err);
        }
        self.back -= 1;
        let index = self.back;
        self.step(index)
    }
}

impl<T: Clone + 'static> FusedIterator for Iter<T> {}
