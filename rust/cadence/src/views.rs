//! Lazy views: reverse, mapped, zipped and sliced.
//!
//! A view owns handles to its sources and computes elements on access. Views
//! over mutable storage record the source generation when they are created and
//! fail with `ConcurrentModification` once the source changes structurally.

use std::rc::Rc;

use cadence_common::{Result, error::Error};

use crate::list::List;

/// Positional access to a computed sequence.
pub(crate) trait LazyView<T> {
    fn len(&self) -> usize;

    /// The caller guarantees `index < len()`.
    fn get(&self, index: usize) -> Result<T>;

    /// The list this view reverses, if it is a reverse view.
    fn reversed_source(&self) -> Option<List<T>> {
        None
    }
}

/// Generation a view recorded for one of its sources.
#[derive(Clone, Copy)]
pub(crate) struct Stamp(Option<u64>);

impl Stamp {
    pub fn of<T: Clone + 'static>(source: &List<T>) -> Result<Stamp> {
        Ok(Stamp(source.generation()?))
    }

    pub fn check<T: Clone + 'static>(self, source: &List<T>) -> Result<()> {
        let Some(expected) = self.0 else {
            return Ok(());
        };
        match source.generation()? {
            Some(found) if found != expected => {
                log::debug!("lazy view is stale: expected generation {expected}, found {found}");
                Err(Error::concurrent_modification(expected, found))
            }
            _ => Ok(()),
        }
    }
}

pub(crate) struct Reverse<T> {
    source: List<T>,
    stamp: Stamp,
}

impl<T: Clone + 'static> Reverse<T> {
    pub fn new(source: List<T>) -> Result<Reverse<T>> {
        let stamp = Stamp::of(&source)?;
        Ok(Reverse { source, stamp })
    }
}

impl<T: Clone + 'static> LazyView<T> for Reverse<T> {
    fn len(&self) -> usize {
        self.source.len()
    }

    fn get(&self, index: usize) -> Result<T> {
        self.stamp.check(&self.source)?;
        self.source.get(self.source.len() - 1 - index)
    }

    fn reversed_source(&self) -> Option<List<T>> {
        Some(self.source.clone())
    }
}

pub(crate) struct Mapped<S, T> {
    source: List<S>,
    f: Rc<dyn Fn(S) -> T>,
    stamp: Stamp,
}

impl<S: Clone + 'static, T> Mapped<S, T> {
    pub fn new(source: List<S>, f: Rc<dyn Fn(S) -> T>) -> Result<Mapped<S, T>> {
        let stamp = Stamp::of(&source)?;
        Ok(Mapped { source, f, stamp })
    }
}

impl<S: Clone + 'static, T> LazyView<T> for Mapped<S, T> {
    fn len(&self) -> usize {
        self.source.len()
    }

    fn get(&self, index: usize) -> Result<T> {
        self.stamp.check(&self.source)?;
        Ok((self.f)(self.source.get(index)?))
    }
}

/// Pairs elements of two lists.
///
/// Without defaults the view is as long as the shorter list. With defaults it
/// is as long as the longer one, padding the shorter side.
pub(crate) struct Zipped<A, B> {
    left: List<A>,
    right: List<B>,
    defaults: Option<(A, B)>,
    stamps: (Stamp, Stamp),
}

impl<A: Clone + 'static, B: Clone + 'static> Zipped<A, B> {
    pub fn new(left: List<A>, right: List<B>, defaults: Option<(A, B)>) -> Result<Zipped<A, B>> {
        let stamps = (Stamp::of(&left)?, Stamp::of(&right)?);
        Ok(Zipped {
            left,
            right,
            defaults,
            stamps,
        })
    }
}

impl<A: Clone + 'static, B: Clone + 'static> LazyView<(A, B)> for Zipped<A, B> {
    fn len(&self) -> usize {
        match self.defaults {
            Some(_) => self.left.len().max(self.right.len()),
            None => self.left.len().min(self.right.len()),
        }
    }

    fn get(&self, index: usize) -> Result<(A, B)> {
        self.stamps.0.check(&self.left)?;
        self.stamps.1.check(&self.right)?;
        let padding = self.defaults.as_ref();
        let a = match (index < self.left.len(), padding) {
            (true, _) => self.left.get(index)?,
            (false, Some((a, _))) => a.clone(),
            (false, None) => return Err(Error::index_out_of_range(index, self.left.len())),
        };
        let b = match (index < self.right.len(), padding) {
            (true, _) => self.right.get(index)?,
            (false, Some((_, b))) => b.clone(),
            (false, None) => return Err(Error::index_out_of_range(index, self.right.len())),
        };
        Ok((a, b))
    }
}

/// `[from, to)` of another view.
pub(crate) struct SliceView<T> {
    source: List<T>,
    from: usize,
    to: usize,
}

impl<T> SliceView<T> {
    pub fn new(source: List<T>, from: usize, to: usize) -> SliceView<T> {
        SliceView { source, from, to }
    }
}

impl<T: Clone + 'static> LazyView<T> for SliceView<T> {
    fn len(&self) -> usize {
        let len = self.source.len();
        self.to.min(len).saturating_sub(self.from)
    }

    fn get(&self, index: usize) -> Result<T> {
        self.source.get(self.from + index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{list, new_list};

    #[test]
    fn test_reverse_view() {
        let view = Reverse::new(list([1, 2, 3])).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.get(0).unwrap(), 3);
        assert_eq!(view.get(2).unwrap(), 1);
        assert!(view.reversed_source().is_some());
    }

    #[test]
    fn test_view_over_mutable_source_is_fail_fast() {
        let source = new_list([1, 2, 3]);
        let view = Mapped::new(source.clone(), Rc::new(|x: i32| x * 10)).unwrap();
        assert_eq!(view.get(1).unwrap(), 20);
        source.set(1, 5).unwrap();
        assert_eq!(view.get(1).unwrap(), 50);
        source.add(4).unwrap();
        assert!(view.get(0).unwrap_err().is_concurrent_modification());
    }

    #[test]
    fn test_zipped_lengths() {
        let short = Zipped::new(list([1, 2, 3]), list(["a"]), None).unwrap();
        assert_eq!(short.len(), 1);
        assert_eq!(short.get(0).unwrap(), (1, "a"));

        let padded = Zipped::new(list([1, 2, 3]), list(["a"]), Some((0, "-"))).unwrap();
        assert_eq!(padded.len(), 3);
        assert_eq!(padded.get(2).unwrap(), (3, "-"));
    }
}
