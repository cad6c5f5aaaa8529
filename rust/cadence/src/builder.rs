use std::ops::ControlFlow;

use cadence_common::Result;

use crate::config::{ListConfig, StorageKind};
use crate::features::Features;
use crate::list::List;
use crate::sequence::Sequence;

/// Write-only accumulator that freezes into an immutable [`List`].
///
/// The staged elements move into the finished list without another copy.
/// A builder is consumed by [`ListBuilder::to_list`].
pub struct ListBuilder<T> {
    items: Vec<T>,
    traits: Features,
    storage: StorageKind,
}

impl<T> Default for ListBuilder<T> {
    fn default() -> Self {
        ListBuilder::new()
    }
}

impl<T> ListBuilder<T> {
    pub fn new() -> ListBuilder<T> {
        ListBuilder::from_vec(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> ListBuilder<T> {
        ListBuilder::from_vec(Vec::with_capacity(capacity))
    }

    /// Creates a builder whose lists carry the configured traits, with room for
    /// `config.initial_capacity` elements.
    pub fn with_config(config: &ListConfig) -> Result<ListBuilder<T>> {
        config.validate()?;
        Ok(ListBuilder {
            items: Vec::with_capacity(config.initial_capacity),
            traits: config.traits,
            storage: config.storage,
        })
    }

    pub fn from_vec(items: Vec<T>) -> ListBuilder<T> {
        ListBuilder {
            items,
            traits: Features::empty(),
            storage: StorageKind::Array,
        }
    }

    /// Toggleable traits given to the finished list.
    pub fn with_traits(mut self, traits: Features) -> ListBuilder<T> {
        self.traits = traits & Features::TOGGLEABLE;
        self
    }

    pub fn add(&mut self, value: T) -> &mut Self {
        self.items.push(value);
        self
    }

    pub fn add_all<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(items);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone + 'static> ListBuilder<T> {
    /// Appends every element of `sequence`.
    pub fn append<S>(&mut self, sequence: &S) -> Result<&mut Self>
    where
        S: Sequence<T> + ?Sized,
    {
        self.items.reserve(sequence.len());
        sequence.try_each(&mut |x| {
            self.items.push(x.clone());
            ControlFlow::Continue(())
        })?;
        Ok(self)
    }

    /// Freezes the staged elements into an immutable list. No elements yield
    /// the canonical empty list.
    pub fn to_list(self) -> List<T> {
        List::immutable(self.items, self.traits)
    }

    /// Moves the staged elements into a new mutable list.
    pub fn to_mutable_list(self) -> List<T> {
        List::mutable(self.items, self.traits, self.storage)
    }
}

impl<T> FromIterator<T> for ListBuilder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ListBuilder::from_vec(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for ListBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
