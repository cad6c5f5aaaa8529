//! Capability traits and the mutability state derived from them.

use bitflags::bitflags;
use cadence_common::{Result, error::Error};

bitflags! {
    /// Independent capability traits attached to every sequence instance.
    ///
    /// `IMMUTABLE` and `READONLY` describe the identity of an instance and never
    /// change after construction. `LAZY`, `PARALLEL` and `SORTED` may be toggled
    /// through explicit calls. The remaining traits describe the storage.
    ///
    /// `Features` is `Copy`: every accessor hands out a value, so callers can
    /// never alter an instance by mutating what they were given.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        const READONLY = 1;
        const IMMUTABLE = 1 << 1;
        const LAZY = 1 << 2;
        const PARALLEL = 1 << 3;
        const SORTED = 1 << 4;
        const RANDOM_ACCESS = 1 << 5;
        const ORDERED = 1 << 6;
        const LIMITED = 1 << 7;
    }
}

impl Features {
    /// Traits fixing the mutability state of an instance.
    pub const IDENTITY: Features = Features::READONLY.union(Features::IMMUTABLE);

    /// Traits that may be switched on an existing instance.
    pub const TOGGLEABLE: Features = Features::LAZY
        .union(Features::PARALLEL)
        .union(Features::SORTED);

    /// Traits carried by every finite, ordered sequence.
    pub const BASE: Features = Features::ORDERED.union(Features::LIMITED);

    /// Traits a derived result inherits from its source regardless of the operation.
    pub(crate) const INHERITED: Features = Features::LAZY.union(Features::PARALLEL);

    #[inline]
    pub fn is(self, feature: Features) -> bool {
        self.contains(feature)
    }
}

/// Mutability state of a sequence instance, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    /// Structural operations alter the receiver in place and return it.
    Mutable,
    /// Structural operations build a new instance; the receiver never changes.
    Immutable,
    /// The storage is mutable but the contract forbids external structural
    /// mutation; structural operations copy into a new mutable instance.
    ReadOnlyMutable,
}

impl Mutability {
    /// Derives the state from a trait set. `IMMUTABLE` takes precedence over `READONLY`.
    pub fn of(features: Features) -> Mutability {
        if features.is(Features::IMMUTABLE) {
            Mutability::Immutable
        } else if features.is(Features::READONLY) {
            Mutability::ReadOnlyMutable
        } else {
            Mutability::Mutable
        }
    }

    /// Identity traits describing this state.
    pub fn identity(self) -> Features {
        match self {
            Mutability::Mutable => Features::empty(),
            Mutability::Immutable => Features::IMMUTABLE,
            Mutability::ReadOnlyMutable => Features::READONLY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mutability::Mutable => "mutable",
            Mutability::Immutable => "immutable",
            Mutability::ReadOnlyMutable => "read-only",
        }
    }

    #[inline]
    pub fn is_mutable(self) -> bool {
        self == Mutability::Mutable
    }

    /// The state of a view derived from a source in state `self`.
    pub(crate) fn of_view(self) -> Mutability {
        match self {
            Mutability::Immutable => Mutability::Immutable,
            Mutability::Mutable | Mutability::ReadOnlyMutable => Mutability::ReadOnlyMutable,
        }
    }

    /// State of a composite over two children.
    pub(crate) fn join(self, other: Mutability) -> Mutability {
        match (self, other) {
            (Mutability::Immutable, Mutability::Immutable) => Mutability::Immutable,
            _ => Mutability::ReadOnlyMutable,
        }
    }

    pub(crate) fn require_mutable(self, operation: &'static str) -> Result<()> {
        match self {
            Mutability::Mutable => Ok(()),
            other => Err(Error::immutable_mutation(operation, other.name())),
        }
    }
}
