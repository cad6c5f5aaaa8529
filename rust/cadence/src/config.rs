use cadence_common::{Result, error::Error};

use crate::features::Features;

/// Largest capacity a configuration may ask to pre-allocate.
const MAX_INITIAL_CAPACITY: usize = 1 << 28;

/// Backing storage used by a mutable list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageKind {
    /// Contiguous array; exposes `RANDOM_ACCESS`.
    #[default]
    Array,
    /// Doubly-linked nodes; positional access is linear.
    Linked,
}

/// Construction parameters for lists and builders.
///
/// The identity of an instance (immutable, read-only, mutable) is chosen by the
/// factory, not by the configuration, so `traits` may only carry toggleable
/// traits.
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Toggleable traits (`LAZY`, `PARALLEL`, `SORTED`) set at construction.
    pub traits: Features,

    /// Number of elements to reserve room for. Ignored by linked storage.
    pub initial_capacity: usize,

    /// Storage backing mutable instances.
    pub storage: StorageKind,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            traits: Features::empty(),
            initial_capacity: 0,
            storage: StorageKind::Array,
        }
    }
}

impl ListConfig {
    /// Configuration producing lazy lists: concatenations become composite views
    /// and `reverse`/`map`/`zip` return views.
    pub fn lazy() -> Self {
        ListConfig::default().with_traits(Features::LAZY)
    }

    pub fn with_traits(&self, traits: Features) -> Self {
        let mut config = self.clone();
        config.traits = traits;
        config
    }

    pub fn with_initial_capacity(&self, capacity: usize) -> Self {
        let mut config = self.clone();
        config.initial_capacity = capacity;
        config
    }

    pub fn with_storage(&self, storage: StorageKind) -> Self {
        let mut config = self.clone();
        config.storage = storage;
        config
    }

    pub fn validate(&self) -> Result<()> {
        if !Features::TOGGLEABLE.contains(self.traits) {
            return Err(Error::invalid_arg(
                "traits",
                format!(
                    "only LAZY, PARALLEL and SORTED may be configured, got {:?}",
                    self.traits
                ),
            ));
        }
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(Error::invalid_arg(
                "initial_capacity",
                format!(
                    "{} exceeds the maximum of {MAX_INITIAL_CAPACITY}",
                    self.initial_capacity
                ),
            ));
        }
        Ok(())
    }
}
