//! Feature-driven sequences: lists, sets and maps whose behavior is governed by
//! a set of capability traits.
//!
//! # Core Concepts
//!
//! ## Features
//!
//! Every collection carries a [`Features`] set. `IMMUTABLE` and `READONLY`
//! fix its [`Mutability`] at construction; `LAZY`, `PARALLEL` and `SORTED` may
//! be toggled later; `RANDOM_ACCESS`, `ORDERED` and `LIMITED` describe the
//! storage.
//!
//! ## Mutability
//!
//! Structural operations (`take`, `filter`, `sort`, `append`, ...) dispatch on
//! the mutability state of the receiver:
//!
//! - **Mutable** lists (`new_list`) change in place and return themselves.
//! - **Immutable** lists (`list`) return a new list and never change.
//! - **Read-only** handles over mutable storage ([`List::read_only`]) return a
//!   new mutable copy.
//!
//! ## Views
//!
//! [`List::sub_list`] returns a live window over mutable storage. Under `LAZY`,
//! concatenation produces a composite over both operands, and `reverse`, `map`
//! and `zip` produce computed views. None of these copy elements.
//!
//! Views, iterators and cursors over mutable storage record the generation of
//! that storage and fail with `ConcurrentModification` once it is changed
//! structurally by anyone else. [`List::snapshot`] copies into storage of its
//! own.
//!
//! # Example
//!
//! ```
//! use cadence::{Features, Sequence, list, new_list};
//!
//! let fixed = list([1, 2, 3]);
//! let longer = fixed.append(4).unwrap();
//! assert_eq!(fixed.len(), 3);
//! assert_eq!(longer.last().unwrap(), 4);
//!
//! let growing = new_list([1, 2, 3]);
//! assert!(growing.append(4).unwrap().same_instance(&growing));
//!
//! let window = growing.sub_list(1, 3).unwrap();
//! growing.add(5).unwrap();
//! assert!(window.get(0).unwrap_err().is_concurrent_modification());
//!
//! let lazy = fixed.lazy().concat(&list([9])).unwrap();
//! assert!(lazy.is(Features::READONLY));
//! ```

pub mod builder;
mod composite;
pub mod config;
pub mod cursor;
pub mod factory;
pub mod features;
pub mod iter;
pub mod list;
pub mod map;
mod ops;
pub mod sequence;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod set;
mod store;
mod sub_list;
mod views;

#[cfg(test)]
mod tests;

pub use builder::ListBuilder;
pub use cadence_common::Result;
pub use cadence_common::error::{Error, ErrorKind};
pub use config::{ListConfig, StorageKind};
pub use cursor::Cursor;
pub use factory::{linked_list, list, map, new_list, new_map, new_set, set};
pub use features::{Features, Mutability};
pub use iter::Iter;
pub use list::List;
pub use map::Map;
pub use sequence::Sequence;
pub use set::Set;
