//! Hybridset: signed multisets with cached mass aggregates.
//!
//! # Overview
//!
//! A [`HybridSet`] maps elements to integer multiplicities that may be
//! positive, negative, or absent (implicitly zero). It generalizes sets and
//! multisets to support "negative presence": debt, removal obligations, or
//! algebraic cancellation. Two aggregates are cached alongside the store:
//! the positive mass (sum of positive multiplicities) and the negative mass
//! (sum of negative multiplicities, always `<= 0`). Every mutation keeps the
//! store canonical: an entry whose multiplicity reaches zero is removed on
//! the spot, so the aggregates are always derivable from the mapping.
//!
//! # Core Guarantees
//!
//! - **Canonical store**: multiplicity-zero entries are never stored, so
//!   equality and iteration are insensitive to mutation history
//! - **Exact aggregates**: `positive_mass` and `negative_mass` equal the
//!   signed sums over the stored multiplicities after every operation
//! - **Value semantics**: combination, scaling, and negation return new
//!   sets; no operation mutates its operands through shared aliases
//! - **Total relations**: subset and natural-subset checks return plain
//!   booleans; a missing complement is `None`, not an error
//!
//! # Module Structure
//!
//! - [`hybrid`]: The signed-multiset store, its constructors, and the
//!   combine/scale/negate algebra
//! - [`multiset`]: The classical non-negative [`Multiset`] collaborator
//! - [`relation`]: Partial ordering, subset variants, disjointness, and
//!   complement
//! - [`frozen`]: [`FrozenHybridSet`], the hashable immutable variant
//! - [`content_hash`]: Deterministic hashing behind the frozen variant
//! - [`error`]: Conversion error types

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

pub mod content_hash;
pub mod error;
pub mod frozen;
pub mod hybrid;
pub mod multiset;
pub mod relation;

pub use error::NegativePresenceError;
pub use frozen::FrozenHybridSet;
pub use hybrid::{CountedIterable, HybridSet};
pub use multiset::Multiset;
pub use relation::partial_ordering;
