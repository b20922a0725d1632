//! Hashable, immutable hybrid sets.
//!
//! [`FrozenHybridSet`] wraps a [`HybridSet`] behind a read-only surface and
//! precomputes an order-independent content hash at construction, so frozen
//! sets work as `HashMap` and `HashSet` keys. Equal content gives equal
//! hashes regardless of the mutation history that produced it.

use crate::content_hash::{self, ContentHasher};
use crate::hybrid::{Entries, HybridSet};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable hybrid set with a precomputed content hash.
#[derive(Debug, Clone)]
pub struct FrozenHybridSet<T> {
    inner: HybridSet<T>,
    content_hash: u64,
}

/// Order-independent digest: per-entry hashes are folded with wrapping
/// addition, so any insertion order of the same entries digests alike.
fn content_hash_of<T: Hash>(set: &HybridSet<T>) -> u64 {
    let mut combined: u64 = 0;
    for entry in set.iter() {
        combined = combined.wrapping_add(content_hash::hash_one(&entry));
    }
    let mut hasher = ContentHasher::default();
    hasher.write_u64(combined);
    hasher.write_usize(set.distinct_len());
    hasher.finish()
}

impl<T: Eq + Hash> HybridSet<T> {
    /// Freezes the set into its hashable, immutable form.
    #[must_use]
    pub fn freeze(self) -> FrozenHybridSet<T> {
        FrozenHybridSet::from(self)
    }
}

impl<T> FrozenHybridSet<T> {
    /// The precomputed order-independent content hash.
    #[must_use]
    pub const fn content_hash(&self) -> u64 {
        self.content_hash
    }

    /// Borrows the underlying hybrid set.
    #[must_use]
    pub const fn as_hybrid(&self) -> &HybridSet<T> {
        &self.inner
    }

    /// Thaws the set, recovering the mutable form.
    #[must_use]
    pub fn into_inner(self) -> HybridSet<T> {
        self.inner
    }

    /// Sum of all positive multiplicities.
    #[must_use]
    pub const fn positive_mass(&self) -> i64 {
        self.inner.positive_mass()
    }

    /// Sum of all negative multiplicities.
    #[must_use]
    pub const fn negative_mass(&self) -> i64 {
        self.inner.negative_mass()
    }

    /// Signed sum of all multiplicities.
    #[must_use]
    pub fn cardinality(&self) -> i64 {
        self.inner.cardinality()
    }

    /// Sum of the absolute values of all multiplicities.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.inner.weight()
    }

    /// Returns true if the set holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of distinct elements.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.inner.distinct_len()
    }

    /// Iterates over `(element, multiplicity)` entries in arbitrary order.
    #[must_use]
    pub fn iter(&self) -> Entries<'_, T> {
        self.inner.iter()
    }
}

impl<T: Eq + Hash> FrozenHybridSet<T> {
    /// Returns the multiplicity of an element, 0 if absent.
    #[must_use]
    pub fn multiplicity<Q>(&self, element: &Q) -> i64
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.multiplicity(element)
    }

    /// Returns true if the element has non-zero multiplicity of either sign.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.contains(element)
    }
}

impl<T: Eq + Hash> From<HybridSet<T>> for FrozenHybridSet<T> {
    fn from(set: HybridSet<T>) -> Self {
        let content_hash = content_hash_of(&set);
        Self {
            inner: set,
            content_hash,
        }
    }
}

impl<T> From<FrozenHybridSet<T>> for HybridSet<T> {
    fn from(frozen: FrozenHybridSet<T>) -> Self {
        frozen.inner
    }
}

/// Feeds only the cached content hash, so hashing is O(1) and needs no
/// bound on `T`.
impl<T> Hash for FrozenHybridSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash);
    }
}

impl<T: Eq + Hash> PartialEq for FrozenHybridSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.content_hash == other.content_hash && self.inner == other.inner
    }
}

impl<T: Eq + Hash> Eq for FrozenHybridSet<T> {}

impl<'a, T> IntoIterator for &'a FrozenHybridSet<T> {
    type Item = (&'a T, i64);
    type IntoIter = Entries<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T: fmt::Display> fmt::Display for FrozenHybridSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

// ============================================================================
// Tests
// ============================================================================
