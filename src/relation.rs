//! Ordering, classification, and complement for hybrid sets.
//!
//! Signed multiplicities order by a piecewise rule, [`partial_ordering`]:
//! within the negatives, deeper deficits come first; within the
//! non-negatives, ordinary `<=` applies; a negative never precedes a
//! non-negative and vice versa. Subset and natural-subset lift that rule
//! element-wise, and the complement exists exactly when the natural-subset
//! relation holds.

use crate::hybrid::HybridSet;
use std::hash::Hash;
use tracing::trace;

/// Signed-multiplicity ordering: `a` precedes `b` when both are negative
/// with `a` at least as deep, or both non-negative with `a` at most `b`.
///
/// Mixed-sign pairs are unrelated in both directions, which is what makes
/// the subset relations below partial rather than total.
///
/// ```
/// use hybridset::partial_ordering;
///
/// assert!(partial_ordering(-2, -1));
/// assert!(!partial_ordering(-1, -2));
/// assert!(partial_ordering(0, 3));
/// assert!(!partial_ordering(-1, 3));
/// ```
#[must_use]
pub const fn partial_ordering(a: i64, b: i64) -> bool {
    (a <= b && b < 0) || (0 <= a && a <= b)
}

// ============================================================================
// Classification
// ============================================================================

impl<T> HybridSet<T> {
    /// Returns true if every multiplicity is exactly +1, or every one is
    /// exactly -1. Vacuously true for the empty set.
    #[must_use]
    pub fn is_new_set(&self) -> bool {
        self.iter().all(|(_, multiplicity)| multiplicity == 1)
            || self.iter().all(|(_, multiplicity)| multiplicity == -1)
    }

    /// Returns true if at least one element has negative multiplicity.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        self.iter().any(|(_, multiplicity)| multiplicity < 0)
    }
}

// ============================================================================
// Relations
// ============================================================================

impl<T: Eq + Hash> HybridSet<T> {
    /// Returns true if the two sets share no elements, regardless of sign.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (smaller, larger) = if self.distinct_len() <= other.distinct_len() {
            (self, other)
        } else {
            (other, self)
        };
        smaller.iter().all(|(element, _)| !larger.contains(element))
    }

    /// Element-wise subset under [`partial_ordering`].
    ///
    /// Each entry `(e, m)` of `self` must either precede `other`'s
    /// multiplicity for `e`, or leave a remainder in `other` that does.
    /// Elements absent from `self` are unconstrained.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.iter().all(|(element, multiplicity)| {
            let bound = other.multiplicity(element);
            partial_ordering(multiplicity, bound)
                || partial_ordering(bound - multiplicity, bound)
        })
    }

    /// Element-wise superset: `other` is a subset of `self`.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }

    /// The containment that admits a complement.
    ///
    /// Requires every element of `self` to appear in `other`; on `other`'s
    /// positive support `self` must hold between 0 and the bound, and on
    /// `other`'s negative support `self` must hold a non-negative amount or
    /// a deficit at least as deep as the bound. The relation is reflexive
    /// and implies [`is_subset_of`](Self::is_subset_of).
    #[must_use]
    pub fn is_natural_subset_of(&self, other: &Self) -> bool {
        if !self.iter().all(|(element, _)| other.contains(element)) {
            return false;
        }
        other.iter().all(|(element, bound)| {
            let ours = self.multiplicity(element);
            if bound > 0 {
                0 <= ours && ours <= bound
            } else {
                ours >= 0 || partial_ordering(ours, bound)
            }
        })
    }
}

// ============================================================================
// Complement
// ============================================================================

impl<T: Clone + Eq + Hash> HybridSet<T> {
    /// The complement of `self` inside `other`: the set that combines with
    /// `self` to rebuild `other`.
    ///
    /// Defined only when `self` is a natural subset of `other`; any other
    /// receiver has no complement and `None` is returned.
    ///
    /// ```
    /// use hybridset::HybridSet;
    ///
    /// let whole = HybridSet::from_multiplicities([("a", 2), ("b", -1)]);
    /// let part = HybridSet::from_multiplicities([("a", 1)]);
    /// let rest = part.complement(&whole).unwrap();
    /// assert_eq!(part.combine(&rest), whole);
    /// ```
    #[must_use]
    pub fn complement(&self, other: &Self) -> Option<Self> {
        if self.is_natural_subset_of(other) {
            Some(other.combine(&self.negate()))
        } else {
            trace!("complement undefined: receiver is not a natural subset");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
