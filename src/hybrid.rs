//! Signed multisets with cached mass aggregates.
//!
//! A [`HybridSet`] maps elements to non-zero `i64` multiplicities. Positive
//! multiplicities behave like ordinary multiset counts; negative ones record
//! removals that have not (yet) been matched by insertions. Two aggregates
//! ride along with every mutation: the positive mass (sum of positive
//! multiplicities) and the negative mass (sum of negative ones, kept as a
//! non-positive number). Keeping them incrementally correct is what makes
//! `is_empty`, the masses, and the projection queries O(1).
//!
//! The store is canonical: no entry ever holds multiplicity zero. Every
//! mutation prunes entries that cancel out, so observational equality is
//! plain map equality.

use crate::multiset::Multiset;
use std::borrow::Borrow;
use std::collections::hash_map;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};
use tracing::trace;

/// Iterables whose exact length is known before iteration starts.
///
/// [`HybridSet::from_difference`] pre-sizes its element store from the larger
/// of its two inputs, so both must report an exact length up front. Arrays,
/// slices, `Vec`, and the borrowing iterators of this crate all qualify
/// through the blanket impl.
pub trait CountedIterable: IntoIterator<IntoIter: ExactSizeIterator> {}

impl<I: IntoIterator<IntoIter: ExactSizeIterator>> CountedIterable for I {}

/// A signed multiset: each element carries a non-zero `i64` multiplicity.
///
/// The positive and negative masses are cached and updated on every
/// mutation, including the crossover cases where an element's multiplicity
/// changes sign in a single step.
///
/// ```
/// use hybridset::HybridSet;
///
/// let mut set = HybridSet::new();
/// set.add_count("job", 3);
/// set.remove_count("job", 5);
/// assert_eq!(set.multiplicity("job"), -2);
/// assert_eq!(set.positive_mass(), 0);
/// assert_eq!(set.negative_mass(), -2);
/// ```
#[derive(Debug, Clone)]
pub struct HybridSet<T> {
    elements: HashMap<T, i64>,
    positive_mass: i64,
    negative_mass: i64,
}

// ============================================================================
// Construction
// ============================================================================

impl<T> HybridSet<T> {
    /// Creates an empty hybrid set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            positive_mass: 0,
            negative_mass: 0,
        }
    }
}

impl<T: Eq + Hash> HybridSet<T> {
    /// Builds a hybrid set from `(element, multiplicity)` entries.
    ///
    /// Multiplicities for duplicate elements accumulate; entries that sum to
    /// zero are dropped.
    #[must_use]
    pub fn from_multiplicities<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, i64)>,
    {
        let mut elements: HashMap<T, i64> = HashMap::new();
        for (element, multiplicity) in entries {
            *elements.entry(element).or_insert(0) += multiplicity;
        }
        elements.retain(|_, multiplicity| *multiplicity != 0);
        Self::from_map(elements)
    }

    /// Builds a hybrid set as the signed difference of two collections.
    ///
    /// Every occurrence in `include` counts +1, every occurrence in
    /// `exclude` counts -1; elements whose occurrences cancel exactly are
    /// absent from the result.
    ///
    /// ```
    /// use hybridset::HybridSet;
    ///
    /// let set = HybridSet::from_difference([1, 2, 2, 3], [2, 3, 3]);
    /// assert_eq!(set.multiplicity(&2), 1);
    /// assert_eq!(set.multiplicity(&3), -1);
    /// assert_eq!(set.cardinality(), 1);
    /// ```
    #[must_use]
    pub fn from_difference<I, E>(include: I, exclude: E) -> Self
    where
        I: CountedIterable<Item = T>,
        E: CountedIterable<Item = T>,
    {
        let include = include.into_iter();
        let exclude = exclude.into_iter();
        let mut elements: HashMap<T, i64> =
            HashMap::with_capacity(include.len().max(exclude.len()));
        for element in include {
            *elements.entry(element).or_insert(0) += 1;
        }
        for element in exclude {
            *elements.entry(element).or_insert(0) -= 1;
        }
        elements.retain(|_, multiplicity| *multiplicity != 0);
        Self::from_map(elements)
    }

    /// Wraps an already-pruned element map, computing both masses.
    fn from_map(elements: HashMap<T, i64>) -> Self {
        let mut positive_mass = 0;
        let mut negative_mass = 0;
        for &multiplicity in elements.values() {
            if multiplicity > 0 {
                positive_mass += multiplicity;
            } else {
                negative_mass += multiplicity;
            }
        }
        Self {
            elements,
            positive_mass,
            negative_mass,
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

impl<T> HybridSet<T> {
    /// Sum of all positive multiplicities. Never negative.
    #[must_use]
    pub const fn positive_mass(&self) -> i64 {
        self.positive_mass
    }

    /// Sum of all negative multiplicities. Never positive.
    #[must_use]
    pub const fn negative_mass(&self) -> i64 {
        self.negative_mass
    }

    /// Signed sum of all multiplicities.
    ///
    /// Always equals `positive_mass() + negative_mass()`.
    #[must_use]
    pub fn cardinality(&self) -> i64 {
        self.elements.values().sum()
    }

    /// Sum of the absolute values of all multiplicities.
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.elements.values().map(|multiplicity| multiplicity.abs()).sum()
    }

    /// Returns true if the set holds no entries at all.
    ///
    /// A set whose positive and negative entries merely balance (cardinality
    /// zero but non-zero weight) is not empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.positive_mass == 0 && self.negative_mass == 0
    }

    /// Returns the number of distinct elements.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.elements.len()
    }

    /// Removes all entries and resets both masses.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.positive_mass = 0;
        self.negative_mass = 0;
    }

    /// Iterates over `(element, multiplicity)` entries in arbitrary order.
    #[must_use]
    pub fn iter(&self) -> Entries<'_, T> {
        Entries {
            inner: self.elements.iter(),
        }
    }

    /// Iterates over the distinct elements.
    pub fn distinct_elements(&self) -> impl Iterator<Item = &T> {
        self.elements.keys()
    }

    /// Iterates over positively-held elements, each repeated once per unit
    /// of multiplicity. Negative entries contribute nothing.
    pub fn occurrences(&self) -> impl Iterator<Item = &T> {
        self.elements
            .iter()
            .filter(|&(_, &multiplicity)| multiplicity > 0)
            .flat_map(|(element, &multiplicity)| {
                #[allow(clippy::cast_sign_loss)]
                let count = multiplicity as usize;
                std::iter::repeat(element).take(count)
            })
    }

    /// Iterates over elements with positive multiplicity.
    pub fn positive_support(&self) -> impl Iterator<Item = &T> {
        self.elements
            .iter()
            .filter_map(|(element, &multiplicity)| (multiplicity > 0).then_some(element))
    }

    /// Iterates over elements with negative multiplicity.
    pub fn negative_support(&self) -> impl Iterator<Item = &T> {
        self.elements
            .iter()
            .filter_map(|(element, &multiplicity)| (multiplicity < 0).then_some(element))
    }
}

impl<T: Eq + Hash> HybridSet<T> {
    /// Returns the multiplicity of an element, 0 if absent.
    ///
    /// Lookup never mutates the set; probing for a missing element leaves no
    /// entry behind.
    #[must_use]
    pub fn multiplicity<Q>(&self, element: &Q) -> i64
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.elements.get(element).copied().unwrap_or(0)
    }

    /// Returns true if the element has non-zero multiplicity of either sign.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.elements.contains_key(element)
    }

    /// Splits the support into positively- and negatively-held elements.
    #[must_use]
    pub fn supporting_sets(&self) -> (HashSet<&T>, HashSet<&T>) {
        let mut positive = HashSet::new();
        let mut negative = HashSet::new();
        for (element, &multiplicity) in &self.elements {
            if multiplicity > 0 {
                positive.insert(element);
            } else {
                negative.insert(element);
            }
        }
        (positive, negative)
    }
}

// ============================================================================
// Mutation
// ============================================================================

impl<T: Eq + Hash> HybridSet<T> {
    /// Adds one occurrence of an element.
    pub fn add(&mut self, element: T) {
        self.add_count(element, 1);
    }

    /// Adds `multiplicity` occurrences of an element.
    ///
    /// Zero is a no-op; a negative multiplicity is ignored (use
    /// [`remove_count`](Self::remove_count) to subtract). When the element
    /// currently sits below zero, the added occurrences first pay off the
    /// deficit; both masses are adjusted for exactly the portion that
    /// crossed the axis.
    ///
    /// ```
    /// use hybridset::HybridSet;
    ///
    /// let mut set = HybridSet::from_multiplicities([("slot", -3)]);
    /// set.add_count("slot", 5);
    /// assert_eq!(set.multiplicity("slot"), 2);
    /// assert_eq!(set.positive_mass(), 2);
    /// assert_eq!(set.negative_mass(), 0);
    /// ```
    pub fn add_count(&mut self, element: T, multiplicity: i64) {
        if multiplicity < 0 {
            trace!(multiplicity, "add ignored: negative multiplicity");
            return;
        }
        if multiplicity == 0 {
            return;
        }
        let current = self.elements.get(&element).copied().unwrap_or(0);
        if current < 0 {
            let crossover = multiplicity + current;
            if crossover > 0 {
                // Deficit fully paid: the remainder lands on the positive
                // side and the old debt leaves the negative side.
                self.positive_mass += crossover;
                self.negative_mass -= current;
            } else {
                self.negative_mass += multiplicity;
            }
        } else {
            self.positive_mass += multiplicity;
        }
        self.set_entry(element, current + multiplicity);
    }

    /// Removes one occurrence of an element.
    pub fn remove(&mut self, element: T) {
        self.remove_count(element, 1);
    }

    /// Removes `multiplicity` occurrences of an element.
    ///
    /// Zero is a no-op; a negative multiplicity is ignored. Removing more
    /// occurrences than are held drives the entry negative rather than
    /// saturating, so removals are never lost.
    pub fn remove_count(&mut self, element: T, multiplicity: i64) {
        if multiplicity < 0 {
            trace!(multiplicity, "remove ignored: negative multiplicity");
            return;
        }
        if multiplicity == 0 {
            return;
        }
        let current = self.elements.get(&element).copied().unwrap_or(0);
        if current > 0 {
            let crossover = current - multiplicity;
            if crossover < 0 {
                // Holdings exhausted: the overshoot lands on the negative
                // side and the old holdings leave the positive side.
                self.negative_mass += crossover;
                self.positive_mass -= current;
            } else {
                self.positive_mass -= multiplicity;
            }
        } else {
            self.negative_mass -= multiplicity;
        }
        self.set_entry(element, current - multiplicity);
    }

    /// Stores a multiplicity, pruning the entry when it reaches zero.
    fn set_entry(&mut self, element: T, multiplicity: i64) {
        if multiplicity == 0 {
            if self.elements.remove(&element).is_some() {
                trace!("entry reached zero multiplicity and was pruned");
            }
        } else {
            self.elements.insert(element, multiplicity);
        }
    }
}

// ============================================================================
// Algebra
// ============================================================================

impl<T: Clone + Eq + Hash> HybridSet<T> {
    /// Entry-wise sum of two hybrid sets.
    ///
    /// Entries that cancel exactly are pruned from the result.
    ///
    /// ```
    /// use hybridset::HybridSet;
    ///
    /// let a = HybridSet::from_multiplicities([("x", 2)]);
    /// let b = HybridSet::from_multiplicities([("x", -2)]);
    /// assert!(a.combine(&b).is_empty());
    /// ```
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        let mut elements = self.elements.clone();
        for (element, &multiplicity) in &other.elements {
            *elements.entry(element.clone()).or_insert(0) += multiplicity;
        }
        elements.retain(|_, multiplicity| *multiplicity != 0);
        Self::from_map(elements)
    }

    /// Multiplies every multiplicity by `factor`.
    ///
    /// A negative factor flips every entry's sign, so the cached masses
    /// swap roles: the old negative mass becomes the positive one and vice
    /// versa. Scaling by zero empties the set.
    ///
    /// ```
    /// use hybridset::HybridSet;
    ///
    /// let set = HybridSet::from_multiplicities([("x", 3)]);
    /// let flipped = set.scale(-2);
    /// assert_eq!(flipped.multiplicity("x"), -6);
    /// assert_eq!(flipped.negative_mass(), -6);
    /// ```
    #[must_use]
    pub fn scale(&self, factor: i64) -> Self {
        if factor == 0 {
            return Self::new();
        }
        let elements = self
            .elements
            .iter()
            .map(|(element, &multiplicity)| (element.clone(), multiplicity * factor))
            .collect();
        let (positive_mass, negative_mass) = if factor > 0 {
            (self.positive_mass * factor, self.negative_mass * factor)
        } else {
            (self.negative_mass * factor, self.positive_mass * factor)
        };
        Self {
            elements,
            positive_mass,
            negative_mass,
        }
    }

    /// Flips the sign of every multiplicity.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.scale(-1)
    }

    /// Projects the positive entries into a classical multiset.
    #[must_use]
    pub fn positive_part(&self) -> Multiset<T> {
        Multiset::from_counts(
            self.elements
                .iter()
                .filter(|&(_, &multiplicity)| multiplicity > 0)
                .map(|(element, &multiplicity)| {
                    #[allow(clippy::cast_sign_loss)]
                    let count = multiplicity as usize;
                    (element.clone(), count)
                }),
        )
    }

    /// Projects the negative entries, with their signs dropped, into a
    /// classical multiset.
    #[must_use]
    pub fn negative_part(&self) -> Multiset<T> {
        Multiset::from_counts(
            self.elements
                .iter()
                .filter(|&(_, &multiplicity)| multiplicity < 0)
                .map(|(element, &multiplicity)| {
                    (element.clone(), multiplicity.unsigned_abs() as usize)
                }),
        )
    }
}

// ============================================================================
// Operators
// ============================================================================

impl<T: Clone + Eq + Hash> Add for &HybridSet<T> {
    type Output = HybridSet<T>;

    fn add(self, rhs: Self) -> HybridSet<T> {
        self.combine(rhs)
    }
}

impl<T: Clone + Eq + Hash> Add for HybridSet<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(&rhs)
    }
}

impl<T: Clone + Eq + Hash> Sub for &HybridSet<T> {
    type Output = HybridSet<T>;

    fn sub(self, rhs: Self) -> HybridSet<T> {
        self.combine(&rhs.negate())
    }
}

impl<T: Clone + Eq + Hash> Sub for HybridSet<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.combine(&rhs.negate())
    }
}

impl<T: Clone + Eq + Hash> Neg for &HybridSet<T> {
    type Output = HybridSet<T>;

    fn neg(self) -> HybridSet<T> {
        self.negate()
    }
}

impl<T: Clone + Eq + Hash> Neg for HybridSet<T> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<T: Clone + Eq + Hash> Mul<i64> for &HybridSet<T> {
    type Output = HybridSet<T>;

    fn mul(self, factor: i64) -> HybridSet<T> {
        self.scale(factor)
    }
}

impl<T: Clone + Eq + Hash> Mul<i64> for HybridSet<T> {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        self.scale(factor)
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T> Default for HybridSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality is equality of the element maps. The cached masses are derived
/// from the map, so they never need comparing.
impl<T: Eq + Hash> PartialEq for HybridSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq + Hash> Eq for HybridSet<T> {}

impl<T: Eq + Hash> FromIterator<T> for HybridSet<T> {
    /// Collects occurrences, each contributing +1.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut elements: HashMap<T, i64> = HashMap::new();
        for element in iter {
            *elements.entry(element).or_insert(0) += 1;
        }
        Self::from_map(elements)
    }
}

impl<T: Eq + Hash> From<Multiset<T>> for HybridSet<T> {
    /// Adopts a classical multiset; every count becomes a positive
    /// multiplicity.
    fn from(multiset: Multiset<T>) -> Self {
        let elements = multiset
            .into_counts()
            .map(|(element, count)| (element, i64::try_from(count).unwrap_or(i64::MAX)))
            .collect();
        Self::from_map(elements)
    }
}

impl<'a, T> IntoIterator for &'a HybridSet<T> {
    type Item = (&'a T, i64);
    type IntoIter = Entries<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for HybridSet<T> {
    type Item = (T, i64);
    type IntoIter = hash_map::IntoIter<T, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Renders as `{positive occurrences|negative occurrences}`, e.g. a set
/// holding `a` twice and owing `b` once renders as `{a, a|b}`. Element
/// order within each side is arbitrary.
impl<T: fmt::Display> fmt::Display for HybridSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (element, &multiplicity) in &self.elements {
            if multiplicity > 0 {
                for _ in 0..multiplicity {
                    if first {
                        first = false;
                    } else {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
            }
        }
        f.write_str("|")?;
        let mut first = true;
        for (element, &multiplicity) in &self.elements {
            if multiplicity < 0 {
                for _ in 0..multiplicity.unsigned_abs() {
                    if first {
                        first = false;
                    } else {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
            }
        }
        f.write_str("}")
    }
}

/// Borrowing iterator over `(element, multiplicity)` entries.
#[derive(Debug, Clone)]
pub struct Entries<'a, T> {
    inner: hash_map::Iter<'a, T, i64>,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (&'a T, i64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(element, &multiplicity)| (element, multiplicity))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}

// ============================================================================
// Tests
// ============================================================================
