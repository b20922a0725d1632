//! Classical non-negative multisets.
//!
//! `Multiset` stores each element with a strictly positive count and keeps
//! the total length cached. It is the collaborator type for the signed
//! [`HybridSet`](crate::HybridSet): the positive and negative projections
//! return multisets, and an all-positive hybrid set converts losslessly in
//! both directions.

use crate::error::NegativePresenceError;
use crate::hybrid::HybridSet;
use std::borrow::Borrow;
use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A multiset: an unordered collection that counts duplicate elements.
///
/// Counts are always at least 1; an element whose count reaches zero is
/// removed from the store. `len` reports the total number of occurrences,
/// `distinct_len` the number of distinct elements.
#[derive(Debug, Clone)]
pub struct Multiset<T> {
    elements: HashMap<T, usize>,
    total: usize,
}

impl<T> Multiset<T> {
    /// Creates an empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            total: 0,
        }
    }

    /// Returns the total number of occurrences, counting duplicates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.total
    }

    /// Returns true if no elements are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns the number of distinct elements.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.elements.len()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.total = 0;
    }

    /// Iterates over the elements, yielding each one once per occurrence.
    #[must_use]
    pub fn iter(&self) -> Occurrences<'_, T> {
        Occurrences {
            entries: self.elements.iter(),
            current: None,
            remaining: self.total,
        }
    }

    /// Alias of [`iter`](Self::iter), named to mirror the signed variant's
    /// positive-occurrence view.
    #[must_use]
    pub fn occurrences(&self) -> Occurrences<'_, T> {
        self.iter()
    }

    /// Iterates over `(element, count)` pairs.
    pub fn counts(&self) -> impl ExactSizeIterator<Item = (&T, usize)> + '_ {
        self.elements.iter().map(|(element, &count)| (element, count))
    }

    /// Consumes the multiset, yielding `(element, count)` pairs.
    pub fn into_counts(self) -> impl ExactSizeIterator<Item = (T, usize)> {
        self.elements.into_iter()
    }

    /// Iterates over the distinct elements.
    pub fn distinct_elements(&self) -> impl Iterator<Item = &T> {
        self.elements.keys()
    }
}

impl<T: Eq + Hash> Multiset<T> {
    /// Builds a multiset from `(element, count)` entries.
    ///
    /// Counts for duplicate elements accumulate; zero counts are dropped.
    #[must_use]
    pub fn from_counts<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, usize)>,
    {
        let mut elements: HashMap<T, usize> = HashMap::new();
        for (element, count) in entries {
            if count > 0 {
                *elements.entry(element).or_insert(0) += count;
            }
        }
        let total = elements.values().sum();
        Self { elements, total }
    }

    /// Returns the number of occurrences of an element, 0 if absent.
    #[must_use]
    pub fn count<Q>(&self, element: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.elements.get(element).copied().unwrap_or(0)
    }

    /// Returns true if the element occurs at least once.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.elements.contains_key(element)
    }

    /// Inserts one occurrence of an element.
    pub fn insert(&mut self, element: T) {
        self.insert_count(element, 1);
    }

    /// Inserts `count` occurrences of an element. Zero is a no-op.
    pub fn insert_count(&mut self, element: T, count: usize) {
        if count == 0 {
            return;
        }
        *self.elements.entry(element).or_insert(0) += count;
        self.total += count;
    }

    /// Removes one occurrence of an element.
    ///
    /// Returns true if an occurrence was removed.
    pub fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.remove_count(element, 1) == 1
    }

    /// Removes up to `count` occurrences of an element, saturating at zero.
    ///
    /// Returns the number of occurrences actually removed.
    pub fn remove_count<Q>(&mut self, element: &Q, count: usize) -> usize
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut removed = 0;
        if let Some(current) = self.elements.get_mut(element) {
            removed = count.min(*current);
            *current -= removed;
            if *current == 0 {
                self.elements.remove(element);
            }
            self.total -= removed;
        }
        removed
    }

    /// Returns true if every element occurs at most as often in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.elements
            .iter()
            .all(|(element, &count)| count <= other.count(element))
    }

    /// Returns true if `other` is a subset of this multiset.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }
}

impl<T: Clone + Eq + Hash> Multiset<T> {
    /// Element-wise maximum of the two count maps.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut elements = self.elements.clone();
        for (element, &count) in &other.elements {
            let entry = elements.entry(element.clone()).or_insert(0);
            *entry = (*entry).max(count);
        }
        let total = elements.values().sum();
        Self { elements, total }
    }

    /// Element-wise minimum of the two count maps.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let (smaller, larger) = if self.distinct_len() <= other.distinct_len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut elements = HashMap::new();
        for (element, &count) in &smaller.elements {
            let shared = count.min(larger.count(element));
            if shared > 0 {
                elements.insert(element.clone(), shared);
            }
        }
        let total = elements.values().sum();
        Self { elements, total }
    }

    /// Saturating element-wise subtraction: occurrences of `other` cancel
    /// occurrences here, never below zero.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut elements = HashMap::new();
        for (element, &count) in &self.elements {
            let remaining = count.saturating_sub(other.count(element));
            if remaining > 0 {
                elements.insert(element.clone(), remaining);
            }
        }
        let total = elements.values().sum();
        Self { elements, total }
    }

    /// Element-wise absolute difference of the two count maps.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut elements = HashMap::new();
        for (element, &count) in &self.elements {
            let gap = count.abs_diff(other.count(element));
            if gap > 0 {
                elements.insert(element.clone(), gap);
            }
        }
        for (element, &count) in &other.elements {
            if !self.elements.contains_key(element) {
                elements.insert(element.clone(), count);
            }
        }
        let total = elements.values().sum();
        Self { elements, total }
    }
}

impl<T> Default for Multiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> PartialEq for Multiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements && self.total == other.total
    }
}

impl<T: Eq + Hash> Eq for Multiset<T> {}

impl<T: Eq + Hash> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = Self::new();
        for element in iter {
            multiset.insert(element);
        }
        multiset
    }
}

impl<T: Eq + Hash> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a Multiset<T> {
    type Item = &'a T;
    type IntoIter = Occurrences<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for Multiset<T> {
    type Item = T;
    type IntoIter = IntoOccurrences<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoOccurrences {
            entries: self.elements.into_iter(),
            current: None,
            remaining: self.total,
        }
    }
}

/// Element order is arbitrary; occurrences of the same element are adjacent.
impl<T: fmt::Display> fmt::Display for Multiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (element, &count) in &self.elements {
            for _ in 0..count {
                if first {
                    first = false;
                } else {
                    f.write_str(", ")?;
                }
                write!(f, "{element}")?;
            }
        }
        f.write_str("}")
    }
}

impl<T: Eq + Hash> TryFrom<HybridSet<T>> for Multiset<T> {
    type Error = NegativePresenceError;

    /// Converts an all-positive hybrid set into a multiset.
    ///
    /// # Errors
    ///
    /// Returns [`NegativePresenceError`] if any element carries a negative
    /// multiplicity.
    fn try_from(set: HybridSet<T>) -> Result<Self, Self::Error> {
        let negative_entries = set.iter().filter(|&(_, m)| m < 0).count();
        if negative_entries > 0 {
            return Err(NegativePresenceError { negative_entries });
        }
        Ok(Self::from_counts(set.into_iter().map(
            |(element, multiplicity)| {
                #[allow(clippy::cast_sign_loss)]
                let count = multiplicity as usize;
                (element, count)
            },
        )))
    }
}

// ============================================================================
// Occurrence iterators
// ============================================================================

/// Borrowing iterator yielding each element once per occurrence.
#[derive(Debug)]
pub struct Occurrences<'a, T> {
    entries: hash_map::Iter<'a, T, usize>,
    current: Option<(&'a T, usize)>,
    remaining: usize,
}

impl<'a, T> Iterator for Occurrences<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((element, count)) = self.current {
                self.current = if count > 1 {
                    Some((element, count - 1))
                } else {
                    None
                };
                self.remaining -= 1;
                return Some(element);
            }
            match self.entries.next() {
                Some((element, &count)) => self.current = Some((element, count)),
                None => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Occurrences<'_, T> {}

/// Owning iterator yielding each element once per occurrence.
///
/// All but the last occurrence of an element are clones.
#[derive(Debug)]
pub struct IntoOccurrences<T> {
    entries: hash_map::IntoIter<T, usize>,
    current: Option<(T, usize)>,
    remaining: usize,
}

impl<T: Clone> Iterator for IntoOccurrences<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.current.take() {
                Some((element, count)) if count > 1 => {
                    let out = element.clone();
                    self.current = Some((element, count - 1));
                    self.remaining -= 1;
                    return Some(out);
                }
                Some((element, _)) => {
                    self.remaining -= 1;
                    return Some(element);
                }
                None => match self.entries.next() {
                    Some((element, count)) => self.current = Some((element, count)),
                    None => return None,
                },
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for IntoOccurrences<T> {}

// ============================================================================
// Tests
// ============================================================================
