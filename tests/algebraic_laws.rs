//! Algebraic law property tests for hybrid sets.
//!
//! Verifies the laws the signed-multiset algebra is built around, using
//! property-based testing via `proptest`.
//!
//! # Laws Tested
//!
//! ## Combine Group Laws
//! - combine is commutative
//! - combine is associative
//! - the empty set is the identity element
//! - negation is the inverse element
//! - cardinality is additive under combine
//!
//! ## Scale Laws
//! - scale(0) empties, scale(1) is identity, scale(-1) is negate
//! - scale distributes over combine and composes multiplicatively
//! - weight scales by |factor|, cardinality by factor
//!
//! ## Mass Invariant Laws
//! - cached masses equal the recomputed sign-split sums after any
//!   construction or mutation sequence
//! - no entry ever holds multiplicity zero
//!
//! ## Ordering Laws
//! - partial_ordering is reflexive, antisymmetric, transitive
//! - subset/superset duality; disjointness symmetry
//! - natural subset is reflexive and implies subset
//!
//! ## Complement Laws
//! - complement exists iff the receiver is a natural subset
//! - part.combine(complement) rebuilds the whole
//!
//! ## Conversion Laws
//! - Multiset -> HybridSet -> Multiset round-trips
//! - negative entries block conversion with an exact count
//! - difference-path and mapping-path construction agree

mod common;

use common::{init_test_logging, test_proptest_config};
use hybridset::{partial_ordering, HybridSet, Multiset};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Raw `(element, multiplicity)` entries over a small element domain, so
/// collisions and cancellations are common.
fn arb_entries() -> impl Strategy<Value = Vec<(u32, i64)>> {
    prop::collection::vec(((0u32..8), (-50i64..=50)), 0..12)
}

fn arb_hybrid() -> impl Strategy<Value = HybridSet<u32>> {
    arb_entries().prop_map(|entries| HybridSet::from_multiplicities(entries))
}

fn arb_multiset() -> impl Strategy<Value = Multiset<u32>> {
    prop::collection::vec(((0u32..8), (0usize..6)), 0..10)
        .prop_map(|entries| Multiset::from_counts(entries))
}

/// Scale factors small enough that composed scaling cannot overflow.
fn arb_factor() -> impl Strategy<Value = i64> {
    -5i64..=5
}

/// A `(part, whole)` pair where `part` is a natural subset of `whole` by
/// construction: on positive bounds the part holds between 0 and the bound,
/// on negative bounds it holds 0, the bound, or a deeper deficit.
fn arb_natural_pair() -> impl Strategy<Value = (HybridSet<u32>, HybridSet<u32>)> {
    (arb_entries(), prop::collection::vec(0u8..4, 12)).prop_map(|(entries, picks)| {
        let whole = HybridSet::from_multiplicities(entries);
        let mut canonical: Vec<(u32, i64)> = whole.iter().map(|(e, m)| (*e, m)).collect();
        canonical.sort_unstable();
        let mut part_entries = Vec::new();
        for ((element, bound), pick) in canonical.into_iter().zip(picks) {
            let ours = if bound > 0 {
                match pick {
                    0 => 0,
                    1 => bound,
                    _ => bound / 2,
                }
            } else {
                match pick {
                    0 => 0,
                    1 => bound,
                    _ => bound - i64::from(pick),
                }
            };
            if ours != 0 {
                part_entries.push((element, ours));
            }
        }
        (HybridSet::from_multiplicities(part_entries), whole)
    })
}

/// Recompute both masses from the stored entries.
fn recomputed_masses(set: &HybridSet<u32>) -> (i64, i64) {
    let mut positive = 0;
    let mut negative = 0;
    for (_, multiplicity) in set.iter() {
        if multiplicity > 0 {
            positive += multiplicity;
        } else {
            negative += multiplicity;
        }
    }
    (positive, negative)
}

// ============================================================================
// Combine Group Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// LAW: combine is commutative.
    #[test]
    fn combine_commutative(a in arb_hybrid(), b in arb_hybrid()) {
        init_test_logging();
        prop_assert_eq!(a.combine(&b), b.combine(&a));
    }

    /// LAW: combine is associative.
    #[test]
    fn combine_associative(a in arb_hybrid(), b in arb_hybrid(), c in arb_hybrid()) {
        init_test_logging();
        prop_assert_eq!(a.combine(&b).combine(&c), a.combine(&b.combine(&c)));
    }

    /// LAW: the empty set is the identity for combine.
    #[test]
    fn combine_identity(a in arb_hybrid()) {
        init_test_logging();
        let empty = HybridSet::new();
        prop_assert_eq!(&a.combine(&empty), &a);
        prop_assert_eq!(&empty.combine(&a), &a);
    }

    /// LAW: negation is the inverse element for combine.
    ///
    /// x.combine(x.negate()) leaves nothing behind: no keys, no mass, no
    /// weight.
    #[test]
    fn combine_inverse_annihilates(a in arb_hybrid()) {
        init_test_logging();
        let zero = a.combine(&a.negate());
        prop_assert!(zero.is_empty());
        prop_assert_eq!(zero.distinct_len(), 0);
        prop_assert_eq!(zero.cardinality(), 0);
        prop_assert_eq!(zero.weight(), 0);
    }

    /// LAW: cardinality is additive under combine.
    #[test]
    fn combine_cardinality_additive(a in arb_hybrid(), b in arb_hybrid()) {
        init_test_logging();
        prop_assert_eq!(a.combine(&b).cardinality(), a.cardinality() + b.cardinality());
    }

    /// LAW: weight is subadditive under combine (triangle inequality).
    #[test]
    fn combine_weight_subadditive(a in arb_hybrid(), b in arb_hybrid()) {
        init_test_logging();
        prop_assert!(a.combine(&b).weight() <= a.weight() + b.weight());
    }

    /// Combining merges multiplicities element-wise.
    #[test]
    fn combine_is_elementwise_sum(a in arb_hybrid(), b in arb_hybrid()) {
        init_test_logging();
        let combined = a.combine(&b);
        for element in 0u32..8 {
            prop_assert_eq!(
                combined.multiplicity(&element),
                a.multiplicity(&element) + b.multiplicity(&element)
            );
        }
    }
}

// ============================================================================
// Mass Invariant Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(512))]

    /// Cached masses match the recomputed sums after construction.
    #[test]
    fn masses_canonical_after_construction(a in arb_hybrid()) {
        init_test_logging();
        let (positive, negative) = recomputed_masses(&a);
        prop_assert!(positive >= 0);
        prop_assert!(negative <= 0);
        prop_assert_eq!(a.positive_mass(), positive);
        prop_assert_eq!(a.negative_mass(), negative);
        prop_assert_eq!(a.cardinality(), positive + negative);
        prop_assert_eq!(a.weight(), positive - negative);
    }

    /// Cached masses stay exact through arbitrary mutation sequences, no
    /// zero entry survives, and the result equals a set rebuilt from its
    /// own entries.
    #[test]
    fn masses_canonical_after_mutation(
        ops in prop::collection::vec((0u8..4, 0u32..8, 0i64..=5), 0..40)
    ) {
        init_test_logging();
        let mut set = HybridSet::new();
        for (op, element, amount) in ops {
            match op {
                0 => set.add_count(element, amount),
                1 => set.remove_count(element, amount),
                2 => HybridSet::add(&mut set, element),
                _ => set.remove(element),
            }
        }
        let (positive, negative) = recomputed_masses(&set);
        prop_assert_eq!(set.positive_mass(), positive);
        prop_assert_eq!(set.negative_mass(), negative);
        prop_assert_eq!(set.cardinality(), positive + negative);
        prop_assert_eq!(set.weight(), positive - negative);
        for (_, multiplicity) in set.iter() {
            prop_assert_ne!(multiplicity, 0);
        }
        let rebuilt = HybridSet::from_multiplicities(set.iter().map(|(e, m)| (*e, m)));
        prop_assert_eq!(rebuilt, set);
    }

    /// Adding and then removing the same amount is a no-op, and so is the
    /// reverse order.
    #[test]
    fn add_then_remove_round_trips(
        a in arb_hybrid(),
        element in 0u32..8,
        amount in 0i64..=20,
    ) {
        init_test_logging();
        let mut forward = a.clone();
        forward.add_count(element, amount);
        forward.remove_count(element, amount);
        prop_assert_eq!(&forward, &a);

        let mut backward = a.clone();
        backward.remove_count(element, amount);
        backward.add_count(element, amount);
        prop_assert_eq!(&backward, &a);
    }
}

// ============================================================================
// Scale Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// LAW: scaling by zero empties the set.
    #[test]
    fn scale_zero_empties(a in arb_hybrid()) {
        init_test_logging();
        let scaled = a.scale(0);
        prop_assert!(scaled.is_empty());
        prop_assert_eq!(scaled.distinct_len(), 0);
    }

    /// LAW: scaling by one is the identity.
    #[test]
    fn scale_one_identity(a in arb_hybrid()) {
        init_test_logging();
        prop_assert_eq!(&a.scale(1), &a);
    }

    /// LAW: scaling by minus one is negation, and negation is an involution.
    #[test]
    fn scale_minus_one_is_negate(a in arb_hybrid()) {
        init_test_logging();
        prop_assert_eq!(a.scale(-1), a.negate());
        prop_assert_eq!(&a.negate().negate(), &a);
    }

    /// LAW: scale distributes over combine.
    #[test]
    fn scale_distributes_over_combine(
        a in arb_hybrid(),
        b in arb_hybrid(),
        k in arb_factor(),
    ) {
        init_test_logging();
        prop_assert_eq!(a.combine(&b).scale(k), a.scale(k).combine(&b.scale(k)));
    }

    /// LAW: scaling composes multiplicatively.
    #[test]
    fn scale_composes(a in arb_hybrid(), j in arb_factor(), k in arb_factor()) {
        init_test_logging();
        prop_assert_eq!(a.scale(j).scale(k), a.scale(j * k));
    }

    /// LAW: weight scales by the factor's magnitude, cardinality by the
    /// factor itself.
    #[test]
    fn scale_aggregates(a in arb_hybrid(), k in arb_factor()) {
        init_test_logging();
        let scaled = a.scale(k);
        prop_assert_eq!(scaled.weight(), k.abs() * a.weight());
        prop_assert_eq!(scaled.cardinality(), k * a.cardinality());
        let (positive, negative) = recomputed_masses(&scaled);
        prop_assert_eq!(scaled.positive_mass(), positive);
        prop_assert_eq!(scaled.negative_mass(), negative);
    }
}

// ============================================================================
// Ordering Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(512))]

    /// LAW: partial_ordering is reflexive.
    #[test]
    fn ordering_reflexive(a in -100i64..=100) {
        prop_assert!(partial_ordering(a, a));
    }

    /// LAW: partial_ordering is antisymmetric.
    #[test]
    fn ordering_antisymmetric(a in -100i64..=100, b in -100i64..=100) {
        if partial_ordering(a, b) && partial_ordering(b, a) {
            prop_assert_eq!(a, b);
        }
    }

    /// LAW: partial_ordering is transitive.
    #[test]
    fn ordering_transitive(
        a in -100i64..=100,
        b in -100i64..=100,
        c in -100i64..=100,
    ) {
        if partial_ordering(a, b) && partial_ordering(b, c) {
            prop_assert!(partial_ordering(a, c));
        }
    }

    /// LAW: every set is a subset of itself.
    #[test]
    fn subset_reflexive(a in arb_hybrid()) {
        init_test_logging();
        prop_assert!(a.is_subset_of(&a));
    }

    /// LAW: subset and superset are dual.
    #[test]
    fn subset_superset_duality(a in arb_hybrid(), b in arb_hybrid()) {
        init_test_logging();
        prop_assert_eq!(a.is_subset_of(&b), b.is_superset_of(&a));
    }

    /// LAW: disjointness is symmetric.
    #[test]
    fn disjoint_symmetric(a in arb_hybrid(), b in arb_hybrid()) {
        init_test_logging();
        prop_assert_eq!(a.is_disjoint(&b), b.is_disjoint(&a));
    }

    /// LAW: the empty set is a subset and natural subset of everything.
    #[test]
    fn empty_is_subset_of_all(a in arb_hybrid()) {
        init_test_logging();
        let empty = HybridSet::new();
        prop_assert!(empty.is_subset_of(&a));
        prop_assert!(empty.is_natural_subset_of(&a));
    }

    /// LAW: natural subset is reflexive, including for proper sets.
    #[test]
    fn natural_subset_reflexive(a in arb_hybrid()) {
        init_test_logging();
        prop_assert!(a.is_natural_subset_of(&a));
    }

    /// LAW: natural subset implies subset.
    #[test]
    fn natural_subset_implies_subset((part, whole) in arb_natural_pair()) {
        init_test_logging();
        prop_assert!(part.is_natural_subset_of(&whole));
        prop_assert!(part.is_subset_of(&whole));
    }
}

// ============================================================================
// Complement Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// LAW: a natural subset's complement combines back into the whole.
    #[test]
    fn complement_round_trips((part, whole) in arb_natural_pair()) {
        init_test_logging();
        let rest = part.complement(&whole);
        prop_assert!(rest.is_some());
        let rest = rest.unwrap();
        prop_assert_eq!(part.combine(&rest), whole);
    }

    /// LAW: complement exists exactly when the receiver is a natural
    /// subset, and rebuilds the whole when it does.
    #[test]
    fn complement_consistency(a in arb_hybrid(), b in arb_hybrid()) {
        init_test_logging();
        match a.complement(&b) {
            Some(rest) => {
                prop_assert!(a.is_natural_subset_of(&b));
                prop_assert_eq!(a.combine(&rest), b);
            }
            None => prop_assert!(!a.is_natural_subset_of(&b)),
        }
    }

    /// LAW: the complement of a set within itself is empty.
    #[test]
    fn complement_of_self_is_empty(a in arb_hybrid()) {
        init_test_logging();
        let rest = a.complement(&a);
        prop_assert!(rest.is_some());
        prop_assert!(rest.unwrap().is_empty());
    }
}

// ============================================================================
// Conversion Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// LAW: a classical multiset survives the round trip through the
    /// hybrid representation.
    #[test]
    fn multiset_round_trips(m in arb_multiset()) {
        init_test_logging();
        let hybrid = HybridSet::from(m.clone());
        prop_assert_eq!(hybrid.positive_mass(), i64::try_from(m.len()).unwrap());
        prop_assert_eq!(hybrid.negative_mass(), 0);
        prop_assert!(!hybrid.is_proper());
        let back = Multiset::try_from(hybrid).unwrap();
        prop_assert_eq!(back, m);
    }

    /// LAW: conversion to a multiset fails iff negative entries exist, and
    /// the error reports exactly how many.
    #[test]
    fn conversion_counts_negative_entries(a in arb_hybrid()) {
        init_test_logging();
        let negatives = a.iter().filter(|&(_, m)| m < 0).count();
        let expected_len = usize::try_from(a.positive_mass()).unwrap();
        match Multiset::try_from(a) {
            Ok(multiset) => {
                prop_assert_eq!(negatives, 0);
                prop_assert_eq!(multiset.len(), expected_len);
            }
            Err(err) => prop_assert_eq!(err.negative_entries, negatives),
        }
    }

    /// LAW: the difference path agrees with classical multiset differences
    /// and with the mapping path.
    #[test]
    fn difference_path_matches_classical(
        include in prop::collection::vec(0u32..6, 0..15),
        exclude in prop::collection::vec(0u32..6, 0..15),
    ) {
        init_test_logging();
        let hybrid = HybridSet::from_difference(include.clone(), exclude.clone());
        let a: Multiset<u32> = include.iter().copied().collect();
        let b: Multiset<u32> = exclude.iter().copied().collect();
        prop_assert_eq!(
            hybrid.positive_mass(),
            i64::try_from(a.difference(&b).len()).unwrap()
        );
        prop_assert_eq!(
            hybrid.negative_mass(),
            -i64::try_from(b.difference(&a).len()).unwrap()
        );

        let mut entries: Vec<(u32, i64)> = include.iter().map(|&e| (e, 1)).collect();
        entries.extend(exclude.iter().map(|&e| (e, -1)));
        prop_assert_eq!(HybridSet::from_multiplicities(entries), hybrid);
    }

    /// LAW: frozen sets hash by content, not by construction history.
    #[test]
    fn frozen_hash_is_order_independent(entries in arb_entries()) {
        init_test_logging();
        let forward = HybridSet::from_multiplicities(entries.clone()).freeze();
        let mut built = HybridSet::new();
        for (element, multiplicity) in entries.into_iter().rev() {
            if multiplicity >= 0 {
                built.add_count(element, multiplicity);
            } else {
                built.remove_count(element, -multiplicity);
            }
        }
        let backward = built.freeze();
        prop_assert_eq!(forward.content_hash(), backward.content_hash());
        prop_assert_eq!(forward, backward);
    }
}
