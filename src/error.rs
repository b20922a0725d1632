//! Error types for hybrid-set conversions.

/// Error returned when converting a hybrid set with negative multiplicities
/// into a classical multiset.
///
/// A classical multiset cannot represent negative presence, so the
/// conversion is fallible. The positive projection is always available
/// through `HybridSet::positive_part` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert to a multiset: {negative_entries} element(s) carry negative multiplicity")]
pub struct NegativePresenceError {
    /// Number of distinct elements with a negative multiplicity.
    pub negative_entries: usize,
}
