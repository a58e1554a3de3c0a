//! Slot states shared by the open-addressing variants, plus the hash-to-index
//! reduction every variant applies.

/// State of one cell in an open-addressing slot array.
///
/// The key and value exist only while the slot is `Busy`. A `Removed` slot is
/// a tombstone: lookups probe past it, inserts may reclaim it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot<K, V> {
    /// Never occupied. A lookup probe sequence may terminate here.
    Free,
    /// Holds a live entry.
    Busy {
        /// The entry's key.
        key: K,
        /// The entry's value.
        value: V,
    },
    /// Previously occupied. Lookups continue past it, inserts may reuse it.
    Removed,
}

impl<K, V> Slot<K, V> {
    /// Returns true when the slot holds a live entry.
    pub(crate) fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

/// Reduces a raw hash value to a slot index by modulo capacity.
///
/// Capacity is at least 2 for every constructed table, so the remainder is
/// always taken; the zero fallbacks only keep the arithmetic total.
pub(crate) fn reduce(raw: u64, capacity: usize) -> usize {
    let cap = u64::try_from(capacity).unwrap_or(u64::MAX);
    usize::try_from(raw.checked_rem(cap).unwrap_or(0)).unwrap_or(0)
}

/// Widens a slot count into the hash domain for probe arithmetic.
pub(crate) fn as_hash(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}
