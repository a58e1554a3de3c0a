//! The contract shared by all four table variants.

use crate::error::TableError;

/// A caller-supplied hash function.
///
/// This is the default callable type for every variant's hash parameter; any
/// `Fn(&K) -> u64` works in its place. Returning `u64` makes the
/// non-negativity the tables rely on a type-level fact, so the result is
/// usable as `hash mod capacity` directly. Callers hashing signed keys reduce
/// with `rem_euclid` themselves, as the bundled binaries do.
pub type HashFn<K> = fn(&K) -> u64;

/// A fixed-capacity key-value table.
///
/// Four interchangeable implementations exist, one per collision-resolution
/// discipline: [`ChainedMap`](crate::ChainedMap),
/// [`LinearProbeMap`](crate::LinearProbeMap),
/// [`QuadraticProbeMap`](crate::QuadraticProbeMap) and
/// [`DoubleHashProbeMap`](crate::DoubleHashProbeMap). They are siblings with
/// no shared state; a caller selects one at construction time and drives it
/// through this trait, usually as a `Box<dyn HashTable<K, V>>`.
///
/// Capacity is fixed for the table's lifetime. Keys are not deduplicated:
/// inserting an existing key adds a second, independent entry (see
/// [`insert`](Self::insert)).
pub trait HashTable<K, V> {
    /// Inserts an entry unconditionally.
    ///
    /// No uniqueness check is made. Under chaining a duplicate key is
    /// prepended ahead of the older entry and shadows it for
    /// [`get`](Self::get); under open addressing a duplicate lands in a later
    /// probe position and both entries stay independently findable and
    /// removable.
    ///
    /// # Errors
    ///
    /// [`TableError::CapacityExhausted`] when a full probe cycle finds no
    /// free or removed slot. Chaining never fails; a failed insert leaves the
    /// table untouched.
    fn insert(&mut self, key: K, value: V) -> Result<(), TableError>;

    /// Removes the first entry with this key along the probe or bucket
    /// traversal order.
    ///
    /// Returns true iff an entry was removed. Later duplicates survive.
    fn remove(&mut self, key: &K) -> bool;

    /// Returns true iff an entry with this key is reachable.
    #[must_use]
    fn find(&self, key: &K) -> bool;

    /// Returns the value of the first entry with this key along the probe or
    /// bucket traversal order.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] when no live entry with this key exists.
    fn get(&self, key: &K) -> Result<&V, TableError>;

    /// Removes every entry. Capacity and hash functions are unchanged and
    /// the storage is retained.
    fn clear(&mut self);

    /// Number of live entries.
    #[must_use]
    fn len(&self) -> usize;

    /// Whether the table holds no live entry.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the occupied part of the table to stdout, one line per slot or
    /// bucket in ascending index order. Purely observational.
    fn print(&self);
}
