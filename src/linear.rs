use std::fmt::{self, Display};

use crate::error::TableError;
use crate::slot::{self, Slot};
use crate::table::{HashFn, HashTable};

/// A fixed-capacity hash table resolving collisions by linear probing.
///
/// The probe sequence for a key is `(h(key) + i * step) mod capacity` for
/// attempt `i = 0, 1, 2, …` up to `capacity` attempts. The step is fixed at
/// construction (default 1) and taken as-is: a step sharing a factor with the
/// capacity leaves part of the table permanently unreachable for some hash
/// residues. Choosing a compatible step and capacity is the caller's
/// responsibility.
///
/// Not thread-safe; one owner drives a table at a time. Cloning produces a
/// fully independent copy of the slot array.
#[derive(Debug, Clone)]
pub struct LinearProbeMap<K, V, H = HashFn<K>> {
    /// The slot array. Its length is the fixed capacity.
    slots: Vec<Slot<K, V>>,
    /// Live entry count, maintained incrementally.
    len: usize,
    /// Distance between consecutive probe attempts.
    step: u64,
    /// Caller-supplied hash function.
    hash: H,
}

impl<K, V, H> LinearProbeMap<K, V, H>
where
    H: Fn(&K) -> u64,
{
    /// Creates an empty table with the given capacity and hash function,
    /// probing with the default step of 1.
    ///
    /// Capacities below 2 are rounded up to 2.
    pub fn new(capacity: usize, hash: H) -> Self {
        Self::with_step(capacity, hash, 1)
    }

    /// Creates an empty table probing with a custom step.
    ///
    /// Capacities below 2 are rounded up to 2. The step is not validated
    /// against the capacity.
    pub fn with_step(capacity: usize, hash: H, step: u64) -> Self {
        let capacity = capacity.max(2);
        Self {
            slots: (0..capacity).map(|_| Slot::Free).collect(),
            len: 0,
            step,
            hash,
        }
    }

    /// Returns the fixed slot count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot index probed on the given attempt.
    fn probe(&self, hash: u64, attempt: u64) -> usize {
        slot::reduce(
            hash.saturating_add(attempt.saturating_mul(self.step)),
            self.capacity(),
        )
    }
}

impl<K, V, H> LinearProbeMap<K, V, H>
where
    K: Eq,
    H: Fn(&K) -> u64,
{
    /// Walks the probe sequence for `key` and returns the index of the first
    /// matching busy slot. A free slot proves the key absent along this path
    /// and ends the walk early.
    fn locate(&self, key: &K) -> Option<usize> {
        let hash = (self.hash)(key);

        for attempt in 0..slot::as_hash(self.capacity()) {
            let index = self.probe(hash, attempt);

            match self.slots.get(index) {
                Some(Slot::Busy { key: occupant, .. }) if occupant == key => return Some(index),
                Some(Slot::Free) | None => return None,
                Some(Slot::Busy { .. } | Slot::Removed) => {}
            }
        }

        None
    }
}

impl<K, V, H> HashTable<K, V> for LinearProbeMap<K, V, H>
where
    K: Eq + Display,
    V: Display,
    H: Fn(&K) -> u64,
{
    fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        let hash = (self.hash)(&key);

        // Insert searches for space, not for the key, so it claims the first
        // slot that is not busy instead of stopping at a free one.
        for attempt in 0..slot::as_hash(self.capacity()) {
            let index = self.probe(hash, attempt);

            match self.slots.get_mut(index) {
                Some(Slot::Busy { .. }) => {}
                Some(cell) => {
                    *cell = Slot::Busy { key, value };
                    self.len = self.len.saturating_add(1);
                    return Ok(());
                }
                None => break,
            }
        }

        Err(TableError::CapacityExhausted)
    }

    fn remove(&mut self, key: &K) -> bool {
        let Some(index) = self.locate(key) else {
            return false;
        };

        if let Some(cell) = self.slots.get_mut(index) {
            *cell = Slot::Removed;
            self.len = self.len.saturating_sub(1);
            return true;
        }

        false
    }

    fn find(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    fn get(&self, key: &K) -> Result<&V, TableError> {
        match self.locate(key).and_then(|index| self.slots.get(index)) {
            Some(Slot::Busy { value, .. }) => Ok(value),
            _ => Err(TableError::KeyNotFound),
        }
    }

    fn clear(&mut self) {
        for cell in &mut self.slots {
            *cell = Slot::Free;
        }
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn print(&self) {
        print!("{self}");
    }
}

impl<K, V, H> Display for LinearProbeMap<K, V, H>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, cell) in self.slots.iter().enumerate() {
            if let Slot::Busy { key, value } = cell {
                writeln!(f, "[{index}]: {value}({key})")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LinearProbeMap;
    use crate::error::TableError;
    use crate::table::HashTable;

    /// Reduces keys modulo 10 so collisions are easy to script.
    fn hash_mod10(key: &i64) -> u64 {
        key.unsigned_abs() % 10
    }

    /// Sends every key to the same slot.
    fn hash_collide(_key: &i64) -> u64 {
        0
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = LinearProbeMap::new(10, hash_mod10);

        assert_eq!(map.insert(1, "one"), Ok(()));
        assert_eq!(map.insert(2, "two"), Ok(()));

        assert_eq!(map.get(&1), Ok(&"one"));
        assert_eq!(map.get(&2), Ok(&"two"));
        assert_eq!(map.get(&3), Err(TableError::KeyNotFound));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_colliding_keys_probe_forward() {
        let mut map = LinearProbeMap::new(10, hash_mod10);

        // 5, 15 and 25 all hash to slot 5 and spill into 6 and 7.
        assert_eq!(map.insert(5, "a"), Ok(()));
        assert_eq!(map.insert(15, "b"), Ok(()));
        assert_eq!(map.insert(25, "c"), Ok(()));

        assert_eq!(map.get(&5), Ok(&"a"));
        assert_eq!(map.get(&15), Ok(&"b"));
        assert_eq!(map.get(&25), Ok(&"c"));
        assert_eq!(map.to_string(), "[5]: a(5)\n[6]: b(15)\n[7]: c(25)\n");
    }

    #[test]
    fn test_lookup_stops_at_first_free_slot() {
        let mut map = LinearProbeMap::new(10, hash_mod10);

        assert_eq!(map.insert(5, "a"), Ok(()));
        assert_eq!(map.insert(15, "b"), Ok(()));

        // 25 would sit at slot 7, which is free, so the walk ends there.
        assert!(!map.find(&25));
        assert_eq!(map.get(&25), Err(TableError::KeyNotFound));
    }

    #[test]
    fn test_remove_leaves_probeable_tombstone() {
        let mut map = LinearProbeMap::new(10, hash_mod10);

        assert_eq!(map.insert(5, "a"), Ok(()));
        assert_eq!(map.insert(15, "b"), Ok(()));
        assert_eq!(map.insert(25, "c"), Ok(()));

        // Removing the middle of the run must not hide the tail entry.
        assert!(map.remove(&15));
        assert_eq!(map.len(), 2);
        assert!(!map.find(&15));
        assert!(map.find(&25));
        assert_eq!(map.get(&25), Ok(&"c"));
    }

    #[test]
    fn test_insert_reuses_tombstone() {
        let mut map = LinearProbeMap::new(10, hash_mod10);

        assert_eq!(map.insert(5, "a"), Ok(()));
        assert!(map.remove(&5));
        assert!(!map.find(&5));

        assert_eq!(map.insert(5, "again"), Ok(()));
        assert_eq!(map.get(&5), Ok(&"again"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_capacity_exhausted_after_full_cycle() {
        let mut map = LinearProbeMap::new(4, hash_collide);

        for key in 0..4 {
            assert_eq!(map.insert(key, key), Ok(()));
        }

        assert_eq!(map.len(), 4);
        assert_eq!(map.insert(99, 99), Err(TableError::CapacityExhausted));
        // The failed insert changed nothing.
        assert_eq!(map.len(), 4);
        assert!(!map.find(&99));
    }

    #[test]
    fn test_duplicate_key_occupies_second_slot() {
        let mut map = LinearProbeMap::new(10, hash_mod10);

        assert_eq!(map.insert(5, "old"), Ok(()));
        assert_eq!(map.insert(5, "new"), Ok(()));
        assert_eq!(map.len(), 2);

        // The earlier entry sits first on the shared probe path.
        assert_eq!(map.get(&5), Ok(&"old"));
        assert!(map.remove(&5));
        assert_eq!(map.get(&5), Ok(&"new"));
        assert!(map.remove(&5));
        assert!(!map.find(&5));
    }

    #[test]
    fn test_even_step_skips_odd_slots() {
        // Step 2 against capacity 8 can only ever reach the even slots for
        // an even hash residue, so the table fills at half its capacity.
        let mut map = LinearProbeMap::with_step(8, hash_collide, 2);

        for key in 0..4 {
            assert_eq!(map.insert(key, key), Ok(()));
        }

        assert_eq!(map.insert(4, 4), Err(TableError::CapacityExhausted));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut map = LinearProbeMap::new(10, hash_mod10);

        assert_eq!(map.insert(1, "one"), Ok(()));
        assert_eq!(map.insert(2, "two"), Ok(()));
        map.clear();

        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.find(&1));
        assert!(!map.find(&2));
        assert_eq!(map.capacity(), 10);

        // The cleared table accepts fresh inserts.
        assert_eq!(map.insert(1, "anew"), Ok(()));
        assert_eq!(map.get(&1), Ok(&"anew"));
    }

    #[test]
    fn test_clone_shares_nothing() {
        let mut map = LinearProbeMap::new(10, hash_mod10);
        assert_eq!(map.insert(1, "one"), Ok(()));

        let mut copy = map.clone();
        assert!(copy.remove(&1));
        assert_eq!(copy.len(), 0);

        assert_eq!(map.get(&1), Ok(&"one"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_tiny_capacity_rounds_up() {
        let map: LinearProbeMap<i64, i64, _> = LinearProbeMap::new(0, hash_mod10);
        assert_eq!(map.capacity(), 2);
    }
}
