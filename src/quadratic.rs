use std::fmt::{self, Display};

use crate::error::TableError;
use crate::slot::{self, Slot};
use crate::table::{HashFn, HashTable};

/// A fixed-capacity hash table resolving collisions by quadratic probing.
///
/// The probe sequence for a key is `(h(key) + i * i) mod capacity` for
/// attempt `i = 0, 1, 2, …` up to `capacity` attempts. Quadratic offsets do
/// not visit every slot for most capacities, so an insert can exhaust its
/// probe cycle while free slots remain; that is inherent to the discipline
/// and not corrected here.
///
/// This variant stores no element counter: [`len`](HashTable::len) counts
/// busy slots by scanning the whole array and
/// [`is_empty`](HashTable::is_empty) scans until the first busy slot. The
/// sibling variants answer the same queries from an incrementally maintained
/// counter; the observable results are identical, only the cost differs.
#[derive(Debug, Clone)]
pub struct QuadraticProbeMap<K, V, H = HashFn<K>> {
    /// The slot array. Its length is the fixed capacity.
    slots: Vec<Slot<K, V>>,
    /// Caller-supplied hash function.
    hash: H,
}

impl<K, V, H> QuadraticProbeMap<K, V, H>
where
    H: Fn(&K) -> u64,
{
    /// Creates an empty table with the given capacity and hash function.
    ///
    /// Capacities below 2 are rounded up to 2.
    pub fn new(capacity: usize, hash: H) -> Self {
        let capacity = capacity.max(2);
        Self {
            slots: (0..capacity).map(|_| Slot::Free).collect(),
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
            hash.saturating_add(attempt.saturating_mul(attempt)),
            self.capacity(),
        )
    }
}

impl<K, V, H> QuadraticProbeMap<K, V, H>
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

impl<K, V, H> HashTable<K, V> for QuadraticProbeMap<K, V, H>
where
    K: Eq + Display,
    V: Display,
    H: Fn(&K) -> u64,
{
    fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        let hash = (self.hash)(&key);

        for attempt in 0..slot::as_hash(self.capacity()) {
            let index = self.probe(hash, attempt);

            match self.slots.get_mut(index) {
                Some(Slot::Busy { .. }) => {}
                Some(cell) => {
                    *cell = Slot::Busy { key, value };
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
    }

    /// Counted on demand by scanning the slot array.
    fn len(&self) -> usize {
        self.slots.iter().filter(|cell| cell.is_busy()).count()
    }

    /// Scans only until the first busy slot.
    fn is_empty(&self) -> bool {
        !self.slots.iter().any(Slot::is_busy)
    }

    fn print(&self) {
        print!("{self}");
    }
}

impl<K, V, H> Display for QuadraticProbeMap<K, V, H>
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
