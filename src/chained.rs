use std::fmt::{self, Display};

use crate::error::TableError;
use crate::slot;
use crate::table::{HashFn, HashTable};

/// One owned entry in a bucket chain.
#[derive(Debug, Clone)]
struct Node<K, V> {
    /// The entry's key.
    key: K,
    /// The entry's value.
    value: V,
    /// The rest of the chain, owned exclusively by this node.
    next: Option<Box<Node<K, V>>>,
}

/// A fixed-capacity hash table resolving collisions by separate chaining.
///
/// Each bucket holds a singly linked chain of entries; an insert prepends at
/// the chain head in O(1) and always succeeds. No probe sequence exists and
/// the bucket array never fills: load factors above 1 simply grow the
/// chains.
///
/// Duplicate keys accumulate: a new entry for an existing key sits ahead of
/// the old one and shadows it for [`get`](HashTable::get) until removed.
#[derive(Debug, Clone)]
pub struct ChainedMap<K, V, H = HashFn<K>> {
    /// One optional chain head per hash residue.
    buckets: Vec<Option<Box<Node<K, V>>>>,
    /// Live entry count across all chains, maintained incrementally.
    len: usize,
    /// Caller-supplied hash function.
    hash: H,
}

impl<K, V, H> ChainedMap<K, V, H>
where
    H: Fn(&K) -> u64,
{
    /// Creates an empty table with the given bucket count and hash function.
    ///
    /// Bucket counts below 2 are rounded up to 2.
    pub fn new(capacity: usize, hash: H) -> Self {
        let capacity = capacity.max(2);
        Self {
            buckets: (0..capacity).map(|_| None).collect(),
            len: 0,
            hash,
        }
    }

    /// Returns the fixed bucket count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// First entry with this key, scanning its chain from the head.
    fn locate(&self, key: &K) -> Option<&Node<K, V>>
    where
        K: Eq,
    {
        let index = slot::reduce((self.hash)(key), self.capacity());
        let mut node = self.buckets.get(index).and_then(|head| head.as_deref());

        while let Some(entry) = node {
            if entry.key == *key {
                return Some(entry);
            }
            node = entry.next.as_deref();
        }

        None
    }
}

impl<K, V, H> ChainedMap<K, V, H> {
    /// Pops every chain node by node. Iterative so a long chain cannot
    /// recurse the stack away on teardown.
    fn drop_chains(&mut self) {
        for bucket in &mut self.buckets {
            let mut chain = bucket.take();
            while let Some(mut node) = chain {
                chain = node.next.take();
            }
        }
        self.len = 0;
    }
}

impl<K, V, H> Drop for ChainedMap<K, V, H> {
    fn drop(&mut self) {
        self.drop_chains();
    }
}

impl<K, V, H> HashTable<K, V> for ChainedMap<K, V, H>
where
    K: Eq + Display,
    V: Display,
    H: Fn(&K) -> u64,
{
    /// Prepends at the bucket head. Never fails.
    fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        let index = slot::reduce((self.hash)(&key), self.capacity());

        if let Some(head) = self.buckets.get_mut(index) {
            let next = head.take();
            *head = Some(Box::new(Node { key, value, next }));
            self.len = self.len.saturating_add(1);
        }

        Ok(())
    }

    fn remove(&mut self, key: &K) -> bool {
        let index = slot::reduce((self.hash)(key), self.capacity());
        let Some(mut link) = self.buckets.get_mut(index) else {
            return false;
        };

        // Walk until `link` holds either the first match or the chain end.
        while link.as_ref().is_some_and(|node| node.key != *key) {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }

        // Splice the hit out by relinking its predecessor to its successor.
        match link.take() {
            Some(node) => {
                *link = node.next;
                self.len = self.len.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    fn find(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    fn get(&self, key: &K) -> Result<&V, TableError> {
        match self.locate(key) {
            Some(node) => Ok(&node.value),
            None => Err(TableError::KeyNotFound),
        }
    }

    fn clear(&mut self) {
        self.drop_chains();
    }

    fn len(&self) -> usize {
        self.len
    }

    fn print(&self) {
        print!("{self}");
    }
}

impl<K, V, H> Display for ChainedMap<K, V, H>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            let mut node = bucket.as_deref();
            if node.is_none() {
                continue;
            }

            write!(f, "[{index}]:")?;
            while let Some(entry) = node {
                write!(f, " {}({})", entry.value, entry.key)?;
                node = entry.next.as_deref();
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ChainedMap;
    use crate::error::TableError;
    use crate::table::HashTable;

    /// Reduces keys modulo 10 so collisions are easy to script.
    fn hash_mod10(key: &i64) -> u64 {
        key.unsigned_abs() % 10
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = ChainedMap::new(10, hash_mod10);

        assert_eq!(map.insert(1, "one"), Ok(()));
        assert_eq!(map.insert(2, "two"), Ok(()));

        assert_eq!(map.get(&1), Ok(&"one"));
        assert_eq!(map.get(&2), Ok(&"two"));
        assert_eq!(map.get(&3), Err(TableError::KeyNotFound));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_chain_grows_at_the_head() {
        let mut map = ChainedMap::new(10, hash_mod10);

        assert_eq!(map.insert(5, "a"), Ok(()));
        assert_eq!(map.insert(15, "b"), Ok(()));
        assert_eq!(map.insert(25, "c"), Ok(()));

        // Most recent first within the bucket.
        assert_eq!(map.to_string(), "[5]: c(25) b(15) a(5)\n");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_insert_never_fails_past_capacity() {
        let mut map = ChainedMap::new(2, hash_mod10);

        for key in 0..20 {
            assert_eq!(map.insert(key, key), Ok(()));
        }

        assert_eq!(map.len(), 20);
        for key in 0..20 {
            assert!(map.find(&key));
        }
    }

    #[test]
    fn test_duplicate_key_shadows_older_entry() {
        let mut map = ChainedMap::new(10, hash_mod10);

        assert_eq!(map.insert(5, "old"), Ok(()));
        assert_eq!(map.insert(5, "new"), Ok(()));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&5), Ok(&"new"));

        // Removing the shadow uncovers the older entry.
        assert!(map.remove(&5));
        assert_eq!(map.get(&5), Ok(&"old"));
        assert!(map.remove(&5));
        assert!(!map.find(&5));
    }

    #[test]
    fn test_remove_relinks_head_middle_and_tail() {
        let mut map = ChainedMap::new(10, hash_mod10);

        assert_eq!(map.insert(5, "a"), Ok(()));
        assert_eq!(map.insert(15, "b"), Ok(()));
        assert_eq!(map.insert(25, "c"), Ok(()));

        // Middle of the chain (order is c, b, a).
        assert!(map.remove(&15));
        assert_eq!(map.to_string(), "[5]: c(25) a(5)\n");

        // Head.
        assert!(map.remove(&25));
        assert_eq!(map.to_string(), "[5]: a(5)\n");

        // Last remaining node.
        assert!(map.remove(&5));
        assert!(map.is_empty());
        assert!(!map.remove(&5));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut map = ChainedMap::new(10, hash_mod10);

        for key in 0..15 {
            assert_eq!(map.insert(key, key), Ok(()));
        }
        map.clear();

        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.find(&3));
        assert_eq!(map.capacity(), 10);

        assert_eq!(map.insert(3, 33), Ok(()));
        assert_eq!(map.get(&3), Ok(&33));
    }

    #[test]
    fn test_clone_deep_copies_chains() {
        let mut map = ChainedMap::new(10, hash_mod10);
        assert_eq!(map.insert(5, "a"), Ok(()));
        assert_eq!(map.insert(15, "b"), Ok(()));

        let mut copy = map.clone();
        assert!(copy.remove(&5));
        assert!(copy.remove(&15));
        assert!(copy.is_empty());

        assert_eq!(map.get(&5), Ok(&"a"));
        assert_eq!(map.get(&15), Ok(&"b"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_long_chain_drops_without_recursion() {
        let mut map = ChainedMap::new(2, |_key: &i64| 0);

        for key in 0..50_000 {
            assert_eq!(map.insert(key, key), Ok(()));
        }

        drop(map);
    }
}
