//! Two-way lookup between a name and an index.

use std::collections::HashMap;
use std::hash::Hash;

/// A bidirectional map keeping a forward (`K -> V`) and a reverse (`V -> K`)
/// map in sync.
///
/// Only one entry may exist per key and per value: inserting a pair whose key
/// or value is already present evicts the stale pairing from both sides.
///
/// # Example
///
/// ```
/// use pixeldna::bimap::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert("hair".to_string(), 150u32);
///
/// assert_eq!(map.forward("hair"), Some(&150));
/// assert_eq!(map.reverse(&150), Some(&"hair".to_string()));
/// assert_eq!(map.forward("body"), None);
/// ```
#[derive(Debug, Clone)]
pub struct BiMap<K, V> {
    forward: HashMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> Default for BiMap<K, V> {
    fn default() -> Self {
        Self { forward: HashMap::new(), reverse: HashMap::new() }
    }
}

impl<K, V> BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, keeping both directions consistent.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(old_value) = self.forward.remove(&key) {
            self.reverse.remove(&old_value);
        }
        if let Some(old_key) = self.reverse.remove(&value) {
            self.forward.remove(&old_key);
        }
        self.forward.insert(key.clone(), value.clone());
        self.reverse.insert(value, key);
    }

    /// Look up the value for a key.
    pub fn forward<Q>(&self, key: &Q) -> Option<&V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.forward.get(key)
    }

    /// Look up the key for a value.
    pub fn reverse<Q>(&self, value: &Q) -> Option<&K>
    where
        V: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.reverse.get(value)
    }

    pub fn contains_forward<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.forward.contains_key(key)
    }

    pub fn contains_reverse<Q>(&self, value: &Q) -> bool
    where
        V: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.reverse.contains_key(value)
    }

    /// Remove a key and its reverse entry. Returns the removed value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let value = self.forward.remove(key)?;
        self.reverse.remove(&value);
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate over key/value pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }
}
