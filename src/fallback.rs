//! Maps that answer lookup misses through a hook.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Produces a value for a key that is not in a [`FallbackMap`].
pub trait MissingKey<K, V> {
    /// Called on every lookup miss.
    fn on_missing(&self, key: &K) -> V;
}

impl<K, V, F> MissingKey<K, V> for F
where
    F: Fn(&K) -> V,
{
    fn on_missing(&self, key: &K) -> V {
        self(key)
    }
}

/// Logs a warning and answers `"<key> not present in the dictionary!"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotPresent;

impl<K: fmt::Display> MissingKey<K, String> for NotPresent {
    fn on_missing(&self, key: &K) -> String {
        let message = format!("{key} not present in the dictionary!");
        tracing::warn!("{message}");
        message
    }
}

/// A `HashMap` whose lookups never miss: absent keys go to a [`MissingKey`]
/// hook instead.
///
/// The hook's answer is returned, not stored.
#[derive(Debug, Clone)]
pub struct FallbackMap<K, V, H = NotPresent> {
    entries: HashMap<K, V>,
    hook: H,
}

impl<K, V> FallbackMap<K, V, NotPresent>
where
    K: Eq + Hash,
{
    /// Creates an empty map with the [`NotPresent`] hook.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hook(NotPresent)
    }
}

impl<K, V> Default for FallbackMap<K, V, NotPresent>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> FallbackMap<K, V, H>
where
    K: Eq + Hash,
{
    /// Creates an empty map that answers misses with `hook`.
    pub fn with_hook(hook: H) -> Self {
        Self {
            entries: HashMap::new(),
            hook,
        }
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Returns the stored value without consulting the hook.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is stored.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of the stored value, or the hook's answer on a miss.
    pub fn lookup(&self, key: &K) -> V
    where
        V: Clone,
        H: MissingKey<K, V>,
    {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.hook.on_missing(key))
    }
}

impl<K, V, H> Extend<(K, V)> for FallbackMap<K, V, H>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl<K, V> FromIterator<(K, V)> for FallbackMap<K, V, NotPresent>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
