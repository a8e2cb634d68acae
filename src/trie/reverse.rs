use crate::error::Error;

use super::forward::Trie;
use super::iter::Items;

fn reversed(s: &str) -> String {
    s.chars().rev().collect()
}

/// The suffix-matching mirror image of [`Trie`].
///
/// Every external key is reversed before touching the underlying forward
/// tree, and every emitted remainder/key is reversed again on the way out.
/// `longest_prefix` therefore finds the longest *suffix* of the input that
/// the tree recognizes.
#[derive(Debug, Clone, Default)]
pub struct BackTrie<V> {
    inner: Trie<V>,
}

impl<V> BackTrie<V> {
    pub fn new() -> Self {
        Self { inner: Trie::new() }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `key` is the un-reversed external key (a Romanized suffix).
    pub fn insert(&mut self, key: &str, value: V) {
        self.inner.insert(&reversed(key), value);
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.inner.contains_node(&reversed(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(&reversed(key))
    }

    pub fn lookup(&self, key: &str) -> Result<&V, Error> {
        self.inner.lookup(&reversed(key))
    }

    pub fn lookup_mut(&mut self, key: &str) -> Result<&mut V, Error> {
        self.inner.lookup_mut(&reversed(key))
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.inner.remove(&reversed(key))
    }

    /// Traversal order matches the underlying forward tree's; the yielded
    /// keys are un-reversed back into external (suffix-first-read) form.
    pub fn items(&self, prefix: Option<&str>) -> impl Iterator<Item = (String, &V)> {
        let reversed_prefix = prefix.map(reversed);
        let inner_items: Items<'_, V> = self.inner.items(reversed_prefix.as_deref());
        inner_items.map(|(k, v)| (reversed(&k), v))
    }

    /// Longest matching *suffix* of `key`. The returned remainder is the
    /// unconsumed prefix of `key` (in original, non-reversed orientation).
    pub fn longest_prefix<'k>(&self, key: &'k str) -> Result<(&V, &'k str), Error> {
        let rev = reversed(key);
        let (value, rev_remainder) = self.inner.longest_prefix(&rev)?;
        let consumed = rev.len() - rev_remainder.len();
        Ok((value, &key[..key.len() - consumed]))
    }

    pub fn all_parts(&self, key: &str) -> Result<Vec<&V>, Error> {
        let rev = reversed(key);
        let mut parts = self.inner.all_parts(&rev)?;
        parts.reverse();
        Ok(parts)
    }
}

impl<V: Clone> BackTrie<V> {
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(feature = "snapshot")]
impl<V: Clone> BackTrie<V> {
    pub fn snapshot(&self) -> super::snapshot::NodeSnapshot<V> {
        self.inner.snapshot()
    }

    pub fn from_snapshot(snapshot: super::snapshot::NodeSnapshot<V>) -> Self {
        Self {
            inner: Trie::from_snapshot(snapshot),
        }
    }
}
