use crate::error::Error;

use super::iter::Items;
use super::node::{Node, Slot};

/// A prefix tree keyed by `char`, supporting insert, lookup, longest-prefix
/// match, and insertion-order-stable enumeration.
///
/// This is the forward orientation: `longest_prefix` matches a *prefix* of
/// the input, left to right. See [`super::BackTrie`] for the suffix-matching
/// mirror image.
#[derive(Debug, Clone)]
pub struct Trie<V> {
    pub(crate) root: Node<V>,
    len: usize,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Number of set-valued nodes in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` at `key`, creating intermediate nodes as needed.
    /// Overwrites any prior value at the terminal node.
    pub fn insert(&mut self, key: &str, value: V) {
        let node = self.node_mut(key);
        if !node.value.is_set() {
            self.len += 1;
        }
        node.value = Slot::Set(value);
    }

    fn node_mut(&mut self, key: &str) -> &mut Node<V> {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }
        node
    }

    fn node(&self, key: &str) -> Option<&Node<V>> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// True iff a node exists at `key`, regardless of whether it holds a
    /// value.
    pub fn contains_node(&self, key: &str) -> bool {
        self.node(key).is_some()
    }

    /// True iff `key` has a set value (not merely an intermediate node).
    pub fn contains(&self, key: &str) -> bool {
        self.node(key).is_some_and(|n| n.value.is_set())
    }

    /// Fails with [`Error::NotPresent`] if the terminal is unset or absent.
    pub fn lookup(&self, key: &str) -> Result<&V, Error> {
        self.node(key)
            .and_then(|n| n.value.as_ref())
            .ok_or_else(|| Error::not_present(key))
    }

    pub fn lookup_mut(&mut self, key: &str) -> Result<&mut V, Error> {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.get_mut(&ch).ok_or_else(|| Error::not_present(key))?;
        }
        node.value.as_mut().ok_or_else(|| Error::not_present(key))
    }

    /// Unset the value at `key`, then prune any ancestor nodes left with
    /// neither a value nor children.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let chars: Vec<char> = key.chars().collect();
        let mut path: Vec<char> = Vec::with_capacity(chars.len());
        {
            let mut node = &self.root;
            for ch in &chars {
                node = node.children.get(ch)?;
            }
            let _ = node;
        }
        // Re-walk mutably, recording the path, since IndexMap doesn't give us
        // a cheap stack of parent pointers.
        let mut node = &mut self.root;
        for ch in &chars {
            path.push(*ch);
            node = node.children.get_mut(ch).expect("path validated above");
        }
        let removed = node.value.take();
        if removed.is_some() {
            self.len -= 1;
        }
        self.prune_ancestors(&path);
        removed
    }

    fn prune_ancestors(&mut self, path: &[char]) {
        // Walk the ancestor chain from the leaf back to the root, deleting
        // any node left with no value and no children.
        for depth in (0..path.len()).rev() {
            let parent = self.node_at_mut(&path[..depth]);
            let child_key = path[depth];
            let should_delete = parent
                .children
                .get(&child_key)
                .is_some_and(|c| c.is_empty());
            if should_delete {
                parent.children.shift_remove(&child_key);
            } else {
                break;
            }
        }
    }

    fn node_at_mut(&mut self, path: &[char]) -> &mut Node<V> {
        let mut node = &mut self.root;
        for ch in path {
            node = node.children.get_mut(ch).expect("path validated by caller");
        }
        node
    }

    /// Depth-first, pre-order traversal of set-valued nodes under `prefix`
    /// (the whole tree, if `prefix` is empty or `None`).
    pub fn items(&self, prefix: Option<&str>) -> Items<'_, V> {
        let prefix = prefix.unwrap_or("");
        Items::new(prefix.to_string(), self.node(prefix))
    }

    /// Scan `key` left-to-right, returning the value of the deepest
    /// set-valued node reached, plus the unconsumed suffix. Fails with
    /// [`Error::NotPresent`] if no set-valued node was ever reached.
    pub fn longest_prefix<'k>(&self, key: &'k str) -> Result<(&V, &'k str), Error> {
        let mut node = &self.root;
        let mut best: Option<(&V, usize)> = None;
        let mut consumed = 0usize;
        for (i, ch) in key.char_indices() {
            match node.children.get(&ch) {
                Some(next) => {
                    node = next;
                    consumed = i + ch.len_utf8();
                    if let Some(v) = node.value.as_ref() {
                        best = Some((v, consumed));
                    }
                }
                None => break,
            }
        }
        match best {
            Some((v, consumed)) => Ok((v, &key[consumed..])),
            None => Err(Error::not_present(key)),
        }
    }

    /// Repeatedly apply [`Trie::longest_prefix`] until `key` is exhausted.
    /// Fails if any call fails to consume anything.
    pub fn all_parts(&self, key: &str) -> Result<Vec<&V>, Error> {
        let mut results = Vec::new();
        let mut remainder = key;
        while !remainder.is_empty() {
            let (value, rest) = self.longest_prefix(remainder)?;
            results.push(value);
            remainder = rest;
        }
        Ok(results)
    }
}

impl<V: Clone> Trie<V> {
    /// Deep copy of the tree.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(feature = "snapshot")]
impl<V: Clone> Trie<V> {
    pub fn snapshot(&self) -> super::snapshot::NodeSnapshot<V> {
        self.root.to_snapshot()
    }

    pub fn from_snapshot(snapshot: super::snapshot::NodeSnapshot<V>) -> Self {
        let root = Node::from_snapshot(snapshot);
        let len = count_set(&root);
        Self { root, len }
    }
}

#[cfg(feature = "snapshot")]
fn count_set<V>(node: &Node<V>) -> usize {
    let here = if node.value.is_set() { 1 } else { 0 };
    here + node.children.values().map(count_set).sum::<usize>()
}
