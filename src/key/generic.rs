use crate::error::Error;
use crate::replacement::{Item, ReplacementList, Weight};

use super::tree_ops::TreeOps;

/// Anything [`Key::insert`]/[`Key::update`]/[`Key::extend`] will coerce into
/// a [`ReplacementList`]: the list itself (passed through), or a sequence
/// of items built the way [`ReplacementList::new`] builds them.
pub enum Insertable {
    List(ReplacementList),
    Items(Vec<Item>),
}

impl From<ReplacementList> for Insertable {
    fn from(l: ReplacementList) -> Self {
        Insertable::List(l)
    }
}

impl From<Vec<Item>> for Insertable {
    fn from(items: Vec<Item>) -> Self {
        Insertable::Items(items)
    }
}

impl From<&str> for Insertable {
    fn from(s: &str) -> Self {
        Insertable::Items(vec![Item::from(s)])
    }
}

impl From<(i64, &str)> for Insertable {
    fn from(pair: (i64, &str)) -> Self {
        Insertable::Items(vec![Item::from(pair)])
    }
}

fn coerce(key: &str, value: Insertable, weight: Weight) -> ReplacementList {
    let mut list = match value {
        Insertable::List(l) => l,
        Insertable::Items(items) => ReplacementList::new(key, items, 0),
    };
    if !matches!(weight, Weight::Additive(0)) {
        list.add_weight(weight);
    }
    list
}

/// A `ReplacementList`-valued prefix tree (component C), generic over its
/// backing orientation (forward [`crate::trie::Trie`] or reverse
/// [`crate::trie::BackTrie`]).
#[derive(Clone)]
pub struct Key<T> {
    tree: T,
}

impl<T: TreeOps> Key<T> {
    pub fn new() -> Self {
        Self { tree: T::empty() }
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Insertable>, weight: Weight) {
        let list = coerce(key, value.into(), weight);
        self.tree.insert_list(key, list);
    }

    /// Overwrite-insert every entry in `mapping`.
    pub fn update<I>(&mut self, mapping: I, weight: Weight)
    where
        I: IntoIterator<Item = (String, Insertable)>,
    {
        for (k, v) in mapping {
            let list = coerce(&k, v, weight);
            self.tree.insert_list(&k, list);
        }
    }

    /// For each entry: insert if absent, otherwise append the new items to
    /// the existing list (retaining the existing items, which stay first).
    pub fn extend<I>(&mut self, mapping: I, weight: Weight)
    where
        I: IntoIterator<Item = (String, Insertable)>,
    {
        for (k, v) in mapping {
            let incoming = coerce(&k, v, weight);
            match self.tree.lookup_list(&k) {
                Ok(existing) => {
                    let mut merged = existing.clone();
                    merged.append(incoming);
                    self.tree.insert_list(&k, merged);
                }
                Err(_) => self.tree.insert_list(&k, incoming),
            }
        }
    }

    pub fn lookup(&self, key: &str) -> Result<&ReplacementList, Error> {
        self.tree.lookup_list(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tree.contains(key)
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.tree.contains_node(key)
    }

    pub fn longest_prefix<'k>(&self, key: &'k str) -> Result<(&ReplacementList, &'k str), Error> {
        self.tree.longest_prefix(key)
    }

    pub fn all_parts(&self, key: &str) -> Result<Vec<&ReplacementList>, Error> {
        self.tree.all_parts(key)
    }

    pub fn items(&self, prefix: Option<&str>) -> Vec<(String, ReplacementList)> {
        self.tree.items_owned(prefix)
    }

    pub fn deep_copy(&self) -> Self {
        Self {
            tree: self.tree.deep_copy(),
        }
    }
}

impl<T: TreeOps> Default for Key<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "snapshot")]
impl Key<crate::trie::Trie<ReplacementList>> {
    pub(crate) fn snapshot(&self) -> crate::trie::snapshot::NodeSnapshot<ReplacementList> {
        self.tree.snapshot()
    }

    pub(crate) fn from_snapshot(
        snapshot: crate::trie::snapshot::NodeSnapshot<ReplacementList>,
    ) -> Self {
        Self {
            tree: crate::trie::Trie::from_snapshot(snapshot),
        }
    }
}

#[cfg(feature = "snapshot")]
impl Key<crate::trie::BackTrie<ReplacementList>> {
    pub(crate) fn snapshot(&self) -> crate::trie::snapshot::NodeSnapshot<ReplacementList> {
        self.tree.snapshot()
    }

    pub(crate) fn from_snapshot(
        snapshot: crate::trie::snapshot::NodeSnapshot<ReplacementList>,
    ) -> Self {
        Self {
            tree: crate::trie::BackTrie::from_snapshot(snapshot),
        }
    }
}
