use crate::error::Error;
use crate::replacement::ReplacementList;
use crate::trie::{BackTrie, Trie};

/// Operations a `Key<T>` needs from its backing prefix tree, abstracting
/// over [`Trie`] (forward) and [`BackTrie`] (reverse) so the merge/extend
/// logic in [`super::Key`] is written once for both orientations.
pub trait TreeOps: Sized {
    fn empty() -> Self;
    fn insert_list(&mut self, key: &str, value: ReplacementList);
    fn lookup_list(&self, key: &str) -> Result<&ReplacementList, Error>;
    fn contains(&self, key: &str) -> bool;
    fn contains_node(&self, key: &str) -> bool;
    fn longest_prefix<'k>(&self, key: &'k str) -> Result<(&ReplacementList, &'k str), Error>;
    fn all_parts(&self, key: &str) -> Result<Vec<&ReplacementList>, Error>;
    fn items_owned(&self, prefix: Option<&str>) -> Vec<(String, ReplacementList)>;
    fn deep_copy(&self) -> Self;
}

impl TreeOps for Trie<ReplacementList> {
    fn empty() -> Self {
        Trie::new()
    }

    fn insert_list(&mut self, key: &str, value: ReplacementList) {
        self.insert(key, value);
    }

    fn lookup_list(&self, key: &str) -> Result<&ReplacementList, Error> {
        self.lookup(key)
    }

    fn contains(&self, key: &str) -> bool {
        Trie::contains(self, key)
    }

    fn contains_node(&self, key: &str) -> bool {
        Trie::contains_node(self, key)
    }

    fn longest_prefix<'k>(&self, key: &'k str) -> Result<(&ReplacementList, &'k str), Error> {
        Trie::longest_prefix(self, key)
    }

    fn all_parts(&self, key: &str) -> Result<Vec<&ReplacementList>, Error> {
        Trie::all_parts(self, key)
    }

    fn items_owned(&self, prefix: Option<&str>) -> Vec<(String, ReplacementList)> {
        self.items(prefix).map(|(k, v)| (k, v.clone())).collect()
    }

    fn deep_copy(&self) -> Self {
        Trie::deep_copy(self)
    }
}

impl TreeOps for BackTrie<ReplacementList> {
    fn empty() -> Self {
        BackTrie::new()
    }

    fn insert_list(&mut self, key: &str, value: ReplacementList) {
        self.insert(key, value);
    }

    fn lookup_list(&self, key: &str) -> Result<&ReplacementList, Error> {
        self.lookup(key)
    }

    fn contains(&self, key: &str) -> bool {
        BackTrie::contains(self, key)
    }

    fn contains_node(&self, key: &str) -> bool {
        BackTrie::contains_node(self, key)
    }

    fn longest_prefix<'k>(&self, key: &'k str) -> Result<(&ReplacementList, &'k str), Error> {
        BackTrie::longest_prefix(self, key)
    }

    fn all_parts(&self, key: &str) -> Result<Vec<&ReplacementList>, Error> {
        BackTrie::all_parts(self, key)
    }

    fn items_owned(&self, prefix: Option<&str>) -> Vec<(String, ReplacementList)> {
        self.items(prefix).map(|(k, v)| (k, v.clone())).collect()
    }

    fn deep_copy(&self) -> Self {
        BackTrie::deep_copy(self)
    }
}
