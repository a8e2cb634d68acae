//! Replacement key: the orientation-agnostic component C of the design
//! doc. A [`ReplacementKey`] is either a forward tree (longest-*prefix*
//! match, used by e.g. `front`/`mid`) or a reverse tree (longest-*suffix*
//! match, used by `end`), but exposes the same merge/extend/lookup surface
//! either way so the compiler and decoder don't need to case on it.

mod generic;
mod tree_ops;

pub use generic::{Insertable, Key};

use crate::error::Error;
use crate::replacement::{ReplacementList, Weight};
use crate::trie::{BackTrie, Trie};

#[derive(Clone)]
pub enum ReplacementKey {
    Forward(Key<Trie<ReplacementList>>),
    Reverse(Key<BackTrie<ReplacementList>>),
}

impl ReplacementKey {
    pub fn new(suffix: bool) -> Self {
        if suffix {
            ReplacementKey::Reverse(Key::new())
        } else {
            ReplacementKey::Forward(Key::new())
        }
    }

    pub fn is_suffix(&self) -> bool {
        matches!(self, ReplacementKey::Reverse(_))
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Insertable>, weight: Weight) {
        match self {
            ReplacementKey::Forward(k) => k.insert(key, value, weight),
            ReplacementKey::Reverse(k) => k.insert(key, value, weight),
        }
    }

    pub fn update<I>(&mut self, mapping: I, weight: Weight)
    where
        I: IntoIterator<Item = (String, Insertable)>,
    {
        match self {
            ReplacementKey::Forward(k) => k.update(mapping, weight),
            ReplacementKey::Reverse(k) => k.update(mapping, weight),
        }
    }

    pub fn extend<I>(&mut self, mapping: I, weight: Weight)
    where
        I: IntoIterator<Item = (String, Insertable)>,
    {
        match self {
            ReplacementKey::Forward(k) => k.extend(mapping, weight),
            ReplacementKey::Reverse(k) => k.extend(mapping, weight),
        }
    }

    pub fn lookup(&self, key: &str) -> Result<&ReplacementList, Error> {
        match self {
            ReplacementKey::Forward(k) => k.lookup(key),
            ReplacementKey::Reverse(k) => k.lookup(key),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        match self {
            ReplacementKey::Forward(k) => k.contains(key),
            ReplacementKey::Reverse(k) => k.contains(key),
        }
    }

    pub fn contains_node(&self, key: &str) -> bool {
        match self {
            ReplacementKey::Forward(k) => k.contains_node(key),
            ReplacementKey::Reverse(k) => k.contains_node(key),
        }
    }

    pub fn longest_prefix<'k>(&self, key: &'k str) -> Result<(&ReplacementList, &'k str), Error> {
        match self {
            ReplacementKey::Forward(k) => k.longest_prefix(key),
            ReplacementKey::Reverse(k) => k.longest_prefix(key),
        }
    }

    pub fn all_parts(&self, key: &str) -> Result<Vec<&ReplacementList>, Error> {
        match self {
            ReplacementKey::Forward(k) => k.all_parts(key),
            ReplacementKey::Reverse(k) => k.all_parts(key),
        }
    }

    pub fn items(&self, prefix: Option<&str>) -> Vec<(String, ReplacementList)> {
        match self {
            ReplacementKey::Forward(k) => k.items(prefix),
            ReplacementKey::Reverse(k) => k.items(prefix),
        }
    }

    /// Produce a fresh key of the requested orientation, seeded from
    /// `self`. When the orientation matches, this is a node-graph deep
    /// copy; when it differs, contents are replayed through the dict
    /// intermediate produced by [`Self::items`] instead, since a forward
    /// and reverse tree have no compatible node graph to share.
    pub fn child(&self, suffix: bool) -> ReplacementKey {
        if self.is_suffix() == suffix {
            match self {
                ReplacementKey::Forward(k) => ReplacementKey::Forward(k.deep_copy()),
                ReplacementKey::Reverse(k) => ReplacementKey::Reverse(k.deep_copy()),
            }
        } else {
            let mut fresh = ReplacementKey::new(suffix);
            for (key, list) in self.items(None) {
                fresh.insert(&key, list, Weight::Additive(0));
            }
            fresh
        }
    }

    pub fn deep_copy(&self) -> Self {
        self.child(self.is_suffix())
    }
}

/// The wire shape of a [`ReplacementKey`] snapshot: which orientation, plus
/// the tree's own node snapshot.
#[cfg(feature = "snapshot")]
#[derive(serde::Serialize, serde::Deserialize)]
pub(crate) enum ReplacementKeySnapshot {
    Forward(crate::trie::snapshot::NodeSnapshot<ReplacementList>),
    Reverse(crate::trie::snapshot::NodeSnapshot<ReplacementList>),
}

#[cfg(feature = "snapshot")]
impl ReplacementKey {
    pub(crate) fn to_snapshot(&self) -> ReplacementKeySnapshot {
        match self {
            ReplacementKey::Forward(k) => ReplacementKeySnapshot::Forward(k.snapshot()),
            ReplacementKey::Reverse(k) => ReplacementKeySnapshot::Reverse(k.snapshot()),
        }
    }

    pub(crate) fn from_snapshot(snapshot: ReplacementKeySnapshot) -> Self {
        match snapshot {
            ReplacementKeySnapshot::Forward(s) => ReplacementKey::Forward(Key::from_snapshot(s)),
            ReplacementKeySnapshot::Reverse(s) => ReplacementKey::Reverse(Key::from_snapshot(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_overwrites_extend_appends() {
        let mut k = ReplacementKey::new(false);
        k.update(vec![("a".to_string(), Insertable::from("X"))], Weight::Additive(0));
        assert_eq!(k.lookup("a").unwrap().len(), 1);
        k.extend(vec![("a".to_string(), Insertable::from("Y"))], Weight::Additive(0));
        assert_eq!(k.lookup("a").unwrap().len(), 2);
        k.update(vec![("a".to_string(), Insertable::from("Z"))], Weight::Additive(0));
        assert_eq!(k.lookup("a").unwrap().len(), 1);
    }

    #[test]
    fn child_same_orientation_is_independent_copy() {
        let mut parent = ReplacementKey::new(false);
        parent.update(vec![("a".to_string(), Insertable::from("X"))], Weight::Additive(0));
        let mut child = parent.child(false);
        child.update(vec![("b".to_string(), Insertable::from("Y"))], Weight::Additive(0));
        assert!(parent.lookup("b").is_err());
        assert!(child.lookup("a").is_ok());
    }

    #[test]
    fn child_cross_orientation_goes_through_dict_intermediate() {
        let mut parent = ReplacementKey::new(false);
        parent.update(vec![("ab".to_string(), Insertable::from("X"))], Weight::Additive(0));
        let reversed = parent.child(true);
        assert!(reversed.is_suffix());
        assert!(reversed.lookup("ab").is_ok());
    }
}
