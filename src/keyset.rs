//! The immutable boundary around a compiled key-set (§4.F/§9 "ownership of
//! parent trees": compilation produces trees that callers must not mutate;
//! `KeySet` is the module boundary that enforces that by only exposing
//! read-only accessors).

use indexmap::IndexMap;

use crate::key::ReplacementKey;
use crate::profile::Profile;

/// A compiled, read-only mapping from key-name (`"base"`, `"front"`,
/// `"mid"`, `"end"`, ...) to its compiled [`ReplacementKey`], produced once
/// by [`crate::compiler::compile`] and shared by every subsequent decode
/// call. Safe for concurrent read-only use: `Send + Sync` since every
/// field is immutable plain data.
#[derive(Clone)]
pub struct KeySet {
    keys: IndexMap<String, ReplacementKey>,
    profile: Profile,
}

impl KeySet {
    pub(crate) fn new(keys: IndexMap<String, ReplacementKey>, profile: Profile) -> Self {
        Self { keys, profile }
    }

    /// Look up a compiled key by name (e.g. `"front"`, `"mid"`, `"end"`).
    pub fn get(&self, name: &str) -> Option<&ReplacementKey> {
        self.keys.get(name)
    }

    /// The names of every compiled key, in compilation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// The profile this key-set was compiled from, retained for
    /// introspection and for the snapshot format.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[cfg(feature = "snapshot")]
    pub(crate) fn parts(&self) -> (&IndexMap<String, ReplacementKey>, &Profile) {
        (&self.keys, &self.profile)
    }

    #[cfg(feature = "snapshot")]
    pub(crate) fn from_parts(keys: IndexMap<String, ReplacementKey>, profile: Profile) -> Self {
        Self::new(keys, profile)
    }
}

impl std::ops::Index<&str> for KeySet {
    type Output = ReplacementKey;

    fn index(&self, name: &str) -> &ReplacementKey {
        &self.keys[name]
    }
}
