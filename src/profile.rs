//! In-memory representation of a deromanization profile (§3/§6).
//!
//! A `Profile` is an opaque-to-callers nested value that the compiler
//! (`crate::compiler`) consumes. This crate never deserializes one from a
//! textual format itself — callers build a `Profile` directly, or (with the
//! `profile` feature) derive one via `serde::Deserialize` from whatever
//! format they like (YAML, JSON, TOML, ...). The `snapshot` feature also
//! needs `Profile` to round-trip through `serde` (a snapshot retains the
//! source profile alongside the compiled trees), so both features enable
//! the same derives.

use indexmap::IndexMap;

#[cfg(any(feature = "profile", feature = "snapshot"))]
use serde::{Deserialize, Serialize};

/// The top-level profile value the compiler consumes.
#[derive(Debug, Clone, Default)]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), derive(Serialize, Deserialize))]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), serde(default))]
pub struct Profile {
    /// Named keys to compile, e.g. `base`, `front`, `mid`, `end`.
    pub keys: IndexMap<String, KeyDescriptor>,
    /// Named character classes usable inside pattern keys.
    pub char_sets: IndexMap<String, CharSetDescriptor>,
    /// Two-fragment seams that should render as something other than their
    /// naive concatenation.
    pub broken_clusters: IndexMap<String, String>,
    /// Free-form groups: source-fragment → target spec. Referenced by name
    /// from a `KeyDescriptor`'s `groups`.
    pub groups: IndexMap<String, IndexMap<String, GroupValue>>,
}

/// The name of the key every other key inherits from unless it declares its
/// own `parent`, and the one key that itself has no parent.
pub const BASE_KEY: &str = "base";

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One entry in `profile.keys`.
#[derive(Debug, Clone, Default)]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), derive(Serialize, Deserialize))]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), serde(default))]
pub struct KeyDescriptor {
    /// `None` means "inherit from `base`", except for `base` itself, whose
    /// absent parent means "no parent — fresh empty tree".
    pub parent: Option<String>,
    /// Selects a reverse (suffix-matching) tree when true.
    pub suffix: bool,
    pub groups: Vec<GroupRef>,
}

/// A reference to a free-form profile group from within a key's `groups`
/// list, plus the routing/weight that reference carries.
#[derive(Debug, Clone)]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), derive(Serialize, Deserialize))]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), serde(untagged))]
pub enum GroupRef {
    /// A bare group name: applied with overwrite (`update`) semantics, no
    /// weight offset.
    Named(String),
    /// One or more `group name -> weight offset` pairs, each applied with
    /// append (`extend`) semantics.
    Weighted(IndexMap<String, i64>),
    /// `(group name, weight offset)` pairs applied, in *reverse* order,
    /// with `extend` semantics.
    WeightedList(Vec<(String, i64)>),
}

impl From<&str> for GroupRef {
    fn from(s: &str) -> Self {
        GroupRef::Named(s.to_string())
    }
}

impl From<String> for GroupRef {
    fn from(s: String) -> Self {
        GroupRef::Named(s)
    }
}

impl From<(&str, i64)> for GroupRef {
    fn from((name, weight): (&str, i64)) -> Self {
        let mut map = IndexMap::new();
        map.insert(name.to_string(), weight);
        GroupRef::Weighted(map)
    }
}

/// The target spec for one entry of a free-form group.
#[derive(Debug, Clone)]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), derive(Serialize, Deserialize))]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), serde(untagged))]
pub enum GroupValue {
    /// A single target string; weight defaults to 0.
    One(String),
    /// Multiple targets; weight is the index in the list.
    Many(Vec<String>),
    /// Explicit `(weight, target)` pairs.
    Weighted(Vec<(i64, String)>),
}

impl From<&str> for GroupValue {
    fn from(s: &str) -> Self {
        GroupValue::One(s.to_string())
    }
}

impl From<Vec<&str>> for GroupValue {
    fn from(v: Vec<&str>) -> Self {
        GroupValue::Many(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<(i64, &str)>> for GroupValue {
    fn from(v: Vec<(i64, &str)>) -> Self {
        GroupValue::Weighted(v.into_iter().map(|(w, s)| (w, s.to_string())).collect())
    }
}

impl GroupValue {
    /// Convert to the `Item` sequence `ReplacementList::new` expects.
    pub fn into_items(self) -> Vec<crate::replacement::Item> {
        match self {
            GroupValue::One(s) => vec![s.into()],
            GroupValue::Many(v) => v.into_iter().map(Into::into).collect(),
            GroupValue::Weighted(v) => v.into_iter().map(Into::into).collect(),
        }
    }
}

/// One entry in `profile.char_sets`.
#[derive(Debug, Clone)]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), derive(Serialize, Deserialize))]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), serde(untagged))]
pub enum CharSetDescriptor {
    /// Shorthand for `{chars: Named(name)}` with no explicit `key`.
    Shorthand(String),
    Full {
        chars: CharsSpec,
        #[cfg_attr(any(feature = "profile", feature = "snapshot"), serde(default))]
        key: Option<String>,
    },
}

impl CharSetDescriptor {
    /// Resolve the shorthand form into the explicit `(chars, key)` shape.
    pub fn normalized(&self) -> (CharsSpec, Option<String>) {
        match self {
            CharSetDescriptor::Shorthand(name) => (CharsSpec::Named(name.clone()), None),
            CharSetDescriptor::Full { chars, key } => (chars.clone(), key.clone()),
        }
    }
}

impl From<&str> for CharSetDescriptor {
    fn from(s: &str) -> Self {
        CharSetDescriptor::Shorthand(s.to_string())
    }
}

/// The character list a `CharSetDescriptor` draws from.
#[derive(Debug, Clone)]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), derive(Serialize, Deserialize))]
#[cfg_attr(any(feature = "profile", feature = "snapshot"), serde(untagged))]
pub enum CharsSpec {
    /// Names a free-form group whose keys constitute the member list.
    Named(String),
    /// An explicit list of (possibly multi-character) members.
    Explicit(Vec<String>),
}
