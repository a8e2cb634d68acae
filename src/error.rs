//! Crate-wide error taxonomy.
//!
//! Lookup misses are routine and are meant to be caught by callers (the
//! decoder's fallback path in particular lives on [`Error::NotPresent`]).
//! Compilation failures are fatal to the compile that produced them and
//! carry enough context to localize the profile defect.

use thiserror::Error;

/// Top-level error type returned by tree lookups, compilation, and decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// No value is present at the given key (a routine lookup miss, not a
    /// profile defect).
    #[error("no value present for key {0:?}")]
    NotPresent(String),

    /// The profile could not be compiled into a key-set.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// No rule in the `front` key matches any prefix of the input word.
    #[error("decode failed for {0:?}: no rule matches any prefix")]
    DecodeFailure(String),
}

impl Error {
    pub fn not_present(key: impl Into<String>) -> Self {
        Self::NotPresent(key.into())
    }

    pub fn decode_failure(word: impl Into<String>) -> Self {
        Self::DecodeFailure(word.into())
    }
}

/// Errors raised while compiling a [`crate::profile::Profile`] into a
/// [`crate::keyset::KeySet`].
#[derive(Debug, Error)]
pub enum CompileError {
    /// A character in a character-set's member list could not be resolved
    /// against its parent key.
    #[error("character {char:?} not resolvable in key {parent_key:?}, parent of char set {class:?}")]
    CharSetNotResolvable {
        char: String,
        parent_key: String,
        class: String,
    },

    /// A pattern replacement referenced a capture group that the pattern key
    /// doesn't have.
    #[error("pattern {pattern_key:?}: capture group \\{group} has no matching class token")]
    Pattern { pattern_key: String, group: u8 },

    /// A group reference named a profile entry that doesn't exist.
    #[error("key {key:?} references unknown group {group:?}")]
    UnknownGroup { key: String, group: String },

    /// The `parent` chain between named keys forms a cycle.
    #[error("cycle in parent chain while compiling key {0:?}")]
    CycleInParents(String),

    /// A character-class name was referenced but never defined in `char_sets`.
    #[error("undefined character class {0:?}")]
    UndefinedCharSet(String),

    /// A `parent` (or char-set `key`) named a key-name that has no entry
    /// in `profile.keys`.
    #[error("key {0:?} has no entry in profile.keys")]
    UnknownKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
