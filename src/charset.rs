//! Character-set resolver (component D): resolves a profile's named
//! character classes, lazily and with memoization, into lists of
//! [`ReplacementList`]s drawn from a compiled key.

use indexmap::IndexMap;

use crate::error::CompileError;
use crate::key::ReplacementKey;
use crate::profile::{CharSetDescriptor, CharsSpec, Profile};
use crate::replacement::ReplacementList;
use crate::trie::Trie;

/// One token of a tokenized pattern key: either a literal character or a
/// reference to a character class.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(char),
    Class(String),
}

/// Lazily-memoizing resolver over `profile.char_sets`.
///
/// Holds the still-unparsed descriptors plus a cache of already-resolved
/// classes, and a name trie over the union of both so pattern keys can be
/// tokenized by greedy longest-class-name match without forcing resolution
/// of every class up front (which would deadlock on classes that refer to
/// keys that themselves refer back to classes).
pub struct CharSetResolver {
    unparsed: IndexMap<String, CharSetDescriptor>,
    parsed: IndexMap<String, Vec<ReplacementList>>,
    names: Trie<()>,
}

impl CharSetResolver {
    pub fn new(char_sets: &IndexMap<String, CharSetDescriptor>) -> Self {
        let mut names = Trie::new();
        for name in char_sets.keys() {
            names.insert(name, ());
        }
        Self {
            unparsed: char_sets.clone(),
            parsed: IndexMap::new(),
            names,
        }
    }

    pub fn is_known_class(&self, name: &str) -> bool {
        self.unparsed.contains_key(name) || self.parsed.contains_key(name)
    }

    pub fn cached(&self, name: &str) -> Option<&Vec<ReplacementList>> {
        self.parsed.get(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&CharSetDescriptor> {
        self.unparsed.get(name)
    }

    /// Record the resolved member list for `name` and drop it from the
    /// unparsed set.
    pub fn store(&mut self, name: &str, list: Vec<ReplacementList>) {
        self.unparsed.shift_remove(name);
        self.parsed.insert(name.to_string(), list);
    }

    /// Tokenize `pattern_key` into a mix of class references and literal
    /// characters, using greedy longest-match over the registered class
    /// names.
    pub fn tokenize(&self, pattern_key: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut rest = pattern_key;
        while !rest.is_empty() {
            match self.names.longest_prefix(rest) {
                Ok((_, remainder)) => {
                    let consumed_len = rest.len() - remainder.len();
                    tokens.push(Token::Class(rest[..consumed_len].to_string()));
                    rest = remainder;
                }
                Err(_) => {
                    let ch = rest.chars().next().expect("rest is non-empty");
                    tokens.push(Token::Literal(ch));
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        tokens
    }

    /// The parent key name and member-character list a class descriptor
    /// names, with the shorthand/explicit-key forms normalized away. Does
    /// not touch the cache; callers that have already resolved parent
    /// compilation call [`Self::store`] with the result.
    pub fn plan(
        &self,
        name: &str,
        profile: &Profile,
    ) -> Result<(String, Vec<String>), CompileError> {
        let descriptor = self
            .unparsed
            .get(name)
            .ok_or_else(|| CompileError::UndefinedCharSet(name.to_string()))?;
        let (chars_spec, explicit_key) = descriptor.normalized();

        let parent_key_name = match (&chars_spec, &explicit_key) {
            (CharsSpec::Named(group_name), None) if profile.keys.contains_key(group_name) => {
                group_name.clone()
            }
            (_, Some(k)) => k.clone(),
            _ => crate::profile::BASE_KEY.to_string(),
        };

        let members: Vec<String> = match &chars_spec {
            CharsSpec::Explicit(list) => list.clone(),
            CharsSpec::Named(group_name) => profile
                .groups
                .get(group_name)
                .ok_or_else(|| CompileError::UndefinedCharSet(group_name.clone()))?
                .keys()
                .cloned()
                .collect(),
        };

        Ok((parent_key_name, members))
    }
}

/// Fetch the `ReplacementList` for `member` from `key`, recursively folding
/// `all_parts` together (via ReplacementList concatenation) when `member`
/// is itself multi-character and not present as a single node.
pub fn fetch_member(key: &ReplacementKey, member: &str) -> Option<ReplacementList> {
    if let Ok(list) = key.lookup(member) {
        return Some(list.clone());
    }
    let parts = key.all_parts(member).ok()?;
    let mut iter = parts.into_iter();
    let first = iter.next()?.clone();
    Some(iter.fold(first, |acc, part| &acc + part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_prefers_longest_class_name() {
        let mut sets = IndexMap::new();
        sets.insert("C".to_string(), CharSetDescriptor::Shorthand("cons".to_string()));
        sets.insert("CH".to_string(), CharSetDescriptor::Shorthand("cons".to_string()));
        let resolver = CharSetResolver::new(&sets);
        let tokens = resolver.tokenize("CHa");
        assert_eq!(tokens, vec![Token::Class("CH".to_string()), Token::Literal('a')]);
    }

    #[test]
    fn tokenize_falls_back_to_literals() {
        let sets = IndexMap::new();
        let resolver = CharSetResolver::new(&sets);
        let tokens = resolver.tokenize("ab");
        assert_eq!(tokens, vec![Token::Literal('a'), Token::Literal('b')]);
    }
}
