//! Pattern expander (component E): materializes every concrete
//! `(source-key, ReplacementList)` pair a pattern rule stands for.
//!
//! A pattern's key mixes literal fragments with character-class names; its
//! replacement(s) reference class positions with backslash-escaped
//! numerals (`\1`..`\9`) rather than regex syntax.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::charset::{CharSetResolver, Token};
use crate::cluster;
use crate::error::CompileError;
use crate::replacement::{Replacement, ReplacementList};

/// One block of a tokenized pattern key: the set of `ReplacementList`
/// choices available at that position (a class token expands to its
/// member list; a literal character is a one-choice block).
enum Block {
    Class { list: Vec<ReplacementList> },
    Literal { list: ReplacementList },
}

impl Block {
    fn len(&self) -> usize {
        match self {
            Block::Class { list } => list.len(),
            Block::Literal { .. } => 1,
        }
    }

    fn choice(&self, i: usize) -> &ReplacementList {
        match self {
            Block::Class { list } => &list[i],
            Block::Literal { list } => {
                debug_assert_eq!(i, 0);
                list
            }
        }
    }
}

/// A replacement-template token: either a literal run of characters or a
/// reference to a capture-group numeral.
#[derive(Debug, Clone)]
enum ReplToken {
    Literal(String),
    Group(u8),
}

fn tokenize_replacement(s: &str) -> Vec<ReplToken> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_digit() && next != '0' {
                    chars.next();
                    if !literal.is_empty() {
                        tokens.push(ReplToken::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(ReplToken::Group(next.to_digit(10).expect("checked digit") as u8));
                    continue;
                }
            }
        }
        literal.push(c);
    }
    if !literal.is_empty() {
        tokens.push(ReplToken::Literal(literal));
    }
    tokens
}

/// Tokenize `pattern_key` via `resolver`, building the ordered `blocks` list
/// plus the capture-group `index` (1-based, counted only over class
/// tokens). Literal characters additionally index themselves under their
/// own character so a replacement template can reference a literal
/// position directly if its numeral happens to coincide (matching the
/// design doc's "literal characters additionally index themselves").
fn tokenize_key(
    resolver: &CharSetResolver,
    pattern_key: &str,
) -> (Vec<Block>, IndexMap<String, usize>) {
    let tokens = resolver.tokenize(pattern_key);
    let mut blocks = Vec::with_capacity(tokens.len());
    let mut index = IndexMap::new();
    let mut group_num = 0u8;
    for token in tokens {
        match token {
            Token::Class(name) => {
                let members = resolver
                    .cached(&name)
                    .cloned()
                    .unwrap_or_default();
                let pos = blocks.len();
                blocks.push(Block::Class { list: members });
                group_num += 1;
                index.insert(group_num.to_string(), pos);
            }
            Token::Literal(ch) => {
                let pos = blocks.len();
                let frag: SmolStr = ch.to_string().into();
                let list = ReplacementList::from_single(Replacement::new(0, frag.clone(), frag));
                blocks.push(Block::Literal { list });
                index.insert(ch.to_string(), pos);
            }
        }
    }
    (blocks, index)
}

/// Align a set of replacement templates so they all reference the same
/// capture positions: when more than one is supplied and their literal
/// token counts differ, pad the shorter ones with empty-string fillers at
/// the positions where the longest template has literal tokens.
fn normalize_templates(templates: &[Vec<ReplToken>]) -> Vec<Vec<ReplToken>> {
    if templates.len() <= 1 {
        return templates.to_vec();
    }
    let max_len = templates.iter().map(|t| t.len()).max().unwrap_or(0);
    templates
        .iter()
        .map(|t| {
            if t.len() == max_len {
                t.clone()
            } else {
                let mut padded = t.clone();
                while padded.len() < max_len {
                    padded.push(ReplToken::Literal(String::new()));
                }
                padded
            }
        })
        .collect()
}

/// Expand a pattern `(pattern_key, pattern_replacements)` into every
/// concrete `(source-key, ReplacementList)` pair it stands for.
pub fn expand(
    resolver: &CharSetResolver,
    pattern_key: &str,
    pattern_replacements: &[String],
    broken_clusters: &IndexMap<String, String>,
) -> Result<IndexMap<String, ReplacementList>, CompileError> {
    let (blocks, index) = tokenize_key(resolver, pattern_key);
    let templates: Vec<Vec<ReplToken>> = pattern_replacements
        .iter()
        .map(|s| tokenize_replacement(s))
        .collect();
    let templates = normalize_templates(&templates);

    // Validate every numeral up front so a bad pattern fails before any
    // output is produced.
    for template in &templates {
        for tok in template {
            if let ReplToken::Group(n) = tok {
                if !index.contains_key(&n.to_string()) {
                    return Err(CompileError::Pattern {
                        pattern_key: pattern_key.to_string(),
                        group: *n,
                    });
                }
            }
        }
    }

    let mut out: IndexMap<String, ReplacementList> = IndexMap::new();
    let cardinalities: Vec<usize> = blocks.iter().map(Block::len).collect();
    for choice in CartesianProduct::new(&cardinalities) {
        let mut source_fragments: Vec<SmolStr> = Vec::with_capacity(blocks.len());
        for (block, &i) in blocks.iter().zip(&choice) {
            source_fragments.extend(block.choice(i).source_fragments().iter().cloned());
        }
        let display_key = cluster::display_key(&source_fragments, broken_clusters);

        let mut entry = out
            .shift_remove(&display_key)
            .unwrap_or_else(ReplacementList::empty);
        if entry.is_empty() {
            entry = entry.with_source_fragments(source_fragments.clone());
        }

        for (template_idx, template) in templates.iter().enumerate() {
            let mut folded: Option<ReplacementList> = None;
            for tok in template {
                let piece = match tok {
                    ReplToken::Group(n) => {
                        let pos = index[&n.to_string()];
                        blocks[pos].choice(choice[pos]).clone()
                    }
                    ReplToken::Literal(lit) => {
                        let synth_source: SmolStr = if let Some(&pos) = index.get(lit.as_str()) {
                            if matches!(blocks[pos], Block::Literal { .. }) {
                                lit.as_str().into()
                            } else {
                                "".into()
                            }
                        } else {
                            "".into()
                        };
                        ReplacementList::from_single(Replacement::new(
                            template_idx as i64,
                            synth_source,
                            lit.as_str(),
                        ))
                    }
                };
                folded = Some(match folded {
                    None => piece,
                    Some(acc) => acc + piece,
                });
            }
            if let Some(piece) = folded {
                entry.append(piece);
            }
        }
        out.insert(display_key, entry);
    }

    Ok(out)
}

/// Lazily enumerates the Cartesian product `0..cardinalities[0] ×
/// 0..cardinalities[1] × ...` as index tuples, in row-major order (last
/// position varies fastest).
struct CartesianProduct<'a> {
    cardinalities: &'a [usize],
    next: Option<Vec<usize>>,
}

impl<'a> CartesianProduct<'a> {
    fn new(cardinalities: &'a [usize]) -> Self {
        let start = if cardinalities.iter().any(|&c| c == 0) {
            None
        } else {
            Some(vec![0; cardinalities.len()])
        };
        Self {
            cardinalities,
            next: start,
        }
    }
}

impl<'a> Iterator for CartesianProduct<'a> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut advance = current.clone();
        for i in (0..advance.len()).rev() {
            advance[i] += 1;
            if advance[i] < self.cardinalities[i] {
                self.next = Some(advance);
                return Some(current);
            }
            advance[i] = 0;
        }
        self.next = None;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::CharSetDescriptor;

    fn resolver_with_class(name: &str, members: Vec<(&str, &str)>) -> CharSetResolver {
        let mut sets = IndexMap::new();
        sets.insert(name.to_string(), CharSetDescriptor::Shorthand("ignored".to_string()));
        let mut resolver = CharSetResolver::new(&sets);
        let lists = members
            .into_iter()
            .map(|(src, tgt)| ReplacementList::from_single(Replacement::new(0, src, tgt)))
            .collect();
        resolver.store(name, lists);
        resolver
    }

    #[test]
    fn cartesian_product_counts_match_product_of_cardinalities() {
        let prod: Vec<_> = CartesianProduct::new(&[2, 3]).collect();
        assert_eq!(prod.len(), 6);
    }

    #[test]
    fn expansion_count_matches_parent_cardinality() {
        let resolver = resolver_with_class("V", vec![("a", "1"), ("e", "2"), ("i", "3")]);
        let broken = IndexMap::new();
        let out = expand(&resolver, "V", &["\\1".to_string()], &broken).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn unknown_group_numeral_is_an_error() {
        let resolver = resolver_with_class("V", vec![("a", "1")]);
        let broken = IndexMap::new();
        let err = expand(&resolver, "V", &["\\2".to_string()], &broken).unwrap_err();
        assert!(matches!(err, CompileError::Pattern { group: 2, .. }));
    }
}
