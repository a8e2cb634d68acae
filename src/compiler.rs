//! Key compiler (component F): drives the character-set resolver and
//! pattern expander from a [`Profile`] to produce a [`KeySet`] of named,
//! immutable [`ReplacementKey`]s.

use indexmap::IndexMap;

use crate::charset::{self, CharSetResolver, Token};
use crate::error::CompileError;
use crate::key::{Insertable, ReplacementKey};
use crate::keyset::KeySet;
use crate::pattern;
use crate::profile::{GroupRef, Profile, BASE_KEY};
use crate::replacement::Weight;

/// Compile `profile` into an immutable, shareable key-set.
pub fn compile(profile: &Profile) -> Result<KeySet, CompileError> {
    let mut compiler = Compiler {
        profile,
        keys: IndexMap::new(),
        charset: CharSetResolver::new(&profile.char_sets),
        compiling: Vec::new(),
    };
    let names: Vec<String> = profile.keys.keys().cloned().collect();
    for name in names {
        compiler.ensure_compiled(&name)?;
    }
    Ok(KeySet::new(compiler.keys, profile.clone()))
}

struct Compiler<'p> {
    profile: &'p Profile,
    keys: IndexMap<String, ReplacementKey>,
    charset: CharSetResolver,
    compiling: Vec<String>,
}

impl<'p> Compiler<'p> {
    fn ensure_compiled(&mut self, name: &str) -> Result<(), CompileError> {
        if self.keys.contains_key(name) {
            return Ok(());
        }
        self.keygen(name)
    }

    fn keygen(&mut self, name: &str) -> Result<(), CompileError> {
        if self.keys.contains_key(name) {
            return Ok(());
        }
        if self.compiling.iter().any(|n| n == name) {
            tracing::warn!(key = name, "cycle detected in key parent chain");
            return Err(CompileError::CycleInParents(name.to_string()));
        }
        tracing::debug!(key = name, "compiling key");
        self.compiling.push(name.to_string());

        let descriptor = self
            .profile
            .keys
            .get(name)
            .cloned()
            .ok_or_else(|| CompileError::UnknownKey(name.to_string()))?;

        let parent_name = descriptor
            .parent
            .clone()
            .or_else(|| (name != BASE_KEY).then(|| BASE_KEY.to_string()));

        let new_key = match &parent_name {
            None => ReplacementKey::new(descriptor.suffix),
            Some(p) => {
                self.ensure_compiled(p)?;
                self.keys
                    .get(p)
                    .ok_or_else(|| CompileError::UnknownKey(p.clone()))?
                    .child(descriptor.suffix)
            }
        };
        self.keys.insert(name.to_string(), new_key);

        for group_ref in &descriptor.groups {
            self.apply_group(name, group_ref)?;
        }

        self.compiling.pop();
        Ok(())
    }

    fn apply_group(&mut self, key_name: &str, group_ref: &GroupRef) -> Result<(), CompileError> {
        match group_ref {
            GroupRef::Named(group_name) => {
                let entries = self.expand_group(key_name, group_name)?;
                self.key_mut(key_name)?.update(entries, Weight::Additive(0));
            }
            GroupRef::Weighted(map) => {
                for (group_name, weight) in map {
                    let entries = self.expand_group(key_name, group_name)?;
                    self.key_mut(key_name)?.extend(entries, Weight::Additive(*weight));
                }
            }
            GroupRef::WeightedList(list) => {
                for (group_name, weight) in list.iter().rev() {
                    let entries = self.expand_group(key_name, group_name)?;
                    self.key_mut(key_name)?.extend(entries, Weight::Additive(*weight));
                }
            }
        }
        Ok(())
    }

    fn key_mut(&mut self, name: &str) -> Result<&mut ReplacementKey, CompileError> {
        self.keys
            .get_mut(name)
            .ok_or_else(|| CompileError::UnknownKey(name.to_string()))
    }

    /// Expand one named profile group into `(source-key, Insertable)`
    /// pairs, routing class-bearing source keys through the pattern
    /// expander. Both `update` and `extend` routing call this (see the
    /// design doc's resolved open question on that convention).
    fn expand_group(
        &mut self,
        key_name: &str,
        group_name: &str,
    ) -> Result<Vec<(String, Insertable)>, CompileError> {
        let group = self
            .profile
            .groups
            .get(group_name)
            .cloned()
            .ok_or_else(|| CompileError::UnknownGroup {
                key: key_name.to_string(),
                group: group_name.to_string(),
            })?;

        let mut out = Vec::new();
        for (source_key, value) in group {
            let tokens = self.charset.tokenize(&source_key);
            let is_pattern = tokens.iter().any(|t| matches!(t, Token::Class(_)));
            if !is_pattern {
                out.push((source_key, Insertable::from(value.into_items())));
                continue;
            }

            for tok in &tokens {
                if let Token::Class(name) = tok {
                    self.resolve_class(name)?;
                }
            }

            let templates: Vec<String> = match value {
                crate::profile::GroupValue::One(s) => vec![s],
                crate::profile::GroupValue::Many(v) => v,
                crate::profile::GroupValue::Weighted(v) => v.into_iter().map(|(_, s)| s).collect(),
            };
            let expanded = pattern::expand(&self.charset, &source_key, &templates, &self.profile.broken_clusters)?;
            for (k, v) in expanded {
                out.push((k, Insertable::from(v)));
            }
        }
        Ok(out)
    }

    /// Resolve character class `name` (§4.D), compiling its parent key on
    /// demand, and cache the result.
    fn resolve_class(&mut self, name: &str) -> Result<(), CompileError> {
        if self.charset.cached(name).is_some() {
            return Ok(());
        }
        let (parent_name, members) = self.charset.plan(name, self.profile)?;
        self.ensure_compiled(&parent_name)?;

        let parent_key = self
            .keys
            .get(&parent_name)
            .ok_or_else(|| CompileError::UnknownKey(parent_name.clone()))?;

        let mut resolved = Vec::with_capacity(members.len());
        for member in &members {
            let list = charset::fetch_member(parent_key, member).ok_or_else(|| {
                CompileError::CharSetNotResolvable {
                    char: member.clone(),
                    parent_key: parent_name.clone(),
                    class: name.to_string(),
                }
            })?;
            resolved.push(list);
        }
        self.charset.store(name, resolved);
        Ok(())
    }
}
