//! Tokenizer / decoder (component G): turns a compiled [`KeySet`] and a
//! Romanized word into one ranked [`ReplacementList`] of whole-word
//! candidates, using the front/mid/end segmentation strategy.

use crate::error::Error;
use crate::key::ReplacementKey;
use crate::keyset::KeySet;
use crate::replacement::ReplacementList;

/// Decode `word` against `key_set` using the canonical front-mid-end
/// strategy (§4.G): match a suffix with `end`, a prefix of what's left with
/// `front`, tokenize any remaining middle with `mid`, and concatenate the
/// three through the `ReplacementList` algebra. Falls back to matching
/// `front` against the whole word first if the primary ordering fails.
///
/// The only non-recoverable condition is no rule in `front` matching any
/// prefix of `word` at all, surfaced as [`Error::DecodeFailure`].
pub fn decode(key_set: &KeySet, word: &str) -> Result<ReplacementList, Error> {
    let front_key = key_set.get("front").ok_or_else(|| Error::decode_failure(word))?;
    let end_key = key_set.get("end");
    let mid_key = key_set.get("mid");

    if let Some(end_key) = end_key {
        if let Ok((end_val, before_end)) = end_key.longest_prefix(word) {
            if let Ok((front_val, mid_remainder)) = front_key.longest_prefix(before_end) {
                tracing::trace!(word, path = "primary", "front-mid-end decode");
                return combine(front_val.clone(), mid_key, mid_remainder, Some(end_val.clone()));
            }
        }
    }

    tracing::trace!(word, path = "fallback", "front-mid-end decode");
    let (front_val, rest) = front_key
        .longest_prefix(word)
        .map_err(|_| Error::decode_failure(word))?;
    if rest.is_empty() {
        return Ok(front_val.clone());
    }
    if let Some(end_key) = end_key {
        if let Ok((end_val, mid_remainder)) = end_key.longest_prefix(rest) {
            return combine(front_val.clone(), mid_key, mid_remainder, Some(end_val.clone()));
        }
    }
    combine(front_val.clone(), mid_key, rest, None)
}

fn combine(
    front: ReplacementList,
    mid_key: Option<&ReplacementKey>,
    mid_remainder: &str,
    end: Option<ReplacementList>,
) -> Result<ReplacementList, Error> {
    let middle = if mid_remainder.is_empty() {
        None
    } else {
        let mid_key = mid_key.ok_or_else(|| Error::decode_failure(mid_remainder))?;
        let parts = mid_key
            .all_parts(mid_remainder)
            .map_err(|_| Error::decode_failure(mid_remainder))?;
        let mut iter = parts.into_iter().cloned();
        let first = iter.next().ok_or_else(|| Error::decode_failure(mid_remainder))?;
        Some(iter.fold(first, |acc, part| acc + part))
    };

    let mut result = front;
    if let Some(m) = middle {
        result = result + m;
    }
    if let Some(e) = end {
        result = result + e;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::profile::{GroupRef, GroupValue, KeyDescriptor, Profile, BASE_KEY};
    use indexmap::IndexMap;

    fn stylized_key_set() -> KeySet {
        let mut profile = Profile::new();

        let mut base_group = IndexMap::new();
        base_group.insert("sh".to_string(), GroupValue::from("\u{5e9}"));
        base_group.insert("l".to_string(), GroupValue::from("\u{5dc}"));
        base_group.insert("m".to_string(), GroupValue::from("\u{5de}"));
        base_group.insert("a".to_string(), GroupValue::from(""));
        base_group.insert("o".to_string(), GroupValue::from(vec!["\u{5d5}", ""]));
        profile.groups.insert("base_group".to_string(), base_group);

        let mut end_group = IndexMap::new();
        end_group.insert("m".to_string(), GroupValue::from("\u{5dd}"));
        profile.groups.insert("end_group".to_string(), end_group);

        profile.keys.insert(
            BASE_KEY.to_string(),
            KeyDescriptor {
                parent: None,
                suffix: false,
                groups: vec![GroupRef::Named("base_group".to_string())],
            },
        );
        profile.keys.insert(
            "front".to_string(),
            KeyDescriptor {
                parent: Some(BASE_KEY.to_string()),
                suffix: false,
                groups: vec![],
            },
        );
        profile.keys.insert(
            "end".to_string(),
            KeyDescriptor {
                parent: None,
                suffix: true,
                groups: vec![GroupRef::Named("end_group".to_string())],
            },
        );
        profile.keys.insert(
            "mid".to_string(),
            KeyDescriptor {
                parent: Some(BASE_KEY.to_string()),
                suffix: false,
                groups: vec![],
            },
        );

        compile(&profile).unwrap()
    }

    #[test]
    fn primary_path_combines_front_mid_and_end() {
        let key_set = stylized_key_set();
        let mut result = decode(&key_set, "shalom").unwrap();
        result.sort();
        let targets: Vec<String> = result.iter().map(|r| r.target()).collect();
        assert!(targets.contains(&"\u{5e9}\u{5dc}\u{5d5}\u{5dd}".to_string()));
        assert!(targets.contains(&"\u{5e9}\u{5dc}\u{5dd}".to_string()));
    }

    #[test]
    fn decode_fails_when_no_front_rule_matches() {
        let key_set = stylized_key_set();
        let err = decode(&key_set, "xyz").unwrap_err();
        assert!(matches!(err, Error::DecodeFailure(_)));
    }
}
