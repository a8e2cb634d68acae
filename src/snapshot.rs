//! Serializable cache format for a compiled [`KeySet`] (§4.H), gated
//! behind the `snapshot` feature.
//!
//! A snapshot is the mapping `{name -> tree_snapshot}` for every compiled
//! key, plus the source [`Profile`], serialized as a leading mtime line
//! (Unix seconds) followed by a JSON body. The leading line lets a caller
//! check staleness against a profile's modification time without paying to
//! deserialize the body. This module has no opinion on *where* the bytes
//! live (file, object store, ...); `save`/`load` work against any
//! `Write`/`Read`, leaving persistence to the caller.

use std::io::{self, BufRead, Read, Write};

use indexmap::IndexMap;

use crate::key::{ReplacementKey, ReplacementKeySnapshot};
use crate::keyset::KeySet;
use crate::profile::Profile;

#[derive(serde::Serialize, serde::Deserialize)]
struct Body {
    keys: IndexMap<String, ReplacementKeySnapshot>,
    profile: Profile,
}

/// Write `key_set`'s snapshot to `writer`, preceded by a `mtime\n` line.
///
/// `mtime` is an opaque caller-supplied invalidation stamp (conventionally
/// the source profile's modification time as Unix seconds); this module
/// does not read the clock itself.
pub fn save<W: Write>(key_set: &KeySet, mtime: u64, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{mtime}")?;
    let (keys, profile) = key_set.parts();
    let body = Body {
        keys: keys.iter().map(|(name, key)| (name.clone(), key.to_snapshot())).collect(),
        profile: profile.clone(),
    };
    serde_json::to_writer(writer, &body).map_err(json_err)
}

/// Read the leading mtime line only, without touching the JSON body.
/// Lets a caller decide whether `load` is worth the cost before calling it.
pub fn peek_mtime<R: BufRead>(mut reader: R) -> io::Result<u64> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    line.trim()
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Read a full snapshot back into a [`KeySet`], skipping the leading mtime
/// line. `load(save(ks, t, _))` is structurally and behaviorally identical
/// to `ks`.
pub fn load<R: BufRead>(mut reader: R) -> io::Result<KeySet> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest)?;
    let body: Body = serde_json::from_slice(&rest).map_err(json_err)?;
    let keys: IndexMap<String, ReplacementKey> = body
        .keys
        .into_iter()
        .map(|(name, snap)| (name, ReplacementKey::from_snapshot(snap)))
        .collect();
    Ok(KeySet::from_parts(keys, body.profile))
}

fn json_err(e: serde_json::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::profile::{GroupRef, KeyDescriptor, Profile};

    fn tiny_profile() -> Profile {
        let mut profile = Profile::new();
        let mut base = IndexMap::new();
        base.insert("a".to_string(), "A".into());
        base.insert("b".to_string(), "B".into());
        profile.groups.insert("base_group".to_string(), base);
        profile.keys.insert(
            "base".to_string(),
            KeyDescriptor {
                parent: None,
                suffix: false,
                groups: vec![GroupRef::Named("base_group".to_string())],
            },
        );
        profile
    }

    #[test]
    fn round_trip_preserves_lookups_and_profile() {
        let profile = tiny_profile();
        let key_set = compile(&profile).unwrap();

        let mut bytes = Vec::new();
        save(&key_set, 42, &mut bytes).unwrap();

        let mtime = peek_mtime(bytes.as_slice()).unwrap();
        assert_eq!(mtime, 42);

        let reloaded = load(bytes.as_slice()).unwrap();
        assert_eq!(
            reloaded.get("base").unwrap().lookup("a").unwrap().len(),
            key_set.get("base").unwrap().lookup("a").unwrap().len()
        );
        assert_eq!(reloaded.profile().keys.len(), key_set.profile().keys.len());
        assert_eq!(reloaded.names().collect::<Vec<_>>(), key_set.names().collect::<Vec<_>>());
    }
}
