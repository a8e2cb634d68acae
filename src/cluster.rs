//! The broken-cluster rewrite (§4.F/§9 of the design doc).
//!
//! A profile's `broken_clusters` table disambiguates unintended digraphs
//! that arise purely from gluing two adjacent Romanized fragments together
//! at a seam — e.g. if `t` and `h` are both valid fragments on their own but
//! `th` would normally decode as a single digraph, a seam of `t`+`h` coming
//! from two *different* rules needs to read as something else. The rewrite
//! only ever touches the *display* source key; target strings are never
//! affected, and the fragment sequence itself is left untouched so this can
//! be recomputed cheaply whenever the key is needed instead of being baked
//! into storage.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// Render `fragments` as a single string, rewriting any adjacent pair whose
/// naive concatenation names a `broken_clusters` entry into that entry's
/// replacement instead.
pub fn display_key(fragments: &[SmolStr], broken_clusters: &IndexMap<String, String>) -> String {
    if broken_clusters.is_empty() || fragments.len() < 2 {
        return fragments.iter().map(|f| f.as_str()).collect();
    }

    let mut out = String::new();
    let mut i = 0;
    while i < fragments.len() {
        if i + 1 < fragments.len() {
            let seam = format!("{}{}", fragments[i], fragments[i + 1]);
            if let Some(replacement) = broken_clusters.get(&seam) {
                out.push_str(replacement);
                i += 2;
                continue;
            }
        }
        out.push_str(&fragments[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clusters_is_plain_concatenation() {
        let fragments: Vec<SmolStr> = vec!["t".into(), "h".into(), "e".into()];
        let broken = IndexMap::new();
        assert_eq!(display_key(&fragments, &broken), "the");
    }

    #[test]
    fn rewrites_seam_and_skips_consumed_fragment() {
        let fragments: Vec<SmolStr> = vec!["t".into(), "h".into(), "e".into()];
        let mut broken = IndexMap::new();
        broken.insert("th".to_string(), "t'h".to_string());
        assert_eq!(display_key(&fragments, &broken), "t'he");
    }
}
