//! Parametrized checks against the worked scenarios in the design doc's
//! testable-properties section: a small Hebrew-like profile decoded across
//! a handful of words, each exercising a different corner (plain
//! consonant/vowel substitution, an optional-letter vowel, and the
//! word-final `end` rule).

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use rstest::rstest;

use deromanize::profile::{GroupRef, GroupValue, KeyDescriptor, Profile, BASE_KEY};
use deromanize::{compile, decode, KeySet};

/// Built once and shared across every case below; compiling it is cheap but
/// there's no reason to redo it per `#[case]`.
static STYLIZED_KEY_SET: Lazy<KeySet> = Lazy::new(build_stylized_key_set);

fn build_stylized_key_set() -> KeySet {
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
        "mid".to_string(),
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

    compile(&profile).unwrap()
}

#[rstest]
#[case("shalom", "\u{5e9}\u{5dc}\u{5d5}\u{5dd}")]
#[case("shalom", "\u{5e9}\u{5dc}\u{5dd}")]
#[case("shal", "\u{5e9}\u{5dc}")]
fn decode_produces_expected_candidate(#[case] word: &str, #[case] expected_target: &str) {
    let key_set = &*STYLIZED_KEY_SET;
    let result = decode(key_set, word).expect("word should decode");
    let targets: Vec<String> = result.iter().map(|r| r.target()).collect();
    assert!(
        targets.contains(&expected_target.to_string()),
        "decoding {word:?} yielded {targets:?}, expected it to contain {expected_target:?}"
    );
}

#[rstest]
#[case("")]
#[case("xyz")]
#[case("qqq")]
fn decode_fails_cleanly_on_unmatchable_input(#[case] word: &str) {
    let key_set = &*STYLIZED_KEY_SET;
    assert!(decode(key_set, word).is_err());
}
