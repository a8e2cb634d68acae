//! Integration test for the `snapshot` feature's file-backed round trip:
//! compile a profile once, save it to disk, and confirm a fresh `load`
//! decodes identically without recompiling.

#[cfg(feature = "snapshot")]
mod snapshot_roundtrip {
    use std::fs::File;
    use std::io::BufReader;

    use indexmap::IndexMap;

    use deromanize::profile::{GroupRef, GroupValue, KeyDescriptor, Profile, BASE_KEY};
    use deromanize::{compile, decode, snapshot};

    fn profile() -> Profile {
        let mut p = Profile::new();
        let mut base = IndexMap::new();
        base.insert("a".to_string(), GroupValue::from("A"));
        base.insert("b".to_string(), GroupValue::from("B"));
        p.groups.insert("base_group".to_string(), base);
        p.keys.insert(
            BASE_KEY.to_string(),
            KeyDescriptor {
                parent: None,
                suffix: false,
                groups: vec![GroupRef::Named("base_group".to_string())],
            },
        );
        p.keys.insert(
            "front".to_string(),
            KeyDescriptor {
                parent: Some(BASE_KEY.to_string()),
                suffix: false,
                groups: vec![],
            },
        );
        p.keys.insert(
            "mid".to_string(),
            KeyDescriptor {
                parent: Some(BASE_KEY.to_string()),
                suffix: false,
                groups: vec![],
            },
        );
        p
    }

    #[test]
    fn saved_and_reloaded_key_set_decodes_the_same_word() {
        let key_set = compile(&profile()).unwrap();
        let before = decode(&key_set, "ab").unwrap().iter().map(|r| r.target()).collect::<Vec<_>>();

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cache.snapshot");
        {
            let file = File::create(&path).expect("create snapshot file");
            snapshot::save(&key_set, 1234, file).expect("save snapshot");
        }

        let file = File::open(&path).expect("open snapshot file");
        let mtime = snapshot::peek_mtime(BufReader::new(file)).expect("peek mtime");
        assert_eq!(mtime, 1234);

        let file = File::open(&path).expect("reopen snapshot file");
        let reloaded = snapshot::load(BufReader::new(file)).expect("load snapshot");
        let after = decode(&reloaded, "ab").unwrap().iter().map(|r| r.target()).collect::<Vec<_>>();

        assert_eq!(before, after);
    }
}
