//! Prefix-tree containers (component A of the design doc).
//!
//! [`Trie`] is the forward orientation (longest-*prefix* match); [`BackTrie`]
//! is the same structure read from the back (longest-*suffix* match), used
//! for the `end` key in the front/mid/end decoder.

mod forward;
mod iter;
mod node;
mod reverse;

#[cfg(feature = "snapshot")]
pub(crate) mod snapshot;

pub use forward::Trie;
pub use iter::Items;
pub use reverse::BackTrie;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_roundtrip() {
        let mut t = Trie::new();
        t.insert("sh", 1);
        t.insert("l", 2);
        assert_eq!(*t.lookup("sh").unwrap(), 1);
        assert_eq!(*t.lookup("l").unwrap(), 2);
        assert!(t.lookup("x").is_err());
    }

    #[test]
    fn insert_overwrites_and_length_counts_set_nodes_once() {
        let mut t = Trie::new();
        t.insert("ab", 1);
        assert_eq!(t.len(), 1);
        t.insert("ab", 2);
        assert_eq!(t.len(), 1);
        assert_eq!(*t.lookup("ab").unwrap(), 2);
    }

    #[test]
    fn contains_node_vs_contains() {
        let mut t = Trie::new();
        t.insert("k'h", 1);
        assert!(t.contains("k'h"));
        assert!(!t.contains("k'"));
        assert!(t.contains_node("k'"));
        assert!(!t.contains_node("zzz"));
    }

    #[test]
    fn longest_prefix_finds_deepest_set_value_and_remainder() {
        let mut t = Trie::new();
        t.insert("sh", "SH");
        t.insert("shk", "SHK");
        let (v, rem) = t.longest_prefix("shalom").unwrap();
        assert_eq!(*v, "SH");
        assert_eq!(rem, "alom");
    }

    #[test]
    fn longest_prefix_fails_when_nothing_matched() {
        let t: Trie<i32> = Trie::new();
        assert!(t.longest_prefix("x").is_err());
    }

    #[test]
    fn all_parts_consumes_whole_key() {
        let mut t = Trie::new();
        for (k, v) in [("sh", "SH"), ("a", "A"), ("l", "L"), ("o", "O"), ("m", "M")] {
            t.insert(k, v);
        }
        let parts = t.all_parts("shalom").unwrap();
        assert_eq!(parts, vec![&"SH", &"A", &"L", &"O", &"M"]);
    }

    #[test]
    fn remove_prunes_empty_ancestors() {
        let mut t = Trie::new();
        t.insert("ab", 1);
        assert!(t.contains_node("a"));
        let removed = t.remove("ab");
        assert_eq!(removed, Some(1));
        assert!(!t.contains_node("a"));
        assert!(!t.contains_node("ab"));
    }

    #[test]
    fn remove_keeps_ancestor_alive_if_it_has_other_children() {
        let mut t = Trie::new();
        t.insert("ab", 1);
        t.insert("ac", 2);
        t.remove("ab");
        assert!(t.contains_node("a"));
        assert!(t.contains_node("ac"));
        assert!(!t.contains_node("ab"));
    }

    #[test]
    fn items_traversal_is_stable_across_calls() {
        let mut t = Trie::new();
        t.insert("b", 1);
        t.insert("a", 2);
        t.insert("ab", 3);
        let first: Vec<_> = t.items(None).collect();
        let second: Vec<_> = t.items(None).collect();
        assert_eq!(
            first.iter().map(|(k, _)| k.clone()).collect::<Vec<_>>(),
            second.iter().map(|(k, _)| k.clone()).collect::<Vec<_>>(),
        );
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn items_includes_the_prefix_node_itself_when_set() {
        let mut t = Trie::new();
        t.insert("a", 1);
        t.insert("ab", 2);
        let under_a: Vec<_> = t.items(Some("a")).map(|(k, v)| (k, *v)).collect();
        assert_eq!(under_a, vec![("a".to_string(), 1), ("ab".to_string(), 2)]);
    }

    #[test]
    fn items_with_prefix_scopes_to_subtree() {
        let mut t = Trie::new();
        t.insert("ab", 1);
        t.insert("ac", 2);
        t.insert("b", 3);
        let under_a: Vec<_> = t.items(Some("a")).map(|(k, v)| (k, *v)).collect();
        assert_eq!(under_a.len(), 2);
        assert!(under_a.contains(&("ab".to_string(), 1)));
        assert!(under_a.contains(&("ac".to_string(), 2)));
    }

    #[test]
    fn back_trie_matches_suffixes() {
        let mut t = BackTrie::new();
        t.insert("m", "M_END");
        let (v, rem) = t.longest_prefix("shalom").unwrap();
        assert_eq!(*v, "M_END");
        assert_eq!(rem, "shalo");
    }

    #[test]
    fn back_trie_all_parts_reads_left_to_right() {
        let mut t = BackTrie::new();
        for (k, v) in [("sh", 1), ("a", 2), ("l", 3), ("o", 4), ("m", 5)] {
            t.insert(k, v);
        }
        let parts = t.all_parts("shalom").unwrap();
        assert_eq!(parts, vec![&1, &2, &3, &4, &5]);
    }

    #[test]
    fn forward_and_reverse_are_symmetric_under_key_reversal() {
        let pairs = [("ab", 1), ("c", 2), ("de", 3)];
        let mut forward = Trie::new();
        for (k, v) in pairs {
            forward.insert(k, v);
        }
        let mut reversed_forward = Trie::new();
        for (k, v) in pairs {
            let rk: String = k.chars().rev().collect();
            reversed_forward.insert(&rk, v);
        }
        let mut back = BackTrie::new();
        for (k, v) in pairs {
            back.insert(k, v);
        }

        let word = "deabc";
        let rev_word: String = word.chars().rev().collect();
        let (back_val, back_rem) = back.longest_prefix(word).unwrap();
        let (fwd_val, fwd_rem) = reversed_forward.longest_prefix(&rev_word).unwrap();
        assert_eq!(*back_val, *fwd_val);
        let rev_back_rem: String = back_rem.chars().rev().collect();
        assert_eq!(rev_back_rem, fwd_rem);
    }
}
