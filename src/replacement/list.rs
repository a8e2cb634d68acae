use smol_str::SmolStr;

use super::item::{self, Item};
use super::single::Replacement;
use super::weight::Weight;

/// An ordered bag of [`Replacement`]s that all share the same conceptual
/// source key (the concatenation of their source-fragments).
///
/// Construction accepts a mix of bare strings (weight = position in the
/// input), `(weight, string)` pairs, and already-built [`Replacement`]s,
/// mirroring the original constructor's acceptance of any of the three.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "snapshot", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplacementList {
    items: Vec<Replacement>,
    /// The fragment sequence shared by every element, in concatenation
    /// order. Kept separate from the display key so the broken-cluster
    /// rewrite (applied by callers that know the profile's cluster table)
    /// can be computed on demand instead of baked into storage.
    source_fragments: Vec<SmolStr>,
}

impl ReplacementList {
    pub fn new(source: impl Into<SmolStr>, items: Vec<Item>, default_weight: i64) -> Self {
        let source = source.into();
        let built = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let base = item::prep(item, &source, i);
                if default_weight != 0 {
                    let mut base = base;
                    base.add_weight(Weight::Additive(default_weight));
                    base
                } else {
                    base
                }
            })
            .collect();
        Self {
            items: built,
            source_fragments: vec![source],
        }
    }

    pub fn from_single(r: Replacement) -> Self {
        let source_fragments = r.keyvalue().iter().map(|(s, _)| s.clone()).collect();
        Self {
            items: vec![r],
            source_fragments,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            source_fragments: Vec::new(),
        }
    }

    /// The fragment sequence all elements share (pre broken-cluster
    /// rewrite). Empty only for an empty list.
    pub fn source_fragments(&self) -> &[SmolStr] {
        &self.source_fragments
    }

    /// The naive concatenation of `source_fragments`, with no
    /// broken-cluster rewriting applied.
    pub fn source_key(&self) -> String {
        self.source_fragments.iter().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Replacement> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Replacement] {
        &self.items
    }

    /// Push `r` onto this list. Callers are responsible for keeping the
    /// invariant that every element shares `source_fragments`.
    pub fn push(&mut self, r: Replacement) {
        self.items.push(r);
    }

    pub fn append(&mut self, mut other: ReplacementList) {
        self.items.append(&mut other.items);
    }

    pub fn with_source_fragments(mut self, fragments: Vec<SmolStr>) -> Self {
        self.source_fragments = fragments;
        self
    }

    /// Append `other`'s elements, offsetting each one's weight by `weight`.
    pub fn extend_with_weight(&mut self, other: &ReplacementList, weight: Weight) {
        for r in &other.items {
            let mut r = r.clone();
            r.add_weight(weight);
            self.items.push(r);
        }
    }

    /// Mutate every element's weight in place by adding `k`.
    pub fn add_weight(&mut self, k: Weight) {
        for r in &mut self.items {
            r.add_weight(k);
        }
    }

    /// Stable sort by weight ascending. Idempotent.
    pub fn sort(&mut self) {
        self.items
            .sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal));
    }

    /// Sort, then drop later entries whose target string duplicates an
    /// earlier (lower-weight) entry's.
    pub fn prune(&mut self) {
        self.sort();
        let mut seen = rustc_hash::FxHashSet::default();
        self.items.retain(|r| seen.insert(r.target()));
    }

    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Convert every element's weight into the pseudo-probability
    /// representation (`1/(w+1)`, normalized by the sum across this list),
    /// so subsequent `+` uses multiplication instead of addition.
    pub fn make_stat(&mut self) {
        let raw: Vec<f64> = self
            .items
            .iter()
            .map(|r| 1.0 / (r.weight.as_f64() + 1.0))
            .collect();
        let total: f64 = raw.iter().sum();
        for (r, raw_w) in self.items.iter_mut().zip(raw) {
            let normalized = if total > 0.0 { raw_w / total } else { raw_w };
            *r = Replacement::from_fragments(Weight::Multiplicative(normalized), r.keyvalue().to_vec());
        }
    }
}

impl FromIterator<Replacement> for ReplacementList {
    fn from_iter<T: IntoIterator<Item = Replacement>>(iter: T) -> Self {
        let items: Vec<Replacement> = iter.into_iter().collect();
        let source_fragments = items
            .first()
            .map(|r| r.keyvalue().iter().map(|(s, _)| s.clone()).collect())
            .unwrap_or_default();
        Self {
            items,
            source_fragments,
        }
    }
}

impl IntoIterator for ReplacementList {
    type Item = Replacement;
    type IntoIter = std::vec::IntoIter<Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReplacementList {
    type Item = &'a Replacement;
    type IntoIter = std::slice::Iter<'a, Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Pairwise product: every `r1 + r2` for `r1` in `self`, `r2` in `other`, in
/// row-major order (self outer, other inner). No implicit sort or dedup.
impl std::ops::Add for ReplacementList {
    type Output = ReplacementList;

    fn add(self, other: ReplacementList) -> ReplacementList {
        &self + &other
    }
}

impl std::ops::Add for &ReplacementList {
    type Output = ReplacementList;

    fn add(self, other: &ReplacementList) -> ReplacementList {
        let mut items = Vec::with_capacity(self.items.len() * other.items.len());
        for r1 in &self.items {
            for r2 in &other.items {
                items.push(r1 + r2);
            }
        }
        let mut source_fragments = self.source_fragments.clone();
        source_fragments.extend(other.source_fragments.iter().cloned());
        ReplacementList {
            items,
            source_fragments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_assigns_incrementing_weights_to_bare_items() {
        let list = ReplacementList::new("o", vec!["a".into(), "b".into()], 0);
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().nth(0).unwrap().weight, Weight::Additive(0));
        assert_eq!(list.iter().nth(1).unwrap().weight, Weight::Additive(1));
    }

    #[test]
    fn concatenation_is_row_major_and_multiplies_cardinality() {
        let l1 = ReplacementList::new(
            "baz",
            vec![(2i64, "foo").into(), (3i64, "bar").into()],
            0,
        );
        let l2 = ReplacementList::new(
            "fjords",
            vec![(4i64, "spam").into(), (5i64, "eggs").into()],
            0,
        );
        let mut combined = l1 + l2;
        assert_eq!(combined.len(), 4);
        combined.sort();
        let got: Vec<(i64, String)> = combined
            .iter()
            .map(|r| match r.weight {
                Weight::Additive(w) => (w, r.target()),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            got,
            vec![
                (6, "foospam".to_string()),
                (7, "fooeggs".to_string()),
                (7, "barspam".to_string()),
                (8, "bareggs".to_string()),
            ]
        );
    }

    #[test]
    fn prune_removes_duplicate_targets_after_sort() {
        let mut list = ReplacementList::new(
            "a",
            vec![(1i64, "x").into(), (0i64, "x").into(), (2i64, "y").into()],
            0,
        );
        list.prune();
        let targets: Vec<String> = list.iter().map(|r| r.target()).collect();
        assert_eq!(targets, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut list = ReplacementList::new(
            "a",
            vec![(3i64, "c").into(), (1i64, "a").into(), (2i64, "b").into()],
            0,
        );
        list.sort();
        let once: Vec<String> = list.iter().map(|r| r.target()).collect();
        list.sort();
        let twice: Vec<String> = list.iter().map(|r| r.target()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn make_stat_normalizes_to_sum_one() {
        let mut list = ReplacementList::new("a", vec![(0i64, "x").into(), (1i64, "y").into()], 0);
        list.make_stat();
        let sum: f64 = list.iter().map(|r| r.weight.as_f64()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
