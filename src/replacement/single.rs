use smol_str::SmolStr;

use super::weight::Weight;

/// One candidate substitution: a weight plus the sequence of (source,
/// target) fragment pairs it was built from.
///
/// The fragments accumulate as `Replacement`s are concatenated (via
/// [`ReplacementList`](super::ReplacementList)'s `+`), so `target()` and
/// `source()` of a deeply-concatenated replacement reconstruct the full
/// strings from every contributing piece.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "snapshot", derive(serde::Serialize, serde::Deserialize))]
pub struct Replacement {
    pub weight: Weight,
    keyvalue: Vec<(SmolStr, SmolStr)>,
}

impl Replacement {
    /// A single (source, target) fragment at the given weight.
    pub fn new(weight: i64, source: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        Self {
            weight: Weight::Additive(weight),
            keyvalue: vec![(source.into(), target.into())],
        }
    }

    pub fn from_fragments(weight: Weight, keyvalue: Vec<(SmolStr, SmolStr)>) -> Self {
        Self { weight, keyvalue }
    }

    pub fn keyvalue(&self) -> &[(SmolStr, SmolStr)] {
        &self.keyvalue
    }

    /// The concatenated target (output-script) string.
    pub fn target(&self) -> String {
        self.keyvalue.iter().map(|(_, t)| t.as_str()).collect()
    }

    /// The concatenated source (Romanized) string, before any broken-cluster
    /// rewriting.
    pub fn source(&self) -> String {
        self.keyvalue.iter().map(|(s, _)| s.as_str()).collect()
    }

    pub fn make_stat(&self) -> Replacement {
        Replacement {
            weight: self.weight.make_stat(),
            keyvalue: self.keyvalue.clone(),
        }
    }

    pub fn add_weight(&mut self, weight: Weight) {
        self.weight = self.weight + weight;
    }
}

impl std::ops::Add for Replacement {
    type Output = Replacement;

    fn add(self, other: Replacement) -> Replacement {
        let weight = self.weight + other.weight;
        let mut keyvalue = self.keyvalue;
        keyvalue.extend(other.keyvalue);
        Replacement { weight, keyvalue }
    }
}

impl std::ops::Add for &Replacement {
    type Output = Replacement;

    fn add(self, other: &Replacement) -> Replacement {
        self.clone() + other.clone()
    }
}
