/// A replacement's cost.
///
/// Two representations, matching the original algebra's two combination
/// rules: plain candidates accumulate weight additively as fragments are
/// concatenated, while [`Weight::makestat`]-derived "statistical" weights
/// accumulate multiplicatively (so that a chain of independently-unlikely
/// fragments compounds toward zero rather than growing linearly).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "snapshot", derive(serde::Serialize, serde::Deserialize))]
pub enum Weight {
    Additive(i64),
    Multiplicative(f64),
}

impl Weight {
    pub fn as_f64(self) -> f64 {
        match self {
            Weight::Additive(w) => w as f64,
            Weight::Multiplicative(w) => w,
        }
    }

    /// Convert an additive weight into the multiplicative representation
    /// used by `ReplacementList::makestat`: `1 / (weight + 1)`, so that a
    /// weight of `0` (the most preferred candidate) maps to `1.0`.
    pub fn make_stat(self) -> Weight {
        match self {
            Weight::Additive(w) => Weight::Multiplicative(1.0 / (w as f64 + 1.0)),
            stat @ Weight::Multiplicative(_) => stat,
        }
    }
}

impl std::ops::Add for Weight {
    type Output = Weight;

    /// Combine two weights the way two concatenated candidates' costs
    /// combine. Mixing additive and multiplicative weights is a caller
    /// error: a `ReplacementList` is either all-additive or has been
    /// uniformly converted with `makestat` before further concatenation.
    fn add(self, other: Weight) -> Weight {
        match (self, other) {
            (Weight::Additive(a), Weight::Additive(b)) => Weight::Additive(a + b),
            (Weight::Multiplicative(a), Weight::Multiplicative(b)) => {
                Weight::Multiplicative(a * b)
            }
            _ => panic!("cannot combine an additive weight with a statistical one"),
        }
    }
}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_f64().partial_cmp(&other.as_f64())
    }
}

impl Default for Weight {
    fn default() -> Self {
        Weight::Additive(0)
    }
}
