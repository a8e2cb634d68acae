use smol_str::SmolStr;

use super::single::Replacement;

/// An input accepted by [`super::ReplacementList::new`] and
/// [`super::ReplacementList::extend`].
///
/// Mirrors the original's acceptance of a bare value (weight defaults to
/// its position in the input sequence), a `(weight, value)` pair (explicit
/// weight), or an already-built [`Replacement`] (used as-is).
pub enum Item {
    Bare(SmolStr),
    Weighted(i64, SmolStr),
    Built(Replacement),
}

impl From<Replacement> for Item {
    fn from(r: Replacement) -> Self {
        Item::Built(r)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Bare(SmolStr::from(s))
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::Bare(SmolStr::from(s))
    }
}

impl From<(i64, &str)> for Item {
    fn from((w, s): (i64, &str)) -> Self {
        Item::Weighted(w, SmolStr::from(s))
    }
}

impl From<(i64, String)> for Item {
    fn from((w, s): (i64, String)) -> Self {
        Item::Weighted(w, SmolStr::from(s))
    }
}

/// Resolve an `Item` into a `Replacement` against the shared source
/// fragment `key`. `index` supplies the fallback weight for a bare value.
pub(super) fn prep(item: Item, key: &SmolStr, index: usize) -> Replacement {
    match item {
        Item::Built(r) => r,
        Item::Weighted(w, target) => Replacement::new(w, key.clone(), target),
        Item::Bare(target) => Replacement::new(index as i64, key.clone(), target),
    }
}
