use indexmap::IndexMap;

/// A node's value slot.
///
/// Distinguishes "no value was ever set here" from any legitimate value,
/// including one that happens to be a default/empty instance of `V`.
#[derive(Debug, Clone)]
pub enum Slot<V> {
    Set(V),
    Unset,
}

impl<V> Slot<V> {
    pub fn is_set(&self) -> bool {
        matches!(self, Slot::Set(_))
    }

    pub fn as_ref(&self) -> Option<&V> {
        match self {
            Slot::Set(v) => Some(v),
            Slot::Unset => None,
        }
    }

    pub fn as_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Set(v) => Some(v),
            Slot::Unset => None,
        }
    }

    pub fn take(&mut self) -> Option<V> {
        match std::mem::replace(self, Slot::Unset) {
            Slot::Set(v) => Some(v),
            Slot::Unset => None,
        }
    }
}

/// One node of the prefix tree: an optional value and a map of single-char
/// transitions to child nodes.
///
/// Children use an insertion-order-preserving map (`IndexMap`) so that
/// repeated traversals of an unmodified tree always produce the same
/// sequence, as required by `items()`.
#[derive(Debug, Clone)]
pub struct Node<V> {
    pub(crate) value: Slot<V>,
    pub(crate) children: IndexMap<char, Node<V>>,
}

impl<V> Node<V> {
    pub fn new() -> Self {
        Self {
            value: Slot::Unset,
            children: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.value.is_set() && self.children.is_empty()
    }
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self::new()
    }
}
