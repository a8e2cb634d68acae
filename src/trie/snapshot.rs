//! Serializable snapshot of a prefix tree (§4.A "serializable_snapshot",
//! §4.H), gated behind the `snapshot` feature.
//!
//! A [`NodeSnapshot`] mirrors [`super::node::Node`] but replaces the
//! `Slot::Unset` sentinel with a plain `None` and uses string-keyed
//! children (`char` isn't a JSON-object-key type) so the whole thing round-
//! trips through `serde_json` unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::node::{Node, Slot};

#[derive(Serialize, Deserialize)]
pub struct NodeSnapshot<V> {
    value: Option<V>,
    children: IndexMap<String, NodeSnapshot<V>>,
}

impl<V: Clone> Node<V> {
    pub(crate) fn to_snapshot(&self) -> NodeSnapshot<V> {
        NodeSnapshot {
            value: self.value.as_ref().cloned(),
            children: self
                .children
                .iter()
                .map(|(ch, node)| (ch.to_string(), node.to_snapshot()))
                .collect(),
        }
    }

    pub(crate) fn from_snapshot(snapshot: NodeSnapshot<V>) -> Self {
        let value = match snapshot.value {
            Some(v) => Slot::Set(v),
            None => Slot::Unset,
        };
        let children = snapshot
            .children
            .into_iter()
            .map(|(ch, child)| {
                let ch = ch.chars().next().expect("snapshot child keys are single chars");
                (ch, Node::from_snapshot(child))
            })
            .collect();
        Node { value, children }
    }
}
