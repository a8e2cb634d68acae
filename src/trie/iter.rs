use indexmap::map::Iter as MapIter;

use super::node::Node;

/// Depth-first, pre-order traversal over the set-valued nodes of a subtree.
///
/// Yields a node's value before descending into its children, matching the
/// order a human reading the tree top-to-bottom would expect. The order at
/// each level follows the children map's insertion order, so repeated
/// traversals of an unmodified tree are always identical.
pub struct Items<'a, V> {
    pending_self: Option<(String, &'a V)>,
    stack: Vec<(String, MapIter<'a, char, Node<V>>)>,
}

impl<'a, V> Items<'a, V> {
    pub(crate) fn new(prefix: String, root: Option<&'a Node<V>>) -> Self {
        let pending_self = root.and_then(|r| r.value.as_ref()).map(|v| (prefix.clone(), v));
        Self {
            pending_self,
            stack: root.map(|r| vec![(prefix, r.children.iter())]).unwrap_or_default(),
        }
    }
}

impl<'a, V> Iterator for Items<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.pending_self.take() {
            return Some(item);
        }
        while let Some((prefix, iter)) = self.stack.last_mut() {
            match iter.next() {
                Some((ch, node)) => {
                    let mut child_prefix = prefix.clone();
                    child_prefix.push(*ch);
                    self.stack.push((child_prefix.clone(), node.children.iter()));
                    if let Some(value) = node.value.as_ref() {
                        return Some((child_prefix, value));
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
