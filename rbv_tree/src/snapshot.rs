use crate::node::{Color, NodeId};
use std::fmt;

/// Owned copy of one node at the time a snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotNode<K> {
    pub id: NodeId,
    pub key: K,
    pub color: Color,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// Owned copy of a whole tree, for observers that keep state past a
/// notification. `nodes[i].id == i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot<K> {
    pub root: Option<NodeId>,
    pub nodes: Vec<SnapshotNode<K>>,
}

impl<K> Default for TreeSnapshot<K> {
    fn default() -> Self {
        Self {
            root: None,
            nodes: Vec::new(),
        }
    }
}

impl<K> TreeSnapshot<K> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SnapshotNode<K>> {
        self.nodes.get(id)
    }

    /// Preorder walk from the root yielding `(id, depth)`, root at depth 0.
    pub fn preorder(&self) -> Vec<(NodeId, usize)> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            order.push((id, depth));
            let node = &self.nodes[id];
            // right first so left is visited first
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
        }

        order
    }
}

impl<K: fmt::Display> fmt::Display for TreeSnapshot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preorder(f, self.root, move |id| {
            let node = &self.nodes[id];
            (&node.key, node.color, node.left, node.right)
        })
    }
}

/// Indented preorder dump shared by the tree and snapshot `Display` impls.
pub(crate) fn write_preorder<'a, K, F>(
    f: &mut fmt::Formatter<'_>,
    root: Option<NodeId>,
    lookup: F,
) -> fmt::Result
where
    K: fmt::Display + 'a,
    F: Fn(NodeId) -> (&'a K, Color, Option<NodeId>, Option<NodeId>),
{
    let Some(root) = root else {
        return writeln!(f, "(empty)");
    };

    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let (key, color, left, right) = lookup(id);
        let marker = match color {
            Color::Red => "R",
            Color::Black => "B",
        };
        writeln!(f, "{}[{}] {}", "  ".repeat(depth), marker, key)?;

        if let Some(right) = right {
            stack.push((right, depth + 1));
        }
        if let Some(left) = left {
            stack.push((left, depth + 1));
        }
    }

    Ok(())
}
