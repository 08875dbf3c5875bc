use crate::error::InvariantViolation;
use crate::node::{Color, NIL, Node, NodeId, Side, link};
use crate::snapshot::{self, SnapshotNode, TreeSnapshot};
use std::fmt;

/// Red-black tree over an index arena.
///
/// Nodes are never removed, so a `NodeId` handed out by
/// [`insert`](RBTree::insert) stays valid for the life of the tree.
#[derive(Debug, Clone)]
pub struct RBTree<K> {
    pub(crate) root: NodeId,
    pub(crate) nodes: Vec<Node<K>>,
}

impl<K> Default for RBTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RBTree<K> {
    pub fn new() -> Self {
        Self {
            root: NIL,
            nodes: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            root: NIL,
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        link(self.root)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id)
    }

    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.node(id).map(Node::key)
    }

    /// Color of `id`; the sentinel is black.
    pub fn color(&self, id: NodeId) -> Color {
        if id == NIL {
            Color::Black
        } else {
            self.nodes[id].color
        }
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        link(self.nodes[id].left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        link(self.nodes[id].right)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        link(self.nodes[id].parent)
    }

    pub fn grandparent(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).and_then(|p| self.parent(p))
    }

    /// Which side of its parent `id` hangs on; `None` for the root.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent(id)?;
        if self.nodes[parent].left == id {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let side = self.side_of(id)?;
        let parent = self.nodes[id].parent;
        link(self.nodes[parent].child_raw(side.opposite()))
    }

    pub fn uncle(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).and_then(|p| self.sibling(p))
    }

    /// Arena-order (insertion-order) view of every live node.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<K>)> {
        self.nodes.iter().enumerate()
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tree: self,
            ids: self.inorder_ids(),
        }
    }

    pub fn inorder_ids(&self) -> InOrderIds<'_, K> {
        InOrderIds {
            tree: self,
            stack: Vec::new(),
            current: self.root,
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push((self.root, 1));
        }

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[id];
            for child in [node.left, node.right] {
                if child != NIL {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }

    /// Black nodes on the leftmost root-to-sentinel path, sentinel excluded.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;

        while current != NIL {
            if self.nodes[current].color == Color::Black {
                height += 1;
            }
            current = self.nodes[current].left;
        }

        height
    }

    pub fn rotate_left(&mut self, x: NodeId) {
        self.rotate(x, Side::Left);
    }

    pub fn rotate_right(&mut self, x: NodeId) {
        self.rotate(x, Side::Right);
    }

    /// Moves `x` one level down towards `dir`, promoting its child on the
    /// opposite side into its place. Colors are untouched.
    ///
    /// # Panics
    ///
    /// Panics if that child is the sentinel.
    pub(crate) fn rotate(&mut self, x: NodeId, dir: Side) {
        let up = dir.opposite();
        let y = self.nodes[x].child_raw(up);
        assert!(y != NIL, "cannot rotate node {x} {dir:?}: its {up:?} child is the sentinel");

        let inner = self.nodes[y].child_raw(dir);
        let x_parent = self.nodes[x].parent;

        self.nodes[x].set_child(up, inner);
        if inner != NIL {
            self.nodes[inner].parent = x;
        }

        self.nodes[y].parent = x_parent;
        if x_parent == NIL {
            self.root = y;
        } else if self.nodes[x_parent].left == x {
            self.nodes[x_parent].left = y;
        } else {
            self.nodes[x_parent].right = y;
        }

        self.nodes[y].set_child(dir, x);
        self.nodes[x].parent = y;
    }

    fn check_subtree(
        &self,
        id: NodeId,
        expected_parent: NodeId,
        visited: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        if id == NIL {
            return Ok(0);
        }

        *visited += 1;
        if *visited > self.nodes.len() {
            return Err(InvariantViolation::Cycle { node: id });
        }

        let node = &self.nodes[id];
        if node.parent != expected_parent {
            return Err(InvariantViolation::BrokenParentLink {
                node: id,
                recorded: link(node.parent),
                actual: link(expected_parent),
            });
        }

        if node.color == Color::Red {
            for child in [node.left, node.right] {
                if self.color(child) == Color::Red {
                    return Err(InvariantViolation::RedRedEdge { parent: id, child });
                }
            }
        }

        let left = self.check_subtree(node.left, id, visited)?;
        let right = self.check_subtree(node.right, id, visited)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                node: id,
                left,
                right,
            });
        }

        Ok(left + usize::from(node.color == Color::Black))
    }

    pub fn snapshot(&self) -> TreeSnapshot<K>
    where
        K: Clone,
    {
        TreeSnapshot {
            root: self.root(),
            nodes: self
                .nodes
                .iter()
                .enumerate()
                .map(|(id, node)| SnapshotNode {
                    id,
                    key: node.key.clone(),
                    color: node.color,
                    parent: node.parent(),
                    left: node.left(),
                    right: node.right(),
                })
                .collect(),
        }
    }
}

impl<K: Ord> RBTree<K> {
    /// First node with an equal key on the descent path.
    pub fn search(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;

        while current != NIL {
            let node = &self.nodes[current];
            match key.cmp(&node.key) {
                std::cmp::Ordering::Equal => return Some(current),
                std::cmp::Ordering::Less => current = node.left,
                std::cmp::Ordering::Greater => current = node.right,
            }
        }

        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Checks every red-black invariant plus link consistency, ordering and
    /// reachability, reporting the first violation found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.root == NIL {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(InvariantViolation::Unreachable {
                    reachable: 0,
                    total: self.nodes.len(),
                })
            };
        }

        if self.nodes[self.root].color == Color::Red {
            return Err(InvariantViolation::RedRoot { root: self.root });
        }

        let mut visited = 0;
        self.check_subtree(self.root, NIL, &mut visited)?;
        if visited != self.nodes.len() {
            return Err(InvariantViolation::Unreachable {
                reachable: visited,
                total: self.nodes.len(),
            });
        }

        let mut previous: Option<&K> = None;
        for id in self.inorder_ids() {
            let key = &self.nodes[id].key;
            if previous.is_some_and(|prev| prev > key) {
                return Err(InvariantViolation::OrderViolation { node: id });
            }
            previous = Some(key);
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// In-order walk yielding node ids, driven by an explicit stack.
pub struct InOrderIds<'a, K> {
    tree: &'a RBTree<K>,
    stack: Vec<NodeId>,
    current: NodeId,
}

impl<K> Iterator for InOrderIds<'_, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while self.current != NIL {
            self.stack.push(self.current);
            self.current = self.tree.nodes[self.current].left;
        }

        let id = self.stack.pop()?;
        self.current = self.tree.nodes[id].right;
        Some(id)
    }
}

/// In-order iterator over keys.
pub struct Iter<'a, K> {
    tree: &'a RBTree<K>,
    ids: InOrderIds<'a, K>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.ids.next().map(|id| &self.tree.nodes[id].key)
    }
}

impl<'a, K> IntoIterator for &'a RBTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K: fmt::Display> fmt::Display for RBTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        snapshot::write_preorder(f, self.root(), move |id| {
            let node = &self.nodes[id];
            (&node.key, node.color, node.left(), node.right())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `2 -> (1, 3)` by hand so rotations can be checked in isolation.
    fn three_node_tree() -> RBTree<u64> {
        let mut tree = RBTree::new();
        tree.nodes.push(Node::new(2));
        tree.nodes.push(Node::new(1));
        tree.nodes.push(Node::new(3));
        tree.root = 0;
        tree.nodes[0].color = Color::Black;
        tree.nodes[0].left = 1;
        tree.nodes[0].right = 2;
        tree.nodes[1].parent = 0;
        tree.nodes[2].parent = 0;
        tree
    }

    #[test]
    fn test_empty_tree() {
        let tree: RBTree<u64> = RBTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.black_height(), 0);
        assert_eq!(tree.iter().count(), 0);
        assert!(tree.is_valid());
        assert_eq!(tree.to_string(), "(empty)\n");
    }

    #[test]
    fn test_sentinel_is_black() {
        let tree: RBTree<u64> = RBTree::new();
        assert_eq!(tree.color(NIL), Color::Black);
    }

    #[test]
    fn test_navigation() {
        let tree = three_node_tree();
        assert_eq!(tree.parent(1), Some(0));
        assert_eq!(tree.parent(0), None);
        assert_eq!(tree.sibling(1), Some(2));
        assert_eq!(tree.sibling(2), Some(1));
        assert_eq!(tree.sibling(0), None);
        assert_eq!(tree.side_of(1), Some(Side::Left));
        assert_eq!(tree.side_of(2), Some(Side::Right));
        assert_eq!(tree.grandparent(1), None);
        assert_eq!(tree.uncle(1), None);
    }

    #[test]
    fn test_rotate_left_then_right_restores_shape() {
        let mut tree = three_node_tree();
        let before: Vec<u64> = tree.iter().copied().collect();

        tree.rotate_left(0);
        assert_eq!(tree.root(), Some(2));
        assert_eq!(tree.left(2), Some(0));
        assert_eq!(tree.left(0), Some(1));
        assert_eq!(tree.right(0), None);
        assert_eq!(tree.parent(0), Some(2));
        assert_eq!(tree.parent(2), None);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);

        tree.rotate_right(2);
        assert_eq!(tree.root(), Some(0));
        assert_eq!(tree.left(0), Some(1));
        assert_eq!(tree.right(0), Some(2));
        assert_eq!(tree.parent(2), Some(0));
        assert_eq!(tree.parent(1), Some(0));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_rotate_moves_inner_subtree() {
        let mut tree = three_node_tree();
        tree.rotate_right(0);
        // 1 is promoted and its empty right slot moves under the old root
        assert_eq!(tree.root(), Some(1));
        assert_eq!(tree.right(1), Some(0));
        assert_eq!(tree.left(0), None);
        assert_eq!(tree.right(0), Some(2));

        tree.rotate_left(1);
        assert_eq!(tree.root(), Some(0));
        assert_eq!(tree.left(0), Some(1));
    }

    #[test]
    fn test_rotation_keeps_colors() {
        let mut tree = three_node_tree();
        tree.rotate_left(0);
        assert_eq!(tree.color(0), Color::Black);
        assert_eq!(tree.color(1), Color::Red);
        assert_eq!(tree.color(2), Color::Red);
    }

    #[test]
    #[should_panic(expected = "sentinel")]
    fn test_rotate_without_child_panics() {
        let mut tree = three_node_tree();
        tree.rotate_left(1);
    }

    #[test]
    fn test_validate_detects_red_root() {
        let mut tree = three_node_tree();
        tree.nodes[0].color = Color::Red;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedRoot { root: 0 })
        );
    }

    #[test]
    fn test_validate_detects_red_red() {
        let mut tree = three_node_tree();
        tree.nodes.push(Node::new(4));
        tree.nodes[2].right = 3;
        tree.nodes[3].parent = 2;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedRedEdge {
                parent: 2,
                child: 3
            })
        );
    }

    #[test]
    fn test_validate_detects_black_height_mismatch() {
        let mut tree = three_node_tree();
        tree.nodes[1].color = Color::Black;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BlackHeightMismatch {
                node: 0,
                left: 1,
                right: 0
            })
        );
    }

    #[test]
    fn test_validate_detects_order_violation() {
        let mut tree = three_node_tree();
        tree.nodes[1].key = 9;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::OrderViolation { node: 0 })
        );
    }

    #[test]
    fn test_validate_detects_broken_parent() {
        let mut tree = three_node_tree();
        tree.nodes[2].parent = 1;
        assert!(matches!(
            tree.validate(),
            Err(InvariantViolation::BrokenParentLink { node: 2, .. })
        ));
    }

    #[test]
    fn test_validate_detects_unreachable_node() {
        let mut tree = three_node_tree();
        tree.nodes.push(Node::new(10));
        tree.nodes[3].color = Color::Black;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::Unreachable {
                reachable: 3,
                total: 4
            })
        );
    }

    #[test]
    fn test_display_preorder() {
        let tree = three_node_tree();
        assert_eq!(tree.to_string(), "[B] 2\n  [R] 1\n  [R] 3\n");
    }

    #[test]
    fn test_snapshot_copies_links() {
        let tree = three_node_tree();
        let snap = tree.snapshot();
        assert_eq!(snap.root, Some(0));
        assert_eq!(snap.len(), 3);
        let root = &snap.nodes[0];
        assert_eq!(root.left, Some(1));
        assert_eq!(root.right, Some(2));
        assert_eq!(root.color, Color::Black);
        assert_eq!(snap.nodes[2].parent, Some(0));
    }
}
