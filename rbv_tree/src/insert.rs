use crate::node::{Color, NIL, Node, NodeId, Side};
use crate::observer::{NoopObserver, StructureChange, StructureObserver};
use crate::tree::RBTree;
use tracing::{debug, trace};

impl<K: Ord> RBTree<K> {
    /// Inserts `key`, keeping equal keys (a duplicate goes to the right of
    /// the equal node met during descent). Returns the new node's id.
    pub fn insert(&mut self, key: K) -> NodeId {
        self.insert_observed(key, &mut NoopObserver)
    }

    /// Like [`insert`](RBTree::insert), notifying `observer` after the leaf
    /// is attached, after every fixup case, and once the root is black again.
    pub fn insert_observed<O>(&mut self, key: K, observer: &mut O) -> NodeId
    where
        O: StructureObserver<K> + ?Sized,
    {
        let new_id = self.nodes.len();

        // Perform standard BST descent
        let mut current = self.root;
        let mut parent = NIL;
        let mut side = Side::Left;

        while current != NIL {
            parent = current;
            side = if key < self.nodes[current].key {
                Side::Left
            } else {
                Side::Right
            };
            current = self.nodes[current].child_raw(side);
        }

        let mut node = Node::new(key);
        node.parent = parent;
        self.nodes.push(node);

        if parent == NIL {
            self.root = new_id;
        } else {
            self.nodes[parent].set_child(side, new_id);
        }
        trace!(target: "rbv_tree", node = new_id, parent, ?side, "attached red leaf");
        observer.on_structure_changed(self, StructureChange::Attached { node: new_id });

        self.insert_fixup(new_id, observer);

        debug!(target: "rbv_tree", node = new_id, len = self.nodes.len(), "insert settled");
        observer.on_structure_changed(self, StructureChange::Settled { root: self.root });
        new_id
    }

    fn insert_fixup<O>(&mut self, mut node_id: NodeId, observer: &mut O)
    where
        O: StructureObserver<K> + ?Sized,
    {
        while let Some(parent_id) = self
            .parent(node_id)
            .filter(|&p| self.nodes[p].color == Color::Red)
        {
            let Some(grandparent_id) = self.parent(parent_id) else {
                unreachable!("red node {parent_id} is the root");
            };
            let side = if self.nodes[grandparent_id].left == parent_id {
                Side::Left
            } else {
                Side::Right
            };
            let uncle_id = self.nodes[grandparent_id].child_raw(side.opposite());

            if self.color(uncle_id) == Color::Red {
                // Case A: push the violation two levels up
                self.nodes[parent_id].color = Color::Black;
                self.nodes[uncle_id].color = Color::Black;
                self.nodes[grandparent_id].color = Color::Red;
                node_id = grandparent_id;

                trace!(target: "rbv_tree", grandparent = grandparent_id, "recolored");
                observer.on_structure_changed(
                    self,
                    StructureChange::Recolored {
                        grandparent: grandparent_id,
                    },
                );
            } else {
                // Case B: straighten the zig-zag first
                let zigzag = self.nodes[parent_id].child_raw(side.opposite()) == node_id;
                if zigzag {
                    node_id = parent_id;
                    self.rotate(node_id, side);
                }

                // Case C: rotate the grandparent down; the new subtree root is black
                let parent_id = self.nodes[node_id].parent;
                self.nodes[parent_id].color = Color::Black;
                self.nodes[grandparent_id].color = Color::Red;
                self.rotate(grandparent_id, side.opposite());

                trace!(target: "rbv_tree", pivot = grandparent_id, ?side, zigzag, "restructured");
                observer.on_structure_changed(
                    self,
                    StructureChange::Restructured {
                        pivot: grandparent_id,
                        side,
                        zigzag,
                    },
                );
            }

            if node_id == self.root {
                break;
            }
        }

        let root = self.root;
        self.nodes[root].color = Color::Black;
    }
}
