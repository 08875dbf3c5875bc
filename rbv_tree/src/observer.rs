use crate::node::{NodeId, Side};
use crate::tree::RBTree;

/// What happened at an insertion checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureChange {
    /// The new red leaf has been linked in; no rebalancing yet.
    Attached { node: NodeId },
    /// Red uncle: parent and uncle turned black, `grandparent` turned red
    /// and becomes the next node to check.
    Recolored { grandparent: NodeId },
    /// Black uncle: one or two rotations around `pivot` (the old
    /// grandparent). `side` is the side of the red parent under `pivot`.
    Restructured {
        pivot: NodeId,
        side: Side,
        zigzag: bool,
    },
    /// Fixup finished and the root is black again.
    Settled { root: NodeId },
}

/// Receives the tree after every committed insertion step.
///
/// Notifications are synchronous and the tree is only lent immutably, so an
/// observer can look but never rebalance.
pub trait StructureObserver<K> {
    fn on_structure_changed(&mut self, tree: &RBTree<K>, change: StructureChange);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<K> StructureObserver<K> for NoopObserver {
    fn on_structure_changed(&mut self, _tree: &RBTree<K>, _change: StructureChange) {}
}

impl<K, F> StructureObserver<K> for F
where
    F: FnMut(&RBTree<K>, StructureChange),
{
    fn on_structure_changed(&mut self, tree: &RBTree<K>, change: StructureChange) {
        self(tree, change)
    }
}
