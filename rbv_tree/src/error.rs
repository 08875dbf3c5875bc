use crate::node::NodeId;

/// The first red-black or structural invariant found broken by
/// [`RBTree::validate`](crate::RBTree::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("root {root} is red")]
    RedRoot { root: NodeId },

    #[error("red node {parent} has red child {child}")]
    RedRedEdge { parent: NodeId, child: NodeId },

    #[error("black height differs below node {node}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: NodeId,
        left: usize,
        right: usize,
    },

    #[error("node {node} records parent {recorded:?} but hangs under {actual:?}")]
    BrokenParentLink {
        node: NodeId,
        recorded: Option<NodeId>,
        actual: Option<NodeId>,
    },

    #[error("node {node} is reached twice while walking from the root")]
    Cycle { node: NodeId },

    #[error("in-order sequence decreases at node {node}")]
    OrderViolation { node: NodeId },

    #[error("{reachable} of {total} nodes are reachable from the root")]
    Unreachable { reachable: usize, total: usize },
}
