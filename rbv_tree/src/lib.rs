//! Red-black tree with an observable insertion fixup.
//!
//! Nodes live in an arena and link to each other by index; a reserved index
//! stands in for every (black) leaf. Insertion can report each committed
//! rebalancing step to a [`StructureObserver`].

mod error;
mod insert;
mod node;
mod observer;
mod snapshot;
mod tree;

pub use error::InvariantViolation;
pub use node::{Color, NIL, Node, NodeId, Side};
pub use observer::{NoopObserver, StructureChange, StructureObserver};
pub use snapshot::{SnapshotNode, TreeSnapshot};
pub use tree::{InOrderIds, Iter, RBTree};
