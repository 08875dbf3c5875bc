use rbv_tree::{RBTree, StructureChange, StructureObserver, TreeSnapshot};
use std::fmt;

/// The tree as it looked right after one insertion step.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint<K> {
    pub change: StructureChange,
    pub snapshot: TreeSnapshot<K>,
}

impl<K: fmt::Display> Checkpoint<K> {
    /// One-line description for status lines and plain output.
    pub fn describe(&self) -> String {
        let key = |id| {
            self.snapshot
                .get(id)
                .map_or_else(|| "?".to_string(), |node| node.key.to_string())
        };

        match self.change {
            StructureChange::Attached { node } => format!("attached {} as a red leaf", key(node)),
            StructureChange::Recolored { grandparent } => {
                format!("red uncle: recolored around {}", key(grandparent))
            }
            StructureChange::Restructured {
                pivot,
                zigzag: true,
                ..
            } => format!("black uncle: double rotation around {}", key(pivot)),
            StructureChange::Restructured { pivot, .. } => {
                format!("black uncle: rotation around {}", key(pivot))
            }
            StructureChange::Settled { root } => format!("settled, root {} is black", key(root)),
        }
    }
}

/// Observer that copies the tree at every checkpoint so the frontend can
/// replay the insertion at its own pace.
#[derive(Debug, Clone)]
pub struct Recorder<K> {
    checkpoints: Vec<Checkpoint<K>>,
}

impl<K> Default for Recorder<K> {
    fn default() -> Self {
        Self {
            checkpoints: Vec::new(),
        }
    }
}

impl<K> Recorder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn checkpoints(&self) -> &[Checkpoint<K>] {
        &self.checkpoints
    }

    pub fn into_checkpoints(self) -> Vec<Checkpoint<K>> {
        self.checkpoints
    }
}

impl<K: Clone> StructureObserver<K> for Recorder<K> {
    fn on_structure_changed(&mut self, tree: &RBTree<K>, change: StructureChange) {
        self.checkpoints.push(Checkpoint {
            change,
            snapshot: tree.snapshot(),
        });
    }
}
