/// Index of a node in the tree's arena.
pub type NodeId = usize;

/// Reserved index standing in for every leaf. Never stored in the arena.
pub const NIL: NodeId = usize::MAX;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One key of the tree together with its color and links.
///
/// Links hold arena indices; `NIL` marks an empty child slot or, for the
/// parent link, the root. The public accessors translate `NIL` to `None`.
#[derive(Debug, Clone)]
pub struct Node<K> {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
    pub(crate) color: Color,
    pub(crate) key: K,
}

impl<K> Node<K> {
    /// New nodes are always red; fixup decides their final color.
    pub(crate) fn new(key: K) -> Self {
        Self {
            left: NIL,
            right: NIL,
            parent: NIL,
            color: Color::Red,
            key,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left(&self) -> Option<NodeId> {
        link(self.left)
    }

    pub fn right(&self) -> Option<NodeId> {
        link(self.right)
    }

    pub fn parent(&self) -> Option<NodeId> {
        link(self.parent)
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        link(self.child_raw(side))
    }

    pub fn is_leaf(&self) -> bool {
        self.left == NIL && self.right == NIL
    }

    #[inline]
    pub(crate) fn child_raw(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: NodeId) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

#[inline]
pub(crate) fn link(id: NodeId) -> Option<NodeId> {
    if id == NIL { None } else { Some(id) }
}
