use core::fmt;

/// Arena slot standing in for every absent child and for the root's parent.
///
/// It is never dereferenced: its color reads as [`Color::Black`] and writes
/// to it are skipped.
pub(crate) const NIL: usize = usize::MAX;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from a node to its sentinel leaves have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red node - must have black children, cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("Red"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Pivot on the right child, moving the node down to the left.
    Left,
    /// Pivot on the left child, moving the node down to the right.
    Right,
}

impl Direction {
    /// The mirror-image direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Where a node hangs relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The node is the root.
    Root,
    /// The node is its parent's left child.
    Left,
    /// The node is its parent's right child.
    Right,
}

/// Handle to a node slot in a tree's arena.
///
/// Handles are only meaningful for the tree that produced them and only until
/// that tree is next mutated: removal compacts the arena and may move nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the arena slot this handle points at.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Snapshot of one node handed to [`RbTree::visit`](crate::RbTree::visit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a, K> {
    /// Handle of the visited node.
    pub id: NodeId,
    /// The node's key.
    pub key: &'a K,
    /// The node's color.
    pub color: Color,
    /// Position relative to the parent.
    pub side: Side,
    /// Distance from the root, which has depth 0.
    pub depth: usize,
    /// Whether the left child is a real node.
    pub has_left: bool,
    /// Whether the right child is a real node.
    pub has_right: bool,
}

/// A node in the Red-Black tree containing its key and structural links.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    /// The stored key
    pub(crate) key: K,

    /// Index of parent node in the arena (nil if this is root)
    pub(crate) parent: usize,

    /// Index of left child node in the arena (nil if no left child)
    pub(crate) left: usize,

    /// Index of right child node in the arena (nil if no right child)
    pub(crate) right: usize,

    /// Color of this node (Red or Black) used for Red-Black tree balancing
    pub(crate) color: Color,
}

impl<K> Node<K> {
    /// Fresh red leaf hanging under `parent`.
    #[inline]
    pub(crate) const fn leaf(key: K, parent: usize) -> Self {
        Self {
            key,
            parent,
            left: NIL,
            right: NIL,
            color: Color::Red,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, direction: Direction) -> usize {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}
