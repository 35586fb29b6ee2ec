use alloc::vec::Vec;
use core::{cmp::Ordering, mem};

use crate::{
    compare::{Compare, Natural},
    node::{Color, Direction, NIL, Node, NodeId},
};

mod insert;
mod inspect;
mod remove;
mod rotate;
mod validate;

pub use inspect::Dump;

/// An arena-backed Red-Black tree over keys ordered by a [`Compare`] strategy.
///
/// All nodes live in one contiguous arena and link to each other by index.
/// The sentinel is a reserved index rather than a shared node, so nothing
/// ever writes through it. Duplicate keys are stored as separate nodes, with
/// ties routed to the left on insertion.
///
/// Key features:
/// - O(log n) insertion, removal and lookup
/// - Multiset behavior: duplicates are kept as distinct nodes
/// - On-demand structural validation that never mutates the tree
/// - Pre-order inspection hook for external visualizers
#[derive(Debug, Clone)]
pub struct RbTree<K, C = Natural> {
    /// Dense arena of live nodes
    /// Removal moves the last node into the freed slot
    nodes: Vec<Node<K>>,

    /// Index of the root node in the arena
    /// Equal to nil when tree is empty
    root: usize,

    /// Ordering strategy for keys
    comparator: C,
}

impl<K: Ord> RbTree<K> {
    /// Creates an empty tree ordered by `K`'s `Ord` implementation.
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Creates an empty tree with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K: Ord> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> RbTree<K, C> {
    /// Creates an empty tree ordered by `comparator`.
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
            comparator,
        }
    }

    /// Creates an empty tree ordered by `comparator` with room for `capacity` nodes.
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: NIL,
            comparator,
        }
    }

    /// Number of keys stored, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Number of nodes the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// The ordering strategy this tree was built with.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Removes every key, keeping the arena allocation for reuse.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
    }

    /// Handle to the root node, or `None` if the tree is empty.
    #[inline]
    pub const fn root(&self) -> Option<NodeId> {
        if self.root == NIL {
            None
        } else {
            Some(NodeId(self.root))
        }
    }

    /// Smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.min_in(self.root()?)
    }

    /// Largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        self.max_in(self.root()?)
    }

    /// Smallest key in the subtree rooted at `node`.
    ///
    /// Returns `None` if `node` does not name a slot of this tree.
    pub fn min_in(&self, node: NodeId) -> Option<&K> {
        if node.0 >= self.nodes.len() {
            return None;
        }
        Some(&self.node_at(self.find_minimum(node.0)).key)
    }

    /// Largest key in the subtree rooted at `node`.
    ///
    /// Returns `None` if `node` does not name a slot of this tree.
    pub fn max_in(&self, node: NodeId) -> Option<&K> {
        if node.0 >= self.nodes.len() {
            return None;
        }
        Some(&self.node_at(self.find_maximum(node.0)).key)
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        self.visit(|view| height = height.max(view.depth + 1));
        height
    }

    /// Black height of the root: black nodes on any path from the root down
    /// to a sentinel, not counting the root itself. 0 for an empty tree or a
    /// lone root.
    ///
    /// Follows the leftmost path, so the answer is only meaningful for a
    /// tree that passes [`validate`](Self::validate).
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut current = self.get_left(self.root);
        while current != NIL {
            if self.is_black(current) {
                count += 1;
            }
            current = self.node_at(current).left;
        }
        count
    }

    /// Keys in in-order sequence.
    ///
    /// This is a diagnostic snapshot; it allocates and walks the whole tree.
    pub fn in_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;

        while current != NIL || !stack.is_empty() {
            while current != NIL {
                stack.push(current);
                current = self.node_at(current).left;
            }
            if let Some(node) = stack.pop() {
                keys.push(&self.node_at(node).key);
                current = self.node_at(node).right;
            }
        }
        keys
    }

    #[inline]
    fn node_at(&self, idx: usize) -> &Node<K> {
        debug_assert!(idx < self.nodes.len());
        &self.nodes[idx]
    }

    #[inline]
    fn node_at_mut(&mut self, idx: usize) -> &mut Node<K> {
        debug_assert!(idx < self.nodes.len());
        &mut self.nodes[idx]
    }

    fn find_minimum(&self, mut node: usize) -> usize {
        while node != NIL {
            let left = self.node_at(node).left;
            if left == NIL {
                break;
            }
            node = left;
        }
        node
    }

    fn find_maximum(&self, mut node: usize) -> usize {
        while node != NIL {
            let right = self.node_at(node).right;
            if right == NIL {
                break;
            }
            node = right;
        }
        node
    }

    #[inline]
    fn get_color(&self, node_idx: usize) -> Color {
        if node_idx == NIL {
            Color::Black
        } else {
            self.node_at(node_idx).color
        }
    }

    #[inline]
    fn set_color(&mut self, node_idx: usize, color: Color) {
        if node_idx != NIL {
            self.node_at_mut(node_idx).color = color;
        }
    }

    #[inline]
    fn is_red(&self, node_idx: usize) -> bool {
        self.get_color(node_idx) == Color::Red
    }

    #[inline]
    fn is_black(&self, node_idx: usize) -> bool {
        self.get_color(node_idx) == Color::Black
    }

    #[inline]
    fn get_parent(&self, node: usize) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).parent
        }
    }

    #[inline]
    fn set_parent(&mut self, node: usize, parent: usize) {
        if node != NIL {
            self.node_at_mut(node).parent = parent;
        }
    }

    #[inline]
    fn get_left(&self, node: usize) -> usize {
        self.get_child(node, Direction::Left)
    }

    #[inline]
    fn get_child(&self, node: usize, direction: Direction) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).child(direction)
        }
    }

    /// Which child slot of `parent` holds `node`.
    #[inline]
    fn side_of(&self, node: usize, parent: usize) -> Direction {
        if node == self.get_left(parent) {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Points whichever slot of `parent` held `old` at `new`; a nil parent means the root slot.
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
        } else if self.node_at(parent).left == old {
            self.node_at_mut(parent).left = new;
        } else {
            self.node_at_mut(parent).right = new;
        }
    }

    fn swap_keys(&mut self, a: usize, b: usize) {
        debug_assert_ne!(a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(hi);
        mem::swap(&mut head[lo].key, &mut tail[0].key);
    }

    /// Drops an already unlinked node from the arena, returning its key.
    ///
    /// The last arena node is moved into the freed slot and its neighbours
    /// are relinked to the new index.
    fn release(&mut self, idx: usize) -> K {
        let last = self.nodes.len() - 1;
        let node = self.nodes.swap_remove(idx);

        if idx != last {
            let (parent, left, right) = {
                let moved = self.node_at(idx);
                (moved.parent, moved.left, moved.right)
            };
            self.replace_child(parent, last, idx);
            self.set_parent(left, idx);
            self.set_parent(right, idx);
        }

        node.key
    }
}

impl<K, C: Compare<K>> RbTree<K, C> {
    /// Returns `true` if a key comparing equal to `key` is stored.
    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Returns the stored key comparing equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.find_node(key).map(|idx| &self.node_at(idx).key)
    }

    fn find_node(&self, key: &K) -> Option<usize> {
        let mut current = self.root;

        while current != NIL {
            let node = self.node_at(current);
            match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        None
    }
}
