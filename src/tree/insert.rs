use core::cmp::Ordering;

use log::trace;

use super::RbTree;
use crate::{
    compare::Compare,
    error::{Error, Violation},
    node::{Color, Direction, NIL, Node},
};

impl<K, C: Compare<K>> RbTree<K, C> {
    /// Inserts `key` as a new red leaf and rebalances.
    ///
    /// Duplicates are allowed: a key equal to an existing one is placed in
    /// that node's left subtree. The only error is an
    /// [`InvariantViolation`](Error::InvariantViolation) raised when the tree
    /// was already structurally broken before the call.
    pub fn insert(&mut self, key: K) -> Result<(), Error> {
        let (parent, direction) = self.find_insertion_parent(&key);

        let new_idx = self.nodes.len();
        self.check_insertion_repair(new_idx, parent)?;

        self.nodes.push(Node::leaf(key, parent));
        self.link_to_parent(new_idx, parent, direction);

        self.fix_insertion_violations(new_idx)?;

        debug_assert!(
            self.validate().is_ok(),
            "RB tree invariants violated after insertion"
        );

        Ok(())
    }

    /// Last real node on the search path and the side the new key hangs on.
    fn find_insertion_parent(&self, key: &K) -> (usize, Direction) {
        let mut current = self.root;
        let mut parent = NIL;
        let mut direction = Direction::Left;

        while current != NIL {
            parent = current;
            let node = self.node_at(current);
            direction = match self.comparator.compare(key, &node.key) {
                Ordering::Greater => Direction::Right,
                Ordering::Less | Ordering::Equal => Direction::Left,
            };
            current = node.child(direction);
        }
        (parent, direction)
    }

    fn link_to_parent(&mut self, node_idx: usize, parent_idx: usize, direction: Direction) {
        if parent_idx == NIL {
            self.root = node_idx;
        } else {
            let parent = self.node_at_mut(parent_idx);
            match direction {
                Direction::Left => parent.left = node_idx,
                Direction::Right => parent.right = node_idx,
            }
        }
    }
}

impl<K, C> RbTree<K, C> {
    /// Fails before `node` is linked under `parent` if repairing it would
    /// reach a red node without a grandparent.
    ///
    /// Only case 3 moves upward, and it never recolors the nodes inspected
    /// at the next level.
    fn check_insertion_repair(&self, mut node: usize, mut parent: usize) -> Result<(), Error> {
        while parent != NIL && self.is_red(parent) {
            let grandparent = self.get_parent(parent);
            if grandparent == NIL {
                return Err(Violation::MissingGrandparent { node }.into());
            }
            let uncle = self.get_child(grandparent, self.side_of(parent, grandparent).opposite());
            if self.is_black(uncle) {
                return Ok(());
            }
            node = grandparent;
            parent = self.get_parent(grandparent);
        }
        Ok(())
    }

    fn fix_insertion_violations(&mut self, mut node: usize) -> Result<(), Error> {
        loop {
            let parent = self.get_parent(node);
            if parent == NIL {
                trace!("insert case 1: node {node} is the root");
                self.set_color(node, Color::Black);
                return Ok(());
            }
            if self.is_black(parent) {
                trace!("insert case 2: parent {parent} is black");
                return Ok(());
            }

            let grandparent = self.get_parent(parent);
            if grandparent == NIL {
                return Err(Violation::MissingGrandparent { node }.into());
            }
            let parent_side = self.side_of(parent, grandparent);
            let uncle = self.get_child(grandparent, parent_side.opposite());

            if self.is_red(uncle) {
                trace!("insert case 3: uncle {uncle} is red, recoloring at {grandparent}");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut outer = parent;
            if node == self.get_child(parent, parent_side.opposite()) {
                trace!("insert case 4: node {node} is an inner grandchild");
                self.rotate(parent, parent_side)?;
                outer = node;
            }

            trace!("insert case 5: rotating at grandparent {grandparent}");
            self.rotate(grandparent, parent_side.opposite())?;
            self.set_color(outer, Color::Black);
            self.set_color(grandparent, Color::Red);
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{keys_of, tree_of};
    use super::*;

    #[test]
    fn test_first_insert_is_black_root() {
        let tree = tree_of(&[1]);
        assert_eq!(tree.get_color(tree.root), Color::Black);
        assert_eq!(tree.node_at(tree.root).parent, NIL);
    }

    #[test]
    fn test_red_child_under_black_parent() {
        let tree = tree_of(&[2, 1]);
        let left = tree.node_at(tree.root).left;
        assert_eq!(tree.get_color(left), Color::Red);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_uncle_red_recolors() {
        let tree = tree_of(&[2, 1, 3, 4]);
        let root = tree.root;
        assert_eq!(*tree.root().and_then(|id| tree.min_in(id)).unwrap(), 1);
        assert_eq!(tree.node_at(root).key, 2);
        assert_eq!(tree.get_color(tree.node_at(root).left), Color::Black);
        assert_eq!(tree.get_color(tree.node_at(root).right), Color::Black);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_outer_grandchild_single_rotation() {
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(tree.node_at(tree.root).key, 2);
        assert_eq!(tree.get_color(tree.root), Color::Black);
        assert_eq!(tree.get_color(tree.node_at(tree.root).left), Color::Red);
        assert_eq!(tree.get_color(tree.node_at(tree.root).right), Color::Red);
    }

    #[test]
    fn test_inner_grandchild_double_rotation() {
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(tree.node_at(tree.root).key, 2);
        assert_eq!(keys_of(&tree), [1, 2, 3]);
        assert!(tree.is_valid());

        let tree = tree_of(&[1, 3, 2]);
        assert_eq!(tree.node_at(tree.root).key, 2);
        assert_eq!(keys_of(&tree), [1, 2, 3]);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_ties_route_left() {
        let tree = tree_of(&[5, 5]);
        let root = tree.node_at(tree.root);
        assert_ne!(root.left, NIL);
        assert_eq!(root.right, NIL);
    }

    #[test]
    fn test_insert_into_broken_tree_reports_violation() {
        let mut tree = tree_of(&[2, 1]);
        // a red root over a red child leaves the child without a grandparent
        let root = tree.root;
        tree.node_at_mut(root).color = Color::Red;
        let left = tree.node_at(root).left;

        let err = tree.fix_insertion_violations(left);
        assert_eq!(
            err,
            Err(Error::InvariantViolation(Violation::MissingGrandparent {
                node: left
            }))
        );
    }

    #[test]
    fn test_failed_insert_leaves_tree_untouched() {
        let mut tree = tree_of(&[2]);
        let root = tree.root;
        tree.node_at_mut(root).color = Color::Red;

        assert_eq!(
            tree.insert(1),
            Err(Error::InvariantViolation(Violation::MissingGrandparent {
                node: 1
            }))
        );
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node_at(root).left, NIL);
        assert_eq!(keys_of(&tree), [2]);
    }

    #[test]
    fn test_sequential_insertions_stay_valid() {
        let mut tree = RbTree::new();
        for i in 0..200 {
            tree.insert((i * 37) % 101).unwrap();
            assert!(tree.is_valid(), "invalid after inserting step {i}");
        }
        assert_eq!(tree.len(), 200);
    }
}
