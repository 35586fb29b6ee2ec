use log::trace;

use super::RbTree;
use crate::{
    error::{Error, Violation},
    node::{Direction, NIL},
};

impl<K, C> RbTree<K, C> {
    /// Rotates at `x` in `direction`, pivoting on the child opposite to it.
    ///
    /// Both preconditions are checked before any link is written, so a
    /// rejected rotation leaves the tree untouched.
    pub(super) fn rotate(&mut self, x: usize, direction: Direction) -> Result<(), Error> {
        match direction {
            Direction::Left => self.rotate_left(x),
            Direction::Right => self.rotate_right(x),
        }
    }

    fn rotate_left(&mut self, x: usize) -> Result<(), Error> {
        if x == NIL {
            return Err(Violation::RotateSentinel {
                direction: Direction::Left,
            }
            .into());
        }

        let y = self.node_at(x).right;
        if y == NIL {
            return Err(Violation::MissingPivot {
                node: x,
                direction: Direction::Left,
            }
            .into());
        }
        trace!("rotate left at node {x}, pivot {y}");

        let y_left = self.node_at(y).left;
        self.node_at_mut(x).right = y_left;
        self.set_parent(y_left, x);

        let x_parent = self.node_at(x).parent;
        self.node_at_mut(y).parent = x_parent;
        self.replace_child(x_parent, x, y);

        self.node_at_mut(y).left = x;
        self.node_at_mut(x).parent = y;
        Ok(())
    }

    fn rotate_right(&mut self, y: usize) -> Result<(), Error> {
        if y == NIL {
            return Err(Violation::RotateSentinel {
                direction: Direction::Right,
            }
            .into());
        }

        let x = self.node_at(y).left;
        if x == NIL {
            return Err(Violation::MissingPivot {
                node: y,
                direction: Direction::Right,
            }
            .into());
        }
        trace!("rotate right at node {y}, pivot {x}");

        let x_right = self.node_at(x).right;
        self.node_at_mut(y).left = x_right;
        self.set_parent(x_right, y);

        let y_parent = self.node_at(y).parent;
        self.node_at_mut(x).parent = y_parent;
        self.replace_child(y_parent, y, x);

        self.node_at_mut(x).right = y;
        self.node_at_mut(y).parent = x;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{keys_of, tree_of};
    use super::*;

    #[test]
    fn test_rotate_left_at_root() {
        // 2 is the root with children 1 and 3
        let mut tree = tree_of(&[2, 1, 3]);
        let root = tree.root;
        let right = tree.node_at(root).right;

        tree.rotate(root, Direction::Left).unwrap();

        assert_eq!(tree.root, right);
        assert_eq!(tree.node_at(right).parent, NIL);
        assert_eq!(tree.node_at(right).left, root);
        assert_eq!(tree.node_at(root).parent, right);
        assert_eq!(keys_of(&tree), [1, 2, 3]);
    }

    #[test]
    fn test_rotate_right_then_left_restores_shape() {
        let mut tree = tree_of(&[10, 5, 15, 3, 7, 12, 18]);
        let before: Vec<_> = tree.nodes.iter().map(|n| (n.parent, n.left, n.right)).collect();
        let root = tree.root;
        let left = tree.node_at(root).left;

        tree.rotate(root, Direction::Right).unwrap();
        assert_eq!(tree.root, left);
        assert_eq!(keys_of(&tree), [3, 5, 7, 10, 12, 15, 18]);

        tree.rotate(left, Direction::Left).unwrap();
        let after: Vec<_> = tree.nodes.iter().map(|n| (n.parent, n.left, n.right)).collect();
        assert_eq!(before, after);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_rotate_sentinel_is_rejected() {
        let mut tree = tree_of(&[1]);
        assert_eq!(
            tree.rotate(NIL, Direction::Left),
            Err(Error::InvariantViolation(Violation::RotateSentinel {
                direction: Direction::Left
            }))
        );
    }

    #[test]
    fn test_rotate_without_pivot_leaves_tree_untouched() {
        let mut tree = tree_of(&[1, 2]);
        let root = tree.root;
        let snapshot: Vec<_> = tree.nodes.iter().map(|n| (n.parent, n.left, n.right)).collect();

        // 1 is the root and has no left child
        assert_eq!(
            tree.rotate(root, Direction::Right),
            Err(Error::InvariantViolation(Violation::MissingPivot {
                node: root,
                direction: Direction::Right
            }))
        );
        let after: Vec<_> = tree.nodes.iter().map(|n| (n.parent, n.left, n.right)).collect();
        assert_eq!(snapshot, after);
        assert!(tree.is_valid());
    }
}
