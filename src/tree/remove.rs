use log::{debug, trace};

use super::RbTree;
use crate::{
    compare::Compare,
    error::{Error, Violation},
    node::{Color, NIL},
};

impl<K, C: Compare<K>> RbTree<K, C> {
    /// Removes one key comparing equal to `key` and returns it.
    ///
    /// Returns `Ok(None)` and leaves the tree untouched if no such key is
    /// stored. When duplicates exist exactly one of them is removed.
    pub fn remove(&mut self, key: &K) -> Result<Option<K>, Error> {
        let Some(node_idx) = self.find_node(key) else {
            debug!("remove: key not present, tree unchanged");
            return Ok(None);
        };

        let removed = self.delete_node(node_idx)?;

        debug_assert!(
            self.validate().is_ok(),
            "RB tree invariants violated after removal"
        );

        Ok(Some(removed))
    }
}

impl<K, C> RbTree<K, C> {
    fn delete_node(&mut self, node_to_delete: usize) -> Result<K, Error> {
        let target = self.removal_target(node_to_delete);

        let node = self.node_at(target);
        let child = if node.left != NIL { node.left } else { node.right };
        let needs_repair = self.get_color(target) == self.get_color(child);
        if needs_repair {
            // nothing has moved yet, so a broken tree is reported untouched
            self.check_deletion_repair(target)?;
        }

        if target != node_to_delete {
            debug!("remove: node {node_to_delete} has two children, swapping key with {target}");
            self.swap_keys(node_to_delete, target);
        }

        if needs_repair {
            self.fix_deletion_violations(target)?;
        } else {
            // a red leaf goes without a trace, a red child takes over the lost black
            self.set_color(child, Color::Black);
        }

        self.transplant(target, child);
        Ok(self.release(target))
    }

    /// Node to physically unlink in place of `node`.
    ///
    /// A node with two children gives way to its in-order predecessor (the
    /// successor if the predecessor search comes back empty), which has at
    /// most one child and whose key will be moved into `node`.
    fn removal_target(&self, node: usize) -> usize {
        let n = self.node_at(node);
        if n.left == NIL || n.right == NIL {
            return node;
        }

        match self.find_maximum(n.left) {
            NIL => self.find_minimum(n.right),
            predecessor => predecessor,
        }
    }

    /// Follows the path `fix_deletion_violations` would take from `node`
    /// without touching the tree, failing where it would find no sibling.
    ///
    /// Case 3 only recolors nodes below the next level inspected, and once a
    /// red sibling or red parent is met no later step can fail.
    fn check_deletion_repair(&self, mut node: usize) -> Result<(), Error> {
        loop {
            let parent = self.get_parent(node);
            if parent == NIL {
                return Ok(());
            }

            let side = self.side_of(node, parent);
            let sibling = self.get_child(parent, side.opposite());
            if sibling == NIL {
                return Err(Violation::MissingSibling { node }.into());
            }
            if self.is_red(sibling) {
                // the near nephew becomes the sibling once case 2 rotates
                return match self.get_child(sibling, side) {
                    NIL => Err(Violation::MissingSibling { node }.into()),
                    _ => Ok(()),
                };
            }

            let near = self.get_child(sibling, side);
            let far = self.get_child(sibling, side.opposite());
            if self.is_red(near) || self.is_red(far) || self.is_red(parent) {
                return Ok(());
            }
            node = parent;
        }
    }

    /// Hangs `child` where `node` used to be.
    fn transplant(&mut self, node: usize, child: usize) {
        let parent = self.node_at(node).parent;
        self.replace_child(parent, node, child);
        self.set_parent(child, parent);
    }

    /// Restores black heights around `node`, whose path is one black short.
    ///
    /// `node` is still linked while this runs; only its parent, sibling and
    /// nephews are inspected, so it may be the black leaf about to be removed.
    fn fix_deletion_violations(&mut self, mut node: usize) -> Result<(), Error> {
        loop {
            let parent = self.get_parent(node);
            if parent == NIL {
                trace!("remove case 1: node {node} is the root");
                return Ok(());
            }

            let side = self.side_of(node, parent);
            let mut sibling = self.get_child(parent, side.opposite());
            if sibling == NIL {
                return Err(Violation::MissingSibling { node }.into());
            }

            if self.is_red(sibling) {
                trace!("remove case 2: sibling {sibling} is red");
                self.rotate(parent, side)?;
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                sibling = self.get_child(parent, side.opposite());
                if sibling == NIL {
                    return Err(Violation::MissingSibling { node }.into());
                }
            }

            let near = self.get_child(sibling, side);
            let far = self.get_child(sibling, side.opposite());

            if self.is_black(near) && self.is_black(far) {
                self.set_color(sibling, Color::Red);
                if self.is_black(parent) {
                    trace!("remove case 3: pushing the deficit up to {parent}");
                    node = parent;
                    continue;
                }
                trace!("remove case 4: red parent {parent} absorbs the deficit");
                self.set_color(parent, Color::Black);
                return Ok(());
            }

            if self.is_black(far) {
                trace!("remove case 5: near nephew {near} is red");
                self.rotate(sibling, side.opposite())?;
                self.set_color(sibling, Color::Red);
                self.set_color(near, Color::Black);
                sibling = near;
            }

            trace!("remove case 6: far nephew of {node} is red");
            let far = self.get_child(sibling, side.opposite());
            self.rotate(parent, side)?;
            self.set_color(sibling, self.get_color(parent));
            self.set_color(parent, Color::Black);
            self.set_color(far, Color::Black);
            return Ok(());
        }
    }
}
