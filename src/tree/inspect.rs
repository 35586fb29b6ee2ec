use alloc::vec::Vec;
use core::fmt;

use super::RbTree;
use crate::node::{NIL, NodeId, NodeView, Side};

impl<K, C> RbTree<K, C> {
    /// Calls `f` once per node in pre-order (node, then left subtree, then right subtree).
    ///
    /// This is the hook external visualizers build on: every view carries the
    /// node's handle, key, color, side and depth, and which children exist.
    pub fn visit<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(NodeView<'a, K>),
    {
        if self.root == NIL {
            return;
        }

        let mut stack = Vec::new();
        stack.push((self.root, Side::Root, 0));

        while let Some((idx, side, depth)) = stack.pop() {
            let node = self.node_at(idx);
            f(NodeView {
                id: NodeId(idx),
                key: &node.key,
                color: node.color,
                side,
                depth,
                has_left: node.left != NIL,
                has_right: node.right != NIL,
            });

            if node.right != NIL {
                stack.push((node.right, Side::Right, depth + 1));
            }
            if node.left != NIL {
                stack.push((node.left, Side::Left, depth + 1));
            }
        }
    }

    /// Text rendering of the structure, one node per line in pre-order.
    ///
    /// Lines read `Root_Black_10`, `L_Red_5`, `R_Black_15`, indented two
    /// spaces per level.
    pub fn dump(&self) -> Dump<'_, K, C> {
        Dump { tree: self }
    }
}

/// Displays a tree's structure; returned by [`RbTree::dump`].
#[derive(Debug)]
pub struct Dump<'a, K, C> {
    tree: &'a RbTree<K, C>,
}

impl<K: fmt::Display, C> fmt::Display for Dump<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        self.tree.visit(|view| {
            if result.is_err() {
                return;
            }
            let prefix = match view.side {
                Side::Root => "Root",
                Side::Left => "L",
                Side::Right => "R",
            };
            result = writeln!(
                f,
                "{:indent$}{}_{}_{}",
                "",
                prefix,
                view.color,
                view.key,
                indent = view.depth * 2
            );
        });
        result
    }
}
