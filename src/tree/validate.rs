use ahash::RandomState;
use alloc::vec::Vec;
use hashbrown::HashSet;
use log::warn;

use super::RbTree;
use crate::{
    error::{Error, Violation},
    node::{Color, NIL},
};

/// One pending node of the validation walk and the path state above it.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    /// Consecutive red nodes ending at the parent
    red_run: usize,
    /// Black nodes on the path from the root down to the parent
    black_count: usize,
}

impl<K, C> RbTree<K, C> {
    /// Checks every red-black invariant and the arena links.
    ///
    /// Walks the whole tree once, carrying the red run and black count of
    /// the current path and comparing every sentinel path against the black
    /// height of the first one reached. Returns the first violation found.
    /// Never mutates, so it is safe to call on a tree in any state.
    pub fn validate(&self) -> Result<(), Error> {
        if self.root == NIL {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(Violation::LengthMismatch {
                    len: self.nodes.len(),
                    reachable: 0,
                }
                .into())
            };
        }

        if self.root >= self.nodes.len() {
            return Err(Violation::DanglingLink {
                node: NIL,
                link: self.root,
            }
            .into());
        }
        let recorded = self.node_at(self.root).parent;
        if recorded != NIL {
            return Err(Violation::ParentMismatch {
                child: self.root,
                recorded,
                actual: NIL,
            }
            .into());
        }
        if self.is_red(self.root) {
            return Err(Violation::RedRoot { node: self.root }.into());
        }

        let mut seen: HashSet<usize, RandomState> =
            HashSet::with_capacity_and_hasher(self.nodes.len(), RandomState::default());
        let mut leaf_black_count = None;
        let mut stack = Vec::new();
        stack.push(Frame {
            node: self.root,
            red_run: 0,
            black_count: 0,
        });

        while let Some(frame) = stack.pop() {
            if !seen.insert(frame.node) {
                return Err(Violation::Cycle { node: frame.node }.into());
            }

            let node = self.node_at(frame.node);
            let (red_run, black_count) = match node.color {
                Color::Red => (frame.red_run + 1, frame.black_count),
                Color::Black => (0, frame.black_count + 1),
            };
            if red_run > 1 {
                return Err(Violation::RedAdjacency {
                    node: node.parent,
                    child: frame.node,
                }
                .into());
            }

            for child in [node.left, node.right] {
                if child == NIL {
                    match leaf_black_count {
                        None => leaf_black_count = Some(black_count),
                        Some(expected) if expected != black_count => {
                            return Err(Violation::BlackHeightMismatch {
                                node: frame.node,
                                expected,
                                found: black_count,
                            }
                            .into());
                        }
                        Some(_) => {}
                    }
                } else if child >= self.nodes.len() {
                    return Err(Violation::DanglingLink {
                        node: frame.node,
                        link: child,
                    }
                    .into());
                } else if self.node_at(child).parent != frame.node {
                    return Err(Violation::ParentMismatch {
                        child,
                        recorded: self.node_at(child).parent,
                        actual: frame.node,
                    }
                    .into());
                }
            }

            // right first so the left subtree is walked first
            for child in [node.right, node.left] {
                if child != NIL {
                    stack.push(Frame {
                        node: child,
                        red_run,
                        black_count,
                    });
                }
            }
        }

        if seen.len() != self.nodes.len() {
            return Err(Violation::LengthMismatch {
                len: self.nodes.len(),
                reachable: seen.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Returns `true` if [`validate`](Self::validate) finds no violation.
    ///
    /// A failure is logged at warn level before returning `false`.
    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!("red-black tree failed validation: {err}");
                false
            }
        }
    }
}
