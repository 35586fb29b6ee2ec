use thiserror::Error;

use crate::node::Direction;

/// Errors raised by tree operations.
///
/// The only failure class is a broken structural contract. Absent keys on
/// removal and duplicate keys on insertion are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A red-black invariant or an internal precondition does not hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] Violation),
}

/// The specific invariant that failed, with the arena slots involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// A rotation was requested at the sentinel.
    #[error("cannot rotate {direction} at the sentinel")]
    RotateSentinel {
        /// Requested rotation direction.
        direction: Direction,
    },
    /// A rotation was requested at a node whose pivot child is the sentinel.
    #[error("cannot rotate {direction} at node {node}: pivot child is the sentinel")]
    MissingPivot {
        /// Node the rotation was requested at.
        node: usize,
        /// Requested rotation direction.
        direction: Direction,
    },
    /// A red node was found without a grandparent while repairing an insertion.
    #[error("red node {node} has a red parent but no grandparent")]
    MissingGrandparent {
        /// Node being repaired.
        node: usize,
    },
    /// A doubly-black position has no sibling, so black heights were already unequal.
    #[error("node {node} has no sibling during removal repair")]
    MissingSibling {
        /// Node being repaired.
        node: usize,
    },
    /// The root is red.
    #[error("root node {node} is red")]
    RedRoot {
        /// Root slot.
        node: usize,
    },
    /// A red node has a red child.
    #[error("red node {node} has red child {child}")]
    RedAdjacency {
        /// Parent slot.
        node: usize,
        /// Child slot.
        child: usize,
    },
    /// Two sentinel paths carry a different number of black nodes.
    #[error("path through node {node} has black height {found}, expected {expected}")]
    BlackHeightMismatch {
        /// Last real node on the offending path.
        node: usize,
        /// Black height of the first path reached.
        expected: usize,
        /// Black height of the offending path.
        found: usize,
    },
    /// A child records a different parent than the node it hangs under.
    #[error("node {child} records parent {recorded} but hangs under {actual}")]
    ParentMismatch {
        /// Child slot.
        child: usize,
        /// Parent stored on the child.
        recorded: usize,
        /// Node that actually links to the child.
        actual: usize,
    },
    /// A link points outside the arena.
    #[error("node {node} links to slot {link} outside the arena")]
    DanglingLink {
        /// Node holding the link.
        node: usize,
        /// Out-of-range slot.
        link: usize,
    },
    /// The same node is reachable along two different paths.
    #[error("node {node} is reachable more than once")]
    Cycle {
        /// Node reached twice.
        node: usize,
    },
    /// The number of reachable nodes differs from the recorded length.
    #[error("{reachable} nodes reachable from the root, {len} recorded")]
    LengthMismatch {
        /// Recorded length.
        len: usize,
        /// Nodes reachable from the root.
        reachable: usize,
    },
}
