#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

extern crate alloc;

mod compare;
pub use compare::{Compare, FloatOrder, Natural, Reverse};

mod error;
pub use error::{Error, Violation};

mod node;
pub use node::{Color, Direction, NodeId, NodeView, Side};

mod tree;
pub use tree::{Dump, RbTree};
