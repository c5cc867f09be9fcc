//! Document tree model.
//!
//! [`Node`] is the typed tree the renderer consumes. [`RawNode`] is the
//! untyped JSON shape used to exchange trees with external parsers, and
//! [`NodeStats`] summarizes a tree.

mod node;
mod raw;
mod stats;

pub use node::{Content, Node, UnknownKind, BUILTIN_KINDS};
pub use raw::RawNode;
pub use stats::NodeStats;
