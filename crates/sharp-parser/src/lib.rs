//! C# subset parser and arena syntax tree for the sharp completion engine.
//!
//! The tree is stored in a `NodeArena`: every node (tokens included) is a
//! 16-byte `Node` header addressed by a `NodeIndex`, with kind-specific data
//! in typed pools and parent links in `ExtendedNodeInfo`. The arena is
//! immutable after parsing, so any number of readers can walk it at once.

pub mod parser;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::node::{ModifierFlags, Node, NodeArena};
pub use parser::state::{ParseDiagnostic, ParserState};
pub use parser::syntax_kind_ext;
