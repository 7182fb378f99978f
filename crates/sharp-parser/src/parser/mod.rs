//! Parser module: arena, node access and the recursive-descent parser state.

pub mod base;
pub mod node;
mod node_access;
mod node_arena;
pub mod state;
mod state_declarations;
mod state_expressions;
mod state_statements;
pub mod syntax_kind_ext;

pub use node_access::Ancestors;
