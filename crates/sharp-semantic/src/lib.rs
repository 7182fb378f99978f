//! Semantic model for the sharp completion engine.
//!
//! Completion consumes semantics only through the [`SemanticModel`] trait.
//! [`BoundModel`] is the in-tree implementation: a declaration binder that
//! resolves type names against the types declared in a single file.

pub mod binder;
pub mod model;
pub mod types;

pub use binder::BoundModel;
pub use model::{SemanticError, SemanticModel};
pub use types::{TypeId, TypeKind};
