//! The semantic model interface consumed by completion.

use crate::types::TypeId;
use sharp_common::{CancellationToken, Cancelled};
use sharp_parser::NodeIndex;

/// Failure of a semantic query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    /// The request was cancelled before or during the query.
    #[error("semantic query cancelled")]
    Cancelled,
    /// The model could not answer: missing or inconsistent binding data.
    #[error("semantic model fault: {0}")]
    Fault(String),
}

impl From<Cancelled> for SemanticError {
    fn from(_: Cancelled) -> Self {
        SemanticError::Cancelled
    }
}

/// Read-only semantic queries over one bound file.
///
/// Implementations are shared by reference across worker threads for the
/// duration of a request. Every query that may do binding work takes the
/// request's cancellation token and must check it before doing that work.
pub trait SemanticModel: Send + Sync {
    /// The named type lexically enclosing `position`, if any.
    fn enclosing_named_type(
        &self,
        position: u32,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError>;

    /// The type a type-reference node names, `None` if it does not resolve.
    fn resolve_type_reference(
        &self,
        node: NodeIndex,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError>;

    /// Display name of a type.
    fn type_name(&self, id: TypeId) -> Option<&str>;
}
