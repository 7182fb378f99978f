//! Errors surfaced by keyword recommenders.
//!
//! "Not applicable here" and "request cancelled" are both plain `false`
//! verdicts. Only a collaborator that cannot answer at all produces an error,
//! and the dispatcher confines it to the recommender invocation that hit it.

use crate::recommenders::KeywordKind;
use serde::Serialize;
use sharp_semantic::SemanticError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionError {
    /// The semantic model failed a query.
    #[error("semantic model fault: {message}")]
    Semantic { message: String },
    /// A recommender panicked; the panic was caught at the dispatch boundary.
    #[error("recommender for '{keyword}' panicked: {message}")]
    Panicked { keyword: KeywordKind, message: String },
}

/// Observe the outcome of a semantic query.
///
/// `Ok(None)` when the request was cancelled, so callers can unwind with a
/// negative verdict; faults become `CompletionError::Semantic`.
pub(crate) fn observe<T>(result: Result<T, SemanticError>) -> Result<Option<T>, CompletionError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(SemanticError::Cancelled) => Ok(None),
        Err(SemanticError::Fault(message)) => Err(CompletionError::Semantic { message }),
    }
}
