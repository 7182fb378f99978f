//! Positional keyword completion for the sharp completion engine.
//!
//! A completion request builds one [`SyntaxContext`] for the caret, then asks
//! every registered [`KeywordRecommender`] whether its keyword is legal there
//! and whether it should be preselected. The [`RecommenderRegistry`] runs the
//! recommenders (in parallel or sequentially) and merges their verdicts.
//!
//! ```text
//! source ──parse──▶ NodeArena ──bind──▶ BoundModel
//!                        │                  │
//!                        └──▶ SyntaxContext ◀┘
//!                                  │
//!                     RecommenderRegistry::dispatch
//!                                  │
//!                          CompletionOutcome
//! ```

pub mod context;
pub mod context_query;
pub mod error;
pub mod marker;
pub mod recommenders;
pub mod registry;

pub use context::SyntaxContext;
pub use error::CompletionError;
pub use marker::split_caret_marker;
pub use recommenders::{KeywordKind, KeywordRecommender, KeywordVerdict};
pub use registry::{
    CompletionOptions, CompletionOutcome, DispatchMode, KeywordCompletion, RecommenderFault,
    RecommenderRegistry, complete, sort_priority,
};
