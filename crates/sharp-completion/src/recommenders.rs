//! Keyword recommenders.
//!
//! One recommender per contextual keyword, all behind [`KeywordRecommender`].
//! Recommenders hold no state; a verdict is computed fresh for each request
//! from the shared [`SyntaxContext`].

mod base_keyword;
mod parameter_modifier;
mod this_keyword;

pub use base_keyword::BaseKeywordRecommender;
pub use parameter_modifier::ParameterModifierRecommender;
pub use this_keyword::ThisKeywordRecommender;

use crate::context::SyntaxContext;
use crate::context_query::constructor_of_initializer_colon;
use crate::error::{CompletionError, observe};
use serde::{Deserialize, Serialize};
use sharp_common::CancellationToken;
use sharp_parser::NodeIndex;
use sharp_scanner::SyntaxKind;
use std::fmt;

/// Contextual keywords with a recommender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    This,
    Base,
    Ref,
    Out,
    Params,
}

impl KeywordKind {
    pub const ALL: [KeywordKind; 5] = [
        KeywordKind::This,
        KeywordKind::Base,
        KeywordKind::Ref,
        KeywordKind::Out,
        KeywordKind::Params,
    ];

    pub fn text(self) -> &'static str {
        match self {
            KeywordKind::This => "this",
            KeywordKind::Base => "base",
            KeywordKind::Ref => "ref",
            KeywordKind::Out => "out",
            KeywordKind::Params => "params",
        }
    }

    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            KeywordKind::This => SyntaxKind::ThisKeyword,
            KeywordKind::Base => SyntaxKind::BaseKeyword,
            KeywordKind::Ref => SyntaxKind::RefKeyword,
            KeywordKind::Out => SyntaxKind::OutKeyword,
            KeywordKind::Params => SyntaxKind::ParamsKeyword,
        }
    }
}

impl fmt::Display for KeywordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Outcome of evaluating one recommender at one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct KeywordVerdict {
    pub keyword: KeywordKind,
    pub is_valid: bool,
    pub preselect: bool,
}

/// Decides whether one keyword is a legal suggestion at the caret.
///
/// `Ok(false)` covers both "not applicable" and "cancelled". `Err` is
/// reserved for collaborator faults.
pub trait KeywordRecommender: Send + Sync {
    fn keyword(&self) -> KeywordKind;

    fn is_valid_context(
        &self,
        position: u32,
        context: &SyntaxContext<'_>,
        cancel: &CancellationToken,
    ) -> Result<bool, CompletionError>;

    /// Only called once `is_valid_context` returned true.
    fn should_preselect(
        &self,
        _context: &SyntaxContext<'_>,
        _cancel: &CancellationToken,
    ) -> Result<bool, CompletionError> {
        Ok(false)
    }

    fn evaluate(
        &self,
        position: u32,
        context: &SyntaxContext<'_>,
        cancel: &CancellationToken,
    ) -> Result<KeywordVerdict, CompletionError> {
        let is_valid = self.is_valid_context(position, context, cancel)?;
        let preselect = is_valid && self.should_preselect(context, cancel)?;
        Ok(KeywordVerdict {
            keyword: self.keyword(),
            is_valid,
            preselect,
        })
    }
}

/// Recommenders for every keyword in [`KeywordKind::ALL`], in that order.
pub fn default_recommenders() -> Vec<Box<dyn KeywordRecommender>> {
    vec![
        Box::new(ThisKeywordRecommender),
        Box::new(BaseKeywordRecommender),
        Box::new(ParameterModifierRecommender::new(KeywordKind::Ref)),
        Box::new(ParameterModifierRecommender::new(KeywordKind::Out)),
        Box::new(ParameterModifierRecommender::new(KeywordKind::Params)),
    ]
}

// =============================================================================
// Shared rules
// =============================================================================

/// Inside an instance member, at the start of an expression (outside any
/// attribute) or a statement.
pub(crate) fn is_instance_expression_or_statement(context: &SyntaxContext<'_>) -> bool {
    context.is_instance_context
        && (context.is_non_attribute_expression_context || context.is_statement_context)
}

/// Non-static constructor whose initializer colon is the target token.
pub(crate) fn instance_constructor_of_initializer(context: &SyntaxContext<'_>) -> NodeIndex {
    let constructor = constructor_of_initializer_colon(context.tree, context.target_token);
    if constructor.is_some() && !context.tree.has_static_modifier(constructor) {
        constructor
    } else {
        NodeIndex::NONE
    }
}

/// True when the named type enclosing the caret is one of the expected types.
pub(crate) fn is_enclosing_type_inferred(
    context: &SyntaxContext<'_>,
    cancel: &CancellationToken,
) -> Result<bool, CompletionError> {
    if context.inferred_types.is_empty() || cancel.is_cancelled() {
        return Ok(false);
    }
    let enclosing = observe(
        context
            .semantic_model
            .enclosing_named_type(context.position, cancel),
    )?;
    Ok(enclosing
        .flatten()
        .is_some_and(|id| context.inferred_types.contains(&id)))
}

#[cfg(test)]
#[path = "../tests/recommenders_tests.rs"]
mod recommenders_tests;
