//! Recommenders for the parameter modifiers `ref`, `out` and `params`.

use super::{KeywordKind, KeywordRecommender};
use crate::context::SyntaxContext;
use crate::context_query::{is_argument_modifier_context, is_parameter_modifier_context};
use crate::error::CompletionError;
use sharp_common::CancellationToken;

/// `ref` and `out` start a parameter or an argument; `params` only a parameter.
#[derive(Clone, Copy, Debug)]
pub struct ParameterModifierRecommender {
    keyword: KeywordKind,
}

impl ParameterModifierRecommender {
    /// Recommender for `keyword`, which should be `Ref`, `Out` or `Params`.
    pub fn new(keyword: KeywordKind) -> Self {
        ParameterModifierRecommender { keyword }
    }

    fn allowed_on_arguments(&self) -> bool {
        matches!(self.keyword, KeywordKind::Ref | KeywordKind::Out)
    }
}

impl KeywordRecommender for ParameterModifierRecommender {
    fn keyword(&self) -> KeywordKind {
        self.keyword
    }

    fn is_valid_context(
        &self,
        position: u32,
        context: &SyntaxContext<'_>,
        cancel: &CancellationToken,
    ) -> Result<bool, CompletionError> {
        if cancel.is_cancelled() {
            return Ok(false);
        }
        if is_parameter_modifier_context(context.tree, position, context.left_token, cancel, false) {
            return Ok(true);
        }
        Ok(self.allowed_on_arguments() && is_argument_modifier_context(context.tree, context.target_token))
    }
}
