//! Recommender for the `base` keyword.

use super::{
    KeywordKind, KeywordRecommender, instance_constructor_of_initializer,
    is_instance_expression_or_statement,
};
use crate::context::SyntaxContext;
use crate::error::CompletionError;
use sharp_common::CancellationToken;
use sharp_parser::syntax_kind_ext::CLASS_DECLARATION;

/// `base` as an expression inside a type's instance member, or after the
/// colon of an instance constructor declared in a class. Never preselected.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseKeywordRecommender;

impl KeywordRecommender for BaseKeywordRecommender {
    fn keyword(&self) -> KeywordKind {
        KeywordKind::Base
    }

    fn is_valid_context(
        &self,
        _position: u32,
        context: &SyntaxContext<'_>,
        cancel: &CancellationToken,
    ) -> Result<bool, CompletionError> {
        if cancel.is_cancelled() || context.containing_type_declaration.is_none() {
            return Ok(false);
        }
        if is_instance_expression_or_statement(context) {
            return Ok(true);
        }
        let constructor = instance_constructor_of_initializer(context);
        Ok(context.tree.kind_of(context.tree.parent(constructor)) == Some(CLASS_DECLARATION))
    }
}
