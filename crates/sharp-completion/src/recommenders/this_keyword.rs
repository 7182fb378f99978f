//! Recommender for the `this` keyword.
//!
//! `this` is legal in three places:
//! 1. an expression or statement inside an instance member,
//! 2. right after the colon of an instance constructor's initializer,
//! 3. as the modifier of the first parameter of a static method in a static
//!    class (an extension method receiver).

use super::{
    KeywordKind, KeywordRecommender, instance_constructor_of_initializer,
    is_enclosing_type_inferred, is_instance_expression_or_statement,
};
use crate::context::SyntaxContext;
use crate::context_query::is_parameter_modifier_context;
use crate::error::CompletionError;
use sharp_common::CancellationToken;
use sharp_parser::syntax_kind_ext::{CLASS_DECLARATION, METHOD_DECLARATION, is_type_declaration};

pub(crate) type Rule = fn(u32, &SyntaxContext<'_>, &CancellationToken) -> bool;

/// Validity rules, cheapest first. Any one of them is sufficient.
pub(crate) const RULES: [Rule; 3] = [
    instance_expression_or_statement,
    constructor_initializer,
    extension_receiver_parameter,
];

#[derive(Clone, Copy, Debug, Default)]
pub struct ThisKeywordRecommender;

impl KeywordRecommender for ThisKeywordRecommender {
    fn keyword(&self) -> KeywordKind {
        KeywordKind::This
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
        Ok(RULES.iter().any(|rule| rule(position, context, cancel)))
    }

    /// Preselect when the expected type is the enclosing type itself.
    fn should_preselect(
        &self,
        context: &SyntaxContext<'_>,
        cancel: &CancellationToken,
    ) -> Result<bool, CompletionError> {
        is_enclosing_type_inferred(context, cancel)
    }
}

pub(crate) fn instance_expression_or_statement(
    _position: u32,
    context: &SyntaxContext<'_>,
    _cancel: &CancellationToken,
) -> bool {
    is_instance_expression_or_statement(context)
}

/// `Goo() : |` but not `static Goo() : |`.
pub(crate) fn constructor_initializer(
    _position: u32,
    context: &SyntaxContext<'_>,
    _cancel: &CancellationToken,
) -> bool {
    instance_constructor_of_initializer(context).is_some()
}

/// `static class C { static void M(|`
pub(crate) fn extension_receiver_parameter(
    position: u32,
    context: &SyntaxContext<'_>,
    cancel: &CancellationToken,
) -> bool {
    let tree = context.tree;
    if !is_parameter_modifier_context(tree, position, context.left_token, cancel, true) {
        return false;
    }
    let method = tree.get_ancestor(context.left_token, |kind| kind == METHOD_DECLARATION);
    let type_declaration = tree.get_ancestor(method, is_type_declaration);
    if method.is_none() || type_declaration.is_none() {
        return false;
    }
    if cancel.is_cancelled() {
        return false;
    }
    tree.kind_of(type_declaration) == Some(CLASS_DECLARATION)
        && tree.has_static_modifier(method)
        && tree.has_static_modifier(type_declaration)
}
