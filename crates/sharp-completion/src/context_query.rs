//! Syntactic queries about the tokens next to the caret.
//!
//! These are pure functions over the arena. Each one answers `false` (or
//! NONE) when the shape it looks for is absent, which is the normal case
//! while the user is in the middle of an edit.

use sharp_common::CancellationToken;
use sharp_parser::syntax_kind_ext::*;
use sharp_parser::{NodeArena, NodeIndex};
use sharp_scanner::SyntaxKind;

/// `token`, or the token before it if `token` is a word the caret touches.
///
/// A word ending at (or containing) the caret is most likely the keyword
/// being typed, so context decisions look past it.
pub fn previous_token_if_touching_word(tree: &NodeArena, token: NodeIndex, position: u32) -> NodeIndex {
    match tree.get(token) {
        Some(node)
            if node.end >= position
                && node.token_kind().is_some_and(SyntaxKind::is_word) =>
        {
            tree.previous_token(token)
        }
        _ => token,
    }
}

/// Nearest type declaration around `token`. A type's own closing brace is
/// outside it.
pub fn containing_type_declaration(tree: &NodeArena, token: NodeIndex) -> NodeIndex {
    let declaration = tree.get_ancestor(token, is_type_declaration);
    if tree.token_kind(token) == Some(SyntaxKind::CloseBraceToken) && tree.parent(token) == declaration {
        return tree.get_ancestor(declaration, is_type_declaration);
    }
    declaration
}

/// Nearest method, constructor, field or property around `token`, provided
/// it is declared directly in a type.
pub fn containing_member(tree: &NodeArena, token: NodeIndex) -> NodeIndex {
    let member = tree.get_ancestor(token, is_member_declaration);
    let in_type = tree
        .kind_of(tree.parent(member))
        .is_some_and(is_type_declaration);
    if in_type { member } else { NodeIndex::NONE }
}

/// The caret is inside a non-static member: body, initializer, parameter
/// list or constructor initializer.
pub fn is_instance_context(tree: &NodeArena, token: NodeIndex) -> bool {
    let member = containing_member(tree, token);
    member.is_some() && !tree.has_static_modifier(member)
}

/// A statement may start right after `token`.
pub fn is_statement_context(tree: &NodeArena, token: NodeIndex) -> bool {
    let parent = tree.parent(token);
    let Some(parent_kind) = tree.kind_of(parent) else {
        return false;
    };
    match tree.token_kind(token) {
        Some(SyntaxKind::OpenBraceToken) => parent_kind == BLOCK,
        Some(SyntaxKind::SemicolonToken) => {
            is_statement(parent_kind)
                && tree
                    .kind_of(tree.parent(parent))
                    .is_some_and(is_statement_container)
        }
        Some(SyntaxKind::CloseBraceToken) => {
            parent_kind == BLOCK
                && tree
                    .kind_of(tree.parent(parent))
                    .is_some_and(is_statement_container)
        }
        Some(SyntaxKind::CloseParenToken) => {
            matches!(parent_kind, IF_STATEMENT | WHILE_STATEMENT)
        }
        Some(SyntaxKind::ElseKeyword) => parent_kind == ELSE_CLAUSE,
        _ => false,
    }
}

/// An expression may start right after `token`.
pub fn is_expression_context(tree: &NodeArena, token: NodeIndex) -> bool {
    let Some(kind) = tree.token_kind(token) else {
        return false;
    };
    let Some(parent_kind) = tree.kind_of(tree.parent(token)) else {
        return false;
    };
    match kind {
        SyntaxKind::EqualsToken => matches!(
            parent_kind,
            VARIABLE_DECLARATOR | ASSIGNMENT_EXPRESSION | PROPERTY_DECLARATION
        ),
        SyntaxKind::PlusEqualsToken | SyntaxKind::MinusEqualsToken => {
            parent_kind == ASSIGNMENT_EXPRESSION
        }
        SyntaxKind::OpenParenToken => matches!(
            parent_kind,
            ARGUMENT_LIST | IF_STATEMENT | WHILE_STATEMENT | PARENTHESIZED_EXPRESSION
        ),
        SyntaxKind::CommaToken => parent_kind == ARGUMENT_LIST,
        SyntaxKind::ReturnKeyword => parent_kind == RETURN_STATEMENT,
        SyntaxKind::EqualsGreaterThanToken => parent_kind == ARROW_EXPRESSION_CLAUSE,
        SyntaxKind::ExclamationToken => parent_kind == PREFIX_UNARY_EXPRESSION,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
            matches!(parent_kind, BINARY_EXPRESSION | PREFIX_UNARY_EXPRESSION)
        }
        _ => kind.binary_precedence().is_some() && parent_kind == BINARY_EXPRESSION,
    }
}

/// `token` is somewhere inside an attribute, arguments included.
pub fn is_in_attribute(tree: &NodeArena, token: NodeIndex) -> bool {
    tree.get_ancestor(token, |kind| kind == ATTRIBUTE).is_some()
}

fn is_method_or_constructor(kind: u16) -> bool {
    matches!(kind, METHOD_DECLARATION | CONSTRUCTOR_DECLARATION)
}

/// `list` is the parameter list of a method or constructor.
fn is_member_parameter_list(tree: &NodeArena, list: NodeIndex) -> bool {
    tree.kind_of(list) == Some(PARAMETER_LIST)
        && tree
            .kind_of(tree.parent(list))
            .is_some_and(is_method_or_constructor)
}

/// A parameter's modifier list may begin at `position`.
///
/// True after the `(` of a method or constructor parameter list, after a `,`
/// in one, or after the attribute list of one of its parameters. When
/// `is_this_keyword` is set only the first parameter qualifies, since an
/// extension receiver must be the first parameter.
pub fn is_parameter_modifier_context(
    tree: &NodeArena,
    position: u32,
    left_token: NodeIndex,
    cancel: &CancellationToken,
    is_this_keyword: bool,
) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    let token = previous_token_if_touching_word(tree, left_token, position);
    let parent = tree.parent(token);
    match tree.token_kind(token) {
        Some(SyntaxKind::OpenParenToken) => is_member_parameter_list(tree, parent),
        Some(SyntaxKind::CommaToken) => !is_this_keyword && is_member_parameter_list(tree, parent),
        Some(SyntaxKind::CloseBracketToken) => {
            if tree.kind_of(parent) != Some(ATTRIBUTE_LIST) {
                return false;
            }
            let parameter = tree.parent(parent);
            if tree.kind_of(parameter) != Some(PARAMETER) {
                return false;
            }
            let list = tree.parent(parameter);
            if !is_member_parameter_list(tree, list) {
                return false;
            }
            !is_this_keyword
                || tree
                    .get_list(list)
                    .and_then(|parameters| parameters.first())
                    == Some(parameter)
        }
        _ => false,
    }
}

/// An argument's `ref`/`out` modifier may begin after `token`.
pub fn is_argument_modifier_context(tree: &NodeArena, token: NodeIndex) -> bool {
    matches!(
        tree.token_kind(token),
        Some(SyntaxKind::OpenParenToken | SyntaxKind::CommaToken)
    ) && tree.is_parent_kind(token, ARGUMENT_LIST)
        && !is_in_attribute(tree, token)
}

/// Constructor whose initializer colon is `token`, or NONE.
///
/// Matches `:` whose parent is a constructor initializer that is itself the
/// initializer of a constructor declaration.
pub fn constructor_of_initializer_colon(tree: &NodeArena, token: NodeIndex) -> NodeIndex {
    if tree.token_kind(token) != Some(SyntaxKind::ColonToken) {
        return NodeIndex::NONE;
    }
    let initializer = tree.parent(token);
    if tree.kind_of(initializer) != Some(CONSTRUCTOR_INITIALIZER) {
        return NodeIndex::NONE;
    }
    let constructor = tree.parent(initializer);
    if tree.kind_of(constructor) != Some(CONSTRUCTOR_DECLARATION) {
        return NodeIndex::NONE;
    }
    constructor
}

#[cfg(test)]
#[path = "../tests/context_query_tests.rs"]
mod context_query_tests;
