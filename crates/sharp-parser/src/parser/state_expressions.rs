//! Parser state - expressions.
//!
//! Binary operators use precedence climbing. A missing operand is left as
//! NONE in the parent's data; the operator token is still in the tree so the
//! caret after `a + ` or `x = ` has something to anchor on.

use super::base::NodeIndex;
use super::node::{BinaryExprData, CallData, ExprWrapperData};
use super::state::ParserState;
use super::syntax_kind_ext::*;
use sharp_scanner::SyntaxKind;

impl ParserState {
    /// Parse an expression, assignments included.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let start = self.start_node();
        let left = self.parse_binary_expression(0);
        let result = if self.token().is_assignment_operator() {
            let operator_token = self.parse_token_node();
            let right = self.parse_expression();
            self.finish_node(start, |arena, pos, end| {
                arena.add_binary_expression(
                    ASSIGNMENT_EXPRESSION,
                    pos,
                    end,
                    BinaryExprData {
                        left,
                        operator_token,
                        right,
                    },
                )
            })
        } else {
            left
        };
        self.exit_recursion();
        result
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start = self.start_node();
        let mut left = self.parse_unary_expression();
        while let Some(precedence) = self.token().binary_precedence() {
            if precedence <= min_precedence {
                break;
            }
            let operator_token = self.parse_token_node();
            let right = self.parse_binary_expression(precedence);
            left = self.finish_node(start, |arena, pos, end| {
                arena.add_binary_expression(
                    BINARY_EXPRESSION,
                    pos,
                    end,
                    BinaryExprData {
                        left,
                        operator_token,
                        right,
                    },
                )
            });
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        if !matches!(
            self.token(),
            SyntaxKind::ExclamationToken | SyntaxKind::MinusToken | SyntaxKind::PlusToken
        ) {
            return self.parse_postfix_expression();
        }
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let start = self.start_node();
        let operator_token = self.parse_token_node();
        let operand = self.parse_unary_expression();
        let result = self.finish_node(start, |arena, pos, end| {
            arena.add_binary_expression(
                PREFIX_UNARY_EXPRESSION,
                pos,
                end,
                BinaryExprData {
                    left: NodeIndex::NONE,
                    operator_token,
                    right: operand,
                },
            )
        });
        self.exit_recursion();
        result
    }

    /// Primary expression followed by `.name` and `(args)` suffixes.
    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start = self.start_node();
        let mut expression = self.parse_primary_expression();
        if expression.is_none() {
            return expression;
        }
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    let operator_token = self.parse_token_node();
                    let name = if self.is_token(SyntaxKind::Identifier) {
                        self.parse_identifier_name()
                    } else {
                        self.parse_error_at_current_token("expected a member name");
                        NodeIndex::NONE
                    };
                    expression = self.finish_node(start, |arena, pos, end| {
                        arena.add_binary_expression(
                            MEMBER_ACCESS_EXPRESSION,
                            pos,
                            end,
                            BinaryExprData {
                                left: expression,
                                operator_token,
                                right: name,
                            },
                        )
                    });
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_argument_list();
                    expression = self.finish_node(start, |arena, pos, end| {
                        arena.add_call(
                            INVOCATION_EXPRESSION,
                            pos,
                            end,
                            CallData {
                                expression,
                                arguments,
                            },
                        )
                    });
                }
                _ => break,
            }
        }
        expression
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.start_node();
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier_name(),
            kind if kind.is_predefined_type() && kind != SyntaxKind::VoidKeyword => {
                self.parse_identifier_name()
            }
            SyntaxKind::ThisKeyword => {
                self.parse_token_node();
                self.finish_node(start, |arena, pos, end| {
                    arena.add_node(THIS_EXPRESSION, pos, end)
                })
            }
            SyntaxKind::BaseKeyword => {
                self.parse_token_node();
                self.finish_node(start, |arena, pos, end| {
                    arena.add_node(BASE_EXPRESSION, pos, end)
                })
            }
            SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {
                self.parse_token_node();
                self.finish_node(start, |arena, pos, end| {
                    arena.add_node(LITERAL_EXPRESSION, pos, end)
                })
            }
            SyntaxKind::OpenParenToken => {
                self.parse_token_node();
                let expression = self.parse_expression();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.finish_node(start, |arena, pos, end| {
                    arena.add_expr_wrapper(
                        PARENTHESIZED_EXPRESSION,
                        pos,
                        end,
                        ExprWrapperData { expression },
                    )
                })
            }
            SyntaxKind::NewKeyword => self.parse_object_creation_expression(),
            _ => {
                self.parse_error_at_current_token("expected an expression");
                NodeIndex::NONE
            }
        }
    }

    /// Wrap the current identifier (or predefined type keyword) in a name node.
    fn parse_identifier_name(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_token_node();
        self.finish_node(start, |arena, pos, end| {
            arena.add_node(IDENTIFIER_NAME, pos, end)
        })
    }

    fn parse_object_creation_expression(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::NewKeyword);
        let expression = if self.can_start_type() {
            self.parse_type()
        } else {
            self.parse_error_at_current_token("expected a type");
            NodeIndex::NONE
        };
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_argument_list()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(start, |arena, pos, end| {
            arena.add_call(
                OBJECT_CREATION_EXPRESSION,
                pos,
                end,
                CallData {
                    expression,
                    arguments,
                },
            )
        })
    }

    /// Parse `(a, ref b, out c)`. Argument modifiers are children of the list.
    pub(crate) fn parse_argument_list(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if matches!(
                self.token(),
                SyntaxKind::RefKeyword | SyntaxKind::OutKeyword | SyntaxKind::InKeyword
            ) {
                self.parse_token_node();
            }
            let argument = self.parse_expression();
            if argument.is_some() {
                arguments.push(argument);
            }
            if self.parse_optional(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(start, |arena, pos, end| {
            arena.add_list_node(ARGUMENT_LIST, pos, end, arguments.into())
        })
    }

    /// Parse `=> expression`.
    pub(crate) fn parse_arrow_expression_clause(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let expression = self.parse_expression();
        self.finish_node(start, |arena, pos, end| {
            arena.add_expr_wrapper(
                ARROW_EXPRESSION_CLAUSE,
                pos,
                end,
                ExprWrapperData { expression },
            )
        })
    }
}
