//! Parser state - blocks and statements.

use super::base::NodeIndex;
use super::node::{ExprWrapperData, VariableData};
use super::state::ParserState;
use super::syntax_kind_ext::*;
use sharp_scanner::SyntaxKind;

impl ParserState {
    /// Parse `{ statements }`.
    ///
    /// An unterminated block stops at a token that can only start a member or
    /// type declaration, so the declarations after it are still parsed as such.
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
            && !self.is_declaration_start()
        {
            let before = self.current;
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.current == before {
                self.skip_token("expected a statement");
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(start, |arena, pos, end| {
            arena.add_list_node(BLOCK, pos, end, statements.into())
        })
    }

    fn is_declaration_start(&self) -> bool {
        let kind = self.token();
        kind.is_modifier()
            || matches!(
                kind,
                SyntaxKind::ClassKeyword
                    | SyntaxKind::StructKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::NamespaceKeyword
            )
    }

    /// Parse a single statement. Returns NONE without consuming anything
    /// when the current token cannot start a statement.
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let statement = match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::SemicolonToken => {
                let start = self.start_node();
                self.parse_token_node();
                self.finish_node(start, |arena, pos, end| {
                    arena.add_node(EMPTY_STATEMENT, pos, end)
                })
            }
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => NodeIndex::NONE,
            _ if self.is_local_declaration_start() => self.parse_local_declaration_statement(),
            _ => self.parse_expression_statement(),
        };
        self.exit_recursion();
        statement
    }

    fn is_local_declaration_start(&self) -> bool {
        let kind = self.token();
        let next = self.peek(1);
        if kind.is_predefined_type() && kind != SyntaxKind::VoidKeyword {
            return next == SyntaxKind::Identifier
                || (next == SyntaxKind::OpenBracketToken
                    && self.peek(2) == SyntaxKind::CloseBracketToken);
        }
        kind == SyntaxKind::Identifier && next == SyntaxKind::Identifier
    }

    fn parse_local_declaration_statement(&mut self) -> NodeIndex {
        let start = self.start_node();
        let type_annotation = self.parse_type();
        let declarators = self.parse_variable_declarators();
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(start, |arena, pos, end| {
            arena.add_variable(
                LOCAL_DECLARATION_STATEMENT,
                pos,
                end,
                VariableData {
                    attributes: None,
                    modifiers: None,
                    type_annotation,
                    declarators,
                },
            )
        })
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(start, |arena, pos, end| {
            arena.add_expr_wrapper(RETURN_STATEMENT, pos, end, ExprWrapperData { expression })
        })
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::IfKeyword);
        self.parse_condition();
        self.parse_statement();
        if self.is_token(SyntaxKind::ElseKeyword) {
            let else_start = self.start_node();
            self.parse_token_node();
            self.parse_statement();
            self.finish_node(else_start, |arena, pos, end| {
                arena.add_node(ELSE_CLAUSE, pos, end)
            });
        }
        self.finish_node(start, |arena, pos, end| {
            arena.add_node(IF_STATEMENT, pos, end)
        })
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_condition();
        self.parse_statement();
        self.finish_node(start, |arena, pos, end| {
            arena.add_node(WHILE_STATEMENT, pos, end)
        })
    }

    /// `( expr )` of an `if` or `while`. The parens belong to the statement.
    fn parse_condition(&mut self) {
        self.parse_expected(SyntaxKind::OpenParenToken);
        if !self.is_token(SyntaxKind::CloseParenToken) {
            self.parse_expression();
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.start_node();
        let before = self.current;
        let expression = self.parse_expression();
        if expression.is_none() && self.current == before {
            return NodeIndex::NONE;
        }
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(start, |arena, pos, end| {
            arena.add_expr_wrapper(EXPRESSION_STATEMENT, pos, end, ExprWrapperData { expression })
        })
    }
}

