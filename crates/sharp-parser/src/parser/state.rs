//! Parser state: token cursor, node construction helpers and diagnostics.
//!
//! The parser is error tolerant. Missing tokens are recorded as diagnostics
//! and left out of the tree; the surrounding node is still produced so that
//! completion can anchor on whatever the user has typed so far.

use super::base::NodeIndex;
use super::node::NodeArena;
use super::syntax_kind_ext::COMPILATION_UNIT;
use serde::Serialize;
use sharp_common::Span;
use sharp_common::limits::MAX_PARSE_DEPTH;
use sharp_scanner::{ScannerState, SyntaxKind, Token};
use tracing::{debug, trace};

/// A parse error with its source span.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub span: Span,
    pub message: String,
}

/// Start marker for a node under construction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeStart {
    /// Arena length when the node started; everything created after it and
    /// still parentless when the node finishes becomes its child.
    pub first_child: u32,
    pub pos: u32,
}

/// Recursive-descent parser over a pre-scanned token stream.
pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) source_text: String,
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
    pub(crate) arena: NodeArena,
    pub(crate) diagnostics: Vec<ParseDiagnostic>,
    pub(crate) depth: u32,
    /// End offset of the last consumed token
    pub(crate) last_token_end: u32,
}

impl ParserState {
    pub fn new(file_name: impl Into<String>, source_text: impl Into<String>) -> ParserState {
        let source_text = source_text.into();
        let tokens = ScannerState::scan_all(&source_text);
        let arena = NodeArena::with_capacity(tokens.len() * 2);
        ParserState {
            file_name: file_name.into(),
            source_text,
            tokens,
            current: 0,
            arena,
            diagnostics: Vec::new(),
            depth: 0,
            last_token_end: 0,
        }
    }

    /// Parse the whole file and return the compilation unit.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let start = self.start_node();
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.current;
            let member = self.parse_namespace_member();
            if member.is_some() {
                members.push(member);
            }
            if self.current == before {
                self.skip_token("expected a namespace or type declaration");
            }
        }
        // The end-of-file token belongs to the compilation unit.
        self.parse_token_node();

        let end = self.source_text.len() as u32;
        let root = self
            .arena
            .add_list_node(COMPILATION_UNIT, start.pos, end, members.into());
        self.arena.adopt_children(start.first_child, root);
        self.arena.root = root;
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            diagnostics = self.diagnostics.len(),
            "parsed source file"
        );
        root
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    /// Current token. The stream always ends with `EndOfFileToken`, which is
    /// returned for any position past the end.
    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.peek(0)
    }

    #[inline]
    pub(crate) fn peek(&self, offset: usize) -> SyntaxKind {
        self.tokens
            .get(self.current + offset)
            .map_or(SyntaxKind::EndOfFileToken, |token| token.kind)
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.tokens
            .get(self.current)
            .map_or(self.source_text.len() as u32, Token::pos)
    }

    pub(crate) fn token_text(&self) -> &str {
        self.tokens
            .get(self.current)
            .and_then(|token| {
                self.source_text
                    .get(token.pos() as usize..token.end() as usize)
            })
            .unwrap_or("")
    }

    /// Consume the current token and add it to the arena.
    /// The end-of-file token is added once; later calls return NONE.
    pub(crate) fn parse_token_node(&mut self) -> NodeIndex {
        let Some(&token) = self.tokens.get(self.current) else {
            return NodeIndex::NONE;
        };
        let text = match token.kind {
            SyntaxKind::Identifier => self
                .source_text
                .get(token.pos() as usize..token.end() as usize),
            _ => None,
        };
        let index = self.arena.add_token(token.kind, token.pos(), token.end(), text);
        self.current += 1;
        if token.kind != SyntaxKind::EndOfFileToken {
            self.last_token_end = token.end();
        }
        index
    }

    /// Consume a token of `kind`, or record a diagnostic and return NONE.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> NodeIndex {
        if self.is_token(kind) {
            self.parse_token_node()
        } else {
            self.parse_error_at_current_token(&format!("expected {kind:?}"));
            NodeIndex::NONE
        }
    }

    /// Consume a token of `kind` if it is current.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> Option<NodeIndex> {
        if self.is_token(kind) {
            Some(self.parse_token_node())
        } else {
            None
        }
    }

    /// Consume an unexpected token. It stays in the tree as a child of
    /// whatever node is being built, so token order is preserved.
    pub(crate) fn skip_token(&mut self, message: &str) {
        trace!(kind = ?self.token(), pos = self.token_pos(), "skipping token");
        self.parse_error_at_current_token(message);
        if !self.is_token(SyntaxKind::EndOfFileToken) {
            self.parse_token_node();
        }
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str) {
        let span = self
            .tokens
            .get(self.current)
            .map_or_else(|| Span::new(self.token_pos(), self.token_pos()), |token| token.span);
        // One diagnostic per position is enough while recovering.
        if self
            .diagnostics
            .last()
            .is_some_and(|last| last.span.start == span.start)
        {
            return;
        }
        debug!(pos = span.start, message, "parse error");
        self.diagnostics.push(ParseDiagnostic {
            span,
            message: message.to_string(),
        });
    }

    // =========================================================================
    // Node construction
    // =========================================================================

    pub(crate) fn start_node(&self) -> NodeStart {
        NodeStart {
            first_child: self.arena.len() as u32,
            pos: self.token_pos(),
        }
    }

    /// Create a node spanning from `start` to the last consumed token and
    /// attach every parentless node created since `start` to it.
    pub(crate) fn finish_node(
        &mut self,
        start: NodeStart,
        create: impl FnOnce(&mut NodeArena, u32, u32) -> NodeIndex,
    ) -> NodeIndex {
        let end = self.last_token_end.max(start.pos);
        let index = create(&mut self.arena, start.pos, end);
        self.arena.adopt_children(start.first_child, index);
        index
    }

    /// Guard against pathological nesting. Returns false when too deep.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.depth >= MAX_PARSE_DEPTH {
            self.parse_error_at_current_token("maximum nesting depth exceeded");
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
#[path = "../../tests/parser_tests.rs"]
mod parser_tests;
