//! Scanner state: turns source text into a flat token stream.
//!
//! Trivia (whitespace and comments) is skipped; token positions are byte
//! offsets into the source. Unterminated string literals and block comments
//! run to the end of the file rather than failing, since completion requests
//! arrive while the user is typing.

use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use sharp_common::Span;

/// A scanned token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn pos(&self) -> u32 {
        self.span.start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.span.end
    }
}

pub struct ScannerState<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ScannerState<'a> {
    pub fn new(text: &'a str) -> ScannerState<'a> {
        ScannerState {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    /// Scan the whole text. The last token is always `EndOfFileToken`.
    pub fn scan_all(text: &str) -> Vec<Token> {
        let mut scanner = ScannerState::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.scan();
            tokens.push(token);
            if token.kind == SyntaxKind::EndOfFileToken {
                break;
            }
        }
        tokens
    }

    /// Source text covered by `token`.
    pub fn token_text(&self, token: &Token) -> &'a str {
        &self.text[token.pos() as usize..token.end() as usize]
    }

    pub fn scan(&mut self) -> Token {
        self.skip_trivia();
        let start = self.pos;
        if start >= self.bytes.len() {
            return self.token(SyntaxKind::EndOfFileToken, start);
        }

        let ch = self.bytes[start];
        self.pos += 1;
        let kind = match ch {
            b'{' => SyntaxKind::OpenBraceToken,
            b'}' => SyntaxKind::CloseBraceToken,
            b'(' => SyntaxKind::OpenParenToken,
            b')' => SyntaxKind::CloseParenToken,
            b'[' => SyntaxKind::OpenBracketToken,
            b']' => SyntaxKind::CloseBracketToken,
            b';' => SyntaxKind::SemicolonToken,
            b',' => SyntaxKind::CommaToken,
            b':' => SyntaxKind::ColonToken,
            b'.' => SyntaxKind::DotToken,
            b'?' => SyntaxKind::QuestionToken,
            b'*' => SyntaxKind::AsteriskToken,
            b'/' => SyntaxKind::SlashToken,
            b'%' => SyntaxKind::PercentToken,
            b'=' => {
                if self.eat(b'=') {
                    SyntaxKind::EqualsEqualsToken
                } else if self.eat(b'>') {
                    SyntaxKind::EqualsGreaterThanToken
                } else {
                    SyntaxKind::EqualsToken
                }
            }
            b'!' => {
                if self.eat(b'=') {
                    SyntaxKind::ExclamationEqualsToken
                } else {
                    SyntaxKind::ExclamationToken
                }
            }
            b'<' => {
                if self.eat(b'=') {
                    SyntaxKind::LessThanEqualsToken
                } else {
                    SyntaxKind::LessThanToken
                }
            }
            b'>' => {
                if self.eat(b'=') {
                    SyntaxKind::GreaterThanEqualsToken
                } else {
                    SyntaxKind::GreaterThanToken
                }
            }
            b'+' => {
                if self.eat(b'=') {
                    SyntaxKind::PlusEqualsToken
                } else {
                    SyntaxKind::PlusToken
                }
            }
            b'-' => {
                if self.eat(b'=') {
                    SyntaxKind::MinusEqualsToken
                } else {
                    SyntaxKind::MinusToken
                }
            }
            b'&' if self.eat(b'&') => SyntaxKind::AmpersandAmpersandToken,
            b'|' if self.eat(b'|') => SyntaxKind::BarBarToken,
            b'"' => {
                self.scan_string_body();
                SyntaxKind::StringLiteral
            }
            b'0'..=b'9' => {
                while self.pos < self.bytes.len()
                    && (self.bytes[self.pos].is_ascii_alphanumeric() || self.bytes[self.pos] == b'.')
                {
                    self.pos += 1;
                }
                SyntaxKind::NumericLiteral
            }
            c if is_identifier_start(c) => {
                while self.pos < self.bytes.len() && is_identifier_part(self.bytes[self.pos]) {
                    self.pos += 1;
                }
                let word = &self.text[start..self.pos];
                text_to_keyword(word).unwrap_or(SyntaxKind::Identifier)
            }
            _ => {
                // Skip the rest of a multi-byte character so spans stay on char boundaries.
                while self.pos < self.bytes.len() && !self.text.is_char_boundary(self.pos) {
                    self.pos += 1;
                }
                SyntaxKind::Unknown
            }
        };
        self.token(kind, start)
    }

    fn token(&self, kind: SyntaxKind, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
        }
    }

    #[inline]
    fn eat(&mut self, expected: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn scan_string_body(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'"' => {
                    self.pos += 1;
                    return;
                }
                b'\n' => return,
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
    }

    fn skip_trivia(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                    while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'*') => {
                    self.pos += 2;
                    while self.pos < self.bytes.len()
                        && !(self.bytes[self.pos] == b'*'
                            && self.bytes.get(self.pos + 1) == Some(&b'/'))
                    {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 2).min(self.bytes.len());
                }
                _ => return,
            }
        }
    }
}

#[inline]
fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'@'
}

#[inline]
fn is_identifier_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
