//! C# subset scanner/tokenizer for the sharp completion engine.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer over a source string
//! - `text_to_keyword` - Reserved word lookup

pub mod scanner;
pub use scanner::{ScannerState, Token};

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, text_to_keyword};
