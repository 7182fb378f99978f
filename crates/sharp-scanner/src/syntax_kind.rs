//! Token kinds produced by the scanner.
//!
//! Node kinds (declarations, statements, expressions) live in the parser's
//! `syntax_kind_ext` module and start after `SyntaxKind::LAST_TOKEN`.

use serde::{Deserialize, Serialize};

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    SemicolonToken,
    CommaToken,
    ColonToken,
    DotToken,
    QuestionToken,
    EqualsToken,
    EqualsEqualsToken,
    EqualsGreaterThanToken,
    ExclamationToken,
    ExclamationEqualsToken,
    LessThanToken,
    LessThanEqualsToken,
    GreaterThanToken,
    GreaterThanEqualsToken,
    PlusToken,
    PlusEqualsToken,
    MinusToken,
    MinusEqualsToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandAmpersandToken,
    BarBarToken,

    // Literals
    Identifier,
    NumericLiteral,
    StringLiteral,

    // Modifiers
    AbstractKeyword,
    InternalKeyword,
    OverrideKeyword,
    PartialKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    SealedKeyword,
    StaticKeyword,
    VirtualKeyword,

    // Parameter modifiers
    InKeyword,
    OutKeyword,
    ParamsKeyword,
    RefKeyword,

    // Declarations
    ClassKeyword,
    InterfaceKeyword,
    NamespaceKeyword,
    StructKeyword,

    // Predefined types
    BoolKeyword,
    DoubleKeyword,
    IntKeyword,
    ObjectKeyword,
    StringKeyword,
    VoidKeyword,

    // Statements and expressions
    BaseKeyword,
    ElseKeyword,
    FalseKeyword,
    GetKeyword,
    IfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SetKeyword,
    ThisKeyword,
    TrueKeyword,
    WhileKeyword,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::AbstractKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::WhileKeyword;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::WhileKeyword;

    /// Convert a raw node kind back to a token kind.
    ///
    /// Returns `None` for node kinds (values above `LAST_TOKEN`).
    pub fn try_from_u16(value: u16) -> Option<SyntaxKind> {
        ALL_TOKENS.get(value as usize).copied()
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    /// Identifiers and keywords. A word touching the caret may be a partially
    /// typed completion rather than a finished token.
    #[inline]
    pub fn is_word(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::InternalKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::PartialKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::SealedKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::VirtualKeyword
        )
    }

    pub fn is_parameter_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::ThisKeyword
                | SyntaxKind::RefKeyword
                | SyntaxKind::OutKeyword
                | SyntaxKind::InKeyword
                | SyntaxKind::ParamsKeyword
        )
    }

    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::BoolKeyword
                | SyntaxKind::DoubleKeyword
                | SyntaxKind::IntKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken | SyntaxKind::PlusEqualsToken | SyntaxKind::MinusEqualsToken
        )
    }

    /// Binding power of a binary operator, `None` if the token is not one.
    /// Higher binds tighter.
    pub fn binary_precedence(self) -> Option<u8> {
        match self {
            SyntaxKind::BarBarToken => Some(1),
            SyntaxKind::AmpersandAmpersandToken => Some(2),
            SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => Some(3),
            SyntaxKind::LessThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken => Some(4),
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => Some(5),
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
                Some(6)
            }
            _ => None,
        }
    }
}

const ALL_TOKENS: [SyntaxKind; SyntaxKind::LAST_TOKEN as usize + 1] = [
    SyntaxKind::Unknown,
    SyntaxKind::EndOfFileToken,
    SyntaxKind::OpenBraceToken,
    SyntaxKind::CloseBraceToken,
    SyntaxKind::OpenParenToken,
    SyntaxKind::CloseParenToken,
    SyntaxKind::OpenBracketToken,
    SyntaxKind::CloseBracketToken,
    SyntaxKind::SemicolonToken,
    SyntaxKind::CommaToken,
    SyntaxKind::ColonToken,
    SyntaxKind::DotToken,
    SyntaxKind::QuestionToken,
    SyntaxKind::EqualsToken,
    SyntaxKind::EqualsEqualsToken,
    SyntaxKind::EqualsGreaterThanToken,
    SyntaxKind::ExclamationToken,
    SyntaxKind::ExclamationEqualsToken,
    SyntaxKind::LessThanToken,
    SyntaxKind::LessThanEqualsToken,
    SyntaxKind::GreaterThanToken,
    SyntaxKind::GreaterThanEqualsToken,
    SyntaxKind::PlusToken,
    SyntaxKind::PlusEqualsToken,
    SyntaxKind::MinusToken,
    SyntaxKind::MinusEqualsToken,
    SyntaxKind::AsteriskToken,
    SyntaxKind::SlashToken,
    SyntaxKind::PercentToken,
    SyntaxKind::AmpersandAmpersandToken,
    SyntaxKind::BarBarToken,
    SyntaxKind::Identifier,
    SyntaxKind::NumericLiteral,
    SyntaxKind::StringLiteral,
    SyntaxKind::AbstractKeyword,
    SyntaxKind::InternalKeyword,
    SyntaxKind::OverrideKeyword,
    SyntaxKind::PartialKeyword,
    SyntaxKind::PrivateKeyword,
    SyntaxKind::ProtectedKeyword,
    SyntaxKind::PublicKeyword,
    SyntaxKind::ReadonlyKeyword,
    SyntaxKind::SealedKeyword,
    SyntaxKind::StaticKeyword,
    SyntaxKind::VirtualKeyword,
    SyntaxKind::InKeyword,
    SyntaxKind::OutKeyword,
    SyntaxKind::ParamsKeyword,
    SyntaxKind::RefKeyword,
    SyntaxKind::ClassKeyword,
    SyntaxKind::InterfaceKeyword,
    SyntaxKind::NamespaceKeyword,
    SyntaxKind::StructKeyword,
    SyntaxKind::BoolKeyword,
    SyntaxKind::DoubleKeyword,
    SyntaxKind::IntKeyword,
    SyntaxKind::ObjectKeyword,
    SyntaxKind::StringKeyword,
    SyntaxKind::VoidKeyword,
    SyntaxKind::BaseKeyword,
    SyntaxKind::ElseKeyword,
    SyntaxKind::FalseKeyword,
    SyntaxKind::GetKeyword,
    SyntaxKind::IfKeyword,
    SyntaxKind::NewKeyword,
    SyntaxKind::NullKeyword,
    SyntaxKind::ReturnKeyword,
    SyntaxKind::SetKeyword,
    SyntaxKind::ThisKeyword,
    SyntaxKind::TrueKeyword,
    SyntaxKind::WhileKeyword,
];

/// Look up a reserved word. `get`/`set` and `partial` are contextual in C#;
/// the scanner treats them as keywords and the parser reinterprets them as
/// identifiers where a name is expected.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "abstract" => SyntaxKind::AbstractKeyword,
        "internal" => SyntaxKind::InternalKeyword,
        "override" => SyntaxKind::OverrideKeyword,
        "partial" => SyntaxKind::PartialKeyword,
        "private" => SyntaxKind::PrivateKeyword,
        "protected" => SyntaxKind::ProtectedKeyword,
        "public" => SyntaxKind::PublicKeyword,
        "readonly" => SyntaxKind::ReadonlyKeyword,
        "sealed" => SyntaxKind::SealedKeyword,
        "static" => SyntaxKind::StaticKeyword,
        "virtual" => SyntaxKind::VirtualKeyword,
        "in" => SyntaxKind::InKeyword,
        "out" => SyntaxKind::OutKeyword,
        "params" => SyntaxKind::ParamsKeyword,
        "ref" => SyntaxKind::RefKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "namespace" => SyntaxKind::NamespaceKeyword,
        "struct" => SyntaxKind::StructKeyword,
        "bool" => SyntaxKind::BoolKeyword,
        "double" => SyntaxKind::DoubleKeyword,
        "int" => SyntaxKind::IntKeyword,
        "object" => SyntaxKind::ObjectKeyword,
        "string" => SyntaxKind::StringKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "base" => SyntaxKind::BaseKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "get" => SyntaxKind::GetKeyword,
        "if" => SyntaxKind::IfKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "set" => SyntaxKind::SetKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "while" => SyntaxKind::WhileKeyword,
        _ => return None,
    };
    Some(kind)
}
