//! Node kinds produced by the parser.
//!
//! Token kinds come from `sharp_scanner::SyntaxKind` and occupy the low
//! range; node kinds start at 200 so the two never collide in `Node::kind`.

// Declarations
pub const COMPILATION_UNIT: u16 = 200;
pub const NAMESPACE_DECLARATION: u16 = 201;
pub const CLASS_DECLARATION: u16 = 202;
pub const STRUCT_DECLARATION: u16 = 203;
pub const INTERFACE_DECLARATION: u16 = 204;
pub const BASE_LIST: u16 = 205;
pub const METHOD_DECLARATION: u16 = 206;
pub const CONSTRUCTOR_DECLARATION: u16 = 207;
pub const CONSTRUCTOR_INITIALIZER: u16 = 208;
pub const FIELD_DECLARATION: u16 = 209;
pub const PROPERTY_DECLARATION: u16 = 210;
pub const ACCESSOR_DECLARATION: u16 = 211;
pub const INCOMPLETE_MEMBER: u16 = 212;
pub const PARAMETER_LIST: u16 = 213;
pub const PARAMETER: u16 = 214;
pub const ATTRIBUTE_LIST: u16 = 215;
pub const ATTRIBUTE: u16 = 216;
pub const ARGUMENT_LIST: u16 = 217;
pub const TYPE_REFERENCE: u16 = 218;
pub const VARIABLE_DECLARATOR: u16 = 219;
pub const ARROW_EXPRESSION_CLAUSE: u16 = 220;

// Statements
pub const BLOCK: u16 = 230;
pub const LOCAL_DECLARATION_STATEMENT: u16 = 231;
pub const EXPRESSION_STATEMENT: u16 = 232;
pub const RETURN_STATEMENT: u16 = 233;
pub const IF_STATEMENT: u16 = 234;
pub const ELSE_CLAUSE: u16 = 235;
pub const WHILE_STATEMENT: u16 = 236;
pub const EMPTY_STATEMENT: u16 = 237;

// Expressions
pub const IDENTIFIER_NAME: u16 = 250;
pub const THIS_EXPRESSION: u16 = 251;
pub const BASE_EXPRESSION: u16 = 252;
pub const LITERAL_EXPRESSION: u16 = 253;
pub const OBJECT_CREATION_EXPRESSION: u16 = 254;
pub const INVOCATION_EXPRESSION: u16 = 255;
pub const MEMBER_ACCESS_EXPRESSION: u16 = 256;
pub const BINARY_EXPRESSION: u16 = 257;
pub const ASSIGNMENT_EXPRESSION: u16 = 258;
pub const PARENTHESIZED_EXPRESSION: u16 = 259;
pub const PREFIX_UNARY_EXPRESSION: u16 = 260;

/// Class, struct or interface declaration.
#[inline]
pub fn is_type_declaration(kind: u16) -> bool {
    matches!(
        kind,
        CLASS_DECLARATION | STRUCT_DECLARATION | INTERFACE_DECLARATION
    )
}

/// Members whose body or initializer can host an instance expression.
#[inline]
pub fn is_member_declaration(kind: u16) -> bool {
    matches!(
        kind,
        METHOD_DECLARATION | CONSTRUCTOR_DECLARATION | FIELD_DECLARATION | PROPERTY_DECLARATION
    )
}

#[inline]
pub fn is_statement(kind: u16) -> bool {
    matches!(
        kind,
        BLOCK
            | LOCAL_DECLARATION_STATEMENT
            | EXPRESSION_STATEMENT
            | RETURN_STATEMENT
            | IF_STATEMENT
            | WHILE_STATEMENT
            | EMPTY_STATEMENT
    )
}

/// Nodes whose children are statements.
#[inline]
pub fn is_statement_container(kind: u16) -> bool {
    matches!(kind, BLOCK | IF_STATEMENT | ELSE_CLAUSE | WHILE_STATEMENT)
}
