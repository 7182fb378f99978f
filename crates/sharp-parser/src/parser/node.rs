//! Thin node headers and typed data pools.
//!
//! # Architecture
//!
//! 1. `Node` - A 16-byte header containing kind, position and a data index
//! 2. Typed storage pools - Separate `Vec<T>` for each node category
//! 3. `ExtendedNodeInfo` - Parent link and precomputed modifier flags
//!
//! Tokens are nodes too, so every token has a parent. Completion code
//! anchors its ancestor walks on the tokens next to the caret.

use super::base::{NodeIndex, NodeList};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use sharp_scanner::SyntaxKind;

/// A thin 16-byte node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// `SyntaxKind` value for tokens, `syntax_kind_ext` value for nodes
    pub kind: u16,
    /// Unused; keeps the header at 16 bytes
    pub flags: u16,
    /// Start position in source (byte offset)
    pub pos: u32,
    /// End position in source (byte offset)
    pub end: u32,
    /// Index into the type-specific storage pool (u32::MAX = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn is_token(&self) -> bool {
        self.kind <= SyntaxKind::LAST_TOKEN as u16
    }

    /// Token kind, `None` for non-token nodes.
    #[inline]
    pub fn token_kind(&self) -> Option<SyntaxKind> {
        SyntaxKind::try_from_u16(self.kind)
    }
}

bitflags! {
    /// Declaration and parameter modifiers, precomputed from the modifier list.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const INTERNAL = 1 << 3;
        const STATIC = 1 << 4;
        const ABSTRACT = 1 << 5;
        const SEALED = 1 << 6;
        const VIRTUAL = 1 << 7;
        const OVERRIDE = 1 << 8;
        const READONLY = 1 << 9;
        const PARTIAL = 1 << 10;
        // Parameter modifiers
        const THIS = 1 << 16;
        const REF = 1 << 17;
        const OUT = 1 << 18;
        const IN = 1 << 19;
        const PARAMS = 1 << 20;
    }
}

impl ModifierFlags {
    pub fn from_keyword(kind: SyntaxKind) -> ModifierFlags {
        match kind {
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::InternalKeyword => ModifierFlags::INTERNAL,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::SealedKeyword => ModifierFlags::SEALED,
            SyntaxKind::VirtualKeyword => ModifierFlags::VIRTUAL,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::PartialKeyword => ModifierFlags::PARTIAL,
            SyntaxKind::ThisKeyword => ModifierFlags::THIS,
            SyntaxKind::RefKeyword => ModifierFlags::REF,
            SyntaxKind::OutKeyword => ModifierFlags::OUT,
            SyntaxKind::InKeyword => ModifierFlags::IN,
            SyntaxKind::ParamsKeyword => ModifierFlags::PARAMS,
            _ => ModifierFlags::empty(),
        }
    }
}

/// Per-node information not stored in the header.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
    pub modifier_flags: ModifierFlags,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
            modifier_flags: ModifierFlags::empty(),
        }
    }
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Data for identifier tokens
#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data for namespace declarations
#[derive(Clone, Debug)]
pub struct NamespaceData {
    pub name: NodeIndex,
    pub members: NodeList,
}

/// Data for class, struct and interface declarations
#[derive(Clone, Debug)]
pub struct TypeDeclData {
    pub attributes: Option<NodeList>,
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub base_list: NodeIndex,
    pub members: NodeList,
}

/// Data for method declarations
#[derive(Clone, Debug)]
pub struct MethodDeclData {
    pub attributes: Option<NodeList>,
    pub modifiers: Option<NodeList>,
    pub return_type: NodeIndex,
    pub name: NodeIndex,
    pub parameters: NodeIndex,
    /// Block, arrow expression clause, or NONE for `;`-terminated methods
    pub body: NodeIndex,
}

/// Data for constructor declarations
#[derive(Clone, Debug)]
pub struct ConstructorData {
    pub attributes: Option<NodeList>,
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub parameters: NodeIndex,
    pub initializer: NodeIndex,
    pub body: NodeIndex,
}

/// Data for `: base(...)` / `: this(...)` clauses
#[derive(Clone, Debug)]
pub struct ConstructorInitializerData {
    pub colon_token: NodeIndex,
    /// `base` or `this` keyword token, NONE while still being typed
    pub keyword: NodeIndex,
    pub arguments: NodeIndex,
}

/// Data for field declarations, local declarations and incomplete members
#[derive(Clone, Debug)]
pub struct VariableData {
    pub attributes: Option<NodeList>,
    pub modifiers: Option<NodeList>,
    pub type_annotation: NodeIndex,
    pub declarators: NodeList,
}

/// Data for a single `name = initializer` declarator
#[derive(Clone, Debug)]
pub struct VariableDeclaratorData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for property declarations
#[derive(Clone, Debug)]
pub struct PropertyDeclData {
    pub attributes: Option<NodeList>,
    pub modifiers: Option<NodeList>,
    pub type_annotation: NodeIndex,
    pub name: NodeIndex,
    pub accessors: NodeList,
    pub expression_body: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for `get`/`set` accessors
#[derive(Clone, Debug)]
pub struct AccessorData {
    pub modifiers: Option<NodeList>,
    pub keyword: NodeIndex,
    pub body: NodeIndex,
}

/// Data for parameter declarations
#[derive(Clone, Debug)]
pub struct ParameterData {
    pub attributes: Option<NodeList>,
    pub modifiers: Option<NodeList>,
    pub type_annotation: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for type references (`int`, `Widget`, `Ns.Widget[]`)
#[derive(Clone, Debug)]
pub struct TypeRefData {
    /// Predefined type keyword or the rightmost identifier token
    pub name: NodeIndex,
    pub is_array: bool,
}

/// Data for binary, assignment, member-access and prefix unary expressions
#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: NodeIndex,
    pub right: NodeIndex,
}

/// Data for invocations, object creations and attributes
#[derive(Clone, Debug)]
pub struct CallData {
    pub expression: NodeIndex,
    pub arguments: NodeIndex,
}

/// Data for nodes wrapping a single expression
/// (expression/return statements, parenthesized expressions, arrow clauses)
#[derive(Clone, Debug)]
pub struct ExprWrapperData {
    pub expression: NodeIndex,
}

/// Arena holding every node of one parsed file.
#[derive(Clone, Debug)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    /// Token nodes in source order
    pub tokens: Vec<NodeIndex>,
    pub identifiers: Vec<IdentifierData>,
    pub namespaces: Vec<NamespaceData>,
    pub type_decls: Vec<TypeDeclData>,
    pub methods: Vec<MethodDeclData>,
    pub constructors: Vec<ConstructorData>,
    pub constructor_initializers: Vec<ConstructorInitializerData>,
    pub variables: Vec<VariableData>,
    pub declarators: Vec<VariableDeclaratorData>,
    pub properties: Vec<PropertyDeclData>,
    pub accessors: Vec<AccessorData>,
    pub parameters: Vec<ParameterData>,
    pub type_refs: Vec<TypeRefData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub calls: Vec<CallData>,
    pub expr_wrappers: Vec<ExprWrapperData>,
    /// Child lists for list-shaped nodes (blocks, parameter/argument/attribute lists)
    pub lists: Vec<NodeList>,
    pub root: NodeIndex,
}

impl Default for NodeArena {
    fn default() -> Self {
        NodeArena {
            nodes: Vec::new(),
            extended_info: Vec::new(),
            tokens: Vec::new(),
            identifiers: Vec::new(),
            namespaces: Vec::new(),
            type_decls: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            constructor_initializers: Vec::new(),
            variables: Vec::new(),
            declarators: Vec::new(),
            properties: Vec::new(),
            accessors: Vec::new(),
            parameters: Vec::new(),
            type_refs: Vec::new(),
            binary_exprs: Vec::new(),
            calls: Vec::new(),
            expr_wrappers: Vec::new(),
            lists: Vec::new(),
            root: NodeIndex::NONE,
        }
    }
}
