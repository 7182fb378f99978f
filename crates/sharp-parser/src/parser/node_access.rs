//! NodeArena access methods: typed data lookup, parent walks and token queries.
//!
//! Every accessor returns `None`/`NodeIndex::NONE` for absent or mismatched
//! nodes instead of panicking. Trees under active editing are routinely
//! missing pieces, and callers treat "not found" as an ordinary answer.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;
use sharp_common::limits::MAX_ANCESTOR_WALK;
use sharp_scanner::SyntaxKind;

impl NodeArena {
    /// Get a thin node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|node| node.kind)
    }

    /// Token kind of `index`, `None` if it is absent or not a token.
    #[inline]
    pub fn token_kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).and_then(Node::token_kind)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// True if the parent of `index` has the given kind.
    #[inline]
    pub fn is_parent_kind(&self, index: NodeIndex, kind: u16) -> bool {
        self.kind_of(self.parent(index)) == Some(kind)
    }

    /// Strict ancestors of `index`, innermost first.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            current: index,
            remaining: MAX_ANCESTOR_WALK,
        }
    }

    /// Nearest strict ancestor whose kind satisfies `predicate`.
    pub fn get_ancestor(&self, index: NodeIndex, predicate: impl Fn(u16) -> bool) -> NodeIndex {
        self.ancestors(index)
            .find(|&ancestor| self.kind_of(ancestor).is_some_and(&predicate))
            .unwrap_or(NodeIndex::NONE)
    }

    // ============================================================================
    // Modifiers
    // ============================================================================

    /// Modifier flags precomputed for declarations and parameters.
    #[inline]
    pub fn modifier_flags(&self, index: NodeIndex) -> ModifierFlags {
        self.get_extended(index)
            .map_or(ModifierFlags::empty(), |info| info.modifier_flags)
    }

    #[inline]
    pub fn has_static_modifier(&self, index: NodeIndex) -> bool {
        self.modifier_flags(index).contains(ModifierFlags::STATIC)
    }

    /// Check if a modifier list contains a specific keyword
    pub fn has_modifier(&self, modifiers: &Option<NodeList>, kind: SyntaxKind) -> bool {
        if let Some(mods) = modifiers {
            for &mod_idx in &mods.nodes {
                if self.token_kind(mod_idx) == Some(kind) {
                    return true;
                }
            }
        }
        false
    }

    // ============================================================================
    // Typed data
    // ============================================================================

    /// Get identifier text for an identifier token.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        if node.kind != SyntaxKind::Identifier as u16 || !node.has_data() {
            return None;
        }
        self.identifiers
            .get(node.data_index as usize)
            .map(|data| data.escaped_text.as_str())
    }

    /// Child list of a list-shaped node.
    pub fn get_list(&self, index: NodeIndex) -> Option<&NodeList> {
        let node = self.get(index)?;
        match node.kind {
            COMPILATION_UNIT | BLOCK | PARAMETER_LIST | ARGUMENT_LIST | ATTRIBUTE_LIST
            | BASE_LIST
                if node.has_data() =>
            {
                self.lists.get(node.data_index as usize)
            }
            _ => None,
        }
    }

    pub fn get_namespace(&self, index: NodeIndex) -> Option<&NamespaceData> {
        let node = self.get(index)?;
        if node.kind == NAMESPACE_DECLARATION && node.has_data() {
            self.namespaces.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_type_decl(&self, index: NodeIndex) -> Option<&TypeDeclData> {
        let node = self.get(index)?;
        if is_type_declaration(node.kind) && node.has_data() {
            self.type_decls.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_method(&self, index: NodeIndex) -> Option<&MethodDeclData> {
        let node = self.get(index)?;
        if node.kind == METHOD_DECLARATION && node.has_data() {
            self.methods.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_constructor(&self, index: NodeIndex) -> Option<&ConstructorData> {
        let node = self.get(index)?;
        if node.kind == CONSTRUCTOR_DECLARATION && node.has_data() {
            self.constructors.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_constructor_initializer(&self, index: NodeIndex) -> Option<&ConstructorInitializerData> {
        let node = self.get(index)?;
        if node.kind == CONSTRUCTOR_INITIALIZER && node.has_data() {
            self.constructor_initializers.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Field declaration, local declaration statement or incomplete member.
    pub fn get_variable(&self, index: NodeIndex) -> Option<&VariableData> {
        let node = self.get(index)?;
        match node.kind {
            FIELD_DECLARATION | LOCAL_DECLARATION_STATEMENT | INCOMPLETE_MEMBER if node.has_data() => {
                self.variables.get(node.data_index as usize)
            }
            _ => None,
        }
    }

    pub fn get_declarator(&self, index: NodeIndex) -> Option<&VariableDeclaratorData> {
        let node = self.get(index)?;
        if node.kind == VARIABLE_DECLARATOR && node.has_data() {
            self.declarators.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_property(&self, index: NodeIndex) -> Option<&PropertyDeclData> {
        let node = self.get(index)?;
        if node.kind == PROPERTY_DECLARATION && node.has_data() {
            self.properties.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_accessor(&self, index: NodeIndex) -> Option<&AccessorData> {
        let node = self.get(index)?;
        if node.kind == ACCESSOR_DECLARATION && node.has_data() {
            self.accessors.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_parameter(&self, index: NodeIndex) -> Option<&ParameterData> {
        let node = self.get(index)?;
        if node.kind == PARAMETER && node.has_data() {
            self.parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_type_ref(&self, index: NodeIndex) -> Option<&TypeRefData> {
        let node = self.get(index)?;
        if node.kind == TYPE_REFERENCE && node.has_data() {
            self.type_refs.get(node.data_index as usize)
        } else {
            None
        }
    }

    pub fn get_binary_expr(&self, index: NodeIndex) -> Option<&BinaryExprData> {
        let node = self.get(index)?;
        match node.kind {
            BINARY_EXPRESSION
            | ASSIGNMENT_EXPRESSION
            | MEMBER_ACCESS_EXPRESSION
            | PREFIX_UNARY_EXPRESSION
                if node.has_data() =>
            {
                self.binary_exprs.get(node.data_index as usize)
            }
            _ => None,
        }
    }

    pub fn get_call(&self, index: NodeIndex) -> Option<&CallData> {
        let node = self.get(index)?;
        match node.kind {
            INVOCATION_EXPRESSION | OBJECT_CREATION_EXPRESSION | ATTRIBUTE if node.has_data() => {
                self.calls.get(node.data_index as usize)
            }
            _ => None,
        }
    }

    pub fn get_expr_wrapper(&self, index: NodeIndex) -> Option<&ExprWrapperData> {
        let node = self.get(index)?;
        match node.kind {
            EXPRESSION_STATEMENT | RETURN_STATEMENT | PARENTHESIZED_EXPRESSION
            | ARROW_EXPRESSION_CLAUSE
                if node.has_data() =>
            {
                self.expr_wrappers.get(node.data_index as usize)
            }
            _ => None,
        }
    }

    /// Declared name of a type, method, constructor or property declaration.
    pub fn declaration_name(&self, index: NodeIndex) -> Option<&str> {
        let name = match self.kind_of(index)? {
            kind if is_type_declaration(kind) => self.get_type_decl(index)?.name,
            METHOD_DECLARATION => self.get_method(index)?.name,
            CONSTRUCTOR_DECLARATION => self.get_constructor(index)?.name,
            PROPERTY_DECLARATION => self.get_property(index)?.name,
            NAMESPACE_DECLARATION => self.get_namespace(index)?.name,
            _ => return None,
        };
        self.identifier_text(name)
    }

    // ============================================================================
    // Token queries
    // ============================================================================

    /// Last token starting strictly before `position`.
    pub fn token_before(&self, position: u32) -> NodeIndex {
        let count = self
            .tokens
            .partition_point(|&token| self.get(token).is_some_and(|node| node.pos < position));
        match count {
            0 => NodeIndex::NONE,
            n => self.tokens[n - 1],
        }
    }

    /// Token preceding `token` in source order.
    pub fn previous_token(&self, token: NodeIndex) -> NodeIndex {
        match self.get(token) {
            Some(node) if node.is_token() => self.token_before(node.pos),
            _ => NodeIndex::NONE,
        }
    }

    /// Number of tokens in the file, end-of-file token included.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Iterator over the strict ancestors of a node.
///
/// Bounded by `MAX_ANCESTOR_WALK` so a corrupted parent chain cannot loop forever.
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    current: NodeIndex,
    remaining: u32,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if self.remaining == 0 {
            return None;
        }
        let parent = self.arena.parent(self.current);
        if parent.is_none() {
            return None;
        }
        self.remaining -= 1;
        self.current = parent;
        Some(parent)
    }
}
