//! NodeArena creation methods (add_* methods).
//!
//! Nodes are created bottom-up: children (tokens included) are always pushed
//! before their parent, so a parent's children are exactly the parentless
//! nodes created since the parent started. `adopt_children` relies on that.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;
use sharp_common::limits::MAX_NODE_PREALLOC;
use sharp_scanner::SyntaxKind;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for roughly `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena.tokens = Vec::with_capacity(safe_capacity / 2);
        arena.identifiers = Vec::with_capacity(safe_capacity / 4);
        arena
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn next_index(&self) -> NodeIndex {
        NodeIndex(self.nodes.len() as u32)
    }

    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.next_index();
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        index
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    /// Make `parent` the parent of every parentless node in `first_child..parent`.
    pub fn adopt_children(&mut self, first_child: u32, parent: NodeIndex) {
        let end = parent.0.min(self.extended_info.len() as u32);
        for child in first_child..end {
            let info = &mut self.extended_info[child as usize];
            if info.parent.is_none() {
                info.parent = parent;
            }
        }
    }

    fn set_modifier_flags(&mut self, index: NodeIndex, modifiers: &Option<NodeList>) {
        let flags = self.compute_modifier_flags(modifiers);
        if let Some(info) = self.extended_info.get_mut(index.0 as usize) {
            info.modifier_flags = flags;
        }
    }

    fn compute_modifier_flags(&self, modifiers: &Option<NodeList>) -> ModifierFlags {
        let mut flags = ModifierFlags::empty();
        if let Some(mods) = modifiers {
            for &mod_idx in &mods.nodes {
                if let Some(kind) = self.get(mod_idx).and_then(Node::token_kind) {
                    flags |= ModifierFlags::from_keyword(kind);
                }
            }
        }
        flags
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a token node. Identifier tokens keep their text.
    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32, text: Option<&str>) -> NodeIndex {
        let node = match (kind, text) {
            (SyntaxKind::Identifier, Some(text)) => {
                let data_index = self.identifiers.len() as u32;
                self.identifiers.push(IdentifierData {
                    escaped_text: text.trim_start_matches('@').to_string(),
                });
                Node::with_data(kind as u16, pos, end, data_index)
            }
            _ => Node::new(kind as u16, pos, end),
        };
        let index = self.push_node(node);
        self.tokens.push(index);
        index
    }

    /// Add a node without typed data (statements and expressions that are
    /// only navigated through parent links).
    pub fn add_node(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    /// Add a list-shaped node (compilation unit, block, parameter/argument/attribute list, base list).
    pub fn add_list_node(&mut self, kind: u16, pos: u32, end: u32, list: NodeList) -> NodeIndex {
        let data_index = self.lists.len() as u32;
        self.lists.push(list);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_namespace(&mut self, pos: u32, end: u32, data: NamespaceData) -> NodeIndex {
        let data_index = self.namespaces.len() as u32;
        self.namespaces.push(data);
        self.push_node(Node::with_data(NAMESPACE_DECLARATION, pos, end, data_index))
    }

    pub fn add_type_declaration(&mut self, kind: u16, pos: u32, end: u32, data: TypeDeclData) -> NodeIndex {
        let data_index = self.type_decls.len() as u32;
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_modifier_flags(index, &data.modifiers);
        self.type_decls.push(data);
        index
    }

    pub fn add_method(&mut self, pos: u32, end: u32, data: MethodDeclData) -> NodeIndex {
        let data_index = self.methods.len() as u32;
        let index = self.push_node(Node::with_data(METHOD_DECLARATION, pos, end, data_index));
        self.set_modifier_flags(index, &data.modifiers);
        self.methods.push(data);
        index
    }

    pub fn add_constructor(&mut self, pos: u32, end: u32, data: ConstructorData) -> NodeIndex {
        let data_index = self.constructors.len() as u32;
        let index = self.push_node(Node::with_data(CONSTRUCTOR_DECLARATION, pos, end, data_index));
        self.set_modifier_flags(index, &data.modifiers);
        self.constructors.push(data);
        index
    }

    pub fn add_constructor_initializer(
        &mut self,
        pos: u32,
        end: u32,
        data: ConstructorInitializerData,
    ) -> NodeIndex {
        let data_index = self.constructor_initializers.len() as u32;
        self.constructor_initializers.push(data);
        self.push_node(Node::with_data(CONSTRUCTOR_INITIALIZER, pos, end, data_index))
    }

    /// Field declaration, local declaration statement or incomplete member.
    pub fn add_variable(&mut self, kind: u16, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        let data_index = self.variables.len() as u32;
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_modifier_flags(index, &data.modifiers);
        self.variables.push(data);
        index
    }

    pub fn add_declarator(&mut self, pos: u32, end: u32, data: VariableDeclaratorData) -> NodeIndex {
        let data_index = self.declarators.len() as u32;
        self.declarators.push(data);
        self.push_node(Node::with_data(VARIABLE_DECLARATOR, pos, end, data_index))
    }

    pub fn add_property(&mut self, pos: u32, end: u32, data: PropertyDeclData) -> NodeIndex {
        let data_index = self.properties.len() as u32;
        let index = self.push_node(Node::with_data(PROPERTY_DECLARATION, pos, end, data_index));
        self.set_modifier_flags(index, &data.modifiers);
        self.properties.push(data);
        index
    }

    pub fn add_accessor(&mut self, pos: u32, end: u32, data: AccessorData) -> NodeIndex {
        let data_index = self.accessors.len() as u32;
        let index = self.push_node(Node::with_data(ACCESSOR_DECLARATION, pos, end, data_index));
        self.set_modifier_flags(index, &data.modifiers);
        self.accessors.push(data);
        index
    }

    pub fn add_parameter(&mut self, pos: u32, end: u32, data: ParameterData) -> NodeIndex {
        let data_index = self.parameters.len() as u32;
        let index = self.push_node(Node::with_data(PARAMETER, pos, end, data_index));
        self.set_modifier_flags(index, &data.modifiers);
        self.parameters.push(data);
        index
    }

    pub fn add_type_reference(&mut self, pos: u32, end: u32, data: TypeRefData) -> NodeIndex {
        let data_index = self.type_refs.len() as u32;
        self.type_refs.push(data);
        self.push_node(Node::with_data(TYPE_REFERENCE, pos, end, data_index))
    }

    /// Binary, assignment, member-access or prefix unary expression.
    pub fn add_binary_expression(&mut self, kind: u16, pos: u32, end: u32, data: BinaryExprData) -> NodeIndex {
        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    /// Invocation, object creation or attribute.
    pub fn add_call(&mut self, kind: u16, pos: u32, end: u32, data: CallData) -> NodeIndex {
        let data_index = self.calls.len() as u32;
        self.calls.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    /// Expression/return statement, parenthesized expression or arrow clause.
    pub fn add_expr_wrapper(&mut self, kind: u16, pos: u32, end: u32, data: ExprWrapperData) -> NodeIndex {
        let data_index = self.expr_wrappers.len() as u32;
        self.expr_wrappers.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }
}
