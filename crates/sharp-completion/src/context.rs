//! The syntax context shared by every recommender in a request.
//!
//! Built once per caret position from the tree and the semantic model, then
//! only read. Recommenders receive `&SyntaxContext` and may run on any
//! number of threads at once.

use crate::context_query::{
    containing_member, containing_type_declaration, is_expression_context, is_in_attribute,
    is_instance_context, is_statement_context, previous_token_if_touching_word,
};
use crate::error::{CompletionError, observe};
use rustc_hash::FxHashSet;
use sharp_common::CancellationToken;
use sharp_parser::syntax_kind_ext::*;
use sharp_parser::{NodeArena, NodeIndex};
use sharp_scanner::SyntaxKind;
use sharp_semantic::{SemanticModel, TypeId};
use tracing::{Level, span, trace};

pub struct SyntaxContext<'a> {
    pub tree: &'a NodeArena,
    pub semantic_model: &'a dyn SemanticModel,
    /// Caret offset in bytes
    pub position: u32,
    /// Last token starting before the caret
    pub left_token: NodeIndex,
    /// `left_token`, or the token before it when `left_token` is a word
    /// touching the caret
    pub target_token: NodeIndex,
    pub is_instance_context: bool,
    pub is_non_attribute_expression_context: bool,
    pub is_statement_context: bool,
    pub containing_type_declaration: NodeIndex,
    /// Types the expression at the caret is expected to have
    pub inferred_types: FxHashSet<TypeId>,
}

impl std::fmt::Debug for SyntaxContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxContext")
            .field("position", &self.position)
            .field("left_token", &self.left_token)
            .field("target_token", &self.target_token)
            .field("is_instance_context", &self.is_instance_context)
            .field(
                "is_non_attribute_expression_context",
                &self.is_non_attribute_expression_context,
            )
            .field("is_statement_context", &self.is_statement_context)
            .field("containing_type_declaration", &self.containing_type_declaration)
            .field("inferred_types", &self.inferred_types)
            .finish_non_exhaustive()
    }
}

impl<'a> SyntaxContext<'a> {
    /// Build the context for `position`.
    ///
    /// Cancellation during type inference leaves `inferred_types` empty; a
    /// semantic fault is returned as an error.
    pub fn build(
        tree: &'a NodeArena,
        semantic_model: &'a dyn SemanticModel,
        position: u32,
        cancel: &CancellationToken,
    ) -> Result<SyntaxContext<'a>, CompletionError> {
        let _span = span!(Level::DEBUG, "build_syntax_context", position).entered();

        let left_token = tree.token_before(position);
        let target_token = previous_token_if_touching_word(tree, left_token, position);

        let is_expression = is_expression_context(tree, target_token);
        let mut context = SyntaxContext {
            tree,
            semantic_model,
            position,
            left_token,
            target_token,
            is_instance_context: is_instance_context(tree, target_token),
            is_non_attribute_expression_context: is_expression
                && !is_in_attribute(tree, target_token),
            is_statement_context: is_statement_context(tree, target_token),
            containing_type_declaration: containing_type_declaration(tree, target_token),
            inferred_types: FxHashSet::default(),
        };
        if is_expression {
            context.inferred_types = context.infer_expected_types(cancel)?;
        }
        trace!(?context, "built syntax context");
        Ok(context)
    }

    /// Kind of the target token, if there is one.
    pub fn target_kind(&self) -> Option<SyntaxKind> {
        self.tree.token_kind(self.target_token)
    }

    fn infer_expected_types(&self, cancel: &CancellationToken) -> Result<FxHashSet<TypeId>, CompletionError> {
        let mut types = FxHashSet::default();
        let type_node = self.expected_type_node();
        if type_node.is_none() {
            return Ok(types);
        }
        let resolved = observe(self.semantic_model.resolve_type_reference(type_node, cancel))?;
        if let Some(Some(id)) = resolved
            && id != TypeId::VOID
        {
            types.insert(id);
        }
        Ok(types)
    }

    /// Type-reference node giving the type expected after the target token.
    fn expected_type_node(&self) -> NodeIndex {
        let tree = self.tree;
        let parent = tree.parent(self.target_token);
        match (self.target_kind(), tree.kind_of(parent)) {
            (Some(SyntaxKind::EqualsToken), Some(VARIABLE_DECLARATOR)) => {
                let declaration = tree.parent(parent);
                tree.get_variable(declaration)
                    .map_or(NodeIndex::NONE, |data| data.type_annotation)
            }
            (Some(SyntaxKind::EqualsToken), Some(PROPERTY_DECLARATION)) => tree
                .get_property(parent)
                .map_or(NodeIndex::NONE, |data| data.type_annotation),
            (Some(SyntaxKind::EqualsToken), Some(ASSIGNMENT_EXPRESSION)) => tree
                .get_binary_expr(parent)
                .map_or(NodeIndex::NONE, |data| self.declared_type_of_target(data.left)),
            (Some(SyntaxKind::ReturnKeyword), Some(RETURN_STATEMENT)) => {
                self.member_result_type(containing_member(tree, self.target_token))
            }
            (Some(SyntaxKind::EqualsGreaterThanToken), Some(ARROW_EXPRESSION_CLAUSE)) => {
                let owner = tree.parent(parent);
                match tree.kind_of(owner) {
                    Some(ACCESSOR_DECLARATION) => self.member_result_type(tree.parent(owner)),
                    _ => self.member_result_type(owner),
                }
            }
            _ => NodeIndex::NONE,
        }
    }

    /// Return type of a method, or the type of a property.
    fn member_result_type(&self, member: NodeIndex) -> NodeIndex {
        let tree = self.tree;
        match tree.kind_of(member) {
            Some(METHOD_DECLARATION) => tree
                .get_method(member)
                .map_or(NodeIndex::NONE, |data| data.return_type),
            Some(PROPERTY_DECLARATION) => tree
                .get_property(member)
                .map_or(NodeIndex::NONE, |data| data.type_annotation),
            _ => NodeIndex::NONE,
        }
    }

    /// Declared type of the assignment target `x` or `this.x`.
    fn declared_type_of_target(&self, target: NodeIndex) -> NodeIndex {
        let tree = self.tree;
        let name = match tree.kind_of(target) {
            Some(IDENTIFIER_NAME) => self.name_of_identifier_name(target),
            Some(MEMBER_ACCESS_EXPRESSION) => {
                let Some(access) = tree.get_binary_expr(target) else {
                    return NodeIndex::NONE;
                };
                if tree.kind_of(access.left) != Some(THIS_EXPRESSION) {
                    return NodeIndex::NONE;
                }
                let Some(name) = self.name_of_identifier_name(access.right) else {
                    return NodeIndex::NONE;
                };
                return self.member_type_by_name(name);
            }
            _ => None,
        };
        let Some(name) = name else {
            return NodeIndex::NONE;
        };
        let local = self.local_type_by_name(target, name);
        if local.is_some() {
            return local;
        }
        self.member_type_by_name(name)
    }

    fn name_of_identifier_name(&self, node: NodeIndex) -> Option<&'a str> {
        let pos = self.tree.get(node)?.pos;
        let token = self.tree.token_before(pos + 1);
        if self.tree.parent(token) != node {
            return None;
        }
        self.tree.identifier_text(token)
    }

    /// Type of a local or parameter named `name` visible from `from`.
    fn local_type_by_name(&self, from: NodeIndex, name: &str) -> NodeIndex {
        let tree = self.tree;
        let Some(from_pos) = tree.get(from).map(|node| node.pos) else {
            return NodeIndex::NONE;
        };
        for ancestor in tree.ancestors(from) {
            match tree.kind_of(ancestor) {
                Some(BLOCK) => {
                    let Some(statements) = tree.get_list(ancestor) else {
                        continue;
                    };
                    for statement in statements.iter() {
                        let before_caret = tree.get(statement).is_some_and(|node| node.pos < from_pos);
                        if !before_caret {
                            break;
                        }
                        let found = self.declared_in_variable(statement, name);
                        if found.is_some() {
                            return found;
                        }
                    }
                }
                Some(METHOD_DECLARATION | CONSTRUCTOR_DECLARATION) => {
                    let parameters = tree
                        .get_method(ancestor)
                        .map(|data| data.parameters)
                        .or_else(|| tree.get_constructor(ancestor).map(|data| data.parameters))
                        .and_then(|list| tree.get_list(list));
                    for parameter in parameters.into_iter().flat_map(|list| list.iter()) {
                        if let Some(data) = tree.get_parameter(parameter)
                            && tree.identifier_text(data.name) == Some(name)
                        {
                            return data.type_annotation;
                        }
                    }
                    return NodeIndex::NONE;
                }
                Some(kind) if is_type_declaration(kind) => return NodeIndex::NONE,
                _ => {}
            }
        }
        NodeIndex::NONE
    }

    /// Type of a field or property named `name` in the containing type.
    fn member_type_by_name(&self, name: &str) -> NodeIndex {
        let tree = self.tree;
        let Some(members) = tree
            .get_type_decl(self.containing_type_declaration)
            .map(|data| &data.members)
        else {
            return NodeIndex::NONE;
        };
        for member in members.iter() {
            match tree.kind_of(member) {
                Some(FIELD_DECLARATION) => {
                    let found = self.declared_in_variable(member, name);
                    if found.is_some() {
                        return found;
                    }
                }
                Some(PROPERTY_DECLARATION) => {
                    if let Some(data) = tree.get_property(member)
                        && tree.identifier_text(data.name) == Some(name)
                    {
                        return data.type_annotation;
                    }
                }
                _ => {}
            }
        }
        NodeIndex::NONE
    }

    /// Declared type if `declaration` (field or local) declares `name`.
    fn declared_in_variable(&self, declaration: NodeIndex, name: &str) -> NodeIndex {
        let tree = self.tree;
        let Some(data) = tree.get_variable(declaration) else {
            return NodeIndex::NONE;
        };
        let declares = data.declarators.iter().any(|declarator| {
            tree.get_declarator(declarator)
                .is_some_and(|d| tree.identifier_text(d.name) == Some(name))
        });
        if declares { data.type_annotation } else { NodeIndex::NONE }
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod context_tests;
