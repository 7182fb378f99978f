//! Declaration binder: assigns a `TypeId` to every type declared in a file.
//!
//! Type references resolve by simple name, innermost scope first: nested
//! types of the enclosing types, then namespace and file members. A name
//! with no declaration in scope falls back to the first declaration of that
//! name in the file. Qualified names are not modelled.

use crate::model::{SemanticError, SemanticModel};
use crate::types::{TypeId, TypeKind};
use rustc_hash::FxHashMap;
use sharp_common::CancellationToken;
use sharp_parser::syntax_kind_ext::*;
use sharp_parser::{NodeArena, NodeIndex};
use sharp_scanner::SyntaxKind;
use tracing::{debug, trace};

/// Cancellation is polled once per this many nodes while binding.
const CANCEL_CHECK_INTERVAL: usize = 1024;

#[derive(Clone, Debug)]
struct DeclaredType {
    name: String,
    kind: TypeKind,
    declaration: NodeIndex,
}

/// Semantic model bound to a single parsed file.
pub struct BoundModel<'a> {
    arena: &'a NodeArena,
    types: Vec<DeclaredType>,
    by_name: FxHashMap<String, TypeId>,
    by_declaration: FxHashMap<NodeIndex, TypeId>,
}

impl<'a> BoundModel<'a> {
    /// Bind every type declaration in `arena`.
    pub fn bind(arena: &'a NodeArena, cancel: &CancellationToken) -> Result<Self, SemanticError> {
        let mut model = BoundModel {
            arena,
            types: Vec::new(),
            by_name: FxHashMap::default(),
            by_declaration: FxHashMap::default(),
        };

        for (i, node) in arena.nodes.iter().enumerate() {
            if i % CANCEL_CHECK_INTERVAL == 0 {
                cancel.check()?;
            }
            let kind = match node.kind {
                CLASS_DECLARATION => TypeKind::Class,
                STRUCT_DECLARATION => TypeKind::Struct,
                INTERFACE_DECLARATION => TypeKind::Interface,
                _ => continue,
            };
            let declaration = NodeIndex(i as u32);
            let Some(name) = arena.declaration_name(declaration) else {
                continue;
            };
            let id = TypeId(TypeId::FIRST_DECLARED + model.types.len() as u32);
            model.by_name.entry(name.to_string()).or_insert(id);
            model.by_declaration.insert(declaration, id);
            model.types.push(DeclaredType {
                name: name.to_string(),
                kind,
                declaration,
            });
        }

        debug!(types = model.types.len(), "bound declarations");
        Ok(model)
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    /// Type declared by `declaration`, if it is a bound type declaration.
    pub fn declared_type(&self, declaration: NodeIndex) -> Option<TypeId> {
        self.by_declaration.get(&declaration).copied()
    }

    /// Type with the given simple name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn type_kind(&self, id: TypeId) -> Option<TypeKind> {
        if id.is_intrinsic() {
            return id.intrinsic_name().map(|_| TypeKind::Intrinsic);
        }
        self.declared(id).map(|declared| declared.kind)
    }

    /// Declaration node of a declared type.
    pub fn declaration_of(&self, id: TypeId) -> Option<NodeIndex> {
        self.declared(id).map(|declared| declared.declaration)
    }

    pub fn declared_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len()).map(|i| TypeId(TypeId::FIRST_DECLARED + i as u32))
    }

    /// Type named `name` as seen from `from`: the members of each enclosing
    /// type, namespace and the compilation unit are searched innermost
    /// first, then any type of that name.
    fn lookup_in_scope(&self, from: NodeIndex, name: &str) -> Option<TypeId> {
        let arena = self.arena;
        for scope in arena.ancestors(from) {
            let members = match arena.kind_of(scope) {
                Some(kind) if is_type_declaration(kind) => {
                    arena.get_type_decl(scope).map(|data| &data.members)
                }
                Some(NAMESPACE_DECLARATION) => arena.get_namespace(scope).map(|data| &data.members),
                Some(COMPILATION_UNIT) => arena.get_list(scope),
                _ => None,
            };
            let Some(members) = members else {
                continue;
            };
            let nested = members.iter().find(|&member| {
                arena.kind_of(member).is_some_and(is_type_declaration)
                    && arena.declaration_name(member) == Some(name)
            });
            if let Some(declaration) = nested {
                return self.declared_type(declaration);
            }
        }
        self.lookup(name)
    }

    fn declared(&self, id: TypeId) -> Option<&DeclaredType> {
        let index = id.0.checked_sub(TypeId::FIRST_DECLARED)?;
        self.types.get(index as usize)
    }
}

impl SemanticModel for BoundModel<'_> {
    fn enclosing_named_type(
        &self,
        position: u32,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError> {
        cancel.check()?;
        let token = self.arena.token_before(position);
        if token.is_none() {
            return Ok(None);
        }
        let mut declaration = self.arena.get_ancestor(token, is_type_declaration);
        // After a type's closing brace the caret is outside that type.
        if self.arena.token_kind(token) == Some(SyntaxKind::CloseBraceToken)
            && self.arena.parent(token) == declaration
        {
            declaration = self.arena.get_ancestor(declaration, is_type_declaration);
        }
        let result = self.declared_type(declaration);
        trace!(position, ?result, "enclosing named type");
        Ok(result)
    }

    fn resolve_type_reference(
        &self,
        node: NodeIndex,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError> {
        cancel.check()?;
        let Some(type_ref) = self.arena.get_type_ref(node) else {
            return Ok(None);
        };
        // Array types are not modelled.
        if type_ref.is_array {
            return Ok(None);
        }
        if let Some(intrinsic) = self
            .arena
            .token_kind(type_ref.name)
            .and_then(TypeId::from_predefined)
        {
            return Ok(Some(intrinsic));
        }
        Ok(self
            .arena
            .identifier_text(type_ref.name)
            .and_then(|name| self.lookup_in_scope(node, name)))
    }

    fn type_name(&self, id: TypeId) -> Option<&str> {
        if id.is_intrinsic() {
            return id.intrinsic_name();
        }
        self.declared(id).map(|declared| declared.name.as_str())
    }
}

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod binder_tests;
