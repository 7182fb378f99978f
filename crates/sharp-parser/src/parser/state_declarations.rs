//! Parser state - namespace, type and member declarations.

use super::base::{NodeIndex, NodeList};
use super::node::{
    AccessorData, CallData, ConstructorData, ConstructorInitializerData, MethodDeclData, NamespaceData,
    ParameterData, PropertyDeclData, TypeDeclData, TypeRefData, VariableData,
    VariableDeclaratorData,
};
use super::state::{NodeStart, ParserState};
use super::syntax_kind_ext::*;
use smallvec::SmallVec;
use sharp_scanner::SyntaxKind;

/// Attributes and modifiers shared by every declaration form.
struct DeclarationHead {
    attributes: Option<NodeList>,
    modifiers: Option<NodeList>,
}

impl DeclarationHead {
    fn is_empty(&self) -> bool {
        self.attributes.is_none() && self.modifiers.is_none()
    }
}

impl ParserState {
    // =========================================================================
    // Namespaces and types
    // =========================================================================

    /// Parse a namespace or type declaration. Returns NONE (without consuming
    /// anything) when the current token cannot start one.
    pub(crate) fn parse_namespace_member(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::NamespaceKeyword) {
            return self.parse_namespace_declaration();
        }
        let start = self.start_node();
        let head = self.parse_declaration_head();
        if self.is_type_keyword() {
            return self.parse_type_declaration(start, head);
        }
        if head.is_empty() {
            return NodeIndex::NONE;
        }
        self.parse_error_at_current_token("expected a type declaration");
        self.finish_incomplete_member(start, head, NodeIndex::NONE)
    }

    fn parse_namespace_declaration(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::NamespaceKeyword);
        let name = self.parse_qualified_name();
        let mut members = Vec::new();
        if self.parse_optional(SyntaxKind::SemicolonToken).is_none() {
            self.parse_expected(SyntaxKind::OpenBraceToken);
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = self.current;
                let member = self.parse_namespace_member();
                if member.is_some() {
                    members.push(member);
                }
                if self.current == before {
                    self.skip_token("expected a namespace or type declaration");
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }
        self.finish_node(start, |arena, pos, end| {
            arena.add_namespace(
                pos,
                end,
                NamespaceData {
                    name,
                    members: members.into(),
                },
            )
        })
    }

    fn is_type_keyword(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::ClassKeyword | SyntaxKind::StructKeyword | SyntaxKind::InterfaceKeyword
        )
    }

    fn parse_type_declaration(
        &mut self,
        start: NodeStart,
        head: DeclarationHead,
    ) -> NodeIndex {
        let kind = match self.token() {
            SyntaxKind::StructKeyword => STRUCT_DECLARATION,
            SyntaxKind::InterfaceKeyword => INTERFACE_DECLARATION,
            _ => CLASS_DECLARATION,
        };
        self.parse_token_node();
        let type_name = self.token_text().to_string();
        let name = self.parse_expected(SyntaxKind::Identifier);
        let base_list = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_base_list()
        } else {
            NodeIndex::NONE
        };

        let mut members = Vec::new();
        if self.parse_expected(SyntaxKind::OpenBraceToken).is_some() {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = self.current;
                let member = self.parse_member_declaration(name.is_some().then_some(&type_name));
                if member.is_some() {
                    members.push(member);
                }
                if self.current == before {
                    self.skip_token("expected a member declaration");
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }

        self.finish_node(start, |arena, pos, end| {
            arena.add_type_declaration(
                kind,
                pos,
                end,
                TypeDeclData {
                    attributes: head.attributes,
                    modifiers: head.modifiers,
                    name,
                    base_list,
                    members: members.into(),
                },
            )
        })
    }

    fn parse_base_list(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::ColonToken);
        let mut types = vec![self.parse_type()];
        while self.parse_optional(SyntaxKind::CommaToken).is_some() {
            types.push(self.parse_type());
        }
        types.retain(|ty| ty.is_some());
        self.finish_node(start, |arena, pos, end| {
            arena.add_list_node(BASE_LIST, pos, end, types.into())
        })
    }

    // =========================================================================
    // Attributes and modifiers
    // =========================================================================

    fn parse_declaration_head(&mut self) -> DeclarationHead {
        let attributes = self.parse_attribute_lists();
        let modifiers = self.parse_modifiers();
        DeclarationHead {
            attributes,
            modifiers,
        }
    }

    /// Parse `[A, B(x)] [C]`. Returns `None` when no attribute list is present.
    pub(crate) fn parse_attribute_lists(&mut self) -> Option<NodeList> {
        let mut lists = Vec::new();
        while self.is_token(SyntaxKind::OpenBracketToken) {
            lists.push(self.parse_attribute_list());
        }
        (!lists.is_empty()).then(|| lists.into())
    }

    fn parse_attribute_list(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut attributes = Vec::new();
        while self.is_token(SyntaxKind::Identifier) {
            attributes.push(self.parse_attribute());
            if self.parse_optional(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(start, |arena, pos, end| {
            arena.add_list_node(ATTRIBUTE_LIST, pos, end, attributes.into())
        })
    }

    fn parse_attribute(&mut self) -> NodeIndex {
        let start = self.start_node();
        let expression = self.parse_qualified_name();
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_argument_list()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(start, |arena, pos, end| {
            arena.add_call(
                ATTRIBUTE,
                pos,
                end,
                CallData {
                    expression,
                    arguments,
                },
            )
        })
    }

    pub(crate) fn parse_modifiers(&mut self) -> Option<NodeList> {
        let mut modifiers: SmallVec<[NodeIndex; 4]> = SmallVec::new();
        while self.token().is_modifier() {
            modifiers.push(self.parse_token_node());
        }
        (!modifiers.is_empty()).then(|| modifiers.into_vec().into())
    }

    fn parse_parameter_modifiers(&mut self) -> Option<NodeList> {
        let mut modifiers: SmallVec<[NodeIndex; 2]> = SmallVec::new();
        while self.token().is_parameter_modifier() {
            modifiers.push(self.parse_token_node());
        }
        (!modifiers.is_empty()).then(|| modifiers.into_vec().into())
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Parse one member of a type body. `type_name` is the containing type's
    /// name, used to recognize constructors.
    fn parse_member_declaration(&mut self, type_name: Option<&String>) -> NodeIndex {
        let start = self.start_node();
        let head = self.parse_declaration_head();

        if self.is_type_keyword() {
            return self.parse_type_declaration(start, head);
        }

        let is_constructor = self.is_token(SyntaxKind::Identifier)
            && self.peek(1) == SyntaxKind::OpenParenToken
            && type_name.is_some_and(|type_name| self.token_text() == type_name.as_str());
        if is_constructor {
            return self.parse_constructor_declaration(start, head);
        }

        if !self.can_start_type() {
            if head.is_empty() {
                return NodeIndex::NONE;
            }
            self.parse_error_at_current_token("expected a member declaration");
            return self.finish_incomplete_member(start, head, NodeIndex::NONE);
        }

        let type_annotation = self.parse_type();
        if !self.is_token(SyntaxKind::Identifier) {
            self.parse_error_at_current_token("expected a member name");
            return self.finish_incomplete_member(start, head, type_annotation);
        }

        match self.peek(1) {
            SyntaxKind::OpenParenToken => {
                self.parse_method_declaration(start, head, type_annotation)
            }
            SyntaxKind::OpenBraceToken | SyntaxKind::EqualsGreaterThanToken => {
                self.parse_property_declaration(start, head, type_annotation)
            }
            _ => self.parse_field_declaration(start, head, type_annotation),
        }
    }

    fn finish_incomplete_member(
        &mut self,
        start: NodeStart,
        head: DeclarationHead,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        self.finish_node(start, |arena, pos, end| {
            arena.add_variable(
                INCOMPLETE_MEMBER,
                pos,
                end,
                VariableData {
                    attributes: head.attributes,
                    modifiers: head.modifiers,
                    type_annotation,
                    declarators: NodeList::default(),
                },
            )
        })
    }

    fn parse_constructor_declaration(
        &mut self,
        start: NodeStart,
        head: DeclarationHead,
    ) -> NodeIndex {
        let name = self.parse_expected(SyntaxKind::Identifier);
        let parameters = self.parse_parameter_list();
        let initializer = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_constructor_initializer()
        } else {
            NodeIndex::NONE
        };
        let body = self.parse_member_body();
        self.finish_node(start, |arena, pos, end| {
            arena.add_constructor(
                pos,
                end,
                ConstructorData {
                    attributes: head.attributes,
                    modifiers: head.modifiers,
                    name,
                    parameters,
                    initializer,
                    body,
                },
            )
        })
    }

    /// Parse `: base(...)` or `: this(...)`. The keyword and arguments may be
    /// missing while the user is still typing.
    fn parse_constructor_initializer(&mut self) -> NodeIndex {
        let start = self.start_node();
        let colon_token = self.parse_expected(SyntaxKind::ColonToken);
        let keyword = match self.token() {
            SyntaxKind::BaseKeyword | SyntaxKind::ThisKeyword => self.parse_token_node(),
            _ => {
                self.parse_error_at_current_token("expected 'base' or 'this'");
                NodeIndex::NONE
            }
        };
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_argument_list()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(start, |arena, pos, end| {
            arena.add_constructor_initializer(
                pos,
                end,
                ConstructorInitializerData {
                    colon_token,
                    keyword,
                    arguments,
                },
            )
        })
    }

    fn parse_method_declaration(
        &mut self,
        start: NodeStart,
        head: DeclarationHead,
        return_type: NodeIndex,
    ) -> NodeIndex {
        let name = self.parse_expected(SyntaxKind::Identifier);
        let parameters = self.parse_parameter_list();
        let body = self.parse_member_body();
        self.finish_node(start, |arena, pos, end| {
            arena.add_method(
                pos,
                end,
                MethodDeclData {
                    attributes: head.attributes,
                    modifiers: head.modifiers,
                    return_type,
                    name,
                    parameters,
                    body,
                },
            )
        })
    }

    /// Block body, `=> expr;`, or `;`. Returns NONE for `;` and for a missing body.
    fn parse_member_body(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::EqualsGreaterThanToken => {
                let clause = self.parse_arrow_expression_clause();
                self.parse_expected(SyntaxKind::SemicolonToken);
                clause
            }
            SyntaxKind::SemicolonToken => {
                self.parse_token_node();
                NodeIndex::NONE
            }
            _ => {
                self.parse_error_at_current_token("expected a body");
                NodeIndex::NONE
            }
        }
    }

    fn parse_property_declaration(
        &mut self,
        start: NodeStart,
        head: DeclarationHead,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        let name = self.parse_expected(SyntaxKind::Identifier);
        let mut accessors = Vec::new();
        let mut expression_body = NodeIndex::NONE;
        let mut initializer = NodeIndex::NONE;

        if self.is_token(SyntaxKind::EqualsGreaterThanToken) {
            expression_body = self.parse_arrow_expression_clause();
            self.parse_expected(SyntaxKind::SemicolonToken);
        } else {
            self.parse_expected(SyntaxKind::OpenBraceToken);
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = self.current;
                let accessor = self.parse_accessor_declaration();
                if accessor.is_some() {
                    accessors.push(accessor);
                }
                if self.current == before {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
            if self.parse_optional(SyntaxKind::EqualsToken).is_some() {
                initializer = self.parse_expression();
                self.parse_expected(SyntaxKind::SemicolonToken);
            }
        }

        self.finish_node(start, |arena, pos, end| {
            arena.add_property(
                pos,
                end,
                PropertyDeclData {
                    attributes: head.attributes,
                    modifiers: head.modifiers,
                    type_annotation,
                    name,
                    accessors: accessors.into(),
                    expression_body,
                    initializer,
                },
            )
        })
    }

    fn parse_accessor_declaration(&mut self) -> NodeIndex {
        let start = self.start_node();
        let modifiers = self.parse_modifiers();
        if !matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword) {
            if modifiers.is_some() {
                self.parse_error_at_current_token("expected 'get' or 'set'");
            }
            return NodeIndex::NONE;
        }
        let keyword = self.parse_token_node();
        let body = self.parse_member_body();
        self.finish_node(start, |arena, pos, end| {
            arena.add_accessor(
                pos,
                end,
                AccessorData {
                    modifiers,
                    keyword,
                    body,
                },
            )
        })
    }

    fn parse_field_declaration(
        &mut self,
        start: NodeStart,
        head: DeclarationHead,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        let declarators = self.parse_variable_declarators();
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(start, |arena, pos, end| {
            arena.add_variable(
                FIELD_DECLARATION,
                pos,
                end,
                VariableData {
                    attributes: head.attributes,
                    modifiers: head.modifiers,
                    type_annotation,
                    declarators,
                },
            )
        })
    }

    /// Parse `a = 1, b` after the declared type.
    pub(crate) fn parse_variable_declarators(&mut self) -> NodeList {
        let mut declarators = vec![self.parse_variable_declarator()];
        while self.parse_optional(SyntaxKind::CommaToken).is_some() {
            declarators.push(self.parse_variable_declarator());
        }
        declarators.into()
    }

    fn parse_variable_declarator(&mut self) -> NodeIndex {
        let start = self.start_node();
        let name = self.parse_expected(SyntaxKind::Identifier);
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken).is_some() {
            self.parse_expression()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(start, |arena, pos, end| {
            arena.add_declarator(pos, end, VariableDeclaratorData { name, initializer })
        })
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Parse `(int a, ref string b = "")`. An unterminated list ends at the
    /// first token that cannot continue it.
    fn parse_parameter_list(&mut self) -> NodeIndex {
        let start = self.start_node();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) && self.can_start_parameter() {
            parameters.push(self.parse_parameter());
            if self.parse_optional(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(start, |arena, pos, end| {
            arena.add_list_node(PARAMETER_LIST, pos, end, parameters.into())
        })
    }

    fn can_start_parameter(&self) -> bool {
        let kind = self.token();
        kind == SyntaxKind::OpenBracketToken || kind.is_parameter_modifier() || self.can_start_type()
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let start = self.start_node();
        let attributes = self.parse_attribute_lists();
        let modifiers = self.parse_parameter_modifiers();
        let type_annotation = if self.can_start_type() {
            self.parse_type()
        } else {
            self.parse_error_at_current_token("expected a parameter type");
            NodeIndex::NONE
        };
        let name = if type_annotation.is_some() {
            self.parse_expected(SyntaxKind::Identifier)
        } else {
            NodeIndex::NONE
        };
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken).is_some() {
            self.parse_expression()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(start, |arena, pos, end| {
            arena.add_parameter(
                pos,
                end,
                ParameterData {
                    attributes,
                    modifiers,
                    type_annotation,
                    name,
                    initializer,
                },
            )
        })
    }

    // =========================================================================
    // Types and names
    // =========================================================================

    pub(crate) fn can_start_type(&self) -> bool {
        let kind = self.token();
        kind == SyntaxKind::Identifier || kind.is_predefined_type()
    }

    /// Parse `int`, `Widget`, `Ns.Widget` or any of these followed by `[]`.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        let start = self.start_node();
        let name = if self.token().is_predefined_type() {
            self.parse_token_node()
        } else if self.is_token(SyntaxKind::Identifier) {
            let mut name = self.parse_token_node();
            while self.is_token(SyntaxKind::DotToken) && self.peek(1) == SyntaxKind::Identifier {
                self.parse_token_node();
                name = self.parse_token_node();
            }
            name
        } else {
            self.parse_error_at_current_token("expected a type");
            return NodeIndex::NONE;
        };
        let is_array = self.is_token(SyntaxKind::OpenBracketToken)
            && self.peek(1) == SyntaxKind::CloseBracketToken;
        if is_array {
            self.parse_token_node();
            self.parse_token_node();
        }
        self.finish_node(start, |arena, pos, end| {
            arena.add_type_reference(pos, end, TypeRefData { name, is_array })
        })
    }

    /// Parse `A.B.C`, returning the last identifier token.
    fn parse_qualified_name(&mut self) -> NodeIndex {
        let mut name = self.parse_expected(SyntaxKind::Identifier);
        while self.is_token(SyntaxKind::DotToken) && self.peek(1) == SyntaxKind::Identifier {
            self.parse_token_node();
            name = self.parse_token_node();
        }
        name
    }
}
