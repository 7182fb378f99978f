use super::*;
use crate::marker::split_caret_marker;
use sharp_parser::ParserState;
use sharp_semantic::{BoundModel, SemanticError};

fn parse_fixture(source: &str) -> (NodeArena, u32) {
    let (text, position) = split_caret_marker(source).expect("fixture has a caret marker");
    let mut parser = ParserState::new("test.cs", text);
    parser.parse_source_file();
    (parser.into_arena(), position)
}

/// Names of the inferred types at the caret.
fn inferred_names(source: &str) -> Vec<String> {
    let (arena, position) = parse_fixture(source);
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    let context = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    let mut names: Vec<String> = context
        .inferred_types
        .iter()
        .filter_map(|&id| model.type_name(id).map(str::to_string))
        .collect();
    names.sort();
    names
}

/// A model whose queries all fail.
struct FaultyModel;

impl SemanticModel for FaultyModel {
    fn enclosing_named_type(
        &self,
        _position: u32,
        _cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError> {
        Err(SemanticError::Fault("binding unavailable".to_string()))
    }

    fn resolve_type_reference(
        &self,
        _node: NodeIndex,
        _cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError> {
        Err(SemanticError::Fault("binding unavailable".to_string()))
    }

    fn type_name(&self, _id: TypeId) -> Option<&str> {
        None
    }
}

#[test]
fn test_statement_start_in_instance_method() {
    let (arena, position) = parse_fixture("class C { void M() { $$ } }");
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    let context = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    assert_eq!(context.position, position);
    assert_eq!(context.left_token, context.target_token);
    assert_eq!(context.target_kind(), Some(SyntaxKind::OpenBraceToken));
    assert!(context.is_instance_context);
    assert!(context.is_statement_context);
    assert!(!context.is_non_attribute_expression_context);
    assert!(context.inferred_types.is_empty());
    assert_eq!(
        arena.declaration_name(context.containing_type_declaration),
        Some("C")
    );
}

#[test]
fn test_partially_typed_keyword_uses_previous_token() {
    let (arena, position) = parse_fixture("class C { void M() { x = th$$ } }");
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    let context = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    assert_ne!(context.left_token, context.target_token);
    assert_eq!(context.target_kind(), Some(SyntaxKind::EqualsToken));
    assert!(context.is_non_attribute_expression_context);
}

#[test]
fn test_attribute_argument_is_not_a_non_attribute_expression() {
    let (arena, position) = parse_fixture("class C { [Obsolete($$)] void M() { } }");
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    let context = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    assert!(!context.is_non_attribute_expression_context);
    assert!(!context.is_statement_context);
}

#[test]
fn test_caret_at_start_of_file() {
    let (arena, position) = parse_fixture("$$class C { }");
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    let context = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    assert!(context.left_token.is_none());
    assert!(context.target_token.is_none());
    assert!(!context.is_instance_context);
    assert!(!context.is_statement_context);
    assert!(!context.is_non_attribute_expression_context);
    assert!(context.containing_type_declaration.is_none());
}

#[test]
fn test_inferred_type_of_local_and_field_declarators() {
    assert_eq!(
        inferred_names("class Widget { void M() { Widget w = $$ } }"),
        vec!["Widget"]
    );
    assert_eq!(inferred_names("class Widget { int count = $$; }"), vec!["int"]);
    assert!(inferred_names("class Widget { Gadget g = $$; }").is_empty());
    assert!(inferred_names("class Widget { Widget[] all = $$; }").is_empty());
}

#[test]
fn test_inferred_type_of_return_and_expression_bodies() {
    assert_eq!(
        inferred_names("class Widget { Widget Make() { return $$ } }"),
        vec!["Widget"]
    );
    assert_eq!(
        inferred_names("class Widget { Widget Make() => $$ }"),
        vec!["Widget"]
    );
    assert_eq!(
        inferred_names("class Widget { Widget Self => $$ }"),
        vec!["Widget"]
    );
    assert_eq!(
        inferred_names("class Widget { string Name { get => $$ } }"),
        vec!["string"]
    );
    assert_eq!(
        inferred_names("class Widget { Widget Self { get { return $$ } } }"),
        vec!["Widget"]
    );
    assert!(inferred_names("class Widget { void Run() { return $$ } }").is_empty());
}

#[test]
fn test_inferred_type_of_assignment_target() {
    assert_eq!(
        inferred_names("class Widget { Widget next; void M() { next = $$ } }"),
        vec!["Widget"]
    );
    assert_eq!(
        inferred_names("class Widget { Widget Next { get; set; } void M() { this.Next = $$ } }"),
        vec!["Widget"]
    );
    assert_eq!(
        inferred_names("class Widget { void M(int n) { n = $$ } }"),
        vec!["int"]
    );
    assert_eq!(
        inferred_names("class Widget { int n; void M() { Widget n = null; n = $$ } }"),
        vec!["Widget"]
    );
    assert!(inferred_names("class Widget { void M() { unknown = $$ } }").is_empty());
}

#[test]
fn test_inferred_type_of_property_initializer() {
    assert_eq!(
        inferred_names("class Widget { Widget Parent { get; } = $$ }"),
        vec!["Widget"]
    );
}

#[test]
fn test_no_inference_outside_expression_positions() {
    assert!(inferred_names("class Widget { void M() { $$ } }").is_empty());
    assert!(inferred_names("class Widget { void M() { Foo($$) } }").is_empty());
}

#[test]
fn test_cancelled_inference_leaves_types_empty() {
    let (arena, position) = parse_fixture("class Widget { void M() { Widget w = $$ } }");
    let model = BoundModel::bind(&arena, &CancellationToken::new()).unwrap();
    let cancel = CancellationToken::cancelled();
    let context = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    assert!(context.inferred_types.is_empty());
    assert!(context.is_instance_context);
}

#[test]
fn test_semantic_fault_fails_the_build() {
    let (arena, position) = parse_fixture("class Widget { void M() { Widget w = $$ } }");
    let model = FaultyModel;
    let result = SyntaxContext::build(&arena, &model, position, &CancellationToken::new());
    assert!(matches!(result, Err(CompletionError::Semantic { .. })));
}

#[test]
fn test_build_is_deterministic() {
    let (arena, position) = parse_fixture("class Widget { Widget Make() { return $$ } }");
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    let first = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    let second = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}
