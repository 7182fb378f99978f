use super::this_keyword::{self, Rule};
use super::*;
use crate::marker::split_caret_marker;
use sharp_parser::{NodeArena, ParserState};
use sharp_semantic::{BoundModel, SemanticError, SemanticModel, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};

fn parse_fixture(source: &str) -> (NodeArena, u32) {
    let (text, position) = split_caret_marker(source).expect("fixture has a caret marker");
    let mut parser = ParserState::new("test.cs", text);
    parser.parse_source_file();
    (parser.into_arena(), position)
}

/// Build the context for `source` and hand it to `check`.
fn with_context<R>(source: &str, check: impl FnOnce(&SyntaxContext<'_>) -> R) -> R {
    let (arena, position) = parse_fixture(source);
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    let context = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    check(&context)
}

fn verdict(recommender: &dyn KeywordRecommender, source: &str) -> KeywordVerdict {
    with_context(source, |context| {
        recommender
            .evaluate(context.position, context, &CancellationToken::new())
            .unwrap()
    })
}

fn this_verdict(source: &str) -> KeywordVerdict {
    verdict(&ThisKeywordRecommender, source)
}

/// Forwards to a bound model, counting `enclosing_named_type` queries.
struct CountingModel<'a> {
    inner: BoundModel<'a>,
    enclosing_queries: AtomicUsize,
}

impl SemanticModel for CountingModel<'_> {
    fn enclosing_named_type(
        &self,
        position: u32,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError> {
        self.enclosing_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.enclosing_named_type(position, cancel)
    }

    fn resolve_type_reference(
        &self,
        node: NodeIndex,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError> {
        self.inner.resolve_type_reference(node, cancel)
    }

    fn type_name(&self, id: TypeId) -> Option<&str> {
        self.inner.type_name(id)
    }
}

/// Evaluate `this` at the caret and report how often the enclosing type was
/// queried.
fn count_enclosing_queries(source: &str, cancel: &CancellationToken) -> (KeywordVerdict, usize) {
    let (arena, position) = parse_fixture(source);
    let model = CountingModel {
        inner: BoundModel::bind(&arena, &CancellationToken::new()).unwrap(),
        enclosing_queries: AtomicUsize::new(0),
    };
    let context = SyntaxContext::build(&arena, &model, position, &CancellationToken::new()).unwrap();
    let verdict = ThisKeywordRecommender
        .evaluate(position, &context, cancel)
        .unwrap();
    (verdict, model.enclosing_queries.load(Ordering::SeqCst))
}

// =============================================================================
// `this`
// =============================================================================

#[test]
fn test_this_in_instance_method_body() {
    let verdict = this_verdict("class C { void M() { $$ } }");
    assert!(verdict.is_valid);
    assert!(!verdict.preselect);
    assert_eq!(verdict.keyword, KeywordKind::This);
}

#[test]
fn test_this_after_instance_constructor_colon() {
    assert!(this_verdict("class Goo { Goo() : $$ }").is_valid);
    assert!(this_verdict("struct Goo { Goo(int x) : $$ }").is_valid);
}

#[test]
fn test_this_not_after_static_constructor_colon() {
    assert!(!this_verdict("class Goo { static Goo() : $$ }").is_valid);
}

#[test]
fn test_this_as_extension_receiver() {
    assert!(this_verdict("static class C { static void M($$").is_valid);
    assert!(this_verdict("static class C { static void M($$) { } }").is_valid);
    assert!(this_verdict("static class C { static void M([In] $$").is_valid);
    assert!(this_verdict("public static class C { public static void M(th$$").is_valid);
}

#[test]
fn test_this_not_as_receiver_outside_static_class() {
    assert!(!this_verdict("class C { static void M($$").is_valid);
    assert!(!this_verdict("struct S { static void M($$").is_valid);
    assert!(!this_verdict("interface I { static void M($$").is_valid);
}

#[test]
fn test_this_not_as_receiver_of_instance_method_or_constructor() {
    assert!(!this_verdict("static class C { void M($$").is_valid);
    assert!(!this_verdict("static class C { static C($$").is_valid);
}

#[test]
fn test_this_not_on_second_parameter() {
    assert!(!this_verdict("static class C { static void M(int a, $$").is_valid);
    assert!(!this_verdict("static class C { static void M(int a, [In] $$").is_valid);
}

#[test]
fn test_this_in_struct_and_accessor_bodies() {
    assert!(this_verdict("struct S { void M() { $$ } }").is_valid);
    assert!(this_verdict("class C { int P { get { return $$ } } }").is_valid);
    assert!(this_verdict("class C { object o = $$; }").is_valid);
}

#[test]
fn test_this_not_in_static_or_type_level_positions() {
    let cases = [
        "class C { static void M() { $$ } }",
        "class C { static object o = $$; }",
        "class C { $$ }",
        "class C { void M() { } $$ }",
        "namespace N { $$ }",
        "$$",
        "class C { [Obsolete($$)] void M() { } }",
        "class C { void M() { x.$$ } }",
    ];
    for source in cases {
        assert!(!this_verdict(source).is_valid, "{source}");
    }
}

#[test]
fn test_this_preselected_for_enclosing_type() {
    let verdict = this_verdict("class Widget { void M() { Widget w = $$ } }");
    assert!(verdict.is_valid);
    assert!(verdict.preselect);
}

#[test]
fn test_this_preselected_when_nested_type_shadows_outer_name() {
    let verdict =
        this_verdict("class Widget { } class Outer { class Widget { void M() { Widget w = $$ } } }");
    assert!(verdict.is_valid);
    assert!(verdict.preselect);
}

#[test]
fn test_this_preselected_for_return_and_assignment() {
    let cases = [
        "class Widget { Widget Make() { return $$ } }",
        "class Widget { Widget Self => $$ }",
        "class Widget { Widget next; void M() { next = $$ } }",
        "class Widget { Widget Next { get; set; } void M() { this.Next = $$ } }",
    ];
    for source in cases {
        let verdict = this_verdict(source);
        assert!(verdict.is_valid, "{source}");
        assert!(verdict.preselect, "{source}");
    }
}

#[test]
fn test_this_not_preselected_for_other_types() {
    let cases = [
        "class Widget { int Count() { return $$ } }",
        "class Widget { void M() { object o = $$ } }",
        "class Outer { class Inner { Outer o = $$; } }",
    ];
    for source in cases {
        let verdict = this_verdict(source);
        assert!(verdict.is_valid, "{source}");
        assert!(!verdict.preselect, "{source}");
    }
}

#[test]
fn test_instance_rule_requires_instance_context() {
    let (arena, position) = parse_fixture("class C { void M() { $$ } }");
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    let mut context = SyntaxContext::build(&arena, &model, position, &cancel).unwrap();
    assert!(this_keyword::instance_expression_or_statement(position, &context, &cancel));

    context.is_instance_context = false;
    assert!(!this_keyword::instance_expression_or_statement(position, &context, &cancel));
    assert!(!ThisKeywordRecommender
        .is_valid_context(position, &context, &cancel)
        .unwrap());
}

#[test]
fn test_rule_order_does_not_change_validity() {
    const ORDERS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let sources = [
        "class C { void M() { $$ } }",
        "class Goo { Goo() : $$ }",
        "class Goo { static Goo() : $$ }",
        "static class C { static void M($$",
        "class C { static void M($$",
        "class Widget { void M() { Widget w = $$ } }",
        "class C { $$ }",
    ];
    let cancel = CancellationToken::new();
    for source in sources {
        with_context(source, |context| {
            let expected = ThisKeywordRecommender
                .is_valid_context(context.position, context, &cancel)
                .unwrap();
            for order in ORDERS {
                let rules: Vec<Rule> = order.iter().map(|&i| this_keyword::RULES[i]).collect();
                let any = rules.iter().any(|rule| rule(context.position, context, &cancel));
                assert_eq!(any, expected, "{source} with order {order:?}");
            }
        });
    }
}

#[test]
fn test_this_is_idempotent() {
    let source = "class Widget { void M() { Widget w = $$ } }";
    with_context(source, |context| {
        let cancel = CancellationToken::new();
        let first = ThisKeywordRecommender
            .evaluate(context.position, context, &cancel)
            .unwrap();
        let second = ThisKeywordRecommender
            .evaluate(context.position, context, &cancel)
            .unwrap();
        assert_eq!(first, second);
    });
}

#[test]
fn test_this_cancelled_is_not_valid() {
    with_context("class C { void M() { $$ } }", |context| {
        let cancel = CancellationToken::cancelled();
        let verdict = ThisKeywordRecommender
            .evaluate(context.position, context, &cancel)
            .unwrap();
        assert!(!verdict.is_valid);
        assert!(!verdict.preselect);
    });
}

#[test]
fn test_preselect_queries_model_only_when_needed() {
    let cancel = CancellationToken::new();

    // Valid with an expected type: one query.
    let (verdict, queries) =
        count_enclosing_queries("class Widget { void M() { Widget w = $$ } }", &cancel);
    assert!(verdict.preselect);
    assert_eq!(queries, 1);

    // Valid, nothing inferred.
    let (verdict, queries) = count_enclosing_queries("class Widget { void M() { $$ } }", &cancel);
    assert!(verdict.is_valid);
    assert_eq!(queries, 0);

    // Invalid, even though a type was inferred.
    let (verdict, queries) =
        count_enclosing_queries("class Widget { static void M() { Widget w = $$ } }", &cancel);
    assert!(!verdict.is_valid);
    assert_eq!(queries, 0);

    // Cancelled.
    let (verdict, queries) = count_enclosing_queries(
        "class Widget { void M() { Widget w = $$ } }",
        &CancellationToken::cancelled(),
    );
    assert!(!verdict.is_valid);
    assert_eq!(queries, 0);
}

// =============================================================================
// `base`
// =============================================================================

#[test]
fn test_base_positions() {
    let cases = [
        ("class C { void M() { $$ } }", true),
        ("class C { void M() { x = $$ } }", true),
        ("class C { C() : $$ }", true),
        ("struct S { S(int x) : $$ }", false),
        ("class C { static C() : $$ }", false),
        ("class C { static void M() { $$ } }", false),
        ("static class C { static void M($$", false),
        ("class C { $$ }", false),
    ];
    for (source, expected) in cases {
        assert_eq!(verdict(&BaseKeywordRecommender, source).is_valid, expected, "{source}");
    }
}

#[test]
fn test_base_never_preselected() {
    let verdict = verdict(
        &BaseKeywordRecommender,
        "class Widget { void M() { Widget w = $$ } }",
    );
    assert!(verdict.is_valid);
    assert!(!verdict.preselect);
}

// =============================================================================
// Parameter modifiers
// =============================================================================

#[test]
fn test_parameter_modifiers_in_parameter_lists() {
    for keyword in [KeywordKind::Ref, KeywordKind::Out, KeywordKind::Params] {
        let recommender = ParameterModifierRecommender::new(keyword);
        assert!(verdict(&recommender, "class C { void M($$").is_valid, "{keyword}");
        assert!(verdict(&recommender, "class C { void M(int a, $$").is_valid, "{keyword}");
        assert!(verdict(&recommender, "class C { C([In] $$) { } }").is_valid, "{keyword}");
        assert!(!verdict(&recommender, "class C { void M() { $$ } }").is_valid, "{keyword}");
    }
}

#[test]
fn test_ref_and_out_in_argument_lists() {
    let source = "class C { void M() { Foo(a, $$) } }";
    assert!(verdict(&ParameterModifierRecommender::new(KeywordKind::Ref), source).is_valid);
    assert!(verdict(&ParameterModifierRecommender::new(KeywordKind::Out), source).is_valid);
    assert!(!verdict(&ParameterModifierRecommender::new(KeywordKind::Params), source).is_valid);

    let attribute = "class C { [Obsolete($$)] void M() { } }";
    assert!(!verdict(&ParameterModifierRecommender::new(KeywordKind::Ref), attribute).is_valid);
}

// =============================================================================
// Keyword kinds
// =============================================================================

#[test]
fn test_keyword_kind_text_matches_syntax_kind() {
    for keyword in KeywordKind::ALL {
        assert_eq!(keyword.to_string(), keyword.text());
        assert_eq!(
            sharp_scanner::text_to_keyword(keyword.text()),
            Some(keyword.syntax_kind())
        );
    }
}

#[test]
fn test_default_recommenders_follow_keyword_order() {
    let keywords: Vec<KeywordKind> = default_recommenders()
        .iter()
        .map(|recommender| recommender.keyword())
        .collect();
    assert_eq!(keywords, KeywordKind::ALL.to_vec());
}
