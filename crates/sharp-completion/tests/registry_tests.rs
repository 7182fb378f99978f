use super::*;
use crate::marker::split_caret_marker;
use crate::recommenders::{BaseKeywordRecommender, ThisKeywordRecommender};
use sharp_parser::{NodeIndex, ParserState};
use sharp_semantic::{BoundModel, SemanticError, TypeId};

fn parse_fixture(source: &str) -> (NodeArena, u32) {
    let (text, position) = split_caret_marker(source).expect("fixture has a caret marker");
    let mut parser = ParserState::new("test.cs", text);
    parser.parse_source_file();
    (parser.into_arena(), position)
}

fn complete_with(
    registry: &RecommenderRegistry,
    source: &str,
    dispatch: DispatchMode,
) -> CompletionOutcome {
    let (arena, position) = parse_fixture(source);
    let cancel = CancellationToken::new();
    let model = BoundModel::bind(&arena, &cancel).unwrap();
    complete(
        registry,
        &arena,
        &model,
        position,
        &cancel,
        CompletionOptions { dispatch },
    )
    .unwrap()
}

fn complete_default(source: &str) -> CompletionOutcome {
    complete_with(&RecommenderRegistry::default(), source, DispatchMode::Parallel)
}

/// Answers type inference, then fails when asked for the enclosing type.
struct EnclosingFaultModel<'a> {
    inner: BoundModel<'a>,
}

impl SemanticModel for EnclosingFaultModel<'_> {
    fn enclosing_named_type(
        &self,
        _position: u32,
        _cancel: &CancellationToken,
    ) -> Result<Option<TypeId>, SemanticError> {
        Err(SemanticError::Fault("enclosing type unavailable".to_string()))
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

/// Stands in for `params` and always panics.
struct PanickingRecommender;

impl KeywordRecommender for PanickingRecommender {
    fn keyword(&self) -> KeywordKind {
        KeywordKind::Params
    }

    fn is_valid_context(
        &self,
        _position: u32,
        _context: &SyntaxContext<'_>,
        _cancel: &CancellationToken,
    ) -> Result<bool, CompletionError> {
        panic!("recommender exploded");
    }
}

/// Cancels the request as a side effect of being evaluated.
struct CancellingRecommender;

impl KeywordRecommender for CancellingRecommender {
    fn keyword(&self) -> KeywordKind {
        KeywordKind::Params
    }

    fn is_valid_context(
        &self,
        _position: u32,
        _context: &SyntaxContext<'_>,
        cancel: &CancellationToken,
    ) -> Result<bool, CompletionError> {
        cancel.cancel();
        Ok(true)
    }
}

#[test]
fn test_default_registry_order() {
    let registry = RecommenderRegistry::default();
    assert_eq!(registry.len(), KeywordKind::ALL.len());
    assert!(!registry.is_empty());
    assert_eq!(registry.keywords().collect::<Vec<_>>(), KeywordKind::ALL.to_vec());
    assert!(registry.get(KeywordKind::This).is_some());
    assert!(RecommenderRegistry::new().is_empty());
}

#[test]
fn test_register_replaces_in_place() {
    let mut registry = RecommenderRegistry::default();
    let previous = registry.register(Box::new(PanickingRecommender));
    assert!(previous.is_some());
    assert_eq!(registry.len(), KeywordKind::ALL.len());
    assert_eq!(registry.keywords().last(), Some(KeywordKind::Params));
}

#[test]
fn test_statement_start_suggests_this_and_base() {
    let outcome = complete_default("class C { void M() { $$ } }");
    assert_eq!(outcome.keywords(), vec![KeywordKind::This, KeywordKind::Base]);
    assert!(outcome.faults.is_empty());
    assert!(!outcome.cancelled);
    let this = outcome.item(KeywordKind::This).unwrap();
    assert_eq!(this.label, "this");
    assert!(!this.preselect);
    assert_eq!(this.sort_text, sort_priority::GLOBALS_OR_KEYWORDS);
}

#[test]
fn test_extension_receiver_suggests_this_and_modifiers() {
    let outcome = complete_default("static class C { static void M($$");
    assert_eq!(
        outcome.keywords(),
        vec![
            KeywordKind::This,
            KeywordKind::Ref,
            KeywordKind::Out,
            KeywordKind::Params
        ]
    );
}

#[test]
fn test_plain_static_method_parameter_omits_this() {
    let outcome = complete_default("class C { static void M($$");
    assert!(outcome.item(KeywordKind::This).is_none());
    assert!(outcome.item(KeywordKind::Params).is_some());
}

#[test]
fn test_preselected_items_sort_first() {
    let outcome = complete_default("class Widget { void M() { Widget w = $$ } }");
    assert_eq!(outcome.keywords(), vec![KeywordKind::This, KeywordKind::Base]);
    let this = &outcome.items[0];
    assert!(this.preselect);
    assert_eq!(this.sort_text, sort_priority::PRESELECTED);
    assert_eq!(outcome.items[1].sort_text, sort_priority::GLOBALS_OR_KEYWORDS);
}

#[test]
fn test_preselect_moves_item_ahead_of_registry_order() {
    let mut registry = RecommenderRegistry::new();
    registry.register(Box::new(BaseKeywordRecommender));
    registry.register(Box::new(ThisKeywordRecommender));
    let outcome = complete_with(
        &registry,
        "class Widget { void M() { Widget w = $$ } }",
        DispatchMode::Sequential,
    );
    assert_eq!(outcome.keywords(), vec![KeywordKind::This, KeywordKind::Base]);

    let outcome = complete_with(&registry, "class C { void M() { $$ } }", DispatchMode::Sequential);
    assert_eq!(outcome.keywords(), vec![KeywordKind::Base, KeywordKind::This]);
}

#[test]
fn test_sequential_and_parallel_agree() {
    let registry = RecommenderRegistry::default();
    let sources = [
        "class C { void M() { $$ } }",
        "class Goo { Goo() : $$ }",
        "class Goo { static Goo() : $$ }",
        "static class C { static void M($$",
        "class C { static void M($$",
        "class Widget { void M() { Widget w = $$ } }",
        "class C { void M() { Foo(a, $$) } }",
        "class C { $$ }",
    ];
    for source in sources {
        assert_eq!(
            complete_with(&registry, source, DispatchMode::Sequential),
            complete_with(&registry, source, DispatchMode::Parallel),
            "{source}"
        );
    }
}

#[test]
fn test_no_keywords_at_type_level() {
    let outcome = complete_default("class C { $$ }");
    assert!(outcome.items.is_empty());
    assert!(outcome.faults.is_empty());
}

#[test]
fn test_semantic_fault_drops_only_that_keyword() {
    let (arena, position) = parse_fixture("class Widget { void M() { Widget w = $$ } }");
    let cancel = CancellationToken::new();
    let model = EnclosingFaultModel {
        inner: BoundModel::bind(&arena, &cancel).unwrap(),
    };
    let outcome = complete(
        &RecommenderRegistry::default(),
        &arena,
        &model,
        position,
        &cancel,
        CompletionOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome.keywords(), vec![KeywordKind::Base]);
    assert_eq!(outcome.faults.len(), 1);
    assert_eq!(outcome.faults[0].keyword, KeywordKind::This);
    assert!(matches!(
        outcome.faults[0].error,
        CompletionError::Semantic { .. }
    ));
}

#[test]
fn test_panicking_recommender_is_isolated() {
    let mut registry = RecommenderRegistry::default();
    registry.register(Box::new(PanickingRecommender));
    for mode in [DispatchMode::Sequential, DispatchMode::Parallel] {
        let outcome = complete_with(&registry, "static class C { static void M($$", mode);
        assert_eq!(
            outcome.keywords(),
            vec![KeywordKind::This, KeywordKind::Ref, KeywordKind::Out]
        );
        assert_eq!(outcome.faults.len(), 1);
        match &outcome.faults[0].error {
            CompletionError::Panicked { keyword, message } => {
                assert_eq!(*keyword, KeywordKind::Params);
                assert!(message.contains("exploded"), "{message}");
            }
            other => panic!("unexpected fault: {other:?}"),
        }
    }
}

#[test]
fn test_cancelled_before_request() {
    let (arena, position) = parse_fixture("class C { void M() { $$ } }");
    let model = BoundModel::bind(&arena, &CancellationToken::new()).unwrap();
    let outcome = complete(
        &RecommenderRegistry::default(),
        &arena,
        &model,
        position,
        &CancellationToken::cancelled(),
        CompletionOptions::default(),
    )
    .unwrap();
    assert!(outcome.cancelled);
    assert!(outcome.items.is_empty());
}

#[test]
fn test_cancelled_during_dispatch_drops_items() {
    let mut registry = RecommenderRegistry::default();
    registry.register(Box::new(CancellingRecommender));
    let outcome = complete_with(
        &registry,
        "class C { void M() { $$ } }",
        DispatchMode::Sequential,
    );
    assert!(outcome.cancelled);
    assert!(outcome.items.is_empty());
}

#[test]
fn test_outcome_serializes_to_json() {
    let outcome = complete_default("class Widget { void M() { Widget w = $$ } }");
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "items": [
                { "keyword": "this", "label": "this", "preselect": true, "sort_text": "0" },
                { "keyword": "base", "label": "base", "preselect": false, "sort_text": "15" },
            ]
        })
    );
}

#[test]
fn test_fault_serializes_with_kind_tag() {
    let fault = RecommenderFault {
        keyword: KeywordKind::Params,
        error: CompletionError::Panicked {
            keyword: KeywordKind::Params,
            message: "boom".to_string(),
        },
    };
    let json = serde_json::to_value(&fault).unwrap();
    assert_eq!(json["keyword"], "params");
    assert_eq!(json["error"]["kind"], "panicked");
    assert_eq!(json["error"]["message"], "boom");
}

#[test]
fn test_options_default_to_parallel() {
    let options: CompletionOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options.dispatch, DispatchMode::Parallel);
    let options: CompletionOptions = serde_json::from_str(r#"{"dispatch":"sequential"}"#).unwrap();
    assert_eq!(options.dispatch, DispatchMode::Sequential);
}
