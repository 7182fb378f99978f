use sharp_completion::{
    CompletionError, CompletionOutcome, KeywordCompletion, KeywordKind, RecommenderFault,
};

use super::args::OutputFormat;
use super::driver::CompletionRun;
use super::reporter::Reporter;

fn item(keyword: KeywordKind, preselect: bool) -> KeywordCompletion {
    KeywordCompletion {
        keyword,
        label: keyword.text().to_string(),
        preselect,
        sort_text: if preselect { "0" } else { "15" }.to_string(),
    }
}

fn run_with(outcome: CompletionOutcome) -> CompletionRun {
    CompletionRun {
        file_name: "Widget.cs".to_string(),
        position: 37,
        outcome,
        diagnostics: Vec::new(),
    }
}

#[test]
fn text_lists_one_keyword_per_line() {
    let run = run_with(CompletionOutcome {
        items: vec![item(KeywordKind::This, true), item(KeywordKind::Base, false)],
        ..CompletionOutcome::default()
    });
    let text = Reporter::new(false).render_text(&run);
    assert_eq!(text, "this     0 (preselected)\nbase     15");
}

#[test]
fn text_reports_empty_and_cancelled() {
    let empty = Reporter::new(false).render_text(&run_with(CompletionOutcome::default()));
    assert_eq!(empty, "no keywords at Widget.cs:37");

    let cancelled = Reporter::new(false).render_text(&run_with(CompletionOutcome {
        cancelled: true,
        ..CompletionOutcome::default()
    }));
    assert_eq!(cancelled, "completion cancelled");
}

#[test]
fn text_lists_faults_after_items() {
    let run = run_with(CompletionOutcome {
        items: vec![item(KeywordKind::Base, false)],
        faults: vec![RecommenderFault {
            keyword: KeywordKind::This,
            error: CompletionError::Semantic {
                message: "binding unavailable".to_string(),
            },
        }],
        cancelled: false,
    });
    let text = Reporter::new(false).render_text(&run);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "warning: this dropped: semantic model fault: binding unavailable"
    );
}

#[test]
fn json_is_the_serialized_outcome() {
    let run = run_with(CompletionOutcome {
        items: vec![item(KeywordKind::This, true)],
        ..CompletionOutcome::default()
    });
    let json = Reporter::new(false)
        .render(&run, OutputFormat::Json)
        .expect("json output");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["items"][0]["keyword"], "this");
    assert_eq!(value["items"][0]["preselect"], true);
    assert!(value.get("faults").is_none());
}
