//! One completion request from the command line: read, parse, bind, complete.

use anyhow::{Context, Result, anyhow, bail};
use sharp_common::CancellationToken;
use sharp_completion::{
    CompletionOptions, CompletionOutcome, RecommenderRegistry, complete, split_caret_marker,
};
use sharp_parser::{ParseDiagnostic, ParserState};
use sharp_semantic::BoundModel;
use tracing::{Level, debug, span, warn};

use super::args::CliArgs;

/// Result of one completion request.
#[derive(Debug)]
pub struct CompletionRun {
    pub file_name: String,
    /// Caret offset in the text that was parsed (marker removed)
    pub position: u32,
    pub outcome: CompletionOutcome,
    pub diagnostics: Vec<ParseDiagnostic>,
}

pub fn run(args: &CliArgs) -> Result<CompletionRun> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args.file.display().to_string();
    complete_source(
        &file_name,
        &source,
        args.position,
        args.completion_options(),
        &CancellationToken::new(),
    )
}

/// Complete in `source` at `position`, or at its `$$` marker when no
/// position is given.
pub fn complete_source(
    file_name: &str,
    source: &str,
    position: Option<u32>,
    options: CompletionOptions,
    cancel: &CancellationToken,
) -> Result<CompletionRun> {
    let _span = span!(Level::DEBUG, "complete_source", file_name).entered();

    let (text, position) = resolve_caret(source, position)?;
    let mut parser = ParserState::new(file_name, text);
    parser.parse_source_file();
    let diagnostics = parser.get_diagnostics().to_vec();
    for diagnostic in &diagnostics {
        warn!(
            start = diagnostic.span.start,
            end = diagnostic.span.end,
            "{}",
            diagnostic.message
        );
    }
    let arena = parser.into_arena();

    let model = BoundModel::bind(&arena, cancel).context("failed to bind declarations")?;
    let registry = RecommenderRegistry::default();
    let outcome = complete(&registry, &arena, &model, position, cancel, options)
        .with_context(|| format!("completion failed at offset {position}"))?;
    debug!(items = outcome.items.len(), "completion finished");

    Ok(CompletionRun {
        file_name: file_name.to_string(),
        position,
        outcome,
        diagnostics,
    })
}

/// The text to parse and the caret offset within it.
fn resolve_caret(source: &str, position: Option<u32>) -> Result<(String, u32)> {
    match position {
        Some(position) => {
            let offset = usize::try_from(position)?;
            if offset > source.len() {
                bail!(
                    "position {position} is past the end of the file ({} bytes)",
                    source.len()
                );
            }
            if !source.is_char_boundary(offset) {
                bail!("position {position} is not on a character boundary");
            }
            Ok((source.to_string(), position))
        }
        None => split_caret_marker(source)
            .ok_or_else(|| anyhow!("no --position given and no `$$` caret marker in the file")),
    }
}
