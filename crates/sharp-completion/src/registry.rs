//! Recommender registry and completion dispatch.
//!
//! The registry maps each keyword to its recommender in registration order.
//! A request builds one `SyntaxContext` and evaluates every recommender
//! against it, either on the rayon pool or on the calling thread. Each
//! evaluation is isolated: an error or panic in one recommender drops only
//! that keyword from the result.

use crate::context::SyntaxContext;
use crate::error::CompletionError;
use crate::recommenders::{KeywordKind, KeywordRecommender, KeywordVerdict, default_recommenders};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sharp_common::CancellationToken;
use sharp_parser::NodeArena;
use sharp_semantic::SemanticModel;
use std::panic::{self, AssertUnwindSafe};
use tracing::{Level, debug, span, warn};

/// Sort text categories. Lower strings appear first.
pub mod sort_priority {
    /// Preselected keywords.
    pub const PRESELECTED: &str = "0";
    /// Global variables and keywords.
    pub const GLOBALS_OR_KEYWORDS: &str = "15";
}

/// How the registry runs its recommenders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    Sequential,
    #[default]
    Parallel,
}

/// Options for a completion request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionOptions {
    pub dispatch: DispatchMode,
}

/// A keyword suggested at the caret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeywordCompletion {
    pub keyword: KeywordKind,
    /// The label to display in the completion list
    pub label: String,
    pub preselect: bool,
    /// See [`sort_priority`]
    pub sort_text: String,
}

impl KeywordCompletion {
    fn from_verdict(verdict: &KeywordVerdict) -> Self {
        let sort_text = if verdict.preselect {
            sort_priority::PRESELECTED
        } else {
            sort_priority::GLOBALS_OR_KEYWORDS
        };
        KeywordCompletion {
            keyword: verdict.keyword,
            label: verdict.keyword.text().to_string(),
            preselect: verdict.preselect,
            sort_text: sort_text.to_string(),
        }
    }
}

/// A recommender invocation that failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecommenderFault {
    pub keyword: KeywordKind,
    pub error: CompletionError,
}

/// Merged result of a completion request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompletionOutcome {
    /// Valid keywords, preselected first, otherwise in registry order
    pub items: Vec<KeywordCompletion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<RecommenderFault>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

impl CompletionOutcome {
    fn cancelled() -> Self {
        CompletionOutcome {
            cancelled: true,
            ..CompletionOutcome::default()
        }
    }

    /// The item for `keyword`, if it was suggested.
    pub fn item(&self, keyword: KeywordKind) -> Option<&KeywordCompletion> {
        self.items.iter().find(|item| item.keyword == keyword)
    }

    pub fn keywords(&self) -> Vec<KeywordKind> {
        self.items.iter().map(|item| item.keyword).collect()
    }
}

pub struct RecommenderRegistry {
    recommenders: IndexMap<KeywordKind, Box<dyn KeywordRecommender>>,
}

impl Default for RecommenderRegistry {
    fn default() -> Self {
        let mut registry = RecommenderRegistry::new();
        for recommender in default_recommenders() {
            registry.register(recommender);
        }
        registry
    }
}

impl RecommenderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        RecommenderRegistry {
            recommenders: IndexMap::new(),
        }
    }

    /// Add a recommender, replacing (and returning) any previous one for the
    /// same keyword. A replacement keeps the original position.
    pub fn register(
        &mut self,
        recommender: Box<dyn KeywordRecommender>,
    ) -> Option<Box<dyn KeywordRecommender>> {
        self.recommenders.insert(recommender.keyword(), recommender)
    }

    pub fn get(&self, keyword: KeywordKind) -> Option<&dyn KeywordRecommender> {
        self.recommenders.get(&keyword).map(|recommender| recommender.as_ref())
    }

    pub fn keywords(&self) -> impl Iterator<Item = KeywordKind> + '_ {
        self.recommenders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.recommenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommenders.is_empty()
    }

    /// Evaluate every recommender against `context` and merge the verdicts.
    pub fn dispatch(
        &self,
        context: &SyntaxContext<'_>,
        cancel: &CancellationToken,
        mode: DispatchMode,
    ) -> CompletionOutcome {
        let _span = span!(Level::DEBUG, "dispatch", position = context.position, ?mode).entered();

        if cancel.is_cancelled() {
            debug!("request cancelled before dispatch");
            return CompletionOutcome::cancelled();
        }

        let recommenders: Vec<&dyn KeywordRecommender> =
            self.recommenders.values().map(|r| r.as_ref()).collect();
        let results: Vec<(KeywordKind, Result<KeywordVerdict, CompletionError>)> = match mode {
            DispatchMode::Sequential => recommenders
                .iter()
                .map(|&recommender| evaluate_isolated(recommender, context, cancel))
                .collect(),
            DispatchMode::Parallel => recommenders
                .par_iter()
                .map(|&recommender| evaluate_isolated(recommender, context, cancel))
                .collect(),
        };

        let mut outcome = CompletionOutcome::default();
        for (keyword, result) in results {
            match result {
                Ok(verdict) if verdict.is_valid => {
                    outcome.items.push(KeywordCompletion::from_verdict(&verdict));
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(%keyword, %error, "keyword recommender failed");
                    outcome.faults.push(RecommenderFault { keyword, error });
                }
            }
        }
        // Stable: registry order is kept within each group.
        outcome.items.sort_by_key(|item| !item.preselect);

        if cancel.is_cancelled() {
            debug!("request cancelled during dispatch");
            outcome.items.clear();
            outcome.cancelled = true;
        }
        debug!(
            items = outcome.items.len(),
            faults = outcome.faults.len(),
            "dispatch finished"
        );
        outcome
    }
}

/// Run one recommender, turning a panic into a `CompletionError`.
fn evaluate_isolated(
    recommender: &dyn KeywordRecommender,
    context: &SyntaxContext<'_>,
    cancel: &CancellationToken,
) -> (KeywordKind, Result<KeywordVerdict, CompletionError>) {
    let keyword = recommender.keyword();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        recommender.evaluate(context.position, context, cancel)
    }))
    .unwrap_or_else(|payload| {
        Err(CompletionError::Panicked {
            keyword,
            message: panic_message(payload.as_ref()),
        })
    });
    (keyword, result)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Complete at `position`: build the context and dispatch.
///
/// Returns an empty, cancelled outcome if `cancel` fired before the request
/// started. A semantic fault while building the context fails the request.
pub fn complete(
    registry: &RecommenderRegistry,
    tree: &NodeArena,
    semantic_model: &dyn SemanticModel,
    position: u32,
    cancel: &CancellationToken,
    options: CompletionOptions,
) -> Result<CompletionOutcome, CompletionError> {
    if cancel.is_cancelled() {
        return Ok(CompletionOutcome::cancelled());
    }
    let context = SyntaxContext::build(tree, semantic_model, position, cancel)?;
    Ok(registry.dispatch(&context, cancel, options.dispatch))
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
